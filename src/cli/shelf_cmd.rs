use crate::config;
use crate::error::Result;
use crate::shelf::{ShelfList, ShelfStore};
use crate::ui;
use console::style;

/// Print one user's shelf
pub fn run_shelf(user_id: u64, json_output: bool) -> Result<()> {
    let store = ShelfStore::new(config::shelf_dir()?);
    let shelf = store.load(user_id)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&shelf)?);
        return Ok(());
    }

    if shelf.is_empty() {
        ui::print_info(&format!("User {} has not kept any recipes", user_id));
        return Ok(());
    }

    for list in [ShelfList::Saved, ShelfList::Favorites, ShelfList::Liked] {
        let dishes = shelf.list(list);
        if dishes.is_empty() {
            continue;
        }
        println!("{} ({})", style(list).bold(), dishes.len());
        for dish in dishes {
            println!("  {}", dish);
        }
    }

    Ok(())
}
