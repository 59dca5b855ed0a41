use crate::cli::RecipesCommands;
use crate::config;
use crate::error::{Result, SousChefError};
use crate::recipe::{details_embed, summary_embed, RecipeCache};
use crate::ui;
use std::path::Path;

/// Run recipes subcommands
pub fn run_recipes(command: RecipesCommands, custom: Option<&Path>) -> Result<()> {
    let config = config::load_config(custom)?;
    let cache = RecipeCache::new(config::recipe_cache_dir(&config)?);

    match command {
        RecipesCommands::List { json } => list_recipes(&cache, json),
        RecipesCommands::Show { dish, json } => show_recipe(&cache, &dish, json),
        RecipesCommands::Remove { dish } => remove_recipe(&cache, &dish),
        RecipesCommands::Path => {
            println!("{}", cache.dir().display());
            Ok(())
        }
    }
}

fn list_recipes(cache: &RecipeCache, json_output: bool) -> Result<()> {
    let entries = cache.list()?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        ui::print_info("No cached recipes");
        return Ok(());
    }

    println!("{:<40} {:<18} {:>5} {:>5}", "DISH", "CACHED", "INGR", "STEPS");
    println!("{}", "-".repeat(72));
    for entry in entries {
        println!(
            "{:<40} {:<18} {:>5} {:>5}",
            truncate(&entry.recipe.dish_name, 38),
            entry.cached_at.format("%Y-%m-%d %H:%M"),
            entry.recipe.ingredients.len(),
            entry.recipe.instructions.len()
        );
    }

    Ok(())
}

fn show_recipe(cache: &RecipeCache, dish: &str, json_output: bool) -> Result<()> {
    let record = cache
        .load(dish)
        .ok_or_else(|| SousChefError::RecipeNotFound(dish.to_string()))?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        ui::print_embed(&summary_embed(&record));
        ui::print_embed(&details_embed(&record));
    }
    Ok(())
}

fn remove_recipe(cache: &RecipeCache, dish: &str) -> Result<()> {
    if !cache.remove(dish)? {
        return Err(SousChefError::RecipeNotFound(dish.to_string()));
    }
    ui::print_success(&format!("Removed '{}' from the cache", dish));
    Ok(())
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
