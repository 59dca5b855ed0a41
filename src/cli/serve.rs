use super::build_chef;
use crate::bot::{self, Data};
use crate::config;
use crate::error::{Result, SousChefError};
use crate::shelf::ShelfStore;
use crate::ui;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Start the Discord bot and block until it disconnects
pub async fn run_bot(custom: Option<&Path>) -> Result<()> {
    let config = config::load_config(custom)?;
    if let Err(errors) = config.validate() {
        return Err(SousChefError::ConfigInvalid(errors.join("; ")));
    }

    let token = config::run_secret_command(&config.discord.token_command)?;
    let chef = build_chef(&config)?;
    let shelves = ShelfStore::new(config::shelf_dir()?);

    info!(
        model = %config.openai.model,
        cache = %chef.cache().dir().display(),
        "Starting Sous Chef"
    );
    ui::print_info("Connecting to Discord...");

    let data = Data {
        chef: Arc::new(chef),
        shelves: Arc::new(shelves),
        reaction_timeout: Duration::from_secs(config.discord.reaction_timeout_seconds),
    };
    bot::run(token, data).await
}
