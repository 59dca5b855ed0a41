mod config_cmd;
mod init;
mod kitchen;
mod recipes;
mod serve;
mod shelf_cmd;

pub use config_cmd::run_config;
pub use init::run_init;
pub use kitchen::{run_ask, run_cook, run_suggest};
pub use recipes::run_recipes;
pub use serve::run_bot;
pub use shelf_cmd::run_shelf;

use crate::chef::SousChef;
use crate::config::{self, Config};
use crate::error::Result;
use crate::openai::OpenAiProvider;
use crate::recipe::RecipeCache;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "souschef")]
#[command(author, version, about = "A Discord sous chef backed by an OpenAI-compatible API")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (can repeat: -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log format: text (default) or json
    #[arg(long, value_name = "FORMAT", global = true)]
    pub log_format: Option<String>,

    /// Use alternate config file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Connect to Discord and serve slash commands
    Run,

    /// Create a config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,

        /// Command that prints the Discord bot token
        #[arg(long, value_name = "COMMAND")]
        token_command: Option<String>,

        /// Command that prints the OpenAI API key
        #[arg(long, value_name = "COMMAND")]
        api_key_command: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Inspect the recipe cache
    Recipes {
        #[command(subcommand)]
        command: RecipesCommands,
    },

    /// Show a user's saved, favorite and liked recipes
    Shelf {
        /// Discord user ID
        user_id: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Suggest five dishes that use an ingredient
    Suggest {
        /// Ingredient or list of ingredients
        ingredient: String,

        /// Ingredients to exclude
        #[arg(long)]
        exclude: Option<String>,
    },

    /// Get a recipe, from the cache if possible
    Cook {
        /// Name of the dish
        dish: String,

        /// Number of servings
        #[arg(long, default_value = "1")]
        servings: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask a culinary question
    Ask {
        /// The question
        query: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show config (secret commands redacted)
    Show,

    /// Open config in $EDITOR
    Edit,

    /// Validate config file
    Validate,

    /// Print config file path
    Path,
}

#[derive(Subcommand)]
pub enum RecipesCommands {
    /// List cached recipes
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a cached recipe
    Show {
        /// Exact dish name
        dish: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove a cached recipe
    Remove {
        /// Exact dish name
        dish: String,
    },

    /// Print the cache directory
    Path,
}

/// Build the cooking service from config
fn build_chef(config: &Config) -> Result<SousChef> {
    let provider = OpenAiProvider::from_config(&config.openai)?;
    let cache = RecipeCache::new(config::recipe_cache_dir(config)?);
    Ok(SousChef::new(Arc::new(provider), cache))
}
