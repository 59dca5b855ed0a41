mod bot;
mod chef;
mod cli;
mod config;
mod error;
mod lock;
mod menu;
mod openai;
mod recipe;
mod shelf;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};
use config::{LogFormat, Settings};
use error::{ExitStatus, SousChefError};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    ui::set_quiet_mode(cli.quiet);

    // Config may not exist yet (e.g. before `init`), so fall back to defaults
    let settings = config::load_config(cli.config.as_deref())
        .map(|c| c.settings)
        .unwrap_or_default();
    setup_logging(cli.verbose, cli.quiet, cli.log_format.as_deref(), &settings);

    match run_command(cli).await {
        Ok(status) => status.into(),
        Err(e) => {
            ui::print_error(&e.to_string());
            e.exit_status().into()
        }
    }
}

async fn run_command(cli: Cli) -> Result<ExitStatus, SousChefError> {
    let custom = cli.config.as_deref();

    match cli.command {
        Commands::Run => cli::run_bot(custom).await?,

        Commands::Init {
            force,
            token_command,
            api_key_command,
        } => cli::run_init(force, token_command, api_key_command, custom)?,

        Commands::Config { command } => cli::run_config(command, custom)?,

        Commands::Recipes { command } => cli::run_recipes(command, custom)?,

        Commands::Shelf { user_id, json } => cli::run_shelf(user_id, json)?,

        Commands::Suggest { ingredient, exclude } => {
            cli::run_suggest(ingredient, exclude, custom).await?
        }

        Commands::Cook {
            dish,
            servings,
            json,
        } => cli::run_cook(dish, servings, json, custom).await?,

        Commands::Ask { query } => cli::run_ask(query, custom).await?,
    }

    Ok(ExitStatus::Success)
}

fn setup_logging(verbose: u8, quiet: bool, format: Option<&str>, settings: &Settings) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => settings.log_level.as_filter(),
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let json = match format {
        Some(f) => f.eq_ignore_ascii_case("json"),
        None => settings.log_format == LogFormat::Json,
    };

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().without_time().with_target(false))
            .init();
    }
}
