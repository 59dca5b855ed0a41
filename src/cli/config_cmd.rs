use crate::cli::ConfigCommands;
use crate::config;
use crate::error::{Result, SousChefError};
use crate::ui;
use std::path::Path;
use std::process::Command;

/// Run config subcommands
pub fn run_config(command: ConfigCommands, custom: Option<&Path>) -> Result<()> {
    match command {
        ConfigCommands::Show => show_config(custom),
        ConfigCommands::Edit => edit_config(custom),
        ConfigCommands::Validate => validate_config(custom),
        ConfigCommands::Path => print_path(custom),
    }
}

fn show_config(custom: Option<&Path>) -> Result<()> {
    let config = config::load_config(custom)?;
    let redacted = config::redact_config(&config);
    let content = toml::to_string_pretty(&redacted)?;
    println!("{}", content);
    Ok(())
}

fn edit_config(custom: Option<&Path>) -> Result<()> {
    let path = config::config_path(custom)?;

    if !path.exists() {
        return Err(SousChefError::ConfigNotFound(path.display().to_string()));
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

    let status = Command::new(&editor)
        .arg(&path)
        .status()
        .map_err(|e| SousChefError::Config(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(SousChefError::Config(format!("Editor exited with status {}", status)));
    }

    // Validate the config after editing
    match config::load_config_from(&path) {
        Ok(config) => {
            if let Err(errors) = config.validate() {
                ui::print_warning("Config has validation errors:");
                for error in errors {
                    ui::print_error(&format!("  {}", error));
                }
            } else {
                ui::print_success("Config is valid");
            }
        }
        Err(e) => {
            ui::print_error(&format!("Config has syntax errors: {}", e));
        }
    }

    Ok(())
}

fn validate_config(custom: Option<&Path>) -> Result<()> {
    let config = config::load_config(custom)?;

    match config.validate() {
        Ok(warnings) => {
            for warning in warnings {
                ui::print_warning(&warning);
            }
            ui::print_success("Config is valid");
        }
        Err(errors) => {
            for error in errors {
                ui::print_error(&error);
            }
            return Err(SousChefError::ConfigInvalid("Config validation failed".to_string()));
        }
    }

    // Secrets must resolve, but are never printed
    config::run_secret_command(&config.discord.token_command)?;
    ui::print_success("Discord token command works");
    config::run_secret_command(&config.openai.api_key_command)?;
    ui::print_success("OpenAI API key command works");

    Ok(())
}

fn print_path(custom: Option<&Path>) -> Result<()> {
    let path = config::config_path(custom)?;
    println!("{}", path.display());
    Ok(())
}
