mod types;

pub use types::*;

use crate::error::{Result, SousChefError};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Get the XDG-compliant config directory
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", "souschef")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| SousChefError::Config("Could not determine config directory".to_string()))
}

/// Get the XDG-compliant data directory
pub fn data_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", "souschef")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| SousChefError::Config("Could not determine data directory".to_string()))
}

/// Get the config file path, honouring an explicit override
pub fn config_path(custom: Option<&Path>) -> Result<PathBuf> {
    match custom {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(config_dir()?.join("config.toml")),
    }
}

/// Get the recipe cache directory
pub fn recipe_cache_dir(config: &Config) -> Result<PathBuf> {
    match config.settings.cache_dir {
        Some(ref dir) => Ok(dir.clone()),
        None => Ok(data_dir()?.join("recipes")),
    }
}

/// Get the directory holding per-user shelves
pub fn shelf_dir() -> Result<PathBuf> {
    Ok(data_dir()?.join("shelves"))
}

/// Load config from the default location or an override
pub fn load_config(custom: Option<&Path>) -> Result<Config> {
    let path = config_path(custom)?;
    load_config_from(&path)
}

/// Load config from a specific path
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(SousChefError::ConfigNotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Save config to a specific path
pub fn save_config_to(config: &Config, path: &Path) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

/// Execute a secret command and return its trimmed stdout
pub fn run_secret_command(command: &str) -> Result<String> {
    if command.trim().is_empty() {
        return Err(SousChefError::SecretCommand(
            "Secret command not configured".to_string(),
        ));
    }

    let output = if cfg!(target_os = "windows") {
        Command::new("cmd").args(["/C", command]).output()
    } else {
        Command::new("sh").args(["-c", command]).output()
    };

    match output {
        Ok(output) => {
            if output.status.success() {
                let secret = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if secret.is_empty() {
                    Err(SousChefError::SecretCommand(
                        "Secret command returned empty output".to_string(),
                    ))
                } else {
                    Ok(secret)
                }
            } else {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(SousChefError::SecretCommand(format!(
                    "Secret command failed: {}",
                    stderr.trim()
                )))
            }
        }
        Err(e) => Err(SousChefError::SecretCommand(format!(
            "Failed to execute secret command: {}",
            e
        ))),
    }
}

/// Redact sensitive information from config for display
pub fn redact_config(config: &Config) -> Config {
    let mut redacted = config.clone();
    redacted.discord.token_command = "[REDACTED]".to_string();
    redacted.openai.api_key_command = "[REDACTED]".to_string();
    redacted
}
