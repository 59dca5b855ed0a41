use crate::config::{self, Config};
use crate::error::{Result, SousChefError};
use crate::ui;
use std::path::Path;

const DEFAULT_TOKEN_COMMAND: &str = "echo $DISCORD_TOKEN";
const DEFAULT_API_KEY_COMMAND: &str = "echo $OPENAI_API_KEY";

/// Run the init command
pub fn run_init(
    force: bool,
    token_command: Option<String>,
    api_key_command: Option<String>,
    custom: Option<&Path>,
) -> Result<()> {
    init_config(force, token_command, api_key_command, custom, ui::is_interactive())
}

fn init_config(
    force: bool,
    token_command: Option<String>,
    api_key_command: Option<String>,
    custom: Option<&Path>,
    interactive: bool,
) -> Result<()> {
    let config_path = config::config_path(custom)?;

    if !may_overwrite(config_path.exists(), force, interactive)? {
        ui::print_warning(&format!(
            "Config file already exists at {}",
            config_path.display()
        ));
        ui::print_info("Use --force to overwrite");
        return Ok(());
    }

    let token_command = resolve_command(
        token_command,
        interactive,
        "Command that prints the Discord bot token:",
        DEFAULT_TOKEN_COMMAND,
    )?;
    let api_key_command = resolve_command(
        api_key_command,
        interactive,
        "Command that prints the OpenAI API key:",
        DEFAULT_API_KEY_COMMAND,
    )?;

    let config = Config::default_with_commands(&token_command, &api_key_command);
    if let Err(errors) = config.validate() {
        return Err(SousChefError::ConfigInvalid(errors.join("; ")));
    }

    config::save_config_to(&config, &config_path)?;

    ui::print_success(&format!(
        "Created config file at {}",
        config_path.display()
    ));
    ui::print_info("Run `souschef config validate` to check that both secret commands work");

    Ok(())
}

/// `--force` overwrites silently; otherwise an interactive user is asked
fn may_overwrite(exists: bool, force: bool, interactive: bool) -> Result<bool> {
    if !exists || force {
        return Ok(true);
    }
    if interactive {
        return ui::prompt_confirm("Config file already exists. Overwrite it?", false);
    }
    Ok(false)
}

fn resolve_command(
    given: Option<String>,
    interactive: bool,
    message: &str,
    default: &str,
) -> Result<String> {
    match given {
        Some(command) => Ok(command),
        None if interactive => ui::prompt_text_with_default(message, default),
        None => Ok(default.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_explicit_commands_win() {
        let command = resolve_command(Some("pass show discord".to_string()), false, "", "x").unwrap();
        assert_eq!(command, "pass show discord");
    }

    #[test]
    fn test_non_interactive_uses_default() {
        let command = resolve_command(None, false, "", DEFAULT_TOKEN_COMMAND).unwrap();
        assert_eq!(command, DEFAULT_TOKEN_COMMAND);
    }

    #[test]
    fn test_init_writes_config_and_respects_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        init_config(
            false,
            Some("echo token".to_string()),
            Some("echo key".to_string()),
            Some(&path),
            false,
        )
        .unwrap();
        let written = config::load_config_from(&path).unwrap();
        assert_eq!(written.discord.token_command, "echo token");
        assert_eq!(written.openai.api_key_command, "echo key");

        // Without --force the existing file is kept
        init_config(
            false,
            Some("echo other".to_string()),
            Some("echo other".to_string()),
            Some(&path),
            false,
        )
        .unwrap();
        let kept = config::load_config_from(&path).unwrap();
        assert_eq!(kept.discord.token_command, "echo token");

        // --force replaces it without asking, even when interactive
        init_config(
            true,
            Some("echo forced".to_string()),
            Some("echo forced".to_string()),
            Some(&path),
            true,
        )
        .unwrap();
        let forced = config::load_config_from(&path).unwrap();
        assert_eq!(forced.discord.token_command, "echo forced");
    }

    #[test]
    fn test_may_overwrite() {
        assert!(may_overwrite(false, false, false).unwrap());
        assert!(may_overwrite(true, true, true).unwrap());
        assert!(may_overwrite(true, true, false).unwrap());
        assert!(!may_overwrite(true, false, false).unwrap());
    }
}
