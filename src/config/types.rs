use crate::menu::MAX_MENU_TIMEOUT;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub discord: DiscordConfig,
    pub openai: OpenAiConfig,
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// Command to execute to retrieve the bot token
    pub token_command: String,
    #[serde(default = "default_reaction_timeout")]
    pub reaction_timeout_seconds: u64,
}

fn default_reaction_timeout() -> u64 {
    60
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Command to execute to retrieve the API key
    pub api_key_command: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_timeout() -> u64 {
    60
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
    /// Overrides the default recipe cache directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            log_level: default_log_level(),
            log_format: default_log_format(),
            cache_dir: None,
        }
    }
}

fn default_log_level() -> LogLevel {
    LogLevel::Normal
}

fn default_log_format() -> LogFormat {
    LogFormat::Text
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl LogLevel {
    /// The tracing filter directive for this level
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Quiet => "error",
            LogLevel::Normal => "info",
            LogLevel::Verbose => "debug",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl Config {
    /// Create a default config reading secrets from the environment
    pub fn default_with_commands(token_command: &str, api_key_command: &str) -> Self {
        Config {
            discord: DiscordConfig {
                token_command: token_command.to_string(),
                reaction_timeout_seconds: default_reaction_timeout(),
            },
            openai: OpenAiConfig {
                api_key_command: api_key_command.to_string(),
                base_url: default_base_url(),
                model: default_model(),
                timeout_seconds: default_timeout(),
            },
            settings: Settings::default(),
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<Vec<String>, Vec<String>> {
        let mut warnings = Vec::new();
        let mut errors = Vec::new();

        if self.discord.token_command.trim().is_empty() {
            errors.push("Discord token_command is required".to_string());
        }
        if self.discord.reaction_timeout_seconds == 0 {
            errors.push("Discord reaction_timeout_seconds must be greater than zero".to_string());
        } else if self.discord.reaction_timeout_seconds > MAX_MENU_TIMEOUT.as_secs() {
            errors.push(format!(
                "Discord reaction_timeout_seconds of {} outlives the interaction token (max {})",
                self.discord.reaction_timeout_seconds,
                MAX_MENU_TIMEOUT.as_secs()
            ));
        }

        if self.openai.api_key_command.trim().is_empty() {
            errors.push("OpenAI api_key_command is required".to_string());
        }
        if self.openai.model.trim().is_empty() {
            errors.push("OpenAI model is required".to_string());
        }
        if self.openai.timeout_seconds == 0 {
            errors.push("OpenAI timeout_seconds must be greater than zero".to_string());
        }
        match url::Url::parse(&self.openai.base_url) {
            Ok(url) if url.scheme() == "https" => {}
            Ok(url) if url.scheme() == "http" => {
                warnings.push(format!("OpenAI base_url uses plain http: {}", url));
            }
            Ok(url) => errors.push(format!("OpenAI base_url must be http(s): {}", url)),
            Err(e) => errors.push(format!("OpenAI base_url is invalid: {}", e)),
        }

        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(errors)
        }
    }
}
