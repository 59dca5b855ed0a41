use std::process::ExitCode;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    Success = 0,
    GeneralError = 1,
    CompletionFailed = 2,
    Timeout = 3,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

#[derive(Error, Debug)]
pub enum SousChefError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file not found at {0}")]
    ConfigNotFound(String),

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("Secret command failed: {0}")]
    SecretCommand(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Completion request failed: {0}")]
    Completion(String),

    #[error("Completion API returned status {status}: {body}")]
    CompletionStatus { status: u16, body: String },

    #[error("Completion timeout after {0} seconds")]
    CompletionTimeout(u64),

    #[error("Completion API returned an empty response")]
    EmptyCompletion,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Recipe not found in cache: {0}")]
    RecipeNotFound(String),

    #[error("File locked by another process: {0}")]
    Locked(String),

    #[error("Background task failed: {0}")]
    Task(String),

    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),

    #[error("User cancelled operation")]
    UserCancelled,
}

impl SousChefError {
    /// Convert error to appropriate exit status
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            SousChefError::Config(_)
            | SousChefError::ConfigNotFound(_)
            | SousChefError::ConfigInvalid(_)
            | SousChefError::SecretCommand(_)
            | SousChefError::Io(_)
            | SousChefError::TomlParse(_)
            | SousChefError::TomlSerialize(_)
            | SousChefError::Json(_)
            | SousChefError::InvalidInput(_)
            | SousChefError::RecipeNotFound(_)
            | SousChefError::Locked(_)
            | SousChefError::Task(_)
            | SousChefError::Discord(_)
            | SousChefError::UserCancelled => ExitStatus::GeneralError,

            SousChefError::Completion(_)
            | SousChefError::CompletionStatus { .. }
            | SousChefError::EmptyCompletion => ExitStatus::CompletionFailed,

            SousChefError::CompletionTimeout(_) => ExitStatus::Timeout,
        }
    }
}

pub type Result<T> = std::result::Result<T, SousChefError>;
