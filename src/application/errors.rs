//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Login failed")]
    LoginFailed,

    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("Plugin error: {0}")]
    Plugin(#[from] PluginError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BotError {
    /// Errors the process cannot recover from by carrying on.
    pub fn is_fatal(&self) -> bool {
        matches!(self, BotError::LoginFailed)
    }
}

/// Command execution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Command not found: {0}")]
    NotFound(String),

    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    /// Malformed command parameters, reported to the invoker verbatim
    #[error("{0}")]
    Validation(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

/// Module discovery and registration errors
#[derive(Error, Debug)]
pub enum PluginError {
    #[error("Module '{0}' already registered")]
    Duplicate(String),

    #[error("Module not found: {0}")]
    NotFound(String),

    #[error("Module '{name}' failed to start: {reason}")]
    Begin { name: String, reason: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
