use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for distrohub
#[derive(Debug, Error)]
pub enum DistroHubError {
    /// Terminal initialization or operation failed
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file is invalid
    #[error("Invalid configuration file {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    /// External command could not be started
    #[error("Failed to run {command}: {reason}")]
    CommandSpawn { command: String, reason: String },

    /// External command exceeded its time budget
    #[error("{command} timed out after {timeout_ms}ms")]
    CommandTimeout { command: String, timeout_ms: u64 },

    /// External command exited unsuccessfully
    #[error("{command} exited with {}", exit_label(*.code))]
    CommandFailed { command: String, code: Option<i32> },

    /// Log sink setup failed
    #[error("Logging error: {message}")]
    Logging { message: String },
}

fn exit_label(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

impl DistroHubError {
    /// Create a command spawn error
    pub fn command_spawn(command: impl Into<String>, reason: impl Into<String>) -> Self {
        DistroHubError::CommandSpawn {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// Create a command timeout error
    pub fn command_timeout(command: impl Into<String>, timeout_ms: u64) -> Self {
        DistroHubError::CommandTimeout {
            command: command.into(),
            timeout_ms,
        }
    }

    /// Create a command failure error
    pub fn command_failed(command: impl Into<String>, code: Option<i32>) -> Self {
        DistroHubError::CommandFailed {
            command: command.into(),
            code,
        }
    }

    /// Create a logging error
    pub fn logging(message: impl Into<String>) -> Self {
        DistroHubError::Logging {
            message: message.into(),
        }
    }

    /// Create a config not found error
    pub fn config_not_found(path: PathBuf) -> Self {
        DistroHubError::ConfigNotFound { path }
    }

    /// Create a config invalid error
    pub fn config_invalid(path: PathBuf, reason: impl Into<String>) -> Self {
        DistroHubError::ConfigInvalid {
            path,
            reason: reason.into(),
        }
    }
}

/// Result type alias for distrohub operations
pub type Result<T> = std::result::Result<T, DistroHubError>;
