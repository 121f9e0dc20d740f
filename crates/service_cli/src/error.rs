//! Error types for the sigma CLI.

use sigma_core::SigmaError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Rejected or undefined computation in the numeric core
    #[error(transparent)]
    Core(#[from] SigmaError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Explicitly requested file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Argument combination that cannot be honoured
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialisation error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialisation error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl CliError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
