//! Error types surfaced by the logbook API.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogbookError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Log target not found: {0}")]
    TargetNotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LogbookError>;
