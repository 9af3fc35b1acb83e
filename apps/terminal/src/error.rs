//! Error handling for the terminal front end

use std::path::PathBuf;

use drill_core::SettingsError;
use thiserror::Error;

/// Front end error types
#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Content error in {path}: {source}")]
    Content {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Unknown view type: {0}")]
    UnknownView(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Not available in {mode} mode: {command}")]
    Unsupported { mode: &'static str, command: String },
}

/// Result type alias for front end operations
pub type Result<T> = std::result::Result<T, AppError>;
