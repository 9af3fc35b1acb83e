//! Error types for drill-core.

use thiserror::Error;

/// Result type alias using SettingsError.
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Errors that can occur while editing session settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("no {side} fields selected")]
    EmptySelection { side: &'static str },

    #[error("unknown card field: {0}")]
    UnknownField(String),

    #[error("unknown matching mode: {0}")]
    UnknownMatchingMode(String),
}
