//! Environment configuration.

use std::path::PathBuf;

use drill_core::MatchingMode;

use crate::error::Result;

pub const CONTENT_DIR_VAR: &str = "HANYU_CONTENT_DIR";
pub const MATCHING_VAR: &str = "HANYU_MATCHING";

/// Settings read from the environment (and `.env`) at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub content_dir: PathBuf,
    pub matching: MatchingMode,
}

impl Config {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let content_dir = lookup(CONTENT_DIR_VAR)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_content_dir);

        let matching = match lookup(MATCHING_VAR) {
            Some(value) => value.parse()?,
            None => MatchingMode::default(),
        };

        Ok(Self {
            content_dir,
            matching,
        })
    }
}

fn default_content_dir() -> PathBuf {
    // Use app data directory, fallback to current dir
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hanyu-drills")
        .join("content")
}
