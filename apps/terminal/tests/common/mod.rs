//! Common test utilities for the terminal front end.
//!
//! Provides a scratch content directory and a helper that scripts a practice
//! run and captures everything it printed.

pub mod fixtures;

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use hanyu_drills_terminal::practice::{self, ActiveSession, Summary};

/// A content directory under the system temp dir, removed on drop.
pub struct ContentDir {
    path: PathBuf,
}

impl ContentDir {
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("hanyu-drills-test-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&path).expect("Failed to create content dir");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write one content file into the directory.
    pub fn write(&self, file_name: &str, json: &str) {
        fs::write(self.path.join(file_name), json).expect("Failed to write content file");
    }
}

impl Drop for ContentDir {
    fn drop(&mut self) {
        fs::remove_dir_all(&self.path).ok();
    }
}

/// Run `script` (one action per line) against `session`, returning the
/// summary and the printed transcript.
pub fn play(session: &mut ActiveSession, script: &[&str]) -> (Summary, String) {
    let input = script.join("\n");
    let mut out = Vec::new();
    let summary = practice::run(session, Cursor::new(input), &mut out).expect("practice run failed");
    (summary, String::from_utf8(out).expect("transcript is utf-8"))
}
