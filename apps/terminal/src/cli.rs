//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use drill_core::{MatchingMode, PracticeMode};

use crate::content::{Selection, ViewType};

#[derive(Debug, Parser)]
#[command(name = "hanyu-drills", about = "Practice Chinese vocabulary in the terminal", version)]
pub struct Cli {
    /// Directory holding vocabulary.json, grammar.json and dialogue.json
    #[arg(long, global = true)]
    pub content_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse sections, lessons and dialogue groups
    List {
        #[arg(long, value_enum)]
        view: Option<ViewType>,
        #[arg(long)]
        section: Option<String>,
        #[arg(long)]
        lesson: Option<String>,
    },

    /// Practice a dialogue group
    Practice {
        #[arg(value_enum)]
        mode: ModeArg,
        #[arg(long, value_enum)]
        view: Option<ViewType>,
        #[arg(long)]
        section: Option<String>,
        #[arg(long)]
        lesson: Option<String>,
        #[arg(long)]
        dialogue: Option<String>,
        /// Comma-separated front fields, e.g. "english,pinyin"
        #[arg(long)]
        front: Option<String>,
        /// Comma-separated back fields
        #[arg(long)]
        back: Option<String>,
        /// Answer matching: exact, trimmed or case_insensitive
        #[arg(long)]
        matching: Option<MatchingMode>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Flashcard,
    Write,
    Learn,
}

impl From<ModeArg> for PracticeMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Flashcard => Self::Flashcard,
            ModeArg::Write => Self::Write,
            ModeArg::Learn => Self::Learn,
        }
    }
}

/// Collect the selection flags into a [`Selection`].
pub fn selection(
    view: Option<ViewType>,
    section: Option<String>,
    lesson: Option<String>,
    dialogue: Option<String>,
) -> Selection {
    Selection {
        view_type: view,
        section,
        lesson,
        dialogue,
    }
}
