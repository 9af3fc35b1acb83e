pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod practice;
pub mod render;

use std::io::{self, Write};

use clap::Parser;
use drill_core::{parse_fields, PracticeMode, Settings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::content::{ContentLibrary, ViewType};
use crate::practice::ActiveSession;

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(dir) = cli.content_dir {
        config.content_dir = dir;
    }

    tracing::info!(dir = %config.content_dir.display(), "Loading content...");
    let library = ContentLibrary::load_dir(&config.content_dir)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::List {
            view,
            section,
            lesson,
        } => list(&library, view, section.as_deref(), lesson.as_deref(), &mut out)?,
        Command::Practice {
            mode,
            view,
            section,
            lesson,
            dialogue,
            front,
            back,
            matching,
        } => {
            let mode = PracticeMode::from(mode);
            let mut settings = Settings::for_mode(mode);
            settings.matching = matching.unwrap_or(config.matching);
            if let Some(front) = front {
                settings.front = parse_fields(&front)?;
            }
            if let Some(back) = back {
                settings.back = parse_fields(&back)?;
            }
            settings.validate()?;

            let selection = cli::selection(view, section, lesson, dialogue);
            if !selection.is_complete() {
                tracing::warn!("incomplete selection, starting with an empty deck");
            }
            let records = library.resolve(&selection);
            tracing::info!(mode = mode.as_str(), cards = records.len(), "Starting practice");

            let mut session = ActiveSession::new(mode, records, settings);
            let stdin = io::stdin();
            practice::run(&mut session, stdin.lock(), &mut out)?;
        }
    }

    Ok(())
}

/// Print the content tree one level below the deepest given selector.
fn list<W: Write>(
    library: &ContentLibrary,
    view: Option<ViewType>,
    section: Option<&str>,
    lesson: Option<&str>,
    out: &mut W,
) -> io::Result<()> {
    let Some(view) = view else {
        for view in ViewType::ALL {
            writeln!(out, "{view} ({} sections)", library.sections(view).len())?;
        }
        return Ok(());
    };

    let entries = match (section, lesson) {
        (None, _) => library.sections(view),
        (Some(section), None) => library.lessons(view, section),
        (Some(section), Some(lesson)) => library.dialogues(view, section, lesson),
    };
    for entry in entries {
        writeln!(out, "{entry}")?;
    }
    Ok(())
}
