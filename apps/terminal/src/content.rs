//! Lesson content: vocabulary, grammar and dialogue files.
//!
//! Each file maps `section -> lesson -> dialogue group -> cards`:
//!
//! ```json
//! { "Section 1": { "Lesson 1": { "Dialogue 1": [
//!     { "simplified": "走", "pinyin": "zǒu", "english": "to walk" }
//! ] } } }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use clap::ValueEnum;
use drill_core::CardRecord;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Cards of one dialogue group, keyed by group name.
pub type Lesson = BTreeMap<String, Vec<CardRecord>>;
/// Lessons keyed by name.
pub type Section = BTreeMap<String, Lesson>;
/// Sections keyed by name, as stored in one content file.
pub type ContentFile = BTreeMap<String, Section>;

/// Kind of content being practiced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ViewType {
    Vocabulary,
    Grammar,
    Dialogue,
}

impl ViewType {
    pub const ALL: [ViewType; 3] = [Self::Vocabulary, Self::Grammar, Self::Dialogue];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vocabulary => "vocabulary",
            Self::Grammar => "grammar",
            Self::Dialogue => "dialogue",
        }
    }

    /// File holding this view's content inside the content directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Vocabulary => "vocabulary.json",
            Self::Grammar => "grammar.json",
            Self::Dialogue => "dialogue.json",
        }
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "vocabulary" => Ok(Self::Vocabulary),
            "grammar" => Ok(Self::Grammar),
            "dialogue" => Ok(Self::Dialogue),
            other => Err(AppError::UnknownView(other.to_string())),
        }
    }
}

/// What the learner picked to practice. Every part must be set before a deck
/// can be dealt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub view_type: Option<ViewType>,
    pub section: Option<String>,
    pub lesson: Option<String>,
    pub dialogue: Option<String>,
}

impl Selection {
    pub fn is_complete(&self) -> bool {
        self.view_type.is_some()
            && self.section.is_some()
            && self.lesson.is_some()
            && self.dialogue.is_some()
    }
}

/// All loaded content, one file per view type.
#[derive(Debug, Clone, Default)]
pub struct ContentLibrary {
    views: BTreeMap<ViewType, ContentFile>,
}

impl ContentLibrary {
    /// Load every view file found in `dir`. Missing files load as empty.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut library = Self::default();
        for view in ViewType::ALL {
            let path = dir.join(view.file_name());
            if !path.exists() {
                tracing::warn!(path = %path.display(), "content file not found, skipping");
                continue;
            }
            let raw = fs::read_to_string(&path)?;
            let file: ContentFile =
                serde_json::from_str(&raw).map_err(|source| AppError::Content {
                    path: path.clone(),
                    source,
                })?;
            tracing::info!(view = %view, sections = file.len(), "loaded content");
            library.views.insert(view, file);
        }
        Ok(library)
    }

    /// Add or replace one view's content from a JSON string.
    pub fn insert_json(&mut self, view: ViewType, json: &str) -> Result<()> {
        let file: ContentFile = serde_json::from_str(json)?;
        self.views.insert(view, file);
        Ok(())
    }

    pub fn view(&self, view: ViewType) -> Option<&ContentFile> {
        self.views.get(&view)
    }

    pub fn sections(&self, view: ViewType) -> Vec<&str> {
        self.view(view)
            .map(|file| file.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn lessons(&self, view: ViewType, section: &str) -> Vec<&str> {
        self.view(view)
            .and_then(|file| file.get(section))
            .map(|lessons| lessons.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn dialogues(&self, view: ViewType, section: &str, lesson: &str) -> Vec<&str> {
        self.view(view)
            .and_then(|file| file.get(section))
            .and_then(|lessons| lessons.get(lesson))
            .map(|groups| groups.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Cards for a selection. Incomplete or unknown selections resolve to an
    /// empty list, which sessions treat as already completed.
    pub fn resolve(&self, selection: &Selection) -> Vec<CardRecord> {
        let (Some(view), Some(section), Some(lesson), Some(dialogue)) = (
            selection.view_type,
            selection.section.as_deref(),
            selection.lesson.as_deref(),
            selection.dialogue.as_deref(),
        ) else {
            return Vec::new();
        };

        self.view(view)
            .and_then(|file| file.get(section))
            .and_then(|lessons| lessons.get(lesson))
            .and_then(|groups| groups.get(dialogue))
            .cloned()
            .unwrap_or_default()
    }
}
