//! Practice sessions: flashcard flip-through, typed write quiz, grouped learn drill.
//!
//! Each session owns its deck and progress outright. A front end renders
//! [`SessionSnapshot`]s and calls the mode's operations; nothing else mutates
//! session state.

pub mod flashcard;
pub mod learn;
pub mod write;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::matching::Verdict;
use crate::settings::Settings;
use crate::types::{Card, CardSide, PracticeMode};

pub use flashcard::FlashcardSession;
pub use learn::LearnSession;
pub use write::WriteSession;

/// Operations shared by every practice mode.
pub trait PracticeSession {
    /// Mode identifier.
    fn mode(&self) -> PracticeMode;

    /// The card being practiced, or `None` once the session is completed.
    fn current_card(&self) -> Option<&Card>;

    /// Whether there is nothing left to practice.
    fn is_completed(&self) -> bool;

    fn settings(&self) -> &Settings;

    /// Replace the settings after validating them.
    fn update_settings(&mut self, settings: Settings) -> Result<()>;

    /// Show or hide the settings surface.
    fn toggle_settings(&mut self);

    /// Deal a fresh deck from the same content and start over.
    fn reset(&mut self);

    /// Read-only view of the session for rendering.
    fn snapshot(&self) -> SessionSnapshot;
}

/// Wall-clock bounds of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timing {
    pub started_at: DateTime<Utc>,
    /// `None` while the session is in progress.
    pub finished_at: Option<DateTime<Utc>>,
}

impl Timing {
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Record the end time. Later calls keep the first end time.
    pub fn finish(&mut self) {
        if self.finished_at.is_none() {
            self.finished_at = Some(Utc::now());
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    /// Session duration, once finished.
    pub fn elapsed(&self) -> Option<Duration> {
        self.finished_at.map(|end| end - self.started_at)
    }
}

/// The last checked card together with the verdict, for the result popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub card: Card,
    pub verdict: Verdict,
}

/// Everything a front end needs to draw a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub mode: PracticeMode,
    pub current: Option<Card>,
    pub side: CardSide,
    pub card_index: usize,
    /// Learn mode only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_count: Option<usize>,
    pub remaining: usize,
    pub removed: usize,
    pub was_incorrect: bool,
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Feedback>,
    pub settings: Settings,
    pub settings_visible: bool,
    pub completed: bool,
    pub timing: Timing,
}

/// Where the cursor lands after the card at `removed_at` leaves a deck that
/// now holds `len` cards.
///
/// The displayed card stays displayed when another card is removed. When the
/// displayed card itself is removed, its successor moves under the cursor,
/// wrapping to the start.
pub(crate) fn cursor_after_removal(current: usize, removed_at: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let next = if removed_at < current { current - 1 } else { current };
    if next >= len {
        0
    } else {
        next
    }
}
