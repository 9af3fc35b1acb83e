//! Practice model shared by the flashcard, write and learn modes.
//!
//! Provides:
//! - Card records with an enumerated field accessor
//! - Deck building (shuffle, stable card ids) and learn-mode grouping
//! - Answer checking against configurable back fields
//! - Session engines for each practice mode

pub mod deck;
pub mod error;
pub mod matching;
pub mod session;
pub mod settings;
pub mod types;

pub use deck::{group, Deck, DeckBuilder, Group, GROUP_SIZE};
pub use error::{Result, SettingsError};
pub use matching::{answers_match, check, Verdict};
pub use session::{
    Feedback, FlashcardSession, LearnSession, PracticeSession, SessionSnapshot, Timing,
    WriteSession,
};
pub use settings::{parse_fields, MatchingMode, Settings};
pub use types::{Card, CardField, CardId, CardRecord, CardSide, PracticeMode};
