//! Core types for practice sessions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SettingsError;

/// A displayable field of a card record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardField {
    Simplified,
    Traditional,
    Pinyin,
    English,
    Structure,
}

impl CardField {
    /// Every field, in settings-menu order.
    pub const ALL: [CardField; 5] = [
        Self::Simplified,
        Self::Traditional,
        Self::Pinyin,
        Self::English,
        Self::Structure,
    ];

    /// Get the field name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simplified => "simplified",
            Self::Traditional => "traditional",
            Self::Pinyin => "pinyin",
            Self::English => "english",
            Self::Structure => "structure",
        }
    }
}

impl fmt::Display for CardField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardField {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simplified" => Ok(Self::Simplified),
            "traditional" => Ok(Self::Traditional),
            "pinyin" => Ok(Self::Pinyin),
            "english" => Ok(Self::English),
            "structure" => Ok(Self::Structure),
            other => Err(SettingsError::UnknownField(other.to_string())),
        }
    }
}

/// A word or phrase as it appears in the content files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub simplified: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traditional: Option<String>,
    pub pinyin: String,
    pub english: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<String>,
}

impl CardRecord {
    /// Create a record with only the required fields set.
    pub fn new(
        simplified: impl Into<String>,
        pinyin: impl Into<String>,
        english: impl Into<String>,
    ) -> Self {
        Self {
            simplified: simplified.into(),
            traditional: None,
            pinyin: pinyin.into(),
            english: english.into(),
            structure: None,
        }
    }

    /// Value of `field`, or `None` when an optional field is absent.
    pub fn field(&self, field: CardField) -> Option<&str> {
        match field {
            CardField::Simplified => Some(&self.simplified),
            CardField::Traditional => self.traditional.as_deref(),
            CardField::Pinyin => Some(&self.pinyin),
            CardField::English => Some(&self.english),
            CardField::Structure => self.structure.as_deref(),
        }
    }
}

/// Stable identifier assigned to a card when a deck is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(Uuid);

impl CardId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A record placed in a deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub record: CardRecord,
}

impl Card {
    pub fn new(record: CardRecord) -> Self {
        Self {
            id: CardId::new(),
            record,
        }
    }

    pub fn field(&self, field: CardField) -> Option<&str> {
        self.record.field(field)
    }
}

/// Practice mode options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PracticeMode {
    Flashcard,
    Write,
    Learn,
}

impl PracticeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flashcard => "flashcard",
            Self::Write => "write",
            Self::Learn => "learn",
        }
    }
}

/// Which side of a flashcard is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardSide {
    Front,
    Back,
}

impl Default for CardSide {
    fn default() -> Self {
        Self::Front
    }
}

impl CardSide {
    pub fn flipped(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }
}
