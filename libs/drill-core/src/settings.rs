//! Front/back field selection shared by every practice mode.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SettingsError};
use crate::types::{Card, CardField, CardSide, PracticeMode};

/// How typed answers are compared to the expected field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingMode {
    /// Byte-for-byte equality.
    Exact,
    /// Equality after trimming and collapsing whitespace.
    Trimmed,
    /// Trimmed, then compared case-insensitively.
    CaseInsensitive,
}

impl Default for MatchingMode {
    fn default() -> Self {
        Self::Exact
    }
}

impl MatchingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Trimmed => "trimmed",
            Self::CaseInsensitive => "case_insensitive",
        }
    }
}

impl fmt::Display for MatchingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchingMode {
    type Err = SettingsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "exact" => Ok(Self::Exact),
            "trimmed" => Ok(Self::Trimmed),
            "case_insensitive" | "case-insensitive" => Ok(Self::CaseInsensitive),
            other => Err(SettingsError::UnknownMatchingMode(other.to_string())),
        }
    }
}

/// Which fields are shown on each side and checked as the answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub front: Vec<CardField>,
    pub back: Vec<CardField>,
    #[serde(default)]
    pub matching: MatchingMode,
}

impl Settings {
    /// Build settings, rejecting an empty side.
    pub fn new(front: Vec<CardField>, back: Vec<CardField>, matching: MatchingMode) -> Result<Self> {
        let settings = Self {
            front,
            back,
            matching,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Defaults for a mode. Flashcards show the character and reveal the
    /// meaning; write and learn prompt with the meaning and expect the character.
    pub fn for_mode(mode: PracticeMode) -> Self {
        match mode {
            PracticeMode::Flashcard => Self {
                front: vec![CardField::Simplified],
                back: vec![CardField::English],
                matching: MatchingMode::default(),
            },
            PracticeMode::Write | PracticeMode::Learn => Self {
                front: vec![CardField::English],
                back: vec![CardField::Simplified],
                matching: MatchingMode::default(),
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.front.is_empty() {
            return Err(SettingsError::EmptySelection { side: "front" });
        }
        if self.back.is_empty() {
            return Err(SettingsError::EmptySelection { side: "back" });
        }
        Ok(())
    }

    pub fn fields(&self, side: CardSide) -> &[CardField] {
        match side {
            CardSide::Front => &self.front,
            CardSide::Back => &self.back,
        }
    }

    /// Add `field` to a side if missing, remove it otherwise.
    ///
    /// The result may be an empty side; call [`Settings::validate`] before
    /// applying it to a session.
    pub fn toggle(&mut self, side: CardSide, field: CardField) {
        let fields = match side {
            CardSide::Front => &mut self.front,
            CardSide::Back => &mut self.back,
        };
        if let Some(pos) = fields.iter().position(|f| *f == field) {
            fields.remove(pos);
        } else {
            fields.push(field);
        }
    }

    /// Present (field, value) pairs of `card` for one side.
    pub fn display<'a>(&self, card: &'a Card, side: CardSide) -> Vec<(CardField, &'a str)> {
        self.fields(side)
            .iter()
            .filter_map(|field| card.field(*field).map(|value| (*field, value)))
            .collect()
    }
}

/// Parse a comma-separated field list such as `"english,pinyin"`.
pub fn parse_fields(s: &str) -> Result<Vec<CardField>> {
    s.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(str::parse)
        .collect()
}
