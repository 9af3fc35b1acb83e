//! Answer checking for write and learn sessions.

use serde::{Deserialize, Serialize};

use crate::settings::MatchingMode;
use crate::types::{Card, CardField};

/// Result of comparing a typed answer to a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether the answer is considered correct.
    pub is_correct: bool,
    /// The answer as typed.
    pub given: String,
    /// Values of the checked fields present on the card (for display).
    pub expected: Vec<String>,
    /// The matching mode used.
    pub matching_mode: MatchingMode,
}

/// Compare `input` against the values of `fields` on `card`.
///
/// The answer is correct when it matches any present field. Absent optional
/// fields never match, so a card without a traditional form cannot be
/// answered through that field.
pub fn check(card: &Card, fields: &[CardField], input: &str, mode: MatchingMode) -> Verdict {
    let expected: Vec<String> = fields
        .iter()
        .filter_map(|field| card.field(*field))
        .map(str::to_string)
        .collect();

    let is_correct = expected
        .iter()
        .any(|value| answers_match(input, value, mode));

    Verdict {
        is_correct,
        given: input.to_string(),
        expected,
        matching_mode: mode,
    }
}

/// Compare a typed answer to a single expected value.
pub fn answers_match(typed: &str, correct: &str, mode: MatchingMode) -> bool {
    match mode {
        MatchingMode::Exact => typed == correct,
        MatchingMode::Trimmed => normalize_whitespace(typed) == normalize_whitespace(correct),
        MatchingMode::CaseInsensitive => {
            normalize_whitespace(typed).to_lowercase() == normalize_whitespace(correct).to_lowercase()
        }
    }
}

/// Normalize whitespace in a string (trim and collapse multiple spaces).
fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
