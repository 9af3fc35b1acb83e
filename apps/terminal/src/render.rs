//! Plain-text rendering of session snapshots.

use drill_core::{CardField, CardSide, Feedback, PracticeMode, SessionSnapshot, Settings};

pub const COMPLETED_MESSAGE: &str = "Congratulations! You've completed the flashcards.";

fn join_fields(fields: &[CardField]) -> String {
    fields
        .iter()
        .map(CardField::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// One-line summary of the current settings.
pub fn settings_line(settings: &Settings) -> String {
    format!(
        "front: {} | back: {} | matching: {}",
        join_fields(&settings.front),
        join_fields(&settings.back),
        settings.matching
    )
}

/// Prompt for the current card, or `None` when the session is completed.
pub fn card_prompt(snapshot: &SessionSnapshot) -> Option<String> {
    let card = snapshot.current.as_ref()?;
    let settings = &snapshot.settings;

    let shown = settings
        .display(card, snapshot.side)
        .into_iter()
        .map(|(_, value)| value)
        .collect::<Vec<_>>()
        .join(" / ");

    let line = match snapshot.mode {
        PracticeMode::Flashcard => {
            let side = match snapshot.side {
                CardSide::Front => "front",
                CardSide::Back => "back",
            };
            format!(
                "[{}/{}] {} ({})",
                snapshot.card_index + 1,
                snapshot.remaining,
                shown,
                side
            )
        }
        PracticeMode::Write => format!(
            "[{} left] Answer with {}: {}",
            snapshot.remaining,
            join_fields(&settings.back),
            shown
        ),
        PracticeMode::Learn => format!(
            "[group {}/{}] Answer with {}: {}",
            snapshot.group_index.unwrap_or(0) + 1,
            snapshot.group_count.unwrap_or(0),
            join_fields(&settings.back),
            shown
        ),
    };
    Some(line)
}

/// Result popup for the last answer.
pub fn feedback_lines(feedback: &Feedback) -> Vec<String> {
    let record = &feedback.card.record;
    let mut lines = vec![if feedback.verdict.is_correct {
        "Correct!".to_string()
    } else {
        "Incorrect".to_string()
    }];
    lines.push(format!("  Simplified: {}", record.simplified));
    if let Some(traditional) = &record.traditional {
        lines.push(format!("  Traditional: {traditional}"));
    }
    lines.push(format!("  Pinyin: {}", record.pinyin));
    lines.push(format!("  English: {}", record.english));
    lines.push(format!("  Your Answer: {}", feedback.verdict.given));
    if !feedback.verdict.is_correct {
        lines.push("  (type :correct if you were right)".to_string());
    }
    lines
}

/// Completion banner, with score and time for learn mode.
pub fn completion_lines(snapshot: &SessionSnapshot, score: Option<usize>) -> Vec<String> {
    let mut lines = vec![COMPLETED_MESSAGE.to_string()];
    if let (PracticeMode::Learn, Some(score), Some(finished)) =
        (snapshot.mode, score, snapshot.timing.finished_at)
    {
        let seconds = (finished - snapshot.timing.started_at).num_milliseconds() as f64 / 1000.0;
        lines.push(format!(
            "Game Over! Your score: {score}. Time taken: {seconds:.1} seconds."
        ));
    }
    lines.push("Type :reset to practice again or :quit to leave.".to_string());
    lines
}
