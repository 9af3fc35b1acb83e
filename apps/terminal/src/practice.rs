//! Line-driven practice loop.
//!
//! Reads one action per line, applies it to the session and writes the
//! resulting state. Generic over reader and writer so tests can script it.

use std::io::{BufRead, Write};

use drill_core::{
    parse_fields, CardField, CardRecord, Feedback, FlashcardSession, LearnSession, MatchingMode,
    PracticeMode, PracticeSession, Settings, WriteSession,
};

use crate::error::{AppError, Result};
use crate::render;

/// The session being practiced, whatever its mode.
#[derive(Debug)]
pub enum ActiveSession {
    Flashcard(FlashcardSession),
    Write(WriteSession),
    Learn(LearnSession),
}

impl ActiveSession {
    pub fn new(mode: PracticeMode, records: Vec<CardRecord>, settings: Settings) -> Self {
        match mode {
            PracticeMode::Flashcard => Self::Flashcard(FlashcardSession::new(records, settings)),
            PracticeMode::Write => Self::Write(WriteSession::new(records, settings)),
            PracticeMode::Learn => Self::Learn(LearnSession::new(records, settings)),
        }
    }

    pub fn as_session(&self) -> &dyn PracticeSession {
        match self {
            Self::Flashcard(s) => s,
            Self::Write(s) => s,
            Self::Learn(s) => s,
        }
    }

    pub fn as_session_mut(&mut self) -> &mut dyn PracticeSession {
        match self {
            Self::Flashcard(s) => s,
            Self::Write(s) => s,
            Self::Learn(s) => s,
        }
    }

    pub fn mode(&self) -> PracticeMode {
        self.as_session().mode()
    }

    /// Groups cleared, for learn mode.
    pub fn score(&self) -> Option<usize> {
        match self {
            Self::Learn(s) => Some(s.score()),
            _ => None,
        }
    }

    fn feedback(&self) -> Option<&Feedback> {
        match self {
            Self::Flashcard(_) => None,
            Self::Write(s) => s.feedback(),
            Self::Learn(s) => s.feedback(),
        }
    }
}

/// A single learner action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Flip,
    Next,
    Complete,
    Answer(String),
    MarkCorrect,
    ToggleSettings,
    SetFront(Vec<CardField>),
    SetBack(Vec<CardField>),
    SetMatching(MatchingMode),
    Reset,
    Quit,
}

/// Parse an input line for `mode`.
///
/// Lines starting with `:` are commands in every mode. In flashcard mode the
/// single-letter shortcuts `f`, `n`, `c`, `r`, `q` are also accepted; in
/// write and learn mode any other line is an answer, kept verbatim.
pub fn parse_action(mode: PracticeMode, line: &str) -> Result<Action> {
    let line = line.trim_end_matches(['\n', '\r']);

    if let Some(command) = line.strip_prefix(':') {
        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command.trim(), ""),
        };
        return match name {
            "flip" => Ok(Action::Flip),
            "next" => Ok(Action::Next),
            "complete" => Ok(Action::Complete),
            "correct" => Ok(Action::MarkCorrect),
            "settings" => Ok(Action::ToggleSettings),
            "front" => Ok(Action::SetFront(parse_fields(arg)?)),
            "back" => Ok(Action::SetBack(parse_fields(arg)?)),
            "matching" => Ok(Action::SetMatching(arg.parse()?)),
            "reset" => Ok(Action::Reset),
            "quit" | "q" => Ok(Action::Quit),
            _ => Err(AppError::UnknownCommand(line.to_string())),
        };
    }

    match mode {
        PracticeMode::Flashcard => match line.trim() {
            "f" | "flip" => Ok(Action::Flip),
            "n" | "next" => Ok(Action::Next),
            "c" | "complete" => Ok(Action::Complete),
            "r" | "reset" => Ok(Action::Reset),
            "s" | "settings" => Ok(Action::ToggleSettings),
            "q" | "quit" => Ok(Action::Quit),
            _ => Err(AppError::UnknownCommand(line.to_string())),
        },
        PracticeMode::Write | PracticeMode::Learn => Ok(Action::Answer(line.to_string())),
    }
}

/// Counts gathered over one run of the loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub answered: usize,
    pub correct: usize,
    pub completed: bool,
}

enum Step {
    Continue,
    Quit,
}

/// Drive `session` with lines from `input` until `:quit` or end of input.
pub fn run<R: BufRead, W: Write>(session: &mut ActiveSession, input: R, out: &mut W) -> Result<Summary> {
    let mut summary = Summary::default();
    let mut announced = false;
    let mut lines = input.lines();

    loop {
        let snapshot = session.as_session().snapshot();
        match render::card_prompt(&snapshot) {
            Some(prompt) => {
                announced = false;
                writeln!(out, "{prompt}")?;
            }
            None if !announced => {
                announced = true;
                for line in render::completion_lines(&snapshot, session.score()) {
                    writeln!(out, "{line}")?;
                }
            }
            None => {}
        }

        let Some(line) = lines.next().transpose()? else {
            break;
        };

        let action = match parse_action(session.mode(), &line) {
            Ok(action) => action,
            Err(err) => {
                writeln!(out, "error: {err}")?;
                continue;
            }
        };

        match apply(session, action, out, &mut summary) {
            Ok(Step::Continue) => {}
            Ok(Step::Quit) => break,
            Err(AppError::Io(err)) => return Err(AppError::Io(err)),
            Err(err) => writeln!(out, "error: {err}")?,
        }
    }

    summary.completed = session.as_session().is_completed();
    tracing::info!(
        mode = session.mode().as_str(),
        answered = summary.answered,
        correct = summary.correct,
        completed = summary.completed,
        "practice ended"
    );
    Ok(summary)
}

fn apply<W: Write>(
    session: &mut ActiveSession,
    action: Action,
    out: &mut W,
    summary: &mut Summary,
) -> Result<Step> {
    let mode = session.mode().as_str();
    let unsupported = |command: &str| AppError::Unsupported {
        mode,
        command: command.to_string(),
    };

    match action {
        Action::Quit => return Ok(Step::Quit),
        Action::Reset => {
            session.as_session_mut().reset();
            writeln!(out, "Deck reshuffled.")?;
        }
        Action::ToggleSettings => {
            session.as_session_mut().toggle_settings();
            if session.as_session().snapshot().settings_visible {
                writeln!(out, "{}", render::settings_line(session.as_session().settings()))?;
            }
        }
        Action::SetFront(fields) => {
            let settings = Settings {
                front: fields,
                ..session.as_session().settings().clone()
            };
            session.as_session_mut().update_settings(settings)?;
            writeln!(out, "{}", render::settings_line(session.as_session().settings()))?;
        }
        Action::SetBack(fields) => {
            let settings = Settings {
                back: fields,
                ..session.as_session().settings().clone()
            };
            session.as_session_mut().update_settings(settings)?;
            writeln!(out, "{}", render::settings_line(session.as_session().settings()))?;
        }
        Action::SetMatching(matching) => {
            let settings = Settings {
                matching,
                ..session.as_session().settings().clone()
            };
            session.as_session_mut().update_settings(settings)?;
            writeln!(out, "{}", render::settings_line(session.as_session().settings()))?;
        }
        Action::Flip => match session {
            ActiveSession::Flashcard(s) => s.flip(),
            _ => return Err(unsupported(":flip")),
        },
        Action::Next => match session {
            ActiveSession::Flashcard(s) => s.advance(),
            _ => return Err(unsupported(":next")),
        },
        Action::Complete => match session {
            ActiveSession::Flashcard(s) => {
                s.complete_current();
            }
            _ => return Err(unsupported(":complete")),
        },
        Action::MarkCorrect => match session {
            ActiveSession::Write(s) => {
                if s.mark_previously_correct() {
                    summary.correct += 1;
                    writeln!(out, "Marked as correct.")?;
                } else {
                    writeln!(out, "Nothing to mark.")?;
                }
            }
            _ => return Err(unsupported(":correct")),
        },
        Action::Answer(answer) => {
            let verdict = match session {
                ActiveSession::Write(s) => s.submit(&answer),
                ActiveSession::Learn(s) => s.check_answer(&answer),
                ActiveSession::Flashcard(_) => return Err(unsupported("answer")),
            };
            match verdict {
                Some(verdict) => {
                    summary.answered += 1;
                    if verdict.is_correct {
                        summary.correct += 1;
                    }
                    if let Some(feedback) = session.feedback() {
                        for line in render::feedback_lines(feedback) {
                            writeln!(out, "{line}")?;
                        }
                    }
                }
                None => writeln!(out, "Nothing left to answer.")?,
            }
        }
    }

    Ok(Step::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_flashcard_shortcuts() {
        assert_eq!(parse_action(PracticeMode::Flashcard, "f").unwrap(), Action::Flip);
        assert_eq!(parse_action(PracticeMode::Flashcard, "n\n").unwrap(), Action::Next);
        assert_eq!(parse_action(PracticeMode::Flashcard, " c ").unwrap(), Action::Complete);
        assert!(parse_action(PracticeMode::Flashcard, "走").is_err());
    }

    #[test]
    fn test_parse_answers_are_verbatim() {
        assert_eq!(
            parse_action(PracticeMode::Write, " 走 \r\n").unwrap(),
            Action::Answer(" 走 ".to_string())
        );
        assert_eq!(
            parse_action(PracticeMode::Learn, "f").unwrap(),
            Action::Answer("f".to_string())
        );
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_action(PracticeMode::Write, ":correct").unwrap(), Action::MarkCorrect);
        assert_eq!(
            parse_action(PracticeMode::Learn, ":back pinyin, english").unwrap(),
            Action::SetBack(vec![CardField::Pinyin, CardField::English])
        );
        assert_eq!(
            parse_action(PracticeMode::Flashcard, ":matching trimmed").unwrap(),
            Action::SetMatching(MatchingMode::Trimmed)
        );
        assert!(matches!(
            parse_action(PracticeMode::Write, ":jump"),
            Err(AppError::UnknownCommand(_))
        ));
        assert!(matches!(
            parse_action(PracticeMode::Write, ":front tone"),
            Err(AppError::Settings(_))
        ));
    }
}
