//! Grouped learn drill.
//!
//! The deck is split into groups of [`GROUP_SIZE`]. A group is drilled in
//! order; any miss during a pass forces another full pass, and only a clean
//! pass promotes the learner to the next group. The session completes after a
//! clean pass through the final group.

use chrono::Duration;
use rand::Rng;

use super::{Feedback, PracticeSession, SessionSnapshot, Timing};
use crate::deck::{group, Deck, DeckBuilder, Group, GROUP_SIZE};
use crate::error::Result;
use crate::matching::{check, Verdict};
use crate::settings::Settings;
use crate::types::{Card, CardRecord, CardSide, PracticeMode};

#[derive(Debug, Clone)]
pub struct LearnSession {
    builder: DeckBuilder,
    deck: Deck,
    groups: Vec<Group>,
    group_index: usize,
    card_index: usize,
    was_incorrect: bool,
    input: String,
    feedback: Option<Feedback>,
    settings: Settings,
    show_settings: bool,
    timing: Timing,
}

impl LearnSession {
    pub fn new(records: Vec<CardRecord>, settings: Settings) -> Self {
        Self::with_rng(records, settings, &mut rand::rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(records: Vec<CardRecord>, settings: Settings, rng: &mut R) -> Self {
        let builder = DeckBuilder::new(records);
        let deck = builder.build_with_rng(rng);
        let groups = group(&deck, GROUP_SIZE);
        let mut session = Self {
            builder,
            deck,
            groups,
            group_index: 0,
            card_index: 0,
            was_incorrect: false,
            input: String::new(),
            feedback: None,
            settings,
            show_settings: false,
            timing: Timing::start(),
        };
        session.finish_if_empty();
        session
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn current_group(&self) -> Option<&Group> {
        self.groups.get(self.group_index)
    }

    pub fn group_index(&self) -> usize {
        self.group_index
    }

    pub fn card_index(&self) -> usize {
        self.card_index
    }

    /// Whether a miss has happened during the current pass.
    pub fn was_incorrect(&self) -> bool {
        self.was_incorrect
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn dismiss_feedback(&mut self) {
        self.feedback = None;
    }

    /// Number of groups passed cleanly so far.
    pub fn score(&self) -> usize {
        if self.is_completed() {
            self.groups.len()
        } else {
            self.group_index
        }
    }

    /// Time from start to completion, once completed.
    pub fn elapsed(&self) -> Option<Duration> {
        self.timing.elapsed()
    }

    /// Restart the clock and go back to the first card of the first group.
    pub fn start(&mut self) {
        self.timing = Timing::start();
        self.group_index = 0;
        self.card_index = 0;
        self.was_incorrect = false;
        self.input.clear();
        self.finish_if_empty();
    }

    /// Submit the buffered input.
    pub fn submit_input(&mut self) -> Option<Verdict> {
        let input = std::mem::take(&mut self.input);
        self.check_answer(&input)
    }

    /// Check `input` against the current card and step the drill.
    ///
    /// Returns `None` once the session is completed.
    pub fn check_answer(&mut self, input: &str) -> Option<Verdict> {
        self.input.clear();
        if self.is_completed() {
            return None;
        }
        let group_len = self.groups.get(self.group_index)?.len();
        let card = self.current_card()?.clone();
        let verdict = check(&card, &self.settings.back, input, self.settings.matching);
        let last_in_group = self.card_index + 1 >= group_len;

        if verdict.is_correct {
            if !last_in_group {
                self.card_index += 1;
            } else if self.was_incorrect {
                tracing::debug!(group = self.group_index, "repeating group after a miss");
                self.card_index = 0;
                self.was_incorrect = false;
            } else if self.group_index + 1 < self.groups.len() {
                self.group_index += 1;
                self.card_index = 0;
                tracing::debug!(group = self.group_index, "advanced to next group");
            } else {
                self.timing.finish();
                tracing::debug!(groups = self.groups.len(), "learn session completed");
            }
        } else {
            self.was_incorrect = true;
            self.card_index = if last_in_group { 0 } else { self.card_index + 1 };
        }

        self.feedback = Some(Feedback {
            card,
            verdict: verdict.clone(),
        });
        Some(verdict)
    }

    pub fn reset_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.deck = self.builder.build_with_rng(rng);
        self.groups = group(&self.deck, GROUP_SIZE);
        self.feedback = None;
        self.show_settings = false;
        self.start();
        tracing::debug!(
            cards = self.deck.len(),
            groups = self.groups.len(),
            "learn session reset"
        );
    }

    fn finish_if_empty(&mut self) {
        if self.groups.is_empty() {
            self.timing.finish();
        }
    }
}

impl PracticeSession for LearnSession {
    fn mode(&self) -> PracticeMode {
        PracticeMode::Learn
    }

    fn current_card(&self) -> Option<&Card> {
        if self.timing.is_finished() {
            return None;
        }
        self.current_group()?.get(self.card_index)
    }

    fn is_completed(&self) -> bool {
        self.groups.is_empty() || self.timing.is_finished()
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn update_settings(&mut self, settings: Settings) -> Result<()> {
        settings.validate()?;
        self.settings = settings;
        self.show_settings = false;
        Ok(())
    }

    fn toggle_settings(&mut self) {
        self.show_settings = !self.show_settings;
    }

    fn reset(&mut self) {
        self.reset_with_rng(&mut rand::rng());
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            mode: self.mode(),
            current: self.current_card().cloned(),
            side: CardSide::Front,
            card_index: self.card_index,
            group_index: Some(self.group_index),
            group_count: Some(self.groups.len()),
            remaining: self.deck.len(),
            removed: 0,
            was_incorrect: self.was_incorrect,
            input: self.input.clone(),
            feedback: self.feedback.clone(),
            settings: self.settings.clone(),
            settings_visible: self.show_settings,
            completed: self.is_completed(),
            timing: self.timing,
        }
    }
}
