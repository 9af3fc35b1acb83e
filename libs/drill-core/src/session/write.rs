//! Typed-answer quiz. Correct cards leave the deck; missed cards come back
//! around on the next cycle.

use rand::Rng;

use super::{cursor_after_removal, Feedback, PracticeSession, SessionSnapshot, Timing};
use crate::deck::{Deck, DeckBuilder};
use crate::error::Result;
use crate::matching::{check, Verdict};
use crate::settings::Settings;
use crate::types::{Card, CardRecord, CardSide, PracticeMode};

#[derive(Debug, Clone)]
pub struct WriteSession {
    builder: DeckBuilder,
    deck: Deck,
    current: usize,
    input: String,
    removed: Vec<Card>,
    feedback: Option<Feedback>,
    settings: Settings,
    show_settings: bool,
    timing: Timing,
}

impl WriteSession {
    pub fn new(records: Vec<CardRecord>, settings: Settings) -> Self {
        Self::with_rng(records, settings, &mut rand::rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(records: Vec<CardRecord>, settings: Settings, rng: &mut R) -> Self {
        let builder = DeckBuilder::new(records);
        let deck = builder.build_with_rng(rng);
        let mut session = Self {
            builder,
            deck,
            current: 0,
            input: String::new(),
            removed: Vec::new(),
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

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn removed(&self) -> &[Card] {
        &self.removed
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

    /// Hide the result of the last answer.
    pub fn dismiss_feedback(&mut self) {
        self.feedback = None;
    }

    /// Submit the buffered input.
    pub fn submit_input(&mut self) -> Option<Verdict> {
        let input = std::mem::take(&mut self.input);
        self.submit(&input)
    }

    /// Check `input` against the current card.
    ///
    /// A correct answer removes the card; a wrong one moves on and leaves it
    /// in the deck. Returns `None` when there is no card to answer.
    pub fn submit(&mut self, input: &str) -> Option<Verdict> {
        self.input.clear();
        let card = self.deck.get(self.current)?.clone();
        let verdict = check(&card, &self.settings.back, input, self.settings.matching);

        if verdict.is_correct {
            if let Some((removed_at, removed)) = self.deck.remove(card.id) {
                self.removed.push(removed);
                self.current = cursor_after_removal(self.current, removed_at, self.deck.len());
            }
            self.finish_if_empty();
        } else {
            self.current = (self.current + 1) % self.deck.len();
        }

        tracing::debug!(
            correct = verdict.is_correct,
            remaining = self.deck.len(),
            "write answer checked"
        );

        self.feedback = Some(Feedback {
            card,
            verdict: verdict.clone(),
        });
        Some(verdict)
    }

    /// Accept the last rejected answer as correct.
    ///
    /// Removes the card named in the last feedback as though it had been
    /// judged correct. Returns `false` when the last answer was already
    /// correct or there is no feedback to override.
    pub fn mark_previously_correct(&mut self) -> bool {
        let Some(feedback) = self.feedback.as_mut() else {
            return false;
        };
        if feedback.verdict.is_correct {
            return false;
        }
        feedback.verdict.is_correct = true;
        let id = feedback.card.id;

        if let Some((removed_at, removed)) = self.deck.remove(id) {
            self.removed.push(removed);
            self.current = cursor_after_removal(self.current, removed_at, self.deck.len());
            tracing::debug!(remaining = self.deck.len(), "write answer overridden as correct");
        }
        self.finish_if_empty();
        true
    }

    pub fn reset_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.deck = self.builder.build_with_rng(rng);
        self.current = 0;
        self.input.clear();
        self.removed.clear();
        self.feedback = None;
        self.show_settings = false;
        self.timing = Timing::start();
        self.finish_if_empty();
        tracing::debug!(cards = self.deck.len(), "write session reset");
    }

    fn finish_if_empty(&mut self) {
        if self.deck.is_empty() {
            self.timing.finish();
        }
    }
}

impl PracticeSession for WriteSession {
    fn mode(&self) -> PracticeMode {
        PracticeMode::Write
    }

    fn current_card(&self) -> Option<&Card> {
        self.deck.get(self.current)
    }

    fn is_completed(&self) -> bool {
        self.deck.is_empty()
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
            card_index: self.current,
            group_index: None,
            group_count: None,
            remaining: self.deck.len(),
            removed: self.removed.len(),
            was_incorrect: false,
            input: self.input.clone(),
            feedback: self.feedback.clone(),
            settings: self.settings.clone(),
            settings_visible: self.show_settings,
            completed: self.is_completed(),
            timing: self.timing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CardField;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn records(n: usize) -> Vec<CardRecord> {
        (0..n)
            .map(|i| CardRecord::new(format!("字{i}"), format!("zi{i}"), format!("word {i}")))
            .collect()
    }

    fn session(n: usize) -> WriteSession {
        let mut rng = StdRng::seed_from_u64(3);
        WriteSession::with_rng(records(n), Settings::for_mode(PracticeMode::Write), &mut rng)
    }

    fn answer(session: &WriteSession) -> String {
        session.current_card().unwrap().record.simplified.clone()
    }

    #[test]
    fn correct_answer_removes_card() {
        let mut session = session(3);
        let card = session.current_card().cloned().unwrap();

        let verdict = session.submit(&answer(&session)).unwrap();
        assert!(verdict.is_correct);
        assert_eq!(session.deck().len(), 2);
        assert!(session.deck().position(card.id).is_none());
        assert_eq!(session.removed(), &[card.clone()]);
        assert_eq!(session.feedback().unwrap().card, card);
    }

    #[test]
    fn removed_card_is_never_presented_again() {
        let mut session = session(3);
        let card = session.current_card().cloned().unwrap();
        session.submit(&answer(&session));

        for _ in 0..10 {
            assert_ne!(session.current_card().map(|c| c.id), Some(card.id));
            session.submit("wrong");
        }
    }

    #[test]
    fn wrong_answer_cycles_back() {
        let mut session = session(3);
        let card = session.current_card().cloned().unwrap();

        let verdict = session.submit("wrong").unwrap();
        assert!(!verdict.is_correct);
        assert_eq!(session.deck().len(), 3);
        assert_eq!(session.current_index(), 1);

        session.submit("wrong");
        session.submit("wrong");
        assert_eq!(session.current_card(), Some(&card));
    }

    #[test]
    fn correct_on_last_index_wraps() {
        let mut session = session(3);
        session.submit("wrong");
        session.submit("wrong");
        assert_eq!(session.current_index(), 2);

        session.submit(&answer(&session));
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.deck().len(), 2);
    }

    #[test]
    fn answering_everything_completes() {
        let mut session = session(4);
        while !session.is_completed() {
            let expected = answer(&session);
            session.submit(&expected);
        }
        assert_eq!(session.removed().len(), 4);
        assert!(session.timing().is_finished());
        assert!(session.submit("anything").is_none());
    }

    #[test]
    fn submit_input_clears_buffer() {
        let mut session = session(2);
        session.set_input("wrong");
        assert_eq!(session.input(), "wrong");

        let verdict = session.submit_input().unwrap();
        assert_eq!(verdict.given, "wrong");
        assert_eq!(session.input(), "");
    }

    #[test]
    fn mark_previously_correct_removes_missed_card() {
        let mut session = session(3);
        let missed = session.current_card().cloned().unwrap();
        let next = session.deck().get(1).cloned().unwrap();

        session.submit("close enough");
        assert!(session.mark_previously_correct());

        assert_eq!(session.deck().len(), 2);
        assert!(session.deck().position(missed.id).is_none());
        assert_eq!(session.current_card(), Some(&next));
        assert!(session.feedback().unwrap().verdict.is_correct);
        assert!(!session.mark_previously_correct());
    }

    #[test]
    fn dismissed_feedback_cannot_be_overridden() {
        let mut session = session(2);
        session.submit("wrong");
        session.dismiss_feedback();
        assert!(session.feedback().is_none());
        assert!(!session.mark_previously_correct());
        assert_eq!(session.deck().len(), 2);
    }

    #[test]
    fn mark_previously_correct_needs_a_miss() {
        let mut session = session(2);
        assert!(!session.mark_previously_correct());

        session.submit(&answer(&session));
        assert!(!session.mark_previously_correct());
        assert_eq!(session.deck().len(), 1);
    }

    #[test]
    fn mark_previously_correct_last_card_completes() {
        let mut session = session(1);
        session.submit("nope");
        assert!(session.mark_previously_correct());
        assert!(session.is_completed());
    }

    #[test]
    fn back_fields_follow_settings() {
        let mut session = session(2);
        let mut settings = session.settings().clone();
        settings.back = vec![CardField::Pinyin];
        session.update_settings(settings).unwrap();

        let pinyin = session.current_card().unwrap().record.pinyin.clone();
        assert!(session.submit(&pinyin).unwrap().is_correct);
    }

    #[test]
    fn reset_clears_progress() {
        let mut session = session(3);
        session.submit(&answer(&session));
        session.set_input("half typed");

        session.reset_with_rng(&mut StdRng::seed_from_u64(9));
        assert_eq!(session.deck().len(), 3);
        assert!(session.removed().is_empty());
        assert!(session.feedback().is_none());
        assert_eq!(session.input(), "");
    }

    #[test]
    fn walk_and_pedestrian_scenario() {
        let records = vec![
            CardRecord::new("走", "zǒu", "to walk"),
            CardRecord::new("路人", "lùrén", "pedestrian"),
        ];
        let settings = Settings::new(
            vec![CardField::English],
            vec![CardField::Simplified],
            Default::default(),
        )
        .unwrap();
        let mut session = WriteSession::new(records, settings);

        // Move the cursor to "to walk" whichever order the shuffle produced.
        if session.current_card().unwrap().record.english != "to walk" {
            session.submit("wrong");
        }
        assert_eq!(session.current_card().unwrap().record.english, "to walk");

        assert!(session.submit("走").unwrap().is_correct);
        assert_eq!(session.deck().len(), 1);

        let remaining = session.current_card().cloned().unwrap();
        assert_eq!(remaining.record.simplified, "路人");
        assert!(!session.submit("路").unwrap().is_correct);
        assert_eq!(session.deck().len(), 1);
        assert_eq!(session.current_card(), Some(&remaining));
    }
}
