//! Flip-through flashcard session.

use rand::Rng;

use super::{cursor_after_removal, PracticeSession, SessionSnapshot, Timing};
use crate::deck::{Deck, DeckBuilder};
use crate::error::Result;
use crate::settings::Settings;
use crate::types::{Card, CardField, CardId, CardRecord, CardSide, PracticeMode};

/// Cycles through a deck, flipping cards and removing the ones the learner
/// marks complete. Completed once every card is removed.
#[derive(Debug, Clone)]
pub struct FlashcardSession {
    builder: DeckBuilder,
    deck: Deck,
    current: usize,
    side: CardSide,
    removed: Vec<Card>,
    settings: Settings,
    show_settings: bool,
    timing: Timing,
}

impl FlashcardSession {
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
            side: CardSide::Front,
            removed: Vec::new(),
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

    pub fn side(&self) -> CardSide {
        self.side
    }

    pub fn removed(&self) -> &[Card] {
        &self.removed
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Move to the next card, wrapping around, and show its front.
    pub fn advance(&mut self) {
        if self.deck.is_empty() {
            return;
        }
        self.current = (self.current + 1) % self.deck.len();
        self.side = CardSide::Front;
    }

    /// Show the other side of the current card.
    pub fn flip(&mut self) {
        self.side = self.side.flipped();
    }

    /// Remove the card at `index` (clamped into the deck) and move on.
    pub fn complete(&mut self, index: usize) -> Option<Card> {
        let (removed_at, card) = self.deck.remove_at(index)?;
        Some(self.after_removal(removed_at, card))
    }

    /// Remove the card with `id` and move on. No-op if it is already gone.
    pub fn complete_card(&mut self, id: CardId) -> Option<Card> {
        let (removed_at, card) = self.deck.remove(id)?;
        Some(self.after_removal(removed_at, card))
    }

    /// Remove the displayed card.
    pub fn complete_current(&mut self) -> Option<Card> {
        self.complete(self.current)
    }

    /// Field values on the visible side of the current card.
    pub fn displayed_fields(&self) -> Vec<(CardField, &str)> {
        match self.deck.get(self.current) {
            Some(card) => self.settings.display(card, self.side),
            None => Vec::new(),
        }
    }

    pub fn reset_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.deck = self.builder.build_with_rng(rng);
        self.current = 0;
        self.side = CardSide::Front;
        self.removed.clear();
        self.timing = Timing::start();
        self.finish_if_empty();
        tracing::debug!(cards = self.deck.len(), "flashcard session reset");
    }

    fn after_removal(&mut self, removed_at: usize, card: Card) -> Card {
        self.removed.push(card.clone());
        self.current = cursor_after_removal(self.current, removed_at, self.deck.len());
        self.side = CardSide::Front;
        tracing::debug!(
            remaining = self.deck.len(),
            removed = self.removed.len(),
            "flashcard completed"
        );
        self.finish_if_empty();
        card
    }

    fn finish_if_empty(&mut self) {
        if self.deck.is_empty() {
            self.timing.finish();
        }
    }
}

impl PracticeSession for FlashcardSession {
    fn mode(&self) -> PracticeMode {
        PracticeMode::Flashcard
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
            side: self.side,
            card_index: self.current,
            group_index: None,
            group_count: None,
            remaining: self.deck.len(),
            removed: self.removed.len(),
            was_incorrect: false,
            input: String::new(),
            feedback: None,
            settings: self.settings.clone(),
            settings_visible: self.show_settings,
            completed: self.is_completed(),
            timing: self.timing,
        }
    }
}
