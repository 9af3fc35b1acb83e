//! Deck building and grouping.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::{Card, CardId, CardRecord};

/// Number of cards drilled together in learn mode.
pub const GROUP_SIZE: usize = 7;

/// A slice of a deck drilled as a unit in learn mode.
pub type Group = Vec<Card>;

/// The working, shuffled sequence of cards for a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    /// Position of the card with `id`, if it is still in the deck.
    pub fn position(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|card| card.id == id)
    }

    /// Remove the card at `index`, clamped to the last card.
    ///
    /// Returns the removed card and the index it was taken from, or `None`
    /// when the deck is empty.
    pub fn remove_at(&mut self, index: usize) -> Option<(usize, Card)> {
        if self.cards.is_empty() {
            return None;
        }
        let index = index.min(self.cards.len() - 1);
        Some((index, self.cards.remove(index)))
    }

    /// Remove the card with `id`, returning it with its former position.
    pub fn remove(&mut self, id: CardId) -> Option<(usize, Card)> {
        let index = self.position(id)?;
        Some((index, self.cards.remove(index)))
    }
}

impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

/// Builds fresh shuffled decks from a fixed list of records.
///
/// Sessions keep their builder so that a reset deals a new permutation of the
/// same content.
#[derive(Debug, Clone, Default)]
pub struct DeckBuilder {
    records: Vec<CardRecord>,
}

impl DeckBuilder {
    pub fn new(records: Vec<CardRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[CardRecord] {
        &self.records
    }

    /// Build a deck using the thread-local RNG.
    pub fn build(&self) -> Deck {
        self.build_with_rng(&mut rand::rng())
    }

    /// Build a deck with every record exactly once, in a uniformly random order.
    pub fn build_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Deck {
        let mut cards: Vec<Card> = self.records.iter().cloned().map(Card::new).collect();
        cards.shuffle(rng);
        tracing::debug!(cards = cards.len(), "built deck");
        Deck { cards }
    }
}

/// Partition a deck into consecutive groups of `size`.
///
/// A short final chunk is folded into the group before it, so only a sole
/// group can hold fewer than `size` cards.
pub fn group(deck: &Deck, size: usize) -> Vec<Group> {
    let size = size.max(1);
    let mut groups: Vec<Group> = deck.cards.chunks(size).map(<[Card]>::to_vec).collect();

    if groups.len() > 1 && groups.last().is_some_and(|last| last.len() < size) {
        if let Some(last) = groups.pop() {
            if let Some(prev) = groups.last_mut() {
                prev.extend(last);
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn records(n: usize) -> Vec<CardRecord> {
        (0..n)
            .map(|i| CardRecord::new(format!("字{i}"), format!("zi{i}"), format!("word {i}")))
            .collect()
    }

    fn sorted_words(cards: &[Card]) -> Vec<String> {
        let mut words: Vec<String> = cards.iter().map(|c| c.record.simplified.clone()).collect();
        words.sort();
        words
    }

    #[test]
    fn build_is_a_permutation() {
        let input = records(20);
        let mut expected: Vec<String> = input.iter().map(|r| r.simplified.clone()).collect();
        expected.sort();

        let mut rng = StdRng::seed_from_u64(7);
        let deck = DeckBuilder::new(input).build_with_rng(&mut rng);

        assert_eq!(deck.len(), 20);
        assert_eq!(sorted_words(deck.cards()), expected);
    }

    #[test]
    fn build_assigns_unique_ids() {
        let deck = DeckBuilder::new(records(10)).build();
        let mut ids: Vec<String> = deck.iter().map(|c| c.id.to_string()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn rebuild_deals_fresh_ids() {
        let builder = DeckBuilder::new(records(3));
        let first = builder.build();
        let second = builder.build();
        assert!(first.iter().all(|card| second.position(card.id).is_none()));
    }

    #[test]
    fn build_empty_input() {
        let deck = DeckBuilder::new(vec![]).build();
        assert!(deck.is_empty());
        assert!(group(&deck, GROUP_SIZE).is_empty());
    }

    #[test]
    fn group_small_deck_is_single_group() {
        for n in 1..=GROUP_SIZE {
            let deck = DeckBuilder::new(records(n)).build();
            let groups = group(&deck, GROUP_SIZE);
            assert_eq!(groups.len(), 1);
            assert_eq!(groups[0].len(), n);
        }
    }

    #[test]
    fn group_folds_short_tail() {
        let deck = DeckBuilder::new(records(17)).build();
        let sizes: Vec<usize> = group(&deck, GROUP_SIZE).iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![7, 10]);
    }

    #[test]
    fn group_exact_multiple() {
        let deck = DeckBuilder::new(records(21)).build();
        let sizes: Vec<usize> = group(&deck, GROUP_SIZE).iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![7, 7, 7]);
    }

    #[test]
    fn group_properties_hold_for_all_lengths() {
        for n in 0..60 {
            let deck = DeckBuilder::new(records(n)).build();
            let groups = group(&deck, GROUP_SIZE);

            let flattened: Vec<Card> = groups.iter().flatten().cloned().collect();
            assert_eq!(flattened.as_slice(), deck.cards(), "order preserved for n={n}");

            if groups.len() > 1 {
                assert!(groups.iter().all(|g| g.len() >= GROUP_SIZE), "short group for n={n}");
                assert!(groups[..groups.len() - 1].iter().all(|g| g.len() == GROUP_SIZE));
            }
        }
    }

    #[test]
    fn group_zero_size_treated_as_one() {
        let deck = DeckBuilder::new(records(3)).build();
        assert_eq!(group(&deck, 0).len(), 3);
    }

    #[test]
    fn remove_at_clamps() {
        let mut deck = DeckBuilder::new(records(3)).build();
        let last = deck.get(2).cloned().unwrap();

        let (index, removed) = deck.remove_at(99).unwrap();
        assert_eq!(index, 2);
        assert_eq!(removed, last);
        assert_eq!(deck.len(), 2);

        let mut empty = Deck::default();
        assert!(empty.remove_at(0).is_none());
    }

    #[test]
    fn remove_by_id() {
        let mut deck = DeckBuilder::new(records(3)).build();
        let target = deck.get(1).cloned().unwrap();

        assert_eq!(deck.remove(target.id), Some((1, target.clone())));
        assert_eq!(deck.remove(target.id), None);
        assert_eq!(deck.len(), 2);
    }
}
