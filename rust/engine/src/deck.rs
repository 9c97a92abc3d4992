use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// A single 52-card deck. The top of the deck is the last element of
/// [`Deck::cards`]; [`Deck::draw`] pops from there.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    /// Builds a full, shuffled deck. The same seed always yields the same order.
    pub fn new_with_seed(seed: u64) -> Self {
        let mut deck = Self {
            cards: Vec::with_capacity(52),
            rng: ChaCha20Rng::seed_from_u64(seed),
        };
        deck.fill();
        deck.shuffle();
        deck
    }

    /// Builds a deck holding exactly `cards`, drawn from the back.
    /// Later resets refill it randomly from `seed`.
    pub fn from_cards(cards: Vec<Card>, seed: u64) -> Self {
        Self {
            cards,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Adds one full set of 52 cards, inserting each at a uniformly random
    /// position among the cards already present.
    pub fn fill(&mut self) {
        for card in full_deck() {
            let at = self.rng.random_range(0..=self.cards.len());
            self.cards.insert(at, card);
        }
    }

    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::EmptyDeck)
    }

    /// Discards every remaining card, then refills and shuffles.
    pub fn reset(&mut self) {
        self.cards.clear();
        self.fill();
        self.shuffle();
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
