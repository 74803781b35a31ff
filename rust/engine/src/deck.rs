use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// A 52-card draw pile. Cards are consumed monotonically from the front;
/// drawn cards are never reinserted until the next `shuffle`.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    /// Deck in initial (unshuffled) order; call `shuffle` before dealing.
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            cards: full_deck(),
            position: 0,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Rebuilds the full 52 and applies a uniform permutation, resetting the
    /// draw position. Repeated shuffles of the same deck keep consuming the
    /// same RNG stream, so a seeded deck stays reproducible across rounds.
    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    /// Removes and returns the top card; `None` once the deck is exhausted.
    /// Exhaustion cannot happen during a normal 2–10 player round (25 cards
    /// max), but callers must treat it as fatal-to-round, not a panic.
    pub fn draw(&mut self) -> Option<Card> {
        let card = self.cards.get(self.position).copied()?;
        self.position += 1;
        Some(card)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}
