use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::collections::VecDeque;

use crate::cards::CardIndex;

/// The undrawn portion of one player's cards. Front of the sequence is the
/// top of the deck.
#[derive(Debug, PartialEq)]
pub struct Deck {
    cards: VecDeque<CardIndex>,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new(card_count: usize) -> Self {
        Self {
            cards: (0..card_count).collect(),
            rng: ChaCha20Rng::from_os_rng(),
        }
    }

    pub fn new_with_seed(card_count: usize, seed: u64) -> Self {
        // Keep catalog order until shuffle is called explicitly
        Self {
            cards: (0..card_count).collect(),
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn from_cards(cards: Vec<CardIndex>) -> Self {
        Self {
            cards: cards.into(),
            rng: ChaCha20Rng::from_os_rng(),
        }
    }

    /// Remove and return the top card, or `None` when the deck is empty.
    /// Callers decide how an empty deck is surfaced.
    pub fn draw(&mut self) -> Option<CardIndex> {
        self.cards.pop_front()
    }

    pub fn insert_top(&mut self, card: CardIndex) {
        self.cards.push_front(card);
    }

    pub fn insert_bottom(&mut self, card: CardIndex) {
        self.cards.push_back(card);
    }

    /// Unbiased Fisher-Yates permutation of the current contents.
    pub fn shuffle(&mut self) {
        self.cards.make_contiguous().shuffle(&mut self.rng);
    }

    pub(crate) fn remove(&mut self, card: CardIndex) -> bool {
        match self.cards.iter().position(|&c| c == card) {
            Some(pos) => {
                self.cards.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> impl Iterator<Item = CardIndex> + '_ {
        self.cards.iter().copied()
    }
}
