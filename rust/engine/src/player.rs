use std::fmt;
use std::str::FromStr;

use crate::cards::{Catalog, CardIndex};
use crate::deck::Deck;
use crate::diviner::Diviner;
use crate::errors::SnapshotError;
use crate::snapshot::PlayerSnapshot;

/// One of the three places a card index can live.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Pile {
    Deck,
    Hand,
    Discard,
}

impl fmt::Display for Pile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Pile::Deck => "deck",
            Pile::Hand => "hand",
            Pile::Discard => "discard",
        };
        write!(f, "{repr}")
    }
}

impl FromStr for Pile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "deck" => Ok(Pile::Deck),
            "hand" => Ok(Pile::Hand),
            "discard" => Ok(Pile::Discard),
            other => Err(format!("unknown pile: {other}")),
        }
    }
}

/// A participant: a hand/discard state machine plus a personal deck.
///
/// Composition rather than specialization: the only thing a player adds to
/// [`Diviner`] is which deck it draws from. The invariant maintained here is
/// that deck, hand, and discard always partition the full catalog index set.
#[derive(Debug, PartialEq)]
pub struct Player {
    deck: Deck,
    diviner: Diviner,
}

impl Player {
    /// Fresh player: full deck in catalog order, shuffled, empty piles.
    pub fn new(card_count: usize) -> Self {
        let mut deck = Deck::new(card_count);
        deck.shuffle();
        Self {
            deck,
            diviner: Diviner::new(),
        }
    }

    pub fn new_with_seed(card_count: usize, seed: u64) -> Self {
        let mut deck = Deck::new_with_seed(card_count, seed);
        deck.shuffle();
        Self {
            deck,
            diviner: Diviner::new(),
        }
    }

    /// Draw from this player's own deck into their hand.
    pub fn draw(&mut self) -> Option<CardIndex> {
        self.diviner.draw(&mut self.deck)
    }

    pub fn play(&mut self, catalog: &Catalog, keyword: &str) -> Option<CardIndex> {
        self.diviner.play(catalog, keyword)
    }

    pub fn redraw(&mut self, catalog: &Catalog, keyword: &str) -> Option<CardIndex> {
        self.diviner.redraw(catalog, keyword)
    }

    /// Return every card in hand and discard to the deck, then shuffle.
    pub fn shuffle_all(&mut self) {
        self.diviner.shuffle_into(&mut self.deck);
    }

    /// Shuffle the undrawn deck only; hand and discard stay put.
    pub fn shuffle_deck(&mut self) {
        self.deck.shuffle();
    }

    /// Administrative override: pull `card` out of whichever pile currently
    /// holds it and put it on top of `destination`. Returns `false` (and
    /// mutates nothing) when the card is in no pile.
    pub fn move_card(&mut self, card: CardIndex, destination: Pile) -> bool {
        let found = self.diviner.remove_from_hand(card)
            || self.diviner.remove_from_discard(card)
            || self.deck.remove(card);
        if !found {
            return false;
        }
        match destination {
            Pile::Deck => self.deck.insert_top(card),
            Pile::Hand => self.diviner.push_hand_front(card),
            Pile::Discard => self.diviner.push_discard_front(card),
        }
        true
    }

    pub fn hand(&self) -> &[CardIndex] {
        self.diviner.hand()
    }

    pub fn discard(&self) -> &[CardIndex] {
        self.diviner.discard()
    }

    pub fn deck_cards(&self) -> Vec<CardIndex> {
        self.deck.cards().collect()
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            hand: self.diviner.hand().to_vec(),
            discard: self.diviner.discard().to_vec(),
            deck: self.deck.cards().collect(),
        }
    }

    /// Rebuild a player from persisted piles, verifying that deck, hand, and
    /// discard still partition the full catalog index set.
    pub fn from_snapshot(snap: &PlayerSnapshot, card_count: usize) -> Result<Self, SnapshotError> {
        let mut seen = vec![false; card_count];
        for &card in snap.deck.iter().chain(&snap.hand).chain(&snap.discard) {
            if card >= card_count {
                return Err(SnapshotError::UnknownCard { index: card });
            }
            if seen[card] {
                return Err(SnapshotError::DuplicateCard { index: card });
            }
            seen[card] = true;
        }
        let missing = seen.iter().filter(|&&s| !s).count();
        if missing > 0 {
            return Err(SnapshotError::MissingCards { missing });
        }
        Ok(Self {
            deck: Deck::from_cards(snap.deck.clone()),
            diviner: Diviner::from_parts(snap.hand.clone(), snap.discard.clone()),
        })
    }
}
