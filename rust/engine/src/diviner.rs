use crate::cards::{Catalog, CardIndex};
use crate::deck::Deck;

/// Hand/discard state machine for one card holder.
///
/// Every card index a diviner touches lives in exactly one of deck, hand, or
/// discard. The hand keeps insertion (draw) order; the discard keeps
/// most-recent-first order. Keyword scans walk those internal orders and the
/// first match wins; display sorting belongs to the boundary layer.
#[derive(Debug, Default, PartialEq)]
pub struct Diviner {
    hand: Vec<CardIndex>,
    discard: Vec<CardIndex>,
}

impl Diviner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(hand: Vec<CardIndex>, discard: Vec<CardIndex>) -> Self {
        Self { hand, discard }
    }

    /// Move the top card of `deck` into the hand. `None` when the deck is
    /// empty; the hand is untouched in that case.
    pub fn draw(&mut self, deck: &mut Deck) -> Option<CardIndex> {
        let card = deck.draw()?;
        self.hand.push(card);
        Some(card)
    }

    /// Move the first hand card matching `keyword` to the front of the
    /// discard pile. Playing and discarding are the same transition; only
    /// the announcement differs upstream.
    pub fn play(&mut self, catalog: &Catalog, keyword: &str) -> Option<CardIndex> {
        let pos = position_of(catalog, &self.hand, keyword)?;
        let card = self.hand.remove(pos);
        self.discard.insert(0, card);
        Some(card)
    }

    /// Move the first discard card matching `keyword` back into the hand.
    pub fn redraw(&mut self, catalog: &Catalog, keyword: &str) -> Option<CardIndex> {
        let pos = position_of(catalog, &self.discard, keyword)?;
        let card = self.discard.remove(pos);
        self.hand.push(card);
        Some(card)
    }

    /// Return every held card to `deck`, clear both piles, and shuffle.
    /// No intermediate state is observable to the caller.
    pub fn shuffle_into(&mut self, deck: &mut Deck) {
        for card in self.hand.drain(..).chain(self.discard.drain(..)) {
            deck.insert_bottom(card);
        }
        deck.shuffle();
    }

    pub fn hand(&self) -> &[CardIndex] {
        &self.hand
    }

    pub fn discard(&self) -> &[CardIndex] {
        &self.discard
    }

    pub(crate) fn remove_from_hand(&mut self, card: CardIndex) -> bool {
        remove_first(&mut self.hand, card)
    }

    pub(crate) fn remove_from_discard(&mut self, card: CardIndex) -> bool {
        remove_first(&mut self.discard, card)
    }

    pub(crate) fn push_hand_front(&mut self, card: CardIndex) {
        self.hand.insert(0, card);
    }

    pub(crate) fn push_discard_front(&mut self, card: CardIndex) {
        self.discard.insert(0, card);
    }
}

// Explicit ordered scan so the first-match tie-break is the pile's own
// iteration order, never an incidental container order.
fn position_of(catalog: &Catalog, pile: &[CardIndex], keyword: &str) -> Option<usize> {
    pile.iter().position(|&idx| {
        catalog
            .get(idx)
            .map(|card| card.matches(keyword))
            .unwrap_or(false)
    })
}

fn remove_first(pile: &mut Vec<CardIndex>, card: CardIndex) -> bool {
    match pile.iter().position(|&c| c == card) {
        Some(pos) => {
            pile.remove(pos);
            true
        }
        None => false,
    }
}
