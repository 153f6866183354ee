use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::errors::CatalogError;

/// Position of a card inside the catalog. Piles hold indices, never owned
/// [`Card`] values; the catalog remains the single source of card data.
pub type CardIndex = usize;

/// A single tarot card as loaded from the catalog file.
/// Card data is immutable after load and referenced by [`CardIndex`] everywhere.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Stable identifier, also the display sort key
    pub id: u32,
    /// Traditional numbering (e.g. "0", "XIII")
    pub number: String,
    /// Full card name (e.g. "The Fool")
    pub name: String,
    /// Lookup keywords accepted in place of the full name
    pub keywords: Vec<String>,
    /// Meaning text shown when the card is displayed
    pub description: String,
    /// Link to the card artwork
    pub image: String,
}

impl Card {
    /// Lookup predicate shared by catalog search and pile scans:
    /// case-insensitive exact name match, or membership in the keyword set.
    pub fn matches(&self, text: &str) -> bool {
        let needle = text.to_lowercase();
        self.name.to_lowercase() == needle
            || self.keywords.iter().any(|k| k.to_lowercase() == needle)
    }
}

// The catalog file wraps its entries: {"cards": [...]}
#[derive(Debug, Deserialize)]
struct CatalogFile {
    cards: Vec<Card>,
}

/// The fixed, ordered list of every card definition. Loaded once at process
/// start; no mutation is exposed afterwards.
#[derive(Debug, Clone)]
pub struct Catalog {
    cards: Vec<Card>,
}

impl Catalog {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)?;
        let file: CatalogFile = serde_json::from_str(&raw)?;
        Ok(Self { cards: file.cards })
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn get(&self, index: CardIndex) -> Result<&Card, CatalogError> {
        self.cards.get(index).ok_or(CatalogError::OutOfRange {
            index,
            len: self.cards.len(),
        })
    }

    /// First catalog card matching `text`. Ties resolve in catalog order,
    /// not by relevance; the first listed card wins.
    pub fn find(&self, text: &str) -> Option<CardIndex> {
        self.cards.iter().position(|card| card.matches(text))
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
