//! # fateweaver-engine: Tarot Card Game Core
//!
//! The state machine behind a tarot-themed card drawing game played over
//! chat commands. Cards move between a shuffled deck, a hand, and a discard
//! pile; state is partitioned per chat server and per user, and the whole
//! registry serializes to a snapshot for durable storage.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card records and the immutable catalog with keyword lookup
//! - [`deck`] - Ordered undrawn-card sequence with ChaCha20 shuffling
//! - [`diviner`] - Hand/discard state machine mediating card movement
//! - [`player`] - A diviner composed with its own deck, plus admin moves
//! - [`registry`] - Guild/player partitioning with lazy creation
//! - [`snapshot`] - Serializable DTOs for the persisted registry image
//! - [`errors`] - Catalog and snapshot error types
//!
//! ## Quick Start
//!
//! ```rust
//! use fateweaver_engine::cards::{Card, Catalog};
//! use fateweaver_engine::player::Player;
//!
//! let catalog = Catalog::from_cards(vec![Card {
//!     id: 0,
//!     number: "0".into(),
//!     name: "The Fool".into(),
//!     keywords: vec!["fool".into(), "jester".into()],
//!     description: "New beginnings.".into(),
//!     image: String::new(),
//! }]);
//!
//! let mut player = Player::new(catalog.len());
//! let drawn = player.draw().expect("one card in the deck");
//! assert_eq!(catalog.get(drawn).unwrap().name, "The Fool");
//!
//! // Playing by keyword moves the card from hand to discard.
//! let played = player.play(&catalog, "jester").expect("card is in hand");
//! assert_eq!(played, drawn);
//! assert!(player.hand().is_empty());
//! ```
//!
//! ## Sentinels over errors
//!
//! Drawing from an empty deck and keyword searches that match nothing return
//! `None` rather than an error; the caller decides on user-facing messaging:
//!
//! ```rust
//! use fateweaver_engine::deck::Deck;
//!
//! let mut deck = Deck::new_with_seed(0, 7);
//! assert!(deck.draw().is_none());
//! ```

pub mod cards;
pub mod deck;
pub mod diviner;
pub mod errors;
pub mod player;
pub mod registry;
pub mod snapshot;
