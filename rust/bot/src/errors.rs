use std::fmt;
use thiserror::Error;

use fateweaver_engine::errors::CatalogError;

/// Where a failed keyword search was looking, for the failure message.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SearchScope {
    Catalog,
    Hand,
    Discard,
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            SearchScope::Catalog => "the catalog",
            SearchScope::Hand => "your hand",
            SearchScope::Discard => "your discard pile",
        };
        write!(f, "{repr}")
    }
}

/// User-visible command failures. Every variant maps to a failure message at
/// the boundary; none of them terminates the process or corrupts registry
/// state. Failed lookups short-circuit before any pile mutation begins.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("could not find a card matching \"{keyword}\" in {scope}")]
    NotFound { keyword: String, scope: SearchScope },
    #[error("cannot draw a card from an empty deck")]
    EmptyDeck,
    #[error("tabletop channel not set")]
    TabletopNotSet,
    #[error("destination must be 'deck', 'hand', or 'discard' (got \"{0}\")")]
    InvalidDestination(String),
    #[error("game state error: {0}")]
    State(String),
}

impl From<CatalogError> for CommandError {
    fn from(err: CatalogError) -> Self {
        CommandError::State(err.to_string())
    }
}
