use thiserror::Error;

/// Failures loading or indexing the card catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read card catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse card catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("card index {index} out of range (catalog holds {len} cards)")]
    OutOfRange { index: usize, len: usize },
}

/// Failures rebuilding players from a persisted snapshot. Any of these means
/// the snapshot no longer partitions the catalog into deck, hand, and
/// discard, and the restore is rejected wholesale.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("card index {index} does not exist in the catalog")]
    UnknownCard { index: usize },
    #[error("card index {index} appears in more than one pile")]
    DuplicateCard { index: usize },
    #[error("{missing} card(s) are in no pile")]
    MissingCards { missing: usize },
}
