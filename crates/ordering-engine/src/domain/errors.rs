//! Error types for the ordering engine

use super::value_objects::{ItemId, UserId};
use thiserror::Error;

/// Why a supplied rank key was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidRankReason {
    /// Nothing left after trimming.
    Empty,
    /// A character outside `[0-9a-z]` after normalization.
    IllegalCharacter { ch: char, position: usize },
    /// Longer than the configured input bound.
    TooLong { len: usize, max: usize },
}

/// A rank key failed alphabet validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid rank {input:?}: {reason}")]
pub struct InvalidRankError {
    pub input: String,
    pub reason: InvalidRankReason,
}

impl InvalidRankError {
    pub fn new(input: impl Into<String>, reason: InvalidRankReason) -> Self {
        Self {
            input: input.into(),
            reason,
        }
    }
}

impl std::fmt::Display for InvalidRankReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty after normalization"),
            Self::IllegalCharacter { ch, position } => {
                write!(f, "illegal character {ch:?} at position {position}")
            }
            Self::TooLong { len, max } => write!(f, "length {len} exceeds {max}"),
        }
    }
}

/// Errors returned by persistence gateway ports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The row disappeared between read and write.
    #[error("Row not found")]
    NotFound,

    /// The transaction was rolled back; nothing was written.
    #[error("Transaction aborted: {0}")]
    TransactionAborted(String),

    /// The store could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// All errors surfaced by the ordering engine
#[derive(Debug, Error)]
pub enum OrderingError {
    /// A neighbor key failed validation
    #[error(transparent)]
    InvalidRank(#[from] InvalidRankError),

    /// No key sorts strictly between the bounds
    #[error("Invalid range: {prev:?} is not strictly before {next:?}")]
    InvalidRange { prev: String, next: String },

    /// The item is missing at write time
    #[error("Item not found: {item_id}")]
    NotFound { item_id: ItemId },

    /// The target sequence does not contain the moved item
    #[error("Moved item {item_id} missing from target sequence")]
    MovedItemMissing { item_id: ItemId },

    /// An item appears more than once across the sequences
    #[error("Item {item_id} appears more than once")]
    DuplicateItem { item_id: ItemId },

    /// Target sequence is empty
    #[error("Empty target sequence for user {user_id}")]
    EmptySequence { user_id: UserId },

    /// Combined sequence length exceeds the configured bound
    #[error("Sequence too large: {size} > {max}")]
    SequenceTooLarge { size: usize, max: usize },

    /// The category change preceding a renumber failed; nothing was renumbered
    #[error("Category change failed: {0}")]
    CategoryChangeFailed(#[source] GatewayError),

    /// The persistence gateway rejected the write
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}
