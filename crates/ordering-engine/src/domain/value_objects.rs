//! Value objects for the ordering engine

use super::alphabet;
use super::errors::{InvalidRankError, InvalidRankReason};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Seconds since the Unix epoch
pub type Timestamp = u64;

/// 1-based position inside a user's private list
pub type Position = u32;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Fresh random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

id_type!(
    /// Identifier of an ordered item (task, lead)
    ItemId
);
id_type!(
    /// Identifier of the collection an item belongs to (board column, pipeline stage)
    CollectionId
);
id_type!(
    /// Identifier of the user owning a private ordering
    UserId
);
id_type!(
    /// Identifier of whoever performed a move, recorded as `updated_by`
    ActorId
);

/// Mutable category of an item (e.g. workflow status), independent of rank
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(pub String);

impl Category {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque order key compared lexicographically over the rank alphabet.
///
/// Every `RankKey` holds a normalized, non-empty string of alphabet
/// symbols, so plain byte order matches alphabet-index order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RankKey(String);

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        alphabet::compare(&self.0, &other.0)
    }
}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl RankKey {
    /// Validate a key that originates outside the generator.
    pub fn parse(input: &str) -> Result<Self, InvalidRankError> {
        alphabet::normalize(input).map(Self)
    }

    /// Like [`RankKey::parse`] but also bounds the normalized length.
    pub fn parse_bounded(input: &str, max_len: usize) -> Result<Self, InvalidRankError> {
        let key = Self::parse(input)?;
        if key.len() > max_len {
            return Err(InvalidRankError::new(
                input,
                InvalidRankReason::TooLong {
                    len: key.len(),
                    max: max_len,
                },
            ));
        }
        Ok(key)
    }

    /// Wrap symbols produced by the generator.
    pub(crate) fn from_symbols(symbols: Vec<u8>) -> Self {
        debug_assert!(!symbols.is_empty());
        debug_assert!(symbols.iter().all(|s| alphabet::index_of(*s).is_some()));
        // Every byte is an ASCII alphabet symbol.
        Self(symbols.into_iter().map(char::from).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RankKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RankKey {
    type Err = InvalidRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RankKey {
    type Error = InvalidRankError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RankKey> for String {
    fn from(key: RankKey) -> Self {
        key.0
    }
}

/// Which ordering mechanism backs a collection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderingStrategy {
    /// Shared rank keys, one atomic row update per move
    Sparse,
    /// Per-user integer positions, full rewrite per reorder
    Dense,
}

/// A move either keeps the item's category or changes it in the same write.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    ReorderOnly,
    WithCategoryChange { category: Category },
}

impl MoveKind {
    pub fn category(&self) -> Option<&Category> {
        match self {
            MoveKind::ReorderOnly => None,
            MoveKind::WithCategoryChange { category } => Some(category),
        }
    }
}
