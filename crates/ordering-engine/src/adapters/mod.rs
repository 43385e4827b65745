//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits. Production hosts supply their own
//! relational gateway; the in-memory store backs tests and embedded use.

mod memory;

pub use memory::{ActivityRecord, InMemoryOrderingStore};
