//! Algorithms module for the ordering engine
//!
//! Contains:
//! - Rank key generation (sparse ordering)
//! - Position renumbering (dense ordering)

pub mod rank_key;
pub mod renumber;

pub use rank_key::{after, before, between, initial, rank_for_append};
pub use renumber::{assign_positions, rows_for_reorder, validate_reorder};
