//! Domain invariants for the ordering engine

use super::alphabet::{self, ALPHABET};
use super::entities::PositionRow;
use super::value_objects::{RankKey, UserId};
use std::collections::HashSet;

/// INVARIANT-1: Alphabet Monotonicity
/// Symbol byte values increase with alphabet index, so string comparison
/// of keys equals index-by-index comparison.
pub fn invariant_alphabet_monotonic() -> bool {
    alphabet::is_monotonic(&ALPHABET)
}

/// INVARIANT-2: Strictly Between
/// A generated key sorts strictly after `prev` and strictly before `next`.
/// Open bounds are always satisfied.
pub fn invariant_strictly_between(
    prev: Option<&RankKey>,
    key: &RankKey,
    next: Option<&RankKey>,
) -> bool {
    let after_prev = prev.is_none_or(|p| p < key);
    let before_next = next.is_none_or(|n| key < n);
    after_prev && before_next
}

/// INVARIANT-3: Dense Positions
/// Each user's rows in one sequence carry positions `1..=n` in order,
/// with no item repeated.
pub fn invariant_dense_positions(rows: &[PositionRow]) -> bool {
    let mut seen = HashSet::new();
    for (index, row) in rows.iter().enumerate() {
        if row.position as usize != index + 1 || !seen.insert(row.item_id) {
            return false;
        }
    }
    true
}

/// INVARIANT-4: Single Owner
/// A renumber batch only touches one user's rows.
pub fn invariant_single_owner(rows: &[PositionRow], user_id: UserId) -> bool {
    rows.iter().all(|row| row.user_id == user_id)
}
