//! Dense renumbering
//!
//! Turns a user's full ordered id sequence(s) into position rows,
//! 1-based in array order. O(n) per reorder; n is bounded by one user's
//! visible item count.

use crate::domain::entities::{DenseReorder, PositionRow};
use crate::domain::errors::OrderingError;
use crate::domain::value_objects::{ItemId, Position, Timestamp, UserId};
use std::collections::HashSet;

/// Check a reorder before anything is written.
///
/// The target sequence must be non-empty and contain the moved item, no
/// item may appear twice across both sequences, and the combined length
/// must not exceed `max_len`.
pub fn validate_reorder(reorder: &DenseReorder, max_len: usize) -> Result<(), OrderingError> {
    if reorder.target_sequence.is_empty() {
        return Err(OrderingError::EmptySequence {
            user_id: reorder.user_id,
        });
    }

    let size = reorder.total_len();
    if size > max_len {
        return Err(OrderingError::SequenceTooLarge { size, max: max_len });
    }

    if !reorder.target_sequence.contains(&reorder.moved_item) {
        return Err(OrderingError::MovedItemMissing {
            item_id: reorder.moved_item,
        });
    }

    let mut seen: HashSet<ItemId> = HashSet::with_capacity(size);
    let source = reorder.source_sequence.iter().flatten();
    for item_id in reorder.target_sequence.iter().chain(source) {
        if !seen.insert(*item_id) {
            return Err(OrderingError::DuplicateItem { item_id: *item_id });
        }
    }

    Ok(())
}

/// Position rows for one sequence, clearing any earlier soft-clear flag.
pub fn assign_positions(user_id: UserId, sequence: &[ItemId], now: Timestamp) -> Vec<PositionRow> {
    sequence
        .iter()
        .zip(1..)
        .map(|(item_id, position): (&ItemId, Position)| PositionRow {
            user_id,
            item_id: *item_id,
            position,
            updated_at: now,
            cleared: false,
        })
        .collect()
}

/// All rows written by one reorder: target sequence first, then source.
pub fn rows_for_reorder(reorder: &DenseReorder, now: Timestamp) -> Vec<PositionRow> {
    let mut rows = assign_positions(reorder.user_id, &reorder.target_sequence, now);
    if let Some(source) = &reorder.source_sequence {
        rows.extend(assign_positions(reorder.user_id, source, now));
    }
    rows
}
