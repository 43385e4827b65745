//! Dense Order Coordinator
//!
//! Reorders a single user's private list by rewriting every position in
//! the affected sequence(s) inside one transaction. Lists are small and no
//! other user can contend for the rows, so a full O(n) rewrite is used
//! instead of rank keys.

use crate::algorithms::renumber::{rows_for_reorder, validate_reorder};
use crate::config::OrderingConfig;
use crate::domain::entities::DenseReorder;
use crate::domain::errors::OrderingError;
use crate::domain::invariants::{invariant_dense_positions, invariant_single_owner};
use crate::domain::value_objects::{ActorId, ItemId, MoveKind, UserId};
use crate::ports::outbound::{CategoryWriter, PersonalOrderStore, SystemTimeSource, TimeSource};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Rewrites per-user integer positions.
pub struct DenseOrderCoordinator<P: PersonalOrderStore, C: CategoryWriter> {
    config: OrderingConfig,
    positions: Arc<P>,
    categories: Arc<C>,
    clock: Arc<dyn TimeSource>,
}

impl<P: PersonalOrderStore, C: CategoryWriter> DenseOrderCoordinator<P, C> {
    pub fn new(config: OrderingConfig, positions: Arc<P>, categories: Arc<C>) -> Self {
        Self {
            config,
            positions,
            categories,
            clock: Arc::new(SystemTimeSource),
        }
    }

    /// Replace the system clock.
    pub fn with_clock(mut self, clock: Arc<dyn TimeSource>) -> Self {
        self.clock = clock;
        self
    }

    /// Assign positions `1..=n` in array order to the target sequence and,
    /// on a cross-list move, the source sequence, in one transaction.
    ///
    /// Any category change must already be committed; see
    /// [`move_with_category`](Self::move_with_category) for the combined flow.
    #[instrument(skip(self, reorder), fields(user_id = %reorder.user_id))]
    pub async fn renumber(&self, reorder: DenseReorder) -> Result<usize, OrderingError> {
        validate_reorder(&reorder, self.config.max_sequence_len)?;
        self.write_positions(&reorder).await
    }

    /// Change the moved item's category, then renumber.
    ///
    /// The reorder is validated before the category is touched. If the
    /// category change fails, no renumber is attempted and the gateway error
    /// is returned unmodified inside `CategoryChangeFailed`. If the renumber
    /// fails after the category committed, the previous category is written
    /// back before the renumber error is returned.
    #[instrument(skip(self, reorder, change), fields(user_id = %reorder.user_id))]
    pub async fn move_with_category(
        &self,
        reorder: DenseReorder,
        change: MoveKind,
        actor: ActorId,
    ) -> Result<usize, OrderingError> {
        validate_reorder(&reorder, self.config.max_sequence_len)?;

        let MoveKind::WithCategoryChange { category } = change else {
            return self.write_positions(&reorder).await;
        };

        let item_id = reorder.moved_item;
        let previous = self
            .categories
            .change_category(item_id, category, actor, self.clock.now())
            .await
            .map_err(OrderingError::CategoryChangeFailed)?;

        match self.write_positions(&reorder).await {
            Ok(written) => Ok(written),
            Err(err) => {
                warn!(item_id = %item_id, error = %err, "[ordering] Renumber failed, restoring category");
                if let Err(revert) = self
                    .categories
                    .change_category(item_id, previous, actor, self.clock.now())
                    .await
                {
                    error!(item_id = %item_id, error = %revert, "[ordering] Category restore failed");
                }
                Err(err)
            }
        }
    }

    /// Soft-clear a user's positions for `items` once superseded.
    pub async fn clear(&self, user_id: UserId, items: Vec<ItemId>) -> Result<usize, OrderingError> {
        let cleared = self
            .positions
            .clear_positions(user_id, items, self.clock.now())
            .await?;
        info!(user_id = %user_id, cleared, "[ordering] Positions cleared");
        Ok(cleared)
    }

    async fn write_positions(&self, reorder: &DenseReorder) -> Result<usize, OrderingError> {
        let rows = rows_for_reorder(reorder, self.clock.now());
        let written = rows.len();
        debug_assert!(invariant_dense_positions(&rows[..reorder.target_sequence.len()]));
        debug_assert!(invariant_single_owner(&rows, reorder.user_id));

        self.positions.upsert_positions(rows).await?;

        info!(
            moved_item = %reorder.moved_item,
            rows = written,
            cross_list = reorder.source_sequence.is_some(),
            "[ordering] Positions renumbered"
        );
        Ok(written)
    }
}
