//! Sparse Order Coordinator
//!
//! Reorders items of collections visible to many viewers (board columns,
//! pipeline stages). A move computes one new rank between the supplied
//! neighbors and persists it with one atomic row update.
//!
//! ## Concurrency
//!
//! No locking. Two viewers deriving a midpoint from the same neighbor pair
//! both succeed; the later write wins for that slot and any divergence
//! resolves on the next read. Callers keep at most one in-flight move per
//! dragged item.

use crate::algorithms::rank_key;
use crate::config::OrderingConfig;
use crate::domain::entities::{OrderedItem, RankUpdate, SparseMove};
use crate::domain::errors::OrderingError;
use crate::domain::invariants::invariant_strictly_between;
use crate::domain::value_objects::RankKey;
use crate::ports::outbound::{ActivityLog, SparseItemStore, SystemTimeSource, TimeSource};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Moves one shared item per call with a single write.
pub struct SparseOrderCoordinator<S: SparseItemStore, L: ActivityLog> {
    config: OrderingConfig,
    store: Arc<S>,
    activity: Arc<L>,
    clock: Arc<dyn TimeSource>,
}

impl<S: SparseItemStore, L: ActivityLog> SparseOrderCoordinator<S, L> {
    pub fn new(config: OrderingConfig, store: Arc<S>, activity: Arc<L>) -> Self {
        Self {
            config,
            store,
            activity,
            clock: Arc::new(SystemTimeSource),
        }
    }

    /// Replace the system clock.
    pub fn with_clock(mut self, clock: Arc<dyn TimeSource>) -> Self {
        self.clock = clock;
        self
    }

    /// Validate caller-supplied neighbor keys and compute the key between them.
    ///
    /// Keys from a request payload are re-normalized here even if the
    /// caller already did so; nothing reaches the generator unchecked.
    pub fn rank_between(
        &self,
        prev: Option<&str>,
        next: Option<&str>,
    ) -> Result<RankKey, OrderingError> {
        let max_len = self.config.max_rank_input_len;
        let prev = prev
            .map(|p| RankKey::parse_bounded(p, max_len))
            .transpose()?;
        let next = next
            .map(|n| RankKey::parse_bounded(n, max_len))
            .transpose()?;

        let rank = rank_key::between(prev.as_ref(), next.as_ref())?;
        debug_assert!(invariant_strictly_between(prev.as_ref(), &rank, next.as_ref()));
        debug!(
            prev = ?prev.as_ref().map(RankKey::as_str),
            next = ?next.as_ref().map(RankKey::as_str),
            rank = %rank,
            "[ordering] Computed rank"
        );

        if rank.len() > self.config.rank_length_warn_threshold {
            warn!(
                rank_len = rank.len(),
                threshold = self.config.rank_length_warn_threshold,
                "[ordering] Rank key growing past threshold"
            );
        }

        Ok(rank)
    }

    /// Rank for a newly created item placed after the collection's last item.
    pub fn rank_for_append(&self, last: Option<&RankKey>) -> RankKey {
        rank_key::rank_for_append(last)
    }

    /// Move one item between two neighbors, optionally changing its category.
    ///
    /// Rank and category are committed in the same row update. A category
    /// change is sent to the activity log only after that commit; an audit
    /// failure is logged and does not fail the move.
    #[instrument(skip(self, mv), fields(item_id = %mv.item_id))]
    pub async fn move_item(&self, mv: SparseMove) -> Result<OrderedItem, OrderingError> {
        let rank = self.rank_between(mv.prev_rank.as_deref(), mv.next_rank.as_deref())?;
        let audited = mv.change.category().cloned();

        let update = RankUpdate {
            item_id: mv.item_id,
            collection_id: mv.target_collection,
            rank,
            change: mv.change,
            updated_by: mv.actor,
            updated_at: self.clock.now(),
        };

        let updated = self
            .store
            .update_rank(update)
            .await?
            .ok_or(OrderingError::NotFound {
                item_id: mv.item_id,
            })?;

        info!(
            collection_id = %updated.collection_id,
            rank = %updated.rank,
            category = %updated.category,
            "[ordering] Item moved"
        );

        if let Some(category) = audited {
            if let Err(e) = self
                .activity
                .record_category_change(mv.item_id, &category, mv.actor)
                .await
            {
                warn!(error = %e, "[ordering] Activity log write failed after commit");
            }
        }

        Ok(updated)
    }
}
