//! Outbound Ports (Driven Ports / SPI)
//!
//! The persistence gateway and the other collaborators the coordinators
//! depend on. Hosts inject implementations; tests use the in-memory
//! adapter.

use crate::domain::entities::{OrderedItem, PositionRow, RankUpdate};
use crate::domain::errors::GatewayError;
use crate::domain::value_objects::{ActorId, Category, ItemId, Timestamp, UserId};
use async_trait::async_trait;

/// Row store for sparse-ordered items
#[async_trait]
pub trait SparseItemStore: Send + Sync {
    /// Conditional single-row update by primary key.
    ///
    /// Writes rank, category (when the update carries a change),
    /// `updated_by` and `updated_at` in one statement. Returns `Ok(None)`
    /// when no row matches: the item is gone, or a reorder-only update
    /// names a collection the item is not in.
    async fn update_rank(&self, update: RankUpdate) -> Result<Option<OrderedItem>, GatewayError>;
}

/// Store for per-user private positions
#[async_trait]
pub trait PersonalOrderStore: Send + Sync {
    /// Transactional batch upsert keyed by `(user_id, item_id)`.
    ///
    /// All rows succeed or none are written.
    async fn upsert_positions(&self, rows: Vec<PositionRow>) -> Result<(), GatewayError>;

    /// Set the cleared flag on a user's rows in one transaction.
    ///
    /// Returns the number of rows flagged; missing rows are skipped.
    async fn clear_positions(
        &self,
        user_id: UserId,
        items: Vec<ItemId>,
        at: Timestamp,
    ) -> Result<usize, GatewayError>;
}

/// Writes an item's category ahead of a dense renumber
#[async_trait]
pub trait CategoryWriter: Send + Sync {
    /// Commit the new category, returning the one it replaced.
    async fn change_category(
        &self,
        item_id: ItemId,
        category: Category,
        actor: ActorId,
        at: Timestamp,
    ) -> Result<Category, GatewayError>;
}

/// Audit trail for category changes.
///
/// Called only after the mutation has committed; pure reorders are not
/// recorded.
#[async_trait]
pub trait ActivityLog: Send + Sync {
    async fn record_category_change(
        &self,
        item_id: ItemId,
        category: &Category,
        actor: ActorId,
    ) -> Result<(), GatewayError>;
}

/// Abstract interface for time operations (for testability).
pub trait TimeSource: Send + Sync {
    /// Current timestamp in seconds since epoch.
    fn now(&self) -> Timestamp;
}

/// Default time source using system time.
#[derive(Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Activity log for hosts that keep no audit trail.
#[derive(Default)]
pub struct NoopActivityLog;

#[async_trait]
impl ActivityLog for NoopActivityLog {
    async fn record_category_change(
        &self,
        _item_id: ItemId,
        _category: &Category,
        _actor: ActorId,
    ) -> Result<(), GatewayError> {
        Ok(())
    }
}
