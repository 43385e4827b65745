//! In-Memory Ordering Store
//!
//! Implements every outbound persistence port over `parking_lot` locks.
//! Each write holds its table lock for the whole statement or batch, which
//! gives the same all-or-nothing behavior a relational transaction gives
//! the production gateway.

use crate::domain::entities::{OrderedItem, PersonalOrderEntry, PositionRow, RankUpdate};
use crate::domain::errors::GatewayError;
use crate::domain::value_objects::{
    ActorId, Category, CollectionId, ItemId, MoveKind, Timestamp, UserId,
};
use crate::ports::outbound::{ActivityLog, CategoryWriter, PersonalOrderStore, SparseItemStore};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// One audited category change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityRecord {
    pub item_id: ItemId,
    pub category: Category,
    pub actor: ActorId,
}

/// In-memory gateway for tests and for hosts without a database.
///
/// Supports failure injection so atomicity can be observed.
#[derive(Default)]
pub struct InMemoryOrderingStore {
    items: RwLock<HashMap<ItemId, OrderedItem>>,
    positions: RwLock<HashMap<(UserId, ItemId), PersonalOrderEntry>>,
    activity: RwLock<Vec<ActivityRecord>>,
    /// Upsert batches containing any of these items abort.
    poisoned_items: RwLock<HashSet<ItemId>>,
    fail_category_changes: AtomicBool,
}

impl InMemoryOrderingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an item row.
    pub fn insert_item(&self, item: OrderedItem) {
        self.items.write().insert(item.id, item);
    }

    pub fn item(&self, item_id: ItemId) -> Option<OrderedItem> {
        self.items.read().get(&item_id).cloned()
    }

    /// Items of one collection in rank order.
    pub fn items_in(&self, collection_id: CollectionId) -> Vec<OrderedItem> {
        let mut items: Vec<_> = self
            .items
            .read()
            .values()
            .filter(|item| item.collection_id == collection_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.rank.cmp(&b.rank).then(a.id.cmp(&b.id)));
        items
    }

    pub fn position(&self, user_id: UserId, item_id: ItemId) -> Option<PersonalOrderEntry> {
        self.positions.read().get(&(user_id, item_id)).cloned()
    }

    /// A user's uncleared entries in position order.
    pub fn positions_for(&self, user_id: UserId) -> Vec<PersonalOrderEntry> {
        let mut entries: Vec<_> = self
            .positions
            .read()
            .values()
            .filter(|entry| entry.user_id == user_id && !entry.cleared)
            .cloned()
            .collect();
        entries.sort_by_key(|entry| (entry.position, entry.item_id));
        entries
    }

    pub fn activity(&self) -> Vec<ActivityRecord> {
        self.activity.read().clone()
    }

    /// Make every upsert batch that touches `item_id` abort.
    pub fn fail_upserts_for(&self, item_id: ItemId) {
        self.poisoned_items.write().insert(item_id);
    }

    /// Make every category change fail while `fail` is set.
    pub fn fail_category_changes(&self, fail: bool) {
        self.fail_category_changes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl SparseItemStore for InMemoryOrderingStore {
    async fn update_rank(&self, update: RankUpdate) -> Result<Option<OrderedItem>, GatewayError> {
        let mut items = self.items.write();
        let Some(item) = items.get_mut(&update.item_id) else {
            return Ok(None);
        };

        match update.change {
            MoveKind::ReorderOnly => {
                if item.collection_id != update.collection_id {
                    return Ok(None);
                }
            }
            MoveKind::WithCategoryChange { category } => {
                item.collection_id = update.collection_id;
                item.category = category;
            }
        }
        item.rank = update.rank;
        item.updated_by = Some(update.updated_by);
        item.updated_at = update.updated_at;

        debug!(item_id = %item.id, rank = %item.rank, "[ordering] Row updated");
        Ok(Some(item.clone()))
    }
}

#[async_trait]
impl PersonalOrderStore for InMemoryOrderingStore {
    async fn upsert_positions(&self, rows: Vec<PositionRow>) -> Result<(), GatewayError> {
        let mut positions = self.positions.write();

        {
            let poisoned = self.poisoned_items.read();
            if let Some(row) = rows.iter().find(|row| poisoned.contains(&row.item_id)) {
                return Err(GatewayError::TransactionAborted(format!(
                    "write rejected for item {}",
                    row.item_id
                )));
            }
        }

        let count = rows.len();
        for row in rows {
            positions.insert((row.user_id, row.item_id), row.into());
        }

        debug!(rows = count, "[ordering] Positions upserted");
        Ok(())
    }

    async fn clear_positions(
        &self,
        user_id: UserId,
        items: Vec<ItemId>,
        at: Timestamp,
    ) -> Result<usize, GatewayError> {
        let mut positions = self.positions.write();
        let mut cleared = 0;
        for item_id in items {
            if let Some(entry) = positions.get_mut(&(user_id, item_id)) {
                entry.cleared = true;
                entry.updated_at = at;
                cleared += 1;
            }
        }
        Ok(cleared)
    }
}

#[async_trait]
impl CategoryWriter for InMemoryOrderingStore {
    async fn change_category(
        &self,
        item_id: ItemId,
        category: Category,
        actor: ActorId,
        at: Timestamp,
    ) -> Result<Category, GatewayError> {
        if self.fail_category_changes.load(Ordering::SeqCst) {
            return Err(GatewayError::Unavailable("category write refused".into()));
        }

        let mut items = self.items.write();
        let item = items.get_mut(&item_id).ok_or(GatewayError::NotFound)?;
        item.updated_by = Some(actor);
        item.updated_at = at;
        Ok(std::mem::replace(&mut item.category, category))
    }
}

#[async_trait]
impl ActivityLog for InMemoryOrderingStore {
    async fn record_category_change(
        &self,
        item_id: ItemId,
        category: &Category,
        actor: ActorId,
    ) -> Result<(), GatewayError> {
        self.activity.write().push(ActivityRecord {
            item_id,
            category: category.clone(),
            actor,
        });
        Ok(())
    }
}
