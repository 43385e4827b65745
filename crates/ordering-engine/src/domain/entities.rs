//! Core entities for the ordering engine

use super::value_objects::{
    ActorId, Category, CollectionId, ItemId, MoveKind, OrderingStrategy, Position, RankKey,
    Timestamp, UserId,
};
use serde::{Deserialize, Serialize};

/// Item in a sparse-ordered collection (task, lead)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedItem {
    pub id: ItemId,
    /// Collection the item currently belongs to
    pub collection_id: CollectionId,
    pub rank: RankKey,
    /// Workflow status or stage, independent of rank
    pub category: Category,
    pub updated_by: Option<ActorId>,
    pub updated_at: Timestamp,
}

impl OrderedItem {
    pub fn new(id: ItemId, collection_id: CollectionId, rank: RankKey, category: Category) -> Self {
        Self {
            id,
            collection_id,
            rank,
            category,
            updated_by: None,
            updated_at: 0,
        }
    }
}

/// A user's private position for one item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalOrderEntry {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub position: Position,
    pub updated_at: Timestamp,
    /// Logically cleared once superseded; rows are never deleted
    pub cleared: bool,
}

/// Single-row write applied by the sparse coordinator.
///
/// Rank and category travel in one value so the gateway commits them in
/// one statement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankUpdate {
    pub item_id: ItemId,
    /// For `ReorderOnly` the item must already be here; otherwise it moves here
    pub collection_id: CollectionId,
    pub rank: RankKey,
    pub change: MoveKind,
    pub updated_by: ActorId,
    pub updated_at: Timestamp,
}

/// One row of a transactional position upsert keyed by `(user_id, item_id)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionRow {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub position: Position,
    pub updated_at: Timestamp,
    pub cleared: bool,
}

impl From<PositionRow> for PersonalOrderEntry {
    fn from(row: PositionRow) -> Self {
        Self {
            user_id: row.user_id,
            item_id: row.item_id,
            position: row.position,
            updated_at: row.updated_at,
            cleared: row.cleared,
        }
    }
}

/// Move one item of a shared collection between two neighbors.
///
/// Neighbor ranks arrive as raw strings from the caller and are validated
/// before use; `None` marks an open boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparseMove {
    pub item_id: ItemId,
    pub target_collection: CollectionId,
    pub prev_rank: Option<String>,
    pub next_rank: Option<String>,
    pub change: MoveKind,
    pub actor: ActorId,
}

impl SparseMove {
    pub fn new(item_id: ItemId, target_collection: CollectionId, actor: ActorId) -> Self {
        Self {
            item_id,
            target_collection,
            prev_rank: None,
            next_rank: None,
            change: MoveKind::ReorderOnly,
            actor,
        }
    }

    pub fn between(mut self, prev: Option<&str>, next: Option<&str>) -> Self {
        self.prev_rank = prev.map(str::to_owned);
        self.next_rank = next.map(str::to_owned);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.change = MoveKind::WithCategoryChange { category };
        self
    }
}

/// Rewrite a user's private order for one or two lists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenseReorder {
    pub user_id: UserId,
    pub moved_item: ItemId,
    /// Full order of the list the item lands in
    pub target_sequence: Vec<ItemId>,
    /// Full order of the list the item left, on a cross-list move
    pub source_sequence: Option<Vec<ItemId>>,
}

impl DenseReorder {
    pub fn new(user_id: UserId, moved_item: ItemId, target_sequence: Vec<ItemId>) -> Self {
        Self {
            user_id,
            moved_item,
            target_sequence,
            source_sequence: None,
        }
    }

    pub fn with_source(mut self, source_sequence: Vec<ItemId>) -> Self {
        self.source_sequence = Some(source_sequence);
        self
    }

    pub fn total_len(&self) -> usize {
        self.target_sequence.len() + self.source_sequence.as_ref().map_or(0, Vec::len)
    }
}

/// Reorder command tagged by the strategy backing the collection
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementRequest {
    Sparse(SparseMove),
    Dense {
        reorder: DenseReorder,
        change: MoveKind,
        actor: ActorId,
    },
}

impl PlacementRequest {
    /// Strategy backing the addressed collection
    pub fn strategy(&self) -> OrderingStrategy {
        match self {
            PlacementRequest::Sparse(_) => OrderingStrategy::Sparse,
            PlacementRequest::Dense { .. } => OrderingStrategy::Dense,
        }
    }
}

/// Result of a placement, for the caller to reconcile its own state
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// Updated identity, rank and category
    Sparse(OrderedItem),
    /// Number of position rows written
    Dense { rows_written: usize },
}
