//! Placement Service
//!
//! Main service implementing `PlacementApi`. Dispatches a strategy-tagged
//! request to the sparse or dense coordinator; the two mechanisms stay
//! separate underneath.

use super::dense::DenseOrderCoordinator;
use super::sparse::SparseOrderCoordinator;
use crate::config::OrderingConfig;
use crate::domain::entities::{PlacementOutcome, PlacementRequest};
use crate::domain::errors::OrderingError;
use crate::ports::inbound::PlacementApi;
use crate::ports::outbound::{
    ActivityLog, CategoryWriter, PersonalOrderStore, SparseItemStore, TimeSource,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Placement Service
///
/// ## Dependencies
///
/// - `S: SparseItemStore` - single-row rank updates
/// - `L: ActivityLog` - audit of committed category changes
/// - `P: PersonalOrderStore` - transactional position upserts
/// - `C: CategoryWriter` - category commits ahead of a dense renumber
pub struct PlacementService<S, L, P, C>
where
    S: SparseItemStore,
    L: ActivityLog,
    P: PersonalOrderStore,
    C: CategoryWriter,
{
    sparse: SparseOrderCoordinator<S, L>,
    dense: DenseOrderCoordinator<P, C>,
}

impl<S, L, P, C> PlacementService<S, L, P, C>
where
    S: SparseItemStore,
    L: ActivityLog,
    P: PersonalOrderStore,
    C: CategoryWriter,
{
    pub fn new(sparse: SparseOrderCoordinator<S, L>, dense: DenseOrderCoordinator<P, C>) -> Self {
        Self { sparse, dense }
    }

    pub fn sparse(&self) -> &SparseOrderCoordinator<S, L> {
        &self.sparse
    }

    pub fn dense(&self) -> &DenseOrderCoordinator<P, C> {
        &self.dense
    }

    /// Replace the clock of both coordinators.
    pub fn with_clock(self, clock: Arc<dyn TimeSource>) -> Self {
        Self {
            sparse: self.sparse.with_clock(clock.clone()),
            dense: self.dense.with_clock(clock),
        }
    }
}

impl<G> PlacementService<G, G, G, G>
where
    G: SparseItemStore + ActivityLog + PersonalOrderStore + CategoryWriter,
{
    /// Build both coordinators over one gateway implementing every port.
    pub fn with_gateway(config: OrderingConfig, gateway: Arc<G>) -> Self {
        Self::new(
            SparseOrderCoordinator::new(config.clone(), gateway.clone(), gateway.clone()),
            DenseOrderCoordinator::new(config, gateway.clone(), gateway),
        )
    }
}

#[async_trait]
impl<S, L, P, C> PlacementApi for PlacementService<S, L, P, C>
where
    S: SparseItemStore,
    L: ActivityLog,
    P: PersonalOrderStore,
    C: CategoryWriter,
{
    async fn place(&self, request: PlacementRequest) -> Result<PlacementOutcome, OrderingError> {
        debug!(strategy = ?request.strategy(), "[ordering] Placing item");

        match request {
            PlacementRequest::Sparse(mv) => {
                let item = self.sparse.move_item(mv).await?;
                Ok(PlacementOutcome::Sparse(item))
            }
            PlacementRequest::Dense {
                reorder,
                change,
                actor,
            } => {
                let rows_written = self.dense.move_with_category(reorder, change, actor).await?;
                Ok(PlacementOutcome::Dense { rows_written })
            }
        }
    }
}
