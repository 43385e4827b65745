//! Inbound Ports (Driving Ports / API)

use crate::domain::entities::{PlacementOutcome, PlacementRequest};
use crate::domain::errors::OrderingError;
use async_trait::async_trait;

/// Primary ordering API
///
/// One "place item between neighbors" entry point. The request is tagged
/// with the strategy backing the collection, so edge callers need not
/// know whether shared rank keys or private positions sit behind it.
#[async_trait]
pub trait PlacementApi: Send + Sync {
    /// Apply a reorder.
    ///
    /// Sparse requests compute one new rank and persist it with a single
    /// atomic row update. Dense requests rewrite the user's positions in
    /// one transaction, after committing any category change.
    async fn place(&self, request: PlacementRequest) -> Result<PlacementOutcome, OrderingError>;
}
