//! # Ordering Engine
//!
//! Drag-reorder persistence for ordered collections without rewriting
//! unrelated rows and without a shared lock.
//!
//! Two strategies live side by side:
//!
//! - **Sparse**: collections shared by many viewers (board columns,
//!   pipeline stages) carry lexicographic rank keys. A move computes one
//!   key between its neighbors and persists it with one atomic row update.
//! - **Dense**: a single user's private list carries integer positions,
//!   rewritten in full inside one transaction on every reorder.
//!
//! ## Architecture
//!
//! - **Domain**: Rank alphabet, entities, value objects, errors, invariants
//! - **Algorithms**: Rank key generation, position renumbering
//! - **Ports**: Inbound (`PlacementApi`) and Outbound (`SparseItemStore`,
//!   `PersonalOrderStore`, `CategoryWriter`, `ActivityLog`, `TimeSource`)
//! - **Application**: Sparse and dense coordinators, placement service
//! - **Adapters**: In-memory gateway
//!
//! Authorization is expected to have happened before any call reaches
//! the engine.

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::{ActivityRecord, InMemoryOrderingStore};
pub use application::{DenseOrderCoordinator, PlacementService, SparseOrderCoordinator};
pub use config::OrderingConfig;
pub use domain::entities::*;
pub use domain::errors::{GatewayError, InvalidRankError, InvalidRankReason, OrderingError};
pub use domain::value_objects::*;
pub use ports::inbound::PlacementApi;
pub use ports::outbound::{
    ActivityLog, CategoryWriter, NoopActivityLog, PersonalOrderStore, SparseItemStore,
    SystemTimeSource, TimeSource,
};
