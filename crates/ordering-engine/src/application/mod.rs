//! Application layer
//!
//! Coordinators orchestrating validation, key generation and persistence.

pub mod dense;
pub mod placement;
pub mod sparse;

pub use dense::DenseOrderCoordinator;
pub use placement::PlacementService;
pub use sparse::SparseOrderCoordinator;
