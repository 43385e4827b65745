//! Ports module for the ordering engine
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::PlacementApi;
pub use outbound::{
    ActivityLog, CategoryWriter, NoopActivityLog, PersonalOrderStore, SparseItemStore,
    SystemTimeSource, TimeSource,
};
