//! Domain module for the ordering engine
//!
//! Contains the rank alphabet, entities, value objects, errors, and invariants.

pub mod alphabet;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use value_objects::*;
