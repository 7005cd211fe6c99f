//! Domain module for Panel Layers
//!
//! Contains core entities, errors, and invariants.

pub mod entities;
pub mod errors;
pub mod invariants;

pub use entities::*;
pub use errors::*;
pub use invariants::*;
