//! Domain module for Lifecycle
//!
//! Contains task identities, teardown outcomes and errors.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
