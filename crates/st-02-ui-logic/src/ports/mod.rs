//! Ports for UI Logic

pub mod outbound;

pub use outbound::*;
