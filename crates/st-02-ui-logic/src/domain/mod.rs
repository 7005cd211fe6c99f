//! Domain module for UI Logic
//!
//! Contains the logic trait, spawn bookkeeping and errors.

pub mod errors;
pub mod ledger;
pub mod logic;

pub use errors::*;
pub use ledger::SpawnLedger;
pub use logic::UiLogic;
