//! Error types for Lifecycle

use shared_bus::BusError;
use thiserror::Error;

/// All errors that can occur in lifecycle bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// The host was already torn down; nothing new may be registered.
    #[error("Lifecycle host '{owner}' is torn down")]
    TornDown { owner: String },

    /// The bus rejected a subscription.
    #[error("Bus error: {0}")]
    Bus(#[from] BusError),
}
