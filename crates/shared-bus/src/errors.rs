//! # Bus Errors

use crate::handler::Signature;
use thiserror::Error;

/// Errors from event bus operations.
///
/// Lookup misses (unknown channel, absent handler) are not errors; they are
/// logged and reported through return values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BusError {
    /// Publisher or subscriber disagrees with the channel's signature.
    #[error("Signature mismatch on channel '{channel}': channel is {expected}, got {actual}")]
    SignatureMismatch {
        channel: String,
        expected: Signature,
        actual: Signature,
    },
}
