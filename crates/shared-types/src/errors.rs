//! # Error Types
//!
//! Defines error types used across crates.

use crate::entities::VisualId;
use thiserror::Error;

/// Errors raised by `SceneGraph` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// The node does not exist (never spawned or already destroyed).
    #[error("Visual node not found: {0}")]
    NodeNotFound(VisualId),

    /// Re-parenting would make a node its own ancestor.
    #[error("Cannot attach {child} under {parent}: would create a cycle")]
    CycleDetected { child: VisualId, parent: VisualId },

    /// A binding path in a prefab does not name a child of the prefab.
    #[error("Prefab '{prefab}' binds unknown child path '{path}'")]
    UnresolvedBinding { prefab: String, path: String },
}

/// Errors returned by a `ResourceLoader`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    /// Nothing is registered under the path.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The resource exists but could not be instantiated.
    #[error("Failed to instantiate '{path}': {reason}")]
    Instantiate { path: String, reason: String },
}

impl From<SceneError> for ResourceError {
    fn from(err: SceneError) -> Self {
        match &err {
            SceneError::UnresolvedBinding { prefab, .. } => ResourceError::Instantiate {
                path: prefab.clone(),
                reason: err.to_string(),
            },
            _ => ResourceError::Instantiate {
                path: String::new(),
                reason: err.to_string(),
            },
        }
    }
}
