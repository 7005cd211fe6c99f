//! Error types for Panel Layers

use shared_types::SceneError;
use thiserror::Error;

/// All errors that can occur in the layer registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayerError {
    /// No layer is registered under the name.
    #[error("Layer not found: {0}")]
    NotFound(String),

    /// Creating a layer slot in the scene failed.
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}
