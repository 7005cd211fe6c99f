//! Error types for UI Logic

use shared_types::{ResourceError, SceneError};
use st_03_lifecycle::LifecycleError;
use thiserror::Error;

/// All errors that can occur while opening logic or loading panels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UiError {
    /// The logic targets a layer the registry does not know.
    #[error("Layer not found: {layer}")]
    LayerNotFound { layer: String },

    /// The resource loader failed.
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    /// The loaded object carries no panel marker. It has been destroyed.
    #[error("Object loaded from '{path}' is not a panel")]
    MissingPanel { path: String },

    /// Attaching the panel under its layer failed.
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// A lifecycle registration made by a hook failed.
    #[error("Lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),

    /// No open instance of the logic type could be produced.
    #[error("Logic not open: {logic}")]
    NotOpen { logic: &'static str },
}
