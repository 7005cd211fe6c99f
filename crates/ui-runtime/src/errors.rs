//! Runtime errors.

use shared_types::SceneError;
use st_01_panel_layers::{ConfigError, LayerError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("UI configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read prefab catalog {path}: {source}")]
    CatalogIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid prefab catalog: {0}")]
    CatalogParse(#[from] serde_json::Error),

    #[error("Layer setup failed: {0}")]
    Layer(#[from] LayerError),

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("Invalid setting {name}={value}")]
    Setting { name: &'static str, value: String },
}
