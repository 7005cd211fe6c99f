//! Configuration for the UI layer stack.
//!
//! Supplied once at construction and immutable afterwards.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// UI configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Layer names, in declaration order.
    pub panel_levels: Vec<String>,
    /// Optional stacking order, parallel to `panel_levels`.
    #[serde(default)]
    pub panel_level_order: Option<Vec<i32>>,
    /// Name of the root canvas node the layers are created under.
    #[serde(default = "default_canvas")]
    pub canvas: String,
    /// Name of the UI camera node.
    #[serde(default = "default_camera")]
    pub ui_camera: String,
}

fn default_canvas() -> String {
    "UICanvas".to_string()
}

fn default_camera() -> String {
    "UICamera".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            panel_levels: vec![
                "Background".to_string(),
                "Normal".to_string(),
                "Popup".to_string(),
                "Top".to_string(),
            ],
            panel_level_order: None,
            canvas: default_canvas(),
            ui_camera: default_camera(),
        }
    }
}

impl UiConfig {
    /// Build a config from layer names, with no explicit order.
    pub fn with_levels<I, S>(levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            panel_levels: levels.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_order(mut self, order: Vec<i32>) -> Self {
        self.panel_level_order = Some(order);
        self
    }

    /// Parse a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Whether the order array is present and parallel to the names.
    pub fn has_usable_order(&self) -> bool {
        self.panel_level_order
            .as_ref()
            .is_some_and(|order| order.len() == self.panel_levels.len())
    }
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
