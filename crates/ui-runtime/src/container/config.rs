//! # Runtime Settings
//!
//! Settings for the headless binary, read from the environment.

use crate::errors::RuntimeError;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Settings for one headless session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeSettings {
    /// `UiConfig` JSON file. Defaults apply when unset.
    pub ui_config: Option<PathBuf>,
    /// `PrefabCatalog` JSON file. Empty catalog when unset.
    pub prefabs: Option<PathBuf>,
    /// Number of frames to run.
    pub frames: u64,
    /// Virtual time per frame.
    pub frame_delta: Duration,
    /// Layer the session panels are loaded into. First layer when unset.
    pub layer: Option<String>,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            ui_config: None,
            prefabs: None,
            frames: 60,
            frame_delta: Duration::from_millis(16),
            layer: None,
        }
    }
}

impl RuntimeSettings {
    /// Read settings from the environment.
    ///
    /// - `ST_UI_CONFIG`: path to the UI config JSON
    /// - `ST_PREFABS`: path to the prefab catalog JSON
    /// - `ST_FRAMES`: frames to run (default: 60)
    /// - `ST_FRAME_MS`: milliseconds per frame (default: 16)
    /// - `ST_LAYER`: target layer for session panels
    pub fn from_env() -> Result<Self, RuntimeError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, RuntimeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let frames = match lookup("ST_FRAMES") {
            Some(v) => parse_number("ST_FRAMES", v)?,
            None => defaults.frames,
        };
        let frame_delta = match lookup("ST_FRAME_MS") {
            Some(v) => Duration::from_millis(parse_number("ST_FRAME_MS", v)?),
            None => defaults.frame_delta,
        };

        Ok(Self {
            ui_config: lookup("ST_UI_CONFIG").map(PathBuf::from),
            prefabs: lookup("ST_PREFABS").map(PathBuf::from),
            frames,
            frame_delta,
            layer: lookup("ST_LAYER").filter(|l| !l.is_empty()),
        })
    }
}

fn parse_number(name: &'static str, value: String) -> Result<u64, RuntimeError> {
    value
        .trim()
        .parse()
        .map_err(|_| RuntimeError::Setting { name, value })
}
