//! # Prefab Loader
//!
//! In-memory [`ResourceLoader`] backed by a catalog of prefab templates.
//!
//! Synchronous loads instantiate immediately. Asynchronous loads are queued
//! and delivered, in issue order, by the next [`ResourceLoader::poll`],
//! which the runtime calls at the start of every tick.

use crate::errors::RuntimeError;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use shared_types::{LoadCallback, Prefab, ResourceError, ResourceLoader, SharedScene, VisualId};
use std::any::Any;
use std::collections::{BTreeMap, VecDeque};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use tracing::{debug, error, info};

/// Prefabs addressed by load path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrefabCatalog {
    #[serde(default)]
    pub prefabs: BTreeMap<String, Prefab>,
}

impl PrefabCatalog {
    #[must_use]
    pub fn with(mut self, path: impl Into<String>, prefab: Prefab) -> Self {
        self.prefabs.insert(path.into(), prefab);
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, RuntimeError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RuntimeError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| RuntimeError::CatalogIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Paths whose prefab carries a panel marker, in path order.
    pub fn panel_paths(&self) -> Vec<String> {
        self.prefabs
            .iter()
            .filter(|(_, p)| p.is_panel())
            .map(|(path, _)| path.clone())
            .collect()
    }
}

struct PendingLoad {
    path: String,
    callback: LoadCallback,
}

pub struct PrefabLoader {
    scene: SharedScene,
    catalog: RwLock<PrefabCatalog>,
    pending: Mutex<VecDeque<PendingLoad>>,
}

impl PrefabLoader {
    pub fn new(scene: SharedScene, catalog: PrefabCatalog) -> Self {
        info!(prefabs = catalog.prefabs.len(), "Prefab catalog loaded");
        Self {
            scene,
            catalog: RwLock::new(catalog),
            pending: Mutex::new(VecDeque::new()),
        }
    }

    pub fn insert(&self, path: impl Into<String>, prefab: Prefab) {
        self.catalog.write().prefabs.insert(path.into(), prefab);
    }

    pub fn contains(&self, path: &str) -> bool {
        self.catalog.read().prefabs.contains_key(path)
    }

    /// Async loads waiting for the next poll.
    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }

    fn instantiate(&self, path: &str) -> Result<VisualId, ResourceError> {
        let prefab = self
            .catalog
            .read()
            .prefabs
            .get(path)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(path.to_string()))?;

        let id = self
            .scene
            .lock()
            .instantiate(&prefab, None)
            .map_err(|e| ResourceError::Instantiate {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        debug!(path = %path, node = %id, "Prefab instantiated");
        Ok(id)
    }
}

impl ResourceLoader for PrefabLoader {
    fn load(&self, path: &str) -> Result<VisualId, ResourceError> {
        self.instantiate(path)
    }

    fn load_async(&self, path: &str, on_loaded: LoadCallback) {
        self.pending.lock().push_back(PendingLoad {
            path: path.to_string(),
            callback: on_loaded,
        });
    }

    fn clear(&self) {
        debug!("Prefab loader holds no cached instances, nothing to release");
    }

    fn poll(&self) {
        // Loads issued from inside a callback wait for the next poll.
        let ready = std::mem::take(&mut *self.pending.lock());
        for load in ready {
            let result = self.instantiate(&load.path);
            let callback = load.callback;
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(move || callback(result))) {
                error!(
                    path = %load.path,
                    panic = %panic_message(payload.as_ref()),
                    "Async load continuation panicked"
                );
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

impl std::fmt::Debug for PrefabLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrefabLoader")
            .field("prefabs", &self.catalog.read().prefabs.len())
            .field("pending", &self.pending())
            .finish()
    }
}
