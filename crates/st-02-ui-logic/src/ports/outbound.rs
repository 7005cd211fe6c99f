//! Outbound Ports (Driven Ports / SPI)
//!
//! Panel loading depends on two driven ports: the layer lookup from st-01
//! and the resource loader shared by the whole runtime.

pub use shared_types::{LoadCallback, ResourceLoader};
pub use st_01_panel_layers::LayerLookup;

/// Mock implementations for testing
#[cfg(test)]
pub mod mocks {
    use super::*;
    use parking_lot::Mutex;
    use shared_types::{Prefab, ResourceError, SharedScene, VisualId};
    use std::collections::HashMap;

    /// Prefab-backed loader whose async loads wait for `complete_all`.
    pub struct MockResourceLoader {
        scene: SharedScene,
        catalog: Mutex<HashMap<String, Prefab>>,
        pending: Mutex<Vec<(String, LoadCallback)>>,
        requests: Mutex<Vec<String>>,
    }

    impl MockResourceLoader {
        pub fn new(scene: SharedScene) -> Self {
            Self {
                scene,
                catalog: Mutex::new(HashMap::new()),
                pending: Mutex::new(Vec::new()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn insert(&self, path: &str, prefab: Prefab) {
            self.catalog.lock().insert(path.to_string(), prefab);
        }

        /// Every path requested so far, sync or async.
        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().clone()
        }

        pub fn pending(&self) -> usize {
            self.pending.lock().len()
        }

        /// Deliver every queued async load in issue order.
        pub fn complete_all(&self) -> usize {
            let queued = std::mem::take(&mut *self.pending.lock());
            let count = queued.len();
            for (path, callback) in queued {
                callback(self.instantiate(&path));
            }
            count
        }

        fn instantiate(&self, path: &str) -> Result<VisualId, ResourceError> {
            let prefab = self
                .catalog
                .lock()
                .get(path)
                .cloned()
                .ok_or_else(|| ResourceError::NotFound(path.to_string()))?;
            let id = self.scene.lock().instantiate(&prefab, None)?;
            Ok(id)
        }
    }

    impl ResourceLoader for MockResourceLoader {
        fn load(&self, path: &str) -> Result<VisualId, ResourceError> {
            self.requests.lock().push(path.to_string());
            self.instantiate(path)
        }

        fn load_async(&self, path: &str, on_loaded: LoadCallback) {
            self.requests.lock().push(path.to_string());
            self.pending.lock().push((path.to_string(), on_loaded));
        }

        fn clear(&self) {}

        fn poll(&self) {
            self.complete_all();
        }
    }
}
