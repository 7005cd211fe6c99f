//! # Panel Layer Loader
//!
//! Resolves a layer name to its slot, asks the resource loader for the
//! object and attaches it under the slot once it is known to be a panel.

use crate::domain::UiError;
use crate::panel::PanelHandle;
use shared_types::{ResourceLoader, SharedScene, VisualId};
use st_01_panel_layers::{LayerError, LayerLookup};
use std::sync::Arc;
use tracing::{debug, error};

/// Layer-aware front of a [`ResourceLoader`].
#[derive(Clone)]
pub struct PanelLayerLoader {
    layers: Arc<dyn LayerLookup>,
    resources: Arc<dyn ResourceLoader>,
    scene: SharedScene,
}

impl PanelLayerLoader {
    pub fn new(
        layers: Arc<dyn LayerLookup>,
        resources: Arc<dyn ResourceLoader>,
        scene: SharedScene,
    ) -> Self {
        Self {
            layers,
            resources,
            scene,
        }
    }

    pub fn scene(&self) -> &SharedScene {
        &self.scene
    }

    pub fn resources(&self) -> &Arc<dyn ResourceLoader> {
        &self.resources
    }

    /// Load `path` and attach it under `layer`.
    pub fn load_ui(&self, path: &str, layer: &str) -> Result<PanelHandle, UiError> {
        let slot = self.resolve(layer)?;
        let node = self.resources.load(path).map_err(|e| {
            error!(path = %path, error = %e, "[st-02] Panel load failed");
            UiError::from(e)
        })?;
        attach(&self.scene, path, node, slot)
    }

    /// Issue an asynchronous load of `path` into `layer`.
    ///
    /// An unknown layer fails here and no load is issued. Every later
    /// outcome, success or failure, reaches `on_loaded` exactly once.
    pub fn load_ui_async<F>(
        &self,
        path: &str,
        layer: &str,
        on_loaded: F,
    ) -> Result<(), UiError>
    where
        F: FnOnce(Result<PanelHandle, UiError>) + Send + 'static,
    {
        let slot = self.resolve(layer)?;
        let scene = self.scene.clone();
        let owned_path = path.to_string();
        debug!(path = %path, layer = %layer, "[st-02] Async panel load issued");

        self.resources.load_async(
            path,
            Box::new(move |loaded| {
                let result = match loaded {
                    Ok(node) => attach(&scene, &owned_path, node, slot),
                    Err(e) => {
                        error!(path = %owned_path, error = %e, "[st-02] Async panel load failed");
                        Err(UiError::from(e))
                    }
                };
                on_loaded(result);
            }),
        );
        Ok(())
    }

    /// Destroy a previously loaded object. Missing objects are ignored.
    pub fn destroy(&self, node: VisualId) -> bool {
        match self.scene.lock().destroy(node) {
            Ok(_) => true,
            Err(e) => {
                debug!(node = %node, error = %e, "[st-02] Object already gone");
                false
            }
        }
    }

    fn resolve(&self, layer: &str) -> Result<VisualId, UiError> {
        self.layers.resolve(layer).map_err(|e| {
            error!(layer = %layer, error = %e, "[st-02] Cannot load panel into unknown layer");
            match e {
                LayerError::NotFound(layer) => UiError::LayerNotFound { layer },
                LayerError::Scene(scene) => UiError::Scene(scene),
            }
        })
    }
}

impl std::fmt::Debug for PanelLayerLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelLayerLoader")
            .field("layers", &self.layers.layer_names())
            .finish()
    }
}

fn attach(
    scene: &SharedScene,
    path: &str,
    node: VisualId,
    slot: VisualId,
) -> Result<PanelHandle, UiError> {
    {
        let mut graph = scene.lock();
        if graph.panel(node).is_none() {
            let _ = graph.destroy(node);
            error!(
                path = %path,
                node = %node,
                "[st-02] Loaded object has no panel marker, discarded"
            );
            return Err(UiError::MissingPanel {
                path: path.to_string(),
            });
        }
        if let Err(e) = graph.set_parent(node, Some(slot)) {
            let _ = graph.destroy(node);
            error!(path = %path, error = %e, "[st-02] Cannot attach panel to layer");
            return Err(e.into());
        }
    }
    debug!(path = %path, node = %node, slot = %slot, "[st-02] Panel attached");
    Ok(PanelHandle::new(node, scene.clone()))
}
