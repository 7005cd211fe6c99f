//! # Runtime Container
//!
//! Holds every subsystem instance and wires them together.
//!
//! ## Construction Order
//!
//! 1. Scene, with the persistent canvas and UI camera roots
//! 2. Panel layers under the canvas (fixed for the process lifetime)
//! 3. Resource loader, event bus and scheduler
//! 4. Logic registry over a layer-aware panel loader
//! 5. Models, constructed and initialized in registration order

pub mod config;

pub use config::RuntimeSettings;

use crate::adapters::{PrefabCatalog, PrefabLoader};
use crate::errors::RuntimeError;
use shared_bus::EventBus;
use shared_types::{shared_scene, ResourceLoader, SharedScene, VisualId};
use st_01_panel_layers::{PanelLayerRegistry, UiConfig};
use st_02_ui_logic::{PanelLayerLoader, UiError, UiLogic, UiLogicRegistry};
use st_03_lifecycle::{LifecycleHost, Scheduler, TickReport};
use st_04_models::{Model, ModelError, ModelRegistry, ModelRegistryBuilder};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Assembles a [`UiRuntime`].
pub struct UiRuntimeBuilder {
    config: UiConfig,
    scene: Option<SharedScene>,
    resources: Option<Arc<dyn ResourceLoader>>,
    catalog: PrefabCatalog,
    models: ModelRegistryBuilder,
}

impl UiRuntimeBuilder {
    pub fn new(config: UiConfig) -> Self {
        Self {
            config,
            scene: None,
            resources: None,
            catalog: PrefabCatalog::default(),
            models: ModelRegistryBuilder::new(),
        }
    }

    /// Use an existing scene. A custom loader must instantiate into it.
    #[must_use]
    pub fn scene(mut self, scene: SharedScene) -> Self {
        self.scene = Some(scene);
        self
    }

    /// Replace the default [`PrefabLoader`].
    #[must_use]
    pub fn resources(mut self, resources: Arc<dyn ResourceLoader>) -> Self {
        self.resources = Some(resources);
        self
    }

    /// Catalog for the default [`PrefabLoader`].
    #[must_use]
    pub fn catalog(mut self, catalog: PrefabCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn model<M: Model + Default>(mut self) -> Self {
        self.models = self.models.register::<M>();
        self
    }

    #[must_use]
    pub fn model_with<M, F>(mut self, factory: F) -> Self
    where
        M: Model,
        F: Fn() -> Result<M, ModelError> + Send + 'static,
    {
        self.models = self.models.register_with(factory);
        self
    }

    pub fn build(self) -> Result<UiRuntime, RuntimeError> {
        let scene = self.scene.unwrap_or_else(shared_scene);

        let (canvas, camera, layers) = {
            let mut graph = scene.lock();
            let canvas = graph.spawn(self.config.canvas.clone(), None)?;
            graph.mark_persistent(canvas)?;
            let camera = graph.spawn(self.config.ui_camera.clone(), None)?;
            graph.mark_persistent(camera)?;
            let layers = PanelLayerRegistry::build(&self.config, &mut graph, canvas)?;
            (canvas, camera, Arc::new(layers))
        };

        let resources: Arc<dyn ResourceLoader> = match self.resources {
            Some(resources) => resources,
            None => Arc::new(PrefabLoader::new(scene.clone(), self.catalog)),
        };
        let bus = Arc::new(EventBus::new());
        let scheduler = Scheduler::new();

        let loader = PanelLayerLoader::new(layers.clone(), resources.clone(), scene.clone());
        let logics = UiLogicRegistry::new(loader, bus.clone(), scheduler.clone());

        let mut models = self.models.build();
        models.init();

        info!(
            canvas = %canvas,
            camera = %camera,
            layers = layers.len(),
            models = models.len(),
            "UI runtime ready"
        );

        Ok(UiRuntime {
            config: self.config,
            scene,
            bus,
            scheduler,
            resources,
            layers,
            logics,
            models,
            canvas,
            camera,
            shut_down: false,
        })
    }
}

/// The assembled runtime, driven by [`UiRuntime::tick`].
pub struct UiRuntime {
    config: UiConfig,
    scene: SharedScene,
    bus: Arc<EventBus>,
    scheduler: Scheduler,
    resources: Arc<dyn ResourceLoader>,
    layers: Arc<PanelLayerRegistry>,
    logics: UiLogicRegistry,
    models: ModelRegistry,
    canvas: VisualId,
    camera: VisualId,
    shut_down: bool,
}

impl UiRuntime {
    pub fn builder(config: UiConfig) -> UiRuntimeBuilder {
        UiRuntimeBuilder::new(config)
    }

    /// Advance one frame: deliver finished loads, run due actions, then
    /// update models.
    pub fn tick(&mut self, delta: Duration) -> TickReport {
        self.resources.poll();
        let report = self.scheduler.tick(delta);
        self.models.update();
        report
    }

    pub fn open<T: UiLogic + Default>(&mut self) -> Result<&mut T, UiError> {
        self.logics.open::<T>()
    }

    pub fn open_with<T, F>(&mut self, make: F) -> Result<&mut T, UiError>
    where
        T: UiLogic,
        F: FnOnce() -> T,
    {
        self.logics.open_with(make)
    }

    pub fn close<T: UiLogic>(&mut self) -> bool {
        self.logics.close::<T>()
    }

    pub fn get<T: UiLogic>(&self) -> Option<&T> {
        self.logics.get::<T>()
    }

    pub fn get_mut<T: UiLogic>(&mut self) -> Option<&mut T> {
        self.logics.get_mut::<T>()
    }

    /// A host bound to this runtime's bus and scheduler, for owners that
    /// are not UI logics.
    pub fn lifecycle_host(&self, owner: impl Into<String>) -> LifecycleHost {
        LifecycleHost::new(owner, self.bus.clone(), self.scheduler.clone())
    }

    /// Destroy every non-persistent root, as on a scene switch. The canvas,
    /// camera and layers survive.
    pub fn unload_scene(&mut self) -> usize {
        let removed = self.scene.lock().unload_transient();
        debug!(removed, "Transient scene content unloaded");
        removed
    }

    /// Close every logic (newest first), clear models, bus and loader.
    /// Idempotent.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;

        let closed = self.logics.close_all();
        self.models.clear();
        self.bus.clear_all();
        self.resources.clear();
        info!(closed, frames = self.scheduler.frame(), "UI runtime shut down");
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn scene(&self) -> &SharedScene {
        &self.scene
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn layers(&self) -> &Arc<PanelLayerRegistry> {
        &self.layers
    }

    pub fn logics(&self) -> &UiLogicRegistry {
        &self.logics
    }

    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }

    pub fn models_mut(&mut self) -> &mut ModelRegistry {
        &mut self.models
    }

    pub fn canvas(&self) -> VisualId {
        self.canvas
    }

    pub fn camera(&self) -> VisualId {
        self.camera
    }

    pub fn frame(&self) -> u64 {
        self.scheduler.frame()
    }
}

impl Drop for UiRuntime {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_bus::Handler;
    use shared_types::Prefab;
    use st_02_ui_logic::LogicContext;
    use std::sync::atomic::{AtomicU32, Ordering};

    const FRAME: Duration = Duration::from_millis(16);

    fn runtime() -> UiRuntime {
        let catalog = PrefabCatalog::default()
            .with("ui/menu", Prefab::panel("Menu"))
            .with("fx/spark", Prefab::new("Spark"));
        UiRuntime::builder(UiConfig::default())
            .catalog(catalog)
            .build()
            .unwrap()
    }

    #[derive(Default)]
    struct Menu;

    impl UiLogic for Menu {
        fn layer(&self) -> &str {
            "Popup"
        }

        fn on_open(&mut self, cx: &mut LogicContext<'_>) -> Result<(), UiError> {
            cx.load_ui_async("ui/menu", |_| {})
        }
    }

    #[test]
    fn test_build_creates_persistent_roots_and_layers() {
        let rt = runtime();
        let scene = rt.scene().lock();

        assert_eq!(scene.name(rt.canvas()), Some("UICanvas"));
        assert_eq!(scene.name(rt.camera()), Some("UICamera"));
        assert!(scene.is_persistent(rt.canvas()));
        assert_eq!(scene.children(rt.canvas()).len(), rt.layers().len());
    }

    #[test]
    fn test_tick_delivers_async_loads() {
        let mut rt = runtime();
        rt.open::<Menu>().unwrap();
        let slot = rt.layers().slot("Popup").unwrap();
        assert!(rt.scene().lock().children(slot).is_empty());

        rt.tick(FRAME);
        assert_eq!(rt.scene().lock().children(slot).len(), 1);
        assert_eq!(rt.frame(), 1);
    }

    struct Fragile {
        delivered: Arc<AtomicU32>,
    }

    impl UiLogic for Fragile {
        fn layer(&self) -> &str {
            "Popup"
        }

        fn on_open(&mut self, cx: &mut LogicContext<'_>) -> Result<(), UiError> {
            cx.load_ui_async("ui/menu", |_| panic!("continuation failed"))?;
            let delivered = self.delivered.clone();
            cx.load_ui_async("ui/menu", move |panel| {
                if panel.is_ok() {
                    delivered.fetch_add(1, Ordering::SeqCst);
                }
            })
        }
    }

    #[test]
    fn test_tick_survives_panicking_continuation() {
        let mut rt = runtime();
        let delivered = Arc::new(AtomicU32::new(0));
        let counter = delivered.clone();
        rt.open_with(move || Fragile { delivered: counter }).unwrap();

        rt.tick(FRAME);

        let slot = rt.layers().slot("Popup").unwrap();
        assert_eq!(delivered.load(Ordering::SeqCst), 1);
        assert_eq!(rt.scene().lock().children(slot).len(), 2);
        assert_eq!(rt.frame(), 1);
    }

    #[test]
    fn test_unload_scene_keeps_ui_roots() {
        let mut rt = runtime();
        rt.open::<Menu>().unwrap();
        rt.tick(FRAME);
        rt.scene().lock().spawn("Level", None).unwrap();

        assert_eq!(rt.unload_scene(), 1);
        let slot = rt.layers().slot("Popup").unwrap();
        assert_eq!(rt.scene().lock().children(slot).len(), 1);
    }

    #[test]
    fn test_lifecycle_host_uses_shared_scheduler() {
        let mut rt = runtime();
        let hits = Arc::new(AtomicU32::new(0));
        let h = hits.clone();

        let mut host = rt.lifecycle_host("Spawner");
        host.delay_frames(2, move || {
            h.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        rt.tick(FRAME);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        rt.tick(FRAME);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_shutdown_releases_everything() {
        let mut rt = runtime();
        rt.open::<Menu>().unwrap();
        rt.tick(FRAME);
        rt.bus().subscribe("Any", &Handler::nullary(|| {})).unwrap();

        rt.shutdown();
        assert!(rt.get::<Menu>().is_none());
        assert!(rt.bus().channel_names().is_empty());
        let slot = rt.layers().slot("Popup").unwrap();
        assert!(rt.scene().lock().children(slot).is_empty());

        rt.shutdown();
    }

    #[test]
    fn test_missing_layer_in_config_fails_open() {
        let mut rt = UiRuntime::builder(UiConfig::with_levels(["Normal"]))
            .build()
            .unwrap();
        assert!(matches!(
            rt.open::<Menu>(),
            Err(UiError::LayerNotFound { .. })
        ));
    }
}
