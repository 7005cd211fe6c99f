//! # UI Logic Registry
//!
//! Open / close / get for singleton logic instances, keyed by type.
//!
//! Per type the state machine is `Closed -> Open -> Closed`. Opening an
//! open type returns the existing instance without re-running its hook.
//! Closing runs the close hook, destroys every owned object newest first
//! and tears down the instance's lifecycle host.

use crate::context::LogicContext;
use crate::domain::{SpawnLedger, UiError, UiLogic};
use crate::loader::PanelLayerLoader;
use shared_bus::EventBus;
use shared_types::{InstanceId, VisualId};
use st_03_lifecycle::{LifecycleHost, Scheduler};
use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info};

struct LogicEntry {
    logic: Box<dyn UiLogic>,
    name: &'static str,
    layer: String,
    instance: InstanceId,
    ledger: SpawnLedger,
    host: LifecycleHost,
}

pub struct UiLogicRegistry {
    loader: PanelLayerLoader,
    bus: Arc<EventBus>,
    scheduler: Scheduler,
    open: HashMap<TypeId, LogicEntry>,
    /// Open order, oldest first.
    order: Vec<TypeId>,
}

impl UiLogicRegistry {
    pub fn new(loader: PanelLayerLoader, bus: Arc<EventBus>, scheduler: Scheduler) -> Self {
        Self {
            loader,
            bus,
            scheduler,
            open: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Open `T`, constructing it with `Default` if it is not open yet.
    pub fn open<T: UiLogic + Default>(&mut self) -> Result<&mut T, UiError> {
        self.open_with(T::default)
    }

    /// Open `T`, constructing it with `make` if it is not open yet. `make`
    /// is not called when `T` is already open.
    pub fn open_with<T, F>(&mut self, make: F) -> Result<&mut T, UiError>
    where
        T: UiLogic,
        F: FnOnce() -> T,
    {
        let key = TypeId::of::<T>();
        let name = type_name::<T>();
        if self.open.contains_key(&key) {
            debug!(logic = name, "[st-02] Logic already open");
        } else {
            let entry = self.start(Box::new(make()), name)?;
            self.open.insert(key, entry);
            self.order.push(key);
        }
        self.get_mut::<T>().ok_or(UiError::NotOpen { logic: name })
    }

    fn start(
        &self,
        mut logic: Box<dyn UiLogic>,
        name: &'static str,
    ) -> Result<LogicEntry, UiError> {
        let layer = logic.layer().to_string();
        let ledger = SpawnLedger::new();
        let mut host = LifecycleHost::new(name, self.bus.clone(), self.scheduler.clone());

        let opened = {
            let mut cx = LogicContext::new(name, &layer, &self.loader, &ledger, &mut host);
            logic.on_open(&mut cx)
        };
        if let Err(e) = opened {
            error!(logic = name, error = %e, "[st-02] Open hook failed, releasing");
            self.release(&ledger, &mut host);
            return Err(e);
        }

        let instance = InstanceId::new();
        info!(
            logic = name,
            instance = %instance,
            layer = %layer,
            panels = ledger.len(),
            "[st-02] Logic opened"
        );
        Ok(LogicEntry {
            logic,
            name,
            layer,
            instance,
            ledger,
            host,
        })
    }

    /// Close `T`. Returns `false` if it was not open.
    pub fn close<T: UiLogic>(&mut self) -> bool {
        self.close_key(TypeId::of::<T>(), type_name::<T>())
    }

    fn close_key(&mut self, key: TypeId, name: &'static str) -> bool {
        let Some(mut entry) = self.open.remove(&key) else {
            debug!(logic = name, "[st-02] Close ignored, logic not open");
            return false;
        };
        self.order.retain(|k| *k != key);

        {
            let mut cx = LogicContext::new(
                entry.name,
                &entry.layer,
                &self.loader,
                &entry.ledger,
                &mut entry.host,
            );
            entry.logic.on_close(&mut cx);
        }
        let destroyed = self.release(&entry.ledger, &mut entry.host);

        info!(
            logic = entry.name,
            instance = %entry.instance,
            destroyed,
            "[st-02] Logic closed"
        );
        true
    }

    /// Destroy owned objects newest first, then release the host.
    fn release(&self, ledger: &SpawnLedger, host: &mut LifecycleHost) -> usize {
        let destroyed = ledger
            .close()
            .into_iter()
            .filter(|node| self.loader.destroy(*node))
            .count();
        host.teardown();
        destroyed
    }

    /// Close every open logic, most recently opened first.
    pub fn close_all(&mut self) -> usize {
        let mut closed = 0;
        while let Some(key) = self.order.last().copied() {
            let name = self.open.get(&key).map_or("unknown", |e| e.name);
            if self.close_key(key, name) {
                closed += 1;
            } else {
                self.order.pop();
            }
        }
        closed
    }

    pub fn get<T: UiLogic>(&self) -> Option<&T> {
        self.open
            .get(&TypeId::of::<T>())
            .and_then(|e| (*e.logic).as_any().downcast_ref::<T>())
    }

    pub fn get_mut<T: UiLogic>(&mut self) -> Option<&mut T> {
        self.open
            .get_mut(&TypeId::of::<T>())
            .and_then(|e| (*e.logic).as_any_mut().downcast_mut::<T>())
    }

    pub fn is_open<T: UiLogic>(&self) -> bool {
        self.open.contains_key(&TypeId::of::<T>())
    }

    /// Identity of the current open instance of `T`.
    pub fn instance_id<T: UiLogic>(&self) -> Option<InstanceId> {
        self.open.get(&TypeId::of::<T>()).map(|e| e.instance)
    }

    /// Objects owned by the open instance of `T`, in acquisition order.
    pub fn spawned<T: UiLogic>(&self) -> Vec<VisualId> {
        self.open
            .get(&TypeId::of::<T>())
            .map(|e| e.ledger.objects())
            .unwrap_or_default()
    }

    /// Type names of open logics, oldest first.
    pub fn open_names(&self) -> Vec<&'static str> {
        self.order
            .iter()
            .filter_map(|k| self.open.get(k).map(|e| e.name))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub fn loader(&self) -> &PanelLayerLoader {
        &self.loader
    }
}

impl std::fmt::Debug for UiLogicRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiLogicRegistry")
            .field("open", &self.open_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::mocks::MockResourceLoader;
    use parking_lot::Mutex;
    use shared_bus::Handler;
    use shared_types::{shared_scene, Prefab, SharedScene};
    use st_01_panel_layers::{PanelLayerRegistry, UiConfig};
    use std::time::Duration;

    struct Fixture {
        registry: UiLogicRegistry,
        resources: Arc<MockResourceLoader>,
        layers: Arc<PanelLayerRegistry>,
        scene: SharedScene,
        bus: Arc<EventBus>,
        scheduler: Scheduler,
    }

    fn fixture() -> Fixture {
        let scene = shared_scene();
        let layers = {
            let mut graph = scene.lock();
            let canvas = graph.spawn("UICanvas", None).unwrap();
            let config = UiConfig::with_levels(["Normal", "Top"]);
            PanelLayerRegistry::build(&config, &mut graph, canvas).unwrap()
        };
        let layers = Arc::new(layers);
        let resources = Arc::new(MockResourceLoader::new(scene.clone()));
        for (path, name) in [("ui/a", "A"), ("ui/b", "B"), ("ui/hud", "Hud")] {
            resources.insert(path, Prefab::panel(name));
        }
        resources.insert("ui/plain", Prefab::new("Plain"));

        let bus = Arc::new(EventBus::new());
        let scheduler = Scheduler::new();
        let loader = PanelLayerLoader::new(layers.clone(), resources.clone(), scene.clone());
        Fixture {
            registry: UiLogicRegistry::new(loader, bus.clone(), scheduler.clone()),
            resources,
            layers,
            scene,
            bus,
            scheduler,
        }
    }

    #[derive(Default)]
    struct Counter {
        opened: u32,
    }

    impl UiLogic for Counter {
        fn layer(&self) -> &str {
            "Normal"
        }

        fn on_open(&mut self, _cx: &mut LogicContext<'_>) -> Result<(), UiError> {
            self.opened += 1;
            Ok(())
        }
    }

    #[derive(Default)]
    struct TwoPanels;

    impl UiLogic for TwoPanels {
        fn layer(&self) -> &str {
            "Top"
        }

        fn on_open(&mut self, cx: &mut LogicContext<'_>) -> Result<(), UiError> {
            cx.load_ui("ui/a")?;
            cx.load_ui("ui/b")?;
            Ok(())
        }
    }

    #[test]
    fn test_open_is_idempotent() {
        let mut fx = fixture();
        let first = fx.registry.open::<Counter>().unwrap() as *const Counter;
        let id = fx.registry.instance_id::<Counter>();

        let again = fx.registry.open::<Counter>().unwrap();
        assert_eq!(again.opened, 1);
        assert_eq!(again as *const Counter, first);
        assert_eq!(fx.registry.instance_id::<Counter>(), id);
        assert_eq!(fx.registry.len(), 1);
    }

    #[test]
    fn test_open_with_skips_factory_when_open() {
        let mut fx = fixture();
        fx.registry.open::<Counter>().unwrap();

        let mut called = false;
        fx.registry
            .open_with(|| {
                called = true;
                Counter::default()
            })
            .unwrap();
        assert!(!called);
    }

    #[test]
    fn test_get_never_constructs() {
        let mut fx = fixture();
        assert!(fx.registry.get::<Counter>().is_none());
        assert!(fx.registry.get_mut::<Counter>().is_none());
        assert!(!fx.registry.is_open::<Counter>());

        fx.registry.open::<Counter>().unwrap();
        assert_eq!(fx.registry.get::<Counter>().unwrap().opened, 1);
    }

    #[test]
    fn test_close_never_opened_is_noop() {
        let mut fx = fixture();
        assert!(!fx.registry.close::<Counter>());
        assert!(fx.registry.is_empty());
    }

    #[test]
    fn test_close_destroys_panels_in_reverse_order() {
        let mut fx = fixture();
        fx.registry.open::<TwoPanels>().unwrap();
        let spawned = fx.registry.spawned::<TwoPanels>();
        assert_eq!(spawned.len(), 2);

        let slot = fx.layers.slot("Top").unwrap();
        assert_eq!(fx.scene.lock().children(slot), spawned.as_slice());
        fx.scene.lock().record_destroyed(true);

        assert!(fx.registry.close::<TwoPanels>());
        assert_eq!(
            fx.scene.lock().drain_destroyed(),
            vec![spawned[1], spawned[0]]
        );
        assert!(fx.registry.get::<TwoPanels>().is_none());
        assert!(fx.scene.lock().children(slot).is_empty());
    }

    #[test]
    fn test_reopen_is_a_fresh_instance() {
        let mut fx = fixture();
        fx.registry.open::<Counter>().unwrap();
        let first = fx.registry.instance_id::<Counter>();
        fx.registry.close::<Counter>();

        fx.registry.open::<Counter>().unwrap();
        assert_ne!(fx.registry.instance_id::<Counter>(), first);
    }

    #[derive(Default)]
    struct PlainLoader {
        error: Option<UiError>,
    }

    impl UiLogic for PlainLoader {
        fn layer(&self) -> &str {
            "Normal"
        }

        fn on_open(&mut self, cx: &mut LogicContext<'_>) -> Result<(), UiError> {
            self.error = cx.load_ui("ui/plain").err();
            Ok(())
        }
    }

    #[test]
    fn test_missing_marker_leaves_nothing_attached() {
        let mut fx = fixture();
        let logic = fx.registry.open::<PlainLoader>().unwrap();
        assert!(matches!(logic.error, Some(UiError::MissingPanel { .. })));

        let slot = fx.layers.slot("Normal").unwrap();
        assert!(fx.scene.lock().children(slot).is_empty());
        assert!(fx.registry.spawned::<PlainLoader>().is_empty());
    }

    #[derive(Debug, Default)]
    struct Broken;

    impl UiLogic for Broken {
        fn layer(&self) -> &str {
            "Top"
        }

        fn on_open(&mut self, cx: &mut LogicContext<'_>) -> Result<(), UiError> {
            cx.load_ui("ui/a")?;
            cx.host().subscribe("Tick", &Handler::nullary(|| {}))?;
            cx.load_ui("ui/absent")?;
            Ok(())
        }
    }

    #[test]
    fn test_failed_open_releases_everything() {
        let mut fx = fixture();
        let before = fx.scene.lock().len();

        let err = fx.registry.open::<Broken>().unwrap_err();
        assert!(matches!(err, UiError::Resource(_)));
        assert!(!fx.registry.is_open::<Broken>());
        assert_eq!(fx.scene.lock().len(), before);
        assert!(!fx.bus.has_channel("Tick"));
    }

    #[derive(Debug, Default)]
    struct WrongLayer;

    impl UiLogic for WrongLayer {
        fn layer(&self) -> &str {
            "Overlay"
        }

        fn on_open(&mut self, cx: &mut LogicContext<'_>) -> Result<(), UiError> {
            cx.load_ui("ui/a").map(|_| ())
        }
    }

    #[test]
    fn test_unknown_layer_fails_open() {
        let mut fx = fixture();
        let err = fx.registry.open::<WrongLayer>().unwrap_err();
        assert!(matches!(err, UiError::LayerNotFound { .. }));
        assert!(fx.resources.requests().is_empty());
    }

    struct Deferred {
        delivered: Arc<Mutex<Vec<VisualId>>>,
    }

    impl UiLogic for Deferred {
        fn layer(&self) -> &str {
            "Top"
        }

        fn on_open(&mut self, cx: &mut LogicContext<'_>) -> Result<(), UiError> {
            let sink = self.delivered.clone();
            cx.load_ui_async("ui/hud", move |result| {
                if let Ok(panel) = result {
                    sink.lock().push(panel.node());
                }
            })
        }
    }

    #[test]
    fn test_async_load_is_owned_by_logic() {
        let mut fx = fixture();
        let delivered = Arc::new(Mutex::new(Vec::new()));
        let sink = delivered.clone();
        fx.registry
            .open_with(move || Deferred { delivered: sink })
            .unwrap();
        assert!(fx.registry.spawned::<Deferred>().is_empty());

        fx.resources.complete_all();
        let node = delivered.lock()[0];
        assert_eq!(fx.registry.spawned::<Deferred>(), vec![node]);

        fx.registry.close::<Deferred>();
        assert!(!fx.scene.lock().contains(node));
    }

    #[test]
    fn test_async_load_after_close_is_discarded() {
        let mut fx = fixture();
        let delivered = Arc::new(Mutex::new(Vec::new()));
        let sink = delivered.clone();
        fx.registry
            .open_with(move || Deferred { delivered: sink })
            .unwrap();
        fx.registry.close::<Deferred>();

        assert_eq!(fx.resources.complete_all(), 1);
        assert!(delivered.lock().is_empty());
        let slot = fx.layers.slot("Top").unwrap();
        assert!(fx.scene.lock().children(slot).is_empty());
    }

    #[derive(Default)]
    struct Listener;

    impl UiLogic for Listener {
        fn layer(&self) -> &str {
            "Normal"
        }

        fn on_open(&mut self, cx: &mut LogicContext<'_>) -> Result<(), UiError> {
            cx.host().subscribe("ScoreChanged", &Handler::unary(|_: &u32| {}))?;
            cx.host().delay(Duration::from_secs(5), || {})?;
            Ok(())
        }
    }

    #[test]
    fn test_close_releases_subscriptions_and_tasks() {
        let mut fx = fixture();
        fx.registry.open::<Listener>().unwrap();
        assert_eq!(fx.bus.handler_count("ScoreChanged"), 1);
        assert_eq!(fx.scheduler.pending(), 1);

        fx.registry.close::<Listener>();
        assert!(!fx.bus.has_channel("ScoreChanged"));
        assert_eq!(fx.scheduler.pending(), 0);
    }

    struct Named {
        label: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl UiLogic for Named {
        fn layer(&self) -> &str {
            "Normal"
        }

        fn on_close(&mut self, _cx: &mut LogicContext<'_>) {
            self.log.lock().push(self.label);
        }
    }

    struct OtherNamed(Named);

    impl UiLogic for OtherNamed {
        fn layer(&self) -> &str {
            "Top"
        }

        fn on_close(&mut self, cx: &mut LogicContext<'_>) {
            self.0.on_close(cx);
        }
    }

    #[test]
    fn test_close_all_in_reverse_open_order() {
        let mut fx = fixture();
        let log = Arc::new(Mutex::new(Vec::new()));
        let (a, b) = (log.clone(), log.clone());
        fx.registry
            .open_with(move || Named { label: "first", log: a })
            .unwrap();
        fx.registry
            .open_with(move || OtherNamed(Named { label: "second", log: b }))
            .unwrap();
        assert_eq!(fx.registry.open_names().len(), 2);

        assert_eq!(fx.registry.close_all(), 2);
        assert_eq!(*log.lock(), vec!["second", "first"]);
        assert!(fx.registry.is_empty());
    }
}
