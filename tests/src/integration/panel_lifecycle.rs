//! # Panel Lifecycle
//!
//! Layers built from config, panels loaded through the bundled prefab
//! loader, and logic instances opening and closing over them.

#[cfg(test)]
mod tests {
    use shared_bus::EventBus;
    use shared_types::{shared_scene, Prefab, SharedScene, VisualId};
    use st_01_panel_layers::{LayerOrdering, PanelLayerRegistry, UiConfig};
    use st_02_ui_logic::{LogicContext, PanelLayerLoader, UiError, UiLogic, UiLogicRegistry};
    use st_03_lifecycle::Scheduler;
    use std::sync::Arc;
    use ui_runtime::{PrefabCatalog, PrefabLoader};

    struct World {
        scene: SharedScene,
        canvas: VisualId,
        layers: Arc<PanelLayerRegistry>,
        resources: Arc<PrefabLoader>,
        registry: UiLogicRegistry,
    }

    fn world(config: UiConfig) -> World {
        let scene = shared_scene();
        let (canvas, layers) = {
            let mut graph = scene.lock();
            let canvas = graph.spawn("UICanvas", None).unwrap();
            let layers = PanelLayerRegistry::build(&config, &mut graph, canvas).unwrap();
            (canvas, Arc::new(layers))
        };
        let catalog = PrefabCatalog::default()
            .with("ui/first", Prefab::panel("First"))
            .with("ui/second", Prefab::panel("Second"))
            .with("props/crate", Prefab::new("Crate").with_child(Prefab::new("Lid")));
        let resources = Arc::new(PrefabLoader::new(scene.clone(), catalog));
        let loader = PanelLayerLoader::new(layers.clone(), resources.clone(), scene.clone());
        let registry = UiLogicRegistry::new(loader, Arc::new(EventBus::new()), Scheduler::new());

        World {
            scene,
            canvas,
            layers,
            resources,
            registry,
        }
    }

    fn names_under(scene: &SharedScene, node: VisualId) -> Vec<String> {
        let graph = scene.lock();
        graph
            .children(node)
            .iter()
            .filter_map(|id| graph.name(*id).map(str::to_string))
            .collect()
    }

    #[test]
    fn test_orders_create_top_before_bottom() {
        let config = UiConfig::with_levels(["Bottom", "Top"]).with_order(vec![10, 1]);
        let w = world(config);

        assert_eq!(w.layers.ordering(), LayerOrdering::ByOrder);
        assert_eq!(names_under(&w.scene, w.canvas), vec!["Top", "Bottom"]);
        assert_eq!(w.layers.index_of("Top"), Some(0));
    }

    #[test]
    fn test_mismatched_orders_fall_back_to_declaration() {
        let config = UiConfig::with_levels(["Bottom", "Top"]).with_order(vec![10]);
        let w = world(config);

        assert_eq!(w.layers.ordering(), LayerOrdering::Declaration);
        assert_eq!(names_under(&w.scene, w.canvas), vec!["Bottom", "Top"]);
    }

    #[derive(Default)]
    struct A;

    impl UiLogic for A {
        fn layer(&self) -> &str {
            "Top"
        }

        fn on_open(&mut self, cx: &mut LogicContext<'_>) -> Result<(), UiError> {
            cx.load_ui("ui/first")?;
            cx.load_ui("ui/second")?;
            Ok(())
        }
    }

    #[test]
    fn test_close_destroys_panels_in_reverse_load_order() {
        let mut w = world(UiConfig::with_levels(["Bottom", "Top"]));
        w.registry.open::<A>().unwrap();

        let top = w.layers.slot("Top").unwrap();
        assert_eq!(names_under(&w.scene, top), vec!["First", "Second"]);
        let loaded = w.registry.spawned::<A>();
        w.scene.lock().record_destroyed(true);

        assert!(w.registry.close::<A>());
        assert_eq!(w.scene.lock().drain_destroyed(), vec![loaded[1], loaded[0]]);
        assert!(w.registry.get::<A>().is_none());
        assert!(names_under(&w.scene, top).is_empty());
    }

    #[derive(Default)]
    struct PropLoader {
        result: Option<Result<VisualId, UiError>>,
    }

    impl UiLogic for PropLoader {
        fn layer(&self) -> &str {
            "Bottom"
        }

        fn on_open(&mut self, cx: &mut LogicContext<'_>) -> Result<(), UiError> {
            self.result = Some(cx.load_ui("props/crate").map(|p| p.node()));
            Ok(())
        }
    }

    #[test]
    fn test_missing_marker_leaves_no_object_in_any_layer() {
        let mut w = world(UiConfig::with_levels(["Bottom", "Top"]));
        let before = w.scene.lock().len();

        let logic = w.registry.open::<PropLoader>().unwrap();
        assert!(matches!(
            logic.result,
            Some(Err(UiError::MissingPanel { .. }))
        ));

        assert_eq!(w.scene.lock().len(), before);
        for layer in w.layers.layers() {
            assert!(w.scene.lock().children(layer.slot).is_empty());
        }
    }

    #[derive(Default)]
    struct Slow;

    impl UiLogic for Slow {
        fn layer(&self) -> &str {
            "Top"
        }

        fn on_open(&mut self, cx: &mut LogicContext<'_>) -> Result<(), UiError> {
            cx.load_ui_async("ui/first", |_| panic!("continuation must not run after close"))
        }
    }

    #[test]
    fn test_async_panel_arriving_after_close_is_destroyed() {
        let mut w = world(UiConfig::with_levels(["Top"]));
        w.registry.open::<Slow>().unwrap();
        w.registry.close::<Slow>();

        shared_types::ResourceLoader::poll(w.resources.as_ref());

        let top = w.layers.slot("Top").unwrap();
        assert!(names_under(&w.scene, top).is_empty());
        assert_eq!(w.resources.pending(), 0);
    }

    #[test]
    fn test_reopen_after_close_loads_again() {
        let mut w = world(UiConfig::with_levels(["Bottom", "Top"]));
        w.registry.open::<A>().unwrap();
        w.registry.close::<A>();
        w.registry.open::<A>().unwrap();

        let top = w.layers.slot("Top").unwrap();
        assert_eq!(names_under(&w.scene, top).len(), 2);
    }
}
