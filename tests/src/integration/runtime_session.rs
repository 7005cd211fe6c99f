//! # Runtime Session
//!
//! `UiRuntime` assembled from JSON inputs and driven frame by frame.

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;
    use shared_bus::Handler;
    use st_01_panel_layers::UiConfig;
    use st_02_ui_logic::{LogicContext, PanelHandle, UiError, UiLogic};
    use st_04_models::Model;
    use std::io::Write;
    use std::sync::Arc;
    use std::time::Duration;
    use ui_runtime::{PrefabCatalog, UiRuntime};

    const FRAME: Duration = Duration::from_millis(16);

    const UI_CONFIG: &str = r#"{
        "panel_levels": ["Hud", "Dialog"],
        "panel_level_order": [0, 100]
    }"#;

    const PREFABS: &str = r#"{
        "prefabs": {
            "ui/hud": {
                "name": "Hud",
                "children": [{ "name": "Score" }, { "name": "Lives" }],
                "panel": {
                    "widgets": [
                        { "name": "score", "kind": "label", "path": "Score" },
                        { "name": "lives", "kind": "label", "path": "Lives" }
                    ]
                }
            },
            "ui/pause": {
                "name": "Pause",
                "children": [{ "name": "Resume" }],
                "panel": {
                    "widgets": [{ "name": "resume", "kind": "button", "path": "Resume" }],
                    "child_objects": ["Resume"]
                }
            }
        }
    }"#;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[derive(Default)]
    struct Score {
        value: u32,
        frames: u32,
    }

    impl Model for Score {
        fn on_update(&mut self) {
            self.frames += 1;
        }
    }

    #[derive(Default)]
    struct Hud {
        panel: Arc<Mutex<Option<PanelHandle>>>,
        shown: Arc<Mutex<Vec<u32>>>,
    }

    impl UiLogic for Hud {
        fn layer(&self) -> &str {
            "Hud"
        }

        fn on_open(&mut self, cx: &mut LogicContext<'_>) -> Result<(), UiError> {
            let slot = self.panel.clone();
            cx.load_ui_async("ui/hud", move |result| {
                if let Ok(panel) = result {
                    *slot.lock() = Some(panel);
                }
            })?;

            let shown = self.shown.clone();
            cx.host()
                .subscribe("score", &Handler::unary(move |s: &u32| shown.lock().push(*s)))?;
            Ok(())
        }
    }

    #[derive(Default)]
    struct Pause;

    impl UiLogic for Pause {
        fn layer(&self) -> &str {
            "Dialog"
        }

        fn on_open(&mut self, cx: &mut LogicContext<'_>) -> Result<(), UiError> {
            let panel = cx.load_ui("ui/pause")?;
            panel.activation_group();
            Ok(())
        }
    }

    fn runtime() -> UiRuntime {
        let config_file = write_temp(UI_CONFIG);
        let prefab_file = write_temp(PREFABS);

        let config = UiConfig::from_file(config_file.path()).unwrap();
        let catalog = PrefabCatalog::from_file(prefab_file.path()).unwrap();
        UiRuntime::builder(config)
            .catalog(catalog)
            .model::<Score>()
            .build()
            .unwrap()
    }

    #[test]
    fn test_session_from_json_files() {
        let mut rt = runtime();
        assert_eq!(rt.layers().len(), 2);
        assert_eq!(rt.models().len(), 1);

        rt.open::<Hud>().unwrap();
        let panel_slot = rt.get::<Hud>().unwrap().panel.clone();
        assert!(panel_slot.lock().is_none());

        rt.tick(FRAME);
        let panel = panel_slot.lock().clone().unwrap();
        assert_eq!(panel.widgets().len(), 2);
        assert_eq!(panel.widget_named("lives").map(|w| w.node), panel.widget(1).map(|w| w.node));
        assert_eq!(panel.parent(), rt.layers().slot("Hud").ok());
        assert_eq!(rt.models().get::<Score>().unwrap().frames, 1);
    }

    #[test]
    fn test_model_driven_events_reach_open_logic() {
        let mut rt = runtime();
        rt.open::<Hud>().unwrap();
        let shown = rt.get::<Hud>().unwrap().shown.clone();

        rt.models_mut().get_mut::<Score>().unwrap().value = 42;
        let value = rt.models().get::<Score>().unwrap().value;
        rt.bus().trigger_with("score", &value).unwrap();
        assert_eq!(*shown.lock(), vec![42]);

        rt.close::<Hud>();
        rt.bus().trigger_with("score", &7u32).unwrap();
        assert_eq!(*shown.lock(), vec![42]);
    }

    #[test]
    fn test_dialog_stacks_above_hud() {
        let mut rt = runtime();
        rt.open::<Hud>().unwrap();
        rt.open::<Pause>().unwrap();
        rt.tick(FRAME);

        let canvas = rt.canvas();
        let scene = rt.scene().lock();
        let layers: Vec<&str> = scene
            .children(canvas)
            .iter()
            .filter_map(|id| scene.name(*id))
            .collect();
        assert_eq!(layers, vec!["Hud", "Dialog"]);
    }

    #[test]
    fn test_shutdown_closes_in_reverse_and_clears() {
        let mut rt = runtime();
        rt.open::<Hud>().unwrap();
        rt.open::<Pause>().unwrap();
        rt.tick(FRAME);
        assert_eq!(rt.logics().open_names().len(), 2);

        rt.shutdown();
        assert!(rt.logics().is_empty());
        assert!(rt.models().is_empty());
        assert!(!rt.bus().has_channel("score"));
        for layer in rt.layers().layers() {
            assert!(rt.scene().lock().children(layer.slot).is_empty());
        }
    }
}
