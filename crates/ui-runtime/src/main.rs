//! # Stratum UI Runtime
//!
//! Headless session: builds the runtime from JSON files, opens a session
//! logic that loads every panel in the catalog into one layer, runs the
//! configured number of frames and shuts down.
//!
//! ## Startup Sequence
//!
//! 1. Install telemetry (`ST_LOG_LEVEL`, `ST_JSON_LOGS`, ...)
//! 2. Read settings (`ST_UI_CONFIG`, `ST_PREFABS`, `ST_FRAMES`, ...)
//! 3. Build the runtime and open the session
//! 4. Tick, then shut down

use anyhow::{Context, Result};
use shared_bus::Handler;
use st_01_panel_layers::UiConfig;
use st_02_ui_logic::{LogicContext, UiError, UiLogic};
use stratum_telemetry::{init_telemetry, TelemetryConfig};
use tracing::{info, warn};
use ui_runtime::{PrefabCatalog, RuntimeSettings, UiRuntime};

/// Channel announcing each panel the session finished loading.
const PANEL_READY: &str = "PanelReady";

/// Loads a fixed list of panels into one layer.
struct Session {
    layer: String,
    panels: Vec<String>,
}

impl UiLogic for Session {
    fn layer(&self) -> &str {
        &self.layer
    }

    fn on_open(&mut self, cx: &mut LogicContext<'_>) -> Result<(), UiError> {
        for path in &self.panels {
            let bus = cx.bus().clone();
            let owned = path.clone();
            cx.load_ui_async(path, move |result| match result {
                Ok(panel) => {
                    info!(
                        path = %owned,
                        node = %panel.node(),
                        widgets = panel.widgets().len(),
                        "Panel ready"
                    );
                    if let Err(e) = bus.trigger_with(PANEL_READY, &owned) {
                        warn!(path = %owned, error = %e, "Panel announcement rejected");
                    }
                }
                Err(e) => warn!(path = %owned, error = %e, "Panel failed to load"),
            })?;
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let _telemetry = init_telemetry(TelemetryConfig::from_env())
        .context("Failed to initialize telemetry")?;

    let settings = RuntimeSettings::from_env().context("Invalid runtime settings")?;

    let config = match &settings.ui_config {
        Some(path) => UiConfig::from_file(path)
            .with_context(|| format!("Failed to load UI config {}", path.display()))?,
        None => UiConfig::default(),
    };
    let catalog = match &settings.prefabs {
        Some(path) => PrefabCatalog::from_file(path)
            .with_context(|| format!("Failed to load prefab catalog {}", path.display()))?,
        None => PrefabCatalog::default(),
    };
    let panels = catalog.panel_paths();

    let mut runtime = UiRuntime::builder(config)
        .catalog(catalog)
        .build()
        .context("Failed to build UI runtime")?;

    let layer = match settings.layer.clone() {
        Some(layer) => layer,
        None => runtime
            .layers()
            .layers()
            .first()
            .map(|l| l.name.clone())
            .context("UI config declares no layers")?,
    };

    let mut monitor = runtime.lifecycle_host("session-monitor");
    monitor
        .subscribe(
            PANEL_READY,
            &Handler::unary(|path: &String| info!(path = %path, "Session panel announced")),
        )
        .context("Failed to subscribe to panel announcements")?;

    info!(layer = %layer, panels = panels.len(), frames = settings.frames, "Starting session");
    runtime
        .open_with(|| Session { layer, panels })
        .context("Failed to open session")?;

    for _ in 0..settings.frames {
        runtime.tick(settings.frame_delta);
    }

    monitor.teardown();
    runtime.shutdown();
    Ok(())
}
