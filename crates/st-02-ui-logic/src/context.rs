//! # Logic Context
//!
//! What a logic hook may touch: panel loading into its own layer, the
//! shared bus, and its lifecycle host. Everything acquired here is owned
//! by the logic instance and released when it closes.

use crate::domain::{SpawnLedger, UiError};
use crate::loader::PanelLayerLoader;
use crate::panel::PanelHandle;
use shared_bus::EventBus;
use shared_types::VisualId;
use st_03_lifecycle::LifecycleHost;
use std::sync::Arc;
use tracing::debug;

pub struct LogicContext<'a> {
    logic: &'static str,
    layer: &'a str,
    loader: &'a PanelLayerLoader,
    ledger: &'a SpawnLedger,
    host: &'a mut LifecycleHost,
}

impl<'a> LogicContext<'a> {
    pub(crate) fn new(
        logic: &'static str,
        layer: &'a str,
        loader: &'a PanelLayerLoader,
        ledger: &'a SpawnLedger,
        host: &'a mut LifecycleHost,
    ) -> Self {
        Self {
            logic,
            layer,
            loader,
            ledger,
            host,
        }
    }

    /// Type name of the logic this context belongs to.
    pub fn logic(&self) -> &'static str {
        self.logic
    }

    pub fn layer(&self) -> &str {
        self.layer
    }

    /// Load a panel into this logic's layer and take ownership of it.
    pub fn load_ui(&mut self, path: &str) -> Result<PanelHandle, UiError> {
        let panel = self.loader.load_ui(path, self.layer)?;
        if !self.ledger.record(panel.node()) {
            self.loader.destroy(panel.node());
            return Err(UiError::NotOpen { logic: self.logic });
        }
        Ok(panel)
    }

    /// Load a panel asynchronously into this logic's layer.
    ///
    /// `on_loaded` runs when the loader delivers. If the logic has closed
    /// by then, the panel is destroyed and `on_loaded` is not called.
    pub fn load_ui_async<F>(&mut self, path: &str, on_loaded: F) -> Result<(), UiError>
    where
        F: FnOnce(Result<PanelHandle, UiError>) + Send + 'static,
    {
        let ledger = self.ledger.clone();
        let loader = self.loader.clone();
        let logic = self.logic;
        self.loader.load_ui_async(path, self.layer, move |result| match result {
            Ok(panel) => {
                if ledger.record(panel.node()) {
                    on_loaded(Ok(panel));
                } else {
                    debug!(
                        logic,
                        node = %panel.node(),
                        "[st-02] Owner closed before load completed, discarding panel"
                    );
                    loader.destroy(panel.node());
                }
            }
            Err(e) => {
                if !ledger.is_closed() {
                    on_loaded(Err(e));
                }
            }
        })
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        self.host.bus()
    }

    /// Lifecycle host of this logic instance.
    pub fn host(&mut self) -> &mut LifecycleHost {
        &mut *self.host
    }

    /// Objects owned so far, in acquisition order.
    pub fn spawned(&self) -> Vec<VisualId> {
        self.ledger.objects()
    }
}
