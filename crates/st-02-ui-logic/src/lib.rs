//! # UI Logic Subsystem (st-02)
//!
//! Singleton panel controllers and the loader that places their panels
//! into layers.
//!
//! ## Flow
//!
//! ```text
//! open::<T>() ──▶ UiLogicRegistry ──▶ T::on_open(cx)
//!                                          │ cx.load_ui(path)
//!                                          ▼
//!                                  PanelLayerLoader
//!                                   │            │
//!                        LayerLookup::resolve   ResourceLoader::load
//!                                   │            │
//!                                   └──▶ attach under layer slot ──▶ PanelHandle
//! ```
//!
//! Every object loaded through a logic's context is recorded in its
//! `SpawnLedger` and destroyed, newest first, when the logic closes.
//! Subscriptions and delayed actions made through `cx.host()` are torn
//! down at the same time.
//!
//! ## Module Structure
//!
//! ```text
//! st-02-ui-logic/
//! ├── domain/      # UiLogic, SpawnLedger, UiError
//! ├── ports/       # ResourceLoader, LayerLookup (+ mocks)
//! ├── context.rs   # LogicContext handed to hooks
//! ├── loader.rs    # PanelLayerLoader
//! ├── panel.rs     # PanelHandle
//! └── service.rs   # UiLogicRegistry
//! ```

#![warn(clippy::all)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod context;
pub mod domain;
pub mod loader;
pub mod panel;
pub mod ports;
pub mod service;

pub use context::LogicContext;
pub use domain::{SpawnLedger, UiError, UiLogic};
pub use loader::PanelLayerLoader;
pub use panel::PanelHandle;
pub use service::UiLogicRegistry;
