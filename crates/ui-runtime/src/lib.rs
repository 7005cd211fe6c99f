//! # UI Runtime Library
//!
//! Composition root for the Stratum UI runtime. The `ui-runtime` binary
//! runs a headless session on top of it.
//!
//! ## Frame Flow
//!
//! ```text
//! tick(delta)
//!   ├── ResourceLoader::poll   async panel loads resume here
//!   ├── Scheduler::tick        due delayed / frame-delayed actions
//!   └── ModelRegistry::update  per-frame model hooks
//! ```
//!
//! ## Modular Structure
//!
//! - `container/` - `UiRuntime`, its builder and the binary's settings
//! - `adapters/` - `PrefabLoader`, the bundled `ResourceLoader`

pub mod adapters;
pub mod container;
pub mod errors;

pub use adapters::{PrefabCatalog, PrefabLoader};
pub use container::{RuntimeSettings, UiRuntime, UiRuntimeBuilder};
pub use errors::RuntimeError;
