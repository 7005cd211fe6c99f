//! # ST-01 Panel Layers
//!
//! Named, z-ordered container slots created once from configuration.
//!
//! **Subsystem ID:** 01
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Ordering
//!
//! | Configuration | Creation order |
//! |---------------|----------------|
//! | orders present, same length as names | stable ascending by order |
//! | orders absent | declaration order |
//! | orders length mismatch | declaration order |
//!
//! A layer created earlier draws beneath layers created later.
//!
//! ## Module Structure
//!
//! ```text
//! st-01-panel-layers/
//! ├── config.rs        # UiConfig (serde)
//! ├── domain/          # PanelLayer, LayerError, invariants
//! ├── algorithms/      # Creation-order planning
//! ├── ports/           # LayerLookup
//! └── service.rs       # PanelLayerRegistry
//! ```

#![warn(clippy::all)]

pub mod algorithms;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use algorithms::{plan_layer_order, LayerPlan};
pub use config::{ConfigError, UiConfig};
pub use domain::{LayerError, LayerOrdering, PanelLayer};
pub use ports::LayerLookup;
pub use service::PanelLayerRegistry;
