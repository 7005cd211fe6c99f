//! # Shared Types Crate
//!
//! This crate contains the identifiers, the scene graph, prefab templates and
//! the outbound `ResourceLoader` port shared by every Stratum crate.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Explicit Sharing**: The scene is an explicit `SharedScene` handle
//!   passed to collaborators, never a global.

pub mod any;
pub mod entities;
pub mod errors;
pub mod ports;
pub mod prefab;
pub mod scene;

pub use any::AsAny;
pub use entities::*;
pub use errors::*;
pub use ports::{LoadCallback, ResourceLoader};
pub use prefab::{PanelTemplate, Prefab, WidgetBinding};
pub use scene::{shared_scene, SceneGraph, SharedScene};
