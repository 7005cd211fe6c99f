//! # Adapters
//!
//! Port implementations supplied by the runtime.

pub mod prefab_loader;

pub use prefab_loader::{PrefabCatalog, PrefabLoader};
