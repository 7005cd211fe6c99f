//! # Outbound Ports
//!
//! Capabilities the runtime consumes but does not own.

use crate::entities::VisualId;
use crate::errors::ResourceError;

/// Continuation for an asynchronous load.
pub type LoadCallback = Box<dyn FnOnce(Result<VisualId, ResourceError>) + Send + 'static>;

/// Supplies visual objects by path.
///
/// Spawnable loads always produce a fresh, unparented instance in the scene
/// the loader was built for. Callers never rely on caching beyond that.
pub trait ResourceLoader: Send + Sync {
    /// Load and instantiate synchronously.
    fn load(&self, path: &str) -> Result<VisualId, ResourceError>;

    /// Issue an asynchronous load. `on_loaded` is invoked exactly once, on
    /// the update thread, with the instance or the failure.
    fn load_async(&self, path: &str, on_loaded: LoadCallback);

    /// Release cached or unused assets. Advisory.
    fn clear(&self);

    /// Deliver completed asynchronous loads. Called once per frame.
    fn poll(&self) {}
}
