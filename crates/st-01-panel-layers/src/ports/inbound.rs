//! Inbound Ports (Driving Ports / API)

use crate::domain::errors::LayerError;
use shared_types::VisualId;

/// Layer name resolution.
pub trait LayerLookup: Send + Sync {
    /// Resolve a layer name to the slot panels attach under.
    fn resolve(&self, name: &str) -> Result<VisualId, LayerError>;

    /// Layer names in creation order.
    fn layer_names(&self) -> Vec<String>;
}
