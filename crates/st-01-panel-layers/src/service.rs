//! Panel Layer Registry
//!
//! Builds the layer stack once under the root canvas and answers name and
//! index lookups for the rest of the process lifetime.

use crate::algorithms::plan_layer_order;
use crate::config::UiConfig;
use crate::domain::{
    invariant_ascending_order, invariant_dense_indices, LayerError, LayerOrdering, PanelLayer,
};
use crate::ports::inbound::LayerLookup;
use shared_types::{SceneGraph, VisualId};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// The fixed, ordered set of layer slots.
#[derive(Debug, Clone)]
pub struct PanelLayerRegistry {
    layers: Vec<PanelLayer>,
    ordering: LayerOrdering,
    root: VisualId,
}

impl PanelLayerRegistry {
    /// Create one slot per configured layer under `root`, in creation order.
    pub fn build(
        config: &UiConfig,
        scene: &mut SceneGraph,
        root: VisualId,
    ) -> Result<Self, LayerError> {
        let plan = plan_layer_order(&config.panel_levels, config.panel_level_order.as_deref());
        if plan.ordering == LayerOrdering::Declaration && config.panel_level_order.is_some() {
            debug!(
                names = config.panel_levels.len(),
                "Layer order length mismatch, using declaration order"
            );
        }

        let mut seen = HashSet::new();
        let mut layers = Vec::with_capacity(plan.entries.len());
        for (index, (name, order)) in plan.entries.into_iter().enumerate() {
            if !seen.insert(name.clone()) {
                warn!(layer = %name, "Duplicate layer name, lookups resolve to the first");
            }
            let slot = scene.spawn(name.clone(), Some(root))?;
            layers.push(PanelLayer {
                name,
                order,
                index,
                slot,
            });
        }

        debug_assert!(invariant_ascending_order(&layers, plan.ordering));
        debug_assert!(invariant_dense_indices(&layers));

        info!(
            layers = layers.len(),
            ordering = ?plan.ordering,
            "Panel layers created"
        );

        Ok(Self {
            layers,
            ordering: plan.ordering,
            root,
        })
    }

    /// Layers in creation order.
    pub fn layers(&self) -> &[PanelLayer] {
        &self.layers
    }

    pub fn ordering(&self) -> LayerOrdering {
        self.ordering
    }

    /// The canvas node the slots live under.
    pub fn root(&self) -> VisualId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// First layer with this name.
    pub fn get(&self, name: &str) -> Option<&PanelLayer> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.get(name).map(|l| l.index)
    }

    pub fn by_index(&self, index: usize) -> Option<&PanelLayer> {
        self.layers.get(index)
    }

    pub fn slot(&self, name: &str) -> Result<VisualId, LayerError> {
        self.get(name)
            .map(|l| l.slot)
            .ok_or_else(|| LayerError::NotFound(name.to_string()))
    }
}

impl LayerLookup for PanelLayerRegistry {
    fn resolve(&self, name: &str) -> Result<VisualId, LayerError> {
        self.slot(name)
    }

    fn layer_names(&self) -> Vec<String> {
        self.layers.iter().map(|l| l.name.clone()).collect()
    }
}
