//! # Domain Invariants
//!
//! Rules that must hold for every constructed layer stack.

use super::entities::{LayerOrdering, PanelLayer};

/// Invariant: when ordered by value, orders never decrease along the stack.
pub fn invariant_ascending_order(layers: &[PanelLayer], ordering: LayerOrdering) -> bool {
    match ordering {
        LayerOrdering::Declaration => true,
        LayerOrdering::ByOrder => layers
            .windows(2)
            .all(|pair| pair[0].order <= pair[1].order),
    }
}

/// Invariant: `index` matches position and every slot is distinct.
pub fn invariant_dense_indices(layers: &[PanelLayer]) -> bool {
    layers.iter().enumerate().all(|(i, layer)| layer.index == i)
        && layers
            .iter()
            .enumerate()
            .all(|(i, a)| layers[i + 1..].iter().all(|b| a.slot != b.slot))
}
