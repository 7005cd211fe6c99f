//! Layer creation order.
//!
//! Orders present and parallel to the names: stable ascending sort, so equal
//! orders keep declaration order. Otherwise declaration order unchanged.

use crate::domain::LayerOrdering;

/// Layers to create, in creation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerPlan {
    pub entries: Vec<(String, Option<i32>)>,
    pub ordering: LayerOrdering,
}

/// Compute the creation order for `names` and optional parallel `orders`.
pub fn plan_layer_order(names: &[String], orders: Option<&[i32]>) -> LayerPlan {
    match orders {
        Some(orders) if orders.len() == names.len() => {
            let mut entries: Vec<(String, Option<i32>)> = names
                .iter()
                .cloned()
                .zip(orders.iter().copied().map(Some))
                .collect();
            // sort_by_key is stable
            entries.sort_by_key(|(_, order)| *order);
            LayerPlan {
                entries,
                ordering: LayerOrdering::ByOrder,
            }
        }
        _ => LayerPlan {
            entries: names.iter().cloned().map(|n| (n, None)).collect(),
            ordering: LayerOrdering::Declaration,
        },
    }
}
