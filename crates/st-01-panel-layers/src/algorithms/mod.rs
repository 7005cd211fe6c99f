//! Layer ordering algorithms.

pub mod layer_order;

pub use layer_order::{plan_layer_order, LayerPlan};
