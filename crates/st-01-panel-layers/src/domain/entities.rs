//! Layer entities.

use shared_types::VisualId;

/// A named, z-ordered container slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLayer {
    /// Configured name.
    pub name: String,
    /// Configured order; `None` when the registry fell back to declaration order.
    pub order: Option<i32>,
    /// Position in creation order (0 draws beneath everything else).
    pub index: usize,
    /// Scene node panels are attached under.
    pub slot: VisualId,
}

/// How the layer stack was ordered at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerOrdering {
    /// Stable ascending sort on the configured order values.
    ByOrder,
    /// Order values absent or mismatched; declaration order kept.
    Declaration,
}
