//! # Core Domain Entities
//!
//! Identifiers and value types shared by every Stratum crate.
//!
//! ## Clusters
//!
//! - **Scene**: `VisualId`, `ActivationGroup`
//! - **Panel bindings**: `WidgetKind`, `WidgetRef`, `PanelBinding`
//! - **Logic**: `InstanceId`

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// =============================================================================
// CLUSTER A: THE SCENE
// =============================================================================

/// Handle of a node in the `SceneGraph`.
///
/// Ids are never reused within one graph, so a stale handle simply stops
/// resolving once its node is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VisualId(pub u64);

impl fmt::Display for VisualId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Group-level visibility and interaction state of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivationGroup {
    /// Opacity applied to the whole panel (0.0 - 1.0).
    pub alpha: f32,
    /// Whether widgets inside the panel accept interaction.
    pub interactable: bool,
    /// Whether the panel blocks pointer hits for layers beneath it.
    pub blocks_pointer: bool,
}

impl Default for ActivationGroup {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            interactable: true,
            blocks_pointer: true,
        }
    }
}

// =============================================================================
// CLUSTER B: PANEL BINDINGS
// =============================================================================

/// Kind of widget bound to a panel slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    #[default]
    Generic,
    Button,
    Label,
    Image,
    Toggle,
    Slider,
    InputField,
    ScrollView,
}

/// A widget reference resolved at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetRef {
    /// Binding name as authored.
    pub name: String,
    /// Widget kind.
    pub kind: WidgetKind,
    /// Node the widget lives on.
    pub node: VisualId,
}

/// Panel marker component.
///
/// Both arrays are fixed when the panel is instantiated and are indexed
/// positionally by the logic that owns the panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelBinding {
    /// Bound widget references.
    pub widgets: Vec<WidgetRef>,
    /// Bound plain child objects.
    pub child_objects: Vec<VisualId>,
    /// Created on first access.
    pub activation_group: Option<ActivationGroup>,
}

// =============================================================================
// CLUSTER C: LOGIC
// =============================================================================

/// Identity of one logic (or model) instance, used in logs and for
/// instance-equality checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub Uuid);

impl InstanceId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
