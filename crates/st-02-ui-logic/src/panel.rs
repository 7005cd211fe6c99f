//! # Panel Handle
//!
//! Read access to the binding surface of a loaded panel.
//!
//! A handle is a node id plus the scene it lives in. It stays valid after
//! the panel is destroyed; accessors then return empty or `None`.

use shared_types::{ActivationGroup, SharedScene, VisualId, WidgetRef};
use std::fmt;

#[derive(Clone)]
pub struct PanelHandle {
    node: VisualId,
    scene: SharedScene,
}

impl PanelHandle {
    pub fn new(node: VisualId, scene: SharedScene) -> Self {
        Self { node, scene }
    }

    pub fn node(&self) -> VisualId {
        self.node
    }

    /// Whether the panel still exists in the scene.
    pub fn is_alive(&self) -> bool {
        self.scene.lock().contains(self.node)
    }

    pub fn name(&self) -> Option<String> {
        self.scene.lock().name(self.node).map(str::to_string)
    }

    /// Layer slot the panel is attached under.
    pub fn parent(&self) -> Option<VisualId> {
        self.scene.lock().parent(self.node)
    }

    pub fn widgets(&self) -> Vec<WidgetRef> {
        self.scene
            .lock()
            .panel(self.node)
            .map(|p| p.widgets.clone())
            .unwrap_or_default()
    }

    pub fn widget(&self, index: usize) -> Option<WidgetRef> {
        self.scene
            .lock()
            .panel(self.node)
            .and_then(|p| p.widgets.get(index).cloned())
    }

    /// First widget bound under `name`.
    pub fn widget_named(&self, name: &str) -> Option<WidgetRef> {
        self.scene
            .lock()
            .panel(self.node)
            .and_then(|p| p.widgets.iter().find(|w| w.name == name).cloned())
    }

    pub fn child_objects(&self) -> Vec<VisualId> {
        self.scene
            .lock()
            .panel(self.node)
            .map(|p| p.child_objects.clone())
            .unwrap_or_default()
    }

    pub fn child_object(&self, index: usize) -> Option<VisualId> {
        self.scene
            .lock()
            .panel(self.node)
            .and_then(|p| p.child_objects.get(index).copied())
    }

    /// The panel's activation group, created with defaults on first access.
    /// `None` once the panel is gone.
    pub fn activation_group(&self) -> Option<ActivationGroup> {
        let mut scene = self.scene.lock();
        let panel = scene.panel_mut(self.node)?;
        Some(*panel.activation_group.get_or_insert_with(ActivationGroup::default))
    }

    pub fn set_activation_group(&self, group: ActivationGroup) -> bool {
        match self.scene.lock().panel_mut(self.node) {
            Some(panel) => {
                panel.activation_group = Some(group);
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.scene.lock().is_active(self.node)
    }

    /// Returns `true` if the state changed.
    pub fn set_active(&self, active: bool) -> bool {
        self.scene.lock().set_active(self.node, active)
    }
}

impl fmt::Debug for PanelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelHandle").field("node", &self.node).finish()
    }
}

impl PartialEq for PanelHandle {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node && std::sync::Arc::ptr_eq(&self.scene, &other.scene)
    }
}
