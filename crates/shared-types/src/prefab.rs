//! # Prefab Templates
//!
//! Serializable descriptions of spawnable visual objects. A prefab is a tree
//! of named nodes; a prefab carrying a `PanelTemplate` at its root produces a
//! panel when instantiated.
//!
//! Binding paths are `/`-separated child names relative to the prefab root;
//! the empty path names the root itself.

use crate::entities::WidgetKind;
use serde::{Deserialize, Serialize};

/// A spawnable node template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prefab {
    /// Node name.
    pub name: String,
    /// Child templates, in sibling order.
    #[serde(default)]
    pub children: Vec<Prefab>,
    /// Panel marker. Absent for plain objects.
    #[serde(default)]
    pub panel: Option<PanelTemplate>,
}

impl Prefab {
    /// Create a plain prefab with no children and no panel marker.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            panel: None,
        }
    }

    /// Create a prefab carrying an empty panel marker.
    pub fn panel(name: impl Into<String>) -> Self {
        Self::new(name).with_panel(PanelTemplate::default())
    }

    #[must_use]
    pub fn with_child(mut self, child: Prefab) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_panel(mut self, panel: PanelTemplate) -> Self {
        self.panel = Some(panel);
        self
    }

    /// Whether instantiating this prefab yields a panel.
    pub fn is_panel(&self) -> bool {
        self.panel.is_some()
    }
}

/// Binding surface authored alongside a panel prefab.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelTemplate {
    /// Widget bindings, in index order.
    #[serde(default)]
    pub widgets: Vec<WidgetBinding>,
    /// Paths of bound plain child objects, in index order.
    #[serde(default)]
    pub child_objects: Vec<String>,
}

impl PanelTemplate {
    #[must_use]
    pub fn widget(
        mut self,
        name: impl Into<String>,
        kind: WidgetKind,
        path: impl Into<String>,
    ) -> Self {
        self.widgets.push(WidgetBinding {
            name: name.into(),
            kind,
            path: path.into(),
        });
        self
    }

    #[must_use]
    pub fn child_object(mut self, path: impl Into<String>) -> Self {
        self.child_objects.push(path.into());
        self
    }
}

/// One widget binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetBinding {
    pub name: String,
    #[serde(default)]
    pub kind: WidgetKind,
    pub path: String,
}
