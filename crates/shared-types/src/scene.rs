//! # Scene Graph
//!
//! Arena of visual nodes shared by the layer registry, the resource loader
//! and the logic registry.
//!
//! ## Rules
//!
//! - A node has at most one parent; children keep insertion order, and a
//!   later sibling draws above an earlier one.
//! - Destroying a node destroys its whole subtree and detaches it from its
//!   parent.
//! - Persistent roots survive `unload_transient` (scene switches).

use crate::entities::{PanelBinding, VisualId, WidgetRef};
use crate::errors::SceneError;
use crate::prefab::Prefab;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Scene handle shared between components on the update thread.
pub type SharedScene = Arc<Mutex<SceneGraph>>;

/// Create an empty shared scene.
pub fn shared_scene() -> SharedScene {
    Arc::new(Mutex::new(SceneGraph::new()))
}

#[derive(Debug)]
struct VisualNode {
    name: String,
    parent: Option<VisualId>,
    children: Vec<VisualId>,
    active: bool,
    persistent: bool,
    panel: Option<PanelBinding>,
}

/// The visual object tree.
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: HashMap<VisualId, VisualNode>,
    /// Roots in creation order.
    roots: Vec<VisualId>,
    next_id: u64,
    /// Destroyed ids since the last drain, subtree roots first. Only
    /// filled while recording is on.
    destroyed: Vec<VisualId>,
    recording: bool,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn an empty active node, appended as last child of `parent`
    /// (or as a new root).
    pub fn spawn(
        &mut self,
        name: impl Into<String>,
        parent: Option<VisualId>,
    ) -> Result<VisualId, SceneError> {
        if let Some(parent) = parent {
            if !self.nodes.contains_key(&parent) {
                return Err(SceneError::NodeNotFound(parent));
            }
        }

        self.next_id += 1;
        let id = VisualId(self.next_id);
        self.nodes.insert(
            id,
            VisualNode {
                name: name.into(),
                parent,
                children: Vec::new(),
                active: true,
                persistent: false,
                panel: None,
            },
        );

        match parent.and_then(|p| self.nodes.get_mut(&p)) {
            Some(parent_node) => parent_node.children.push(id),
            None => self.roots.push(id),
        }
        Ok(id)
    }

    /// Move `child` under `parent` (last sibling), or make it a root.
    pub fn set_parent(
        &mut self,
        child: VisualId,
        parent: Option<VisualId>,
    ) -> Result<(), SceneError> {
        if !self.nodes.contains_key(&child) {
            return Err(SceneError::NodeNotFound(child));
        }
        if let Some(parent) = parent {
            if !self.nodes.contains_key(&parent) {
                return Err(SceneError::NodeNotFound(parent));
            }
            if self.is_ancestor_or_self(child, parent) {
                return Err(SceneError::CycleDetected { child, parent });
            }
        }

        self.detach(child);
        match parent {
            Some(p) => {
                if let Some(node) = self.nodes.get_mut(&p) {
                    node.children.push(child);
                }
            }
            None => self.roots.push(child),
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = parent;
        }
        Ok(())
    }

    /// Destroy `id` and its subtree. Returns the number of nodes removed.
    pub fn destroy(&mut self, id: VisualId) -> Result<usize, SceneError> {
        if !self.nodes.contains_key(&id) {
            return Err(SceneError::NodeNotFound(id));
        }
        self.detach(id);

        let mut stack = vec![id];
        let mut removed = 0;
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                stack.extend(node.children.iter().rev());
                if self.recording {
                    self.destroyed.push(next);
                }
                removed += 1;
            }
        }
        debug!(node = %id, removed, "Visual subtree destroyed");
        Ok(removed)
    }

    /// Destroy every root that is not persistent.
    pub fn unload_transient(&mut self) -> usize {
        let transient: Vec<VisualId> = self
            .roots
            .iter()
            .copied()
            .filter(|id| self.nodes.get(id).is_some_and(|n| !n.persistent))
            .collect();

        transient
            .into_iter()
            .filter_map(|id| self.destroy(id).ok())
            .sum()
    }

    /// Instantiate a prefab tree under `parent`.
    ///
    /// Panel bindings are resolved against the freshly spawned subtree. On a
    /// binding failure the partial subtree is destroyed before returning.
    pub fn instantiate(
        &mut self,
        prefab: &Prefab,
        parent: Option<VisualId>,
    ) -> Result<VisualId, SceneError> {
        let root = self.spawn_tree(prefab, parent)?;

        if let Some(template) = &prefab.panel {
            let resolved = self.resolve_binding(root, prefab, template);
            match resolved {
                Ok(binding) => {
                    if let Some(node) = self.nodes.get_mut(&root) {
                        node.panel = Some(binding);
                    }
                }
                Err(err) => {
                    let _ = self.destroy(root);
                    return Err(err);
                }
            }
        }
        Ok(root)
    }

    fn spawn_tree(
        &mut self,
        prefab: &Prefab,
        parent: Option<VisualId>,
    ) -> Result<VisualId, SceneError> {
        let id = self.spawn(prefab.name.clone(), parent)?;
        for child in &prefab.children {
            self.spawn_tree(child, Some(id))?;
        }
        Ok(id)
    }

    fn resolve_binding(
        &self,
        root: VisualId,
        prefab: &Prefab,
        template: &crate::prefab::PanelTemplate,
    ) -> Result<PanelBinding, SceneError> {
        let resolve = |path: &str| {
            self.find_path(root, path)
                .ok_or_else(|| SceneError::UnresolvedBinding {
                    prefab: prefab.name.clone(),
                    path: path.to_string(),
                })
        };

        let mut widgets = Vec::with_capacity(template.widgets.len());
        for widget in &template.widgets {
            widgets.push(WidgetRef {
                name: widget.name.clone(),
                kind: widget.kind,
                node: resolve(&widget.path)?,
            });
        }

        let mut child_objects = Vec::with_capacity(template.child_objects.len());
        for path in &template.child_objects {
            child_objects.push(resolve(path)?);
        }

        Ok(PanelBinding {
            widgets,
            child_objects,
            activation_group: None,
        })
    }

    /// Resolve a `/`-separated child path relative to `root`.
    pub fn find_path(&self, root: VisualId, path: &str) -> Option<VisualId> {
        let mut current = root;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current = self
                .children(current)
                .iter()
                .copied()
                .find(|c| self.name(*c) == Some(segment))?;
        }
        self.nodes.contains_key(&current).then_some(current)
    }

    pub fn contains(&self, id: VisualId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn name(&self, id: VisualId) -> Option<&str> {
        self.nodes.get(&id).map(|n| n.name.as_str())
    }

    pub fn parent(&self, id: VisualId) -> Option<VisualId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Children in draw order. Empty for unknown nodes.
    pub fn children(&self, id: VisualId) -> &[VisualId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    pub fn roots(&self) -> &[VisualId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_active(&self, id: VisualId) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.active)
    }

    /// Set the active flag. Returns `false` when nothing changed.
    pub fn set_active(&mut self, id: VisualId, active: bool) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) if node.active != active => {
                node.active = active;
                true
            }
            _ => false,
        }
    }

    pub fn mark_persistent(&mut self, id: VisualId) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(&id).ok_or(SceneError::NodeNotFound(id))?;
        node.persistent = true;
        Ok(())
    }

    pub fn is_persistent(&self, id: VisualId) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.persistent)
    }

    /// The panel marker of a node, if it carries one.
    pub fn panel(&self, id: VisualId) -> Option<&PanelBinding> {
        self.nodes.get(&id).and_then(|n| n.panel.as_ref())
    }

    pub fn panel_mut(&mut self, id: VisualId) -> Option<&mut PanelBinding> {
        self.nodes.get_mut(&id).and_then(|n| n.panel.as_mut())
    }

    /// Turn the destruction log on or off. Off by default; turning it off
    /// discards anything not yet drained.
    pub fn record_destroyed(&mut self, on: bool) {
        self.recording = on;
        if !on {
            self.destroyed.clear();
        }
    }

    /// Take the ids destroyed since the previous call. Empty unless
    /// recording was turned on with [`SceneGraph::record_destroyed`].
    pub fn drain_destroyed(&mut self) -> Vec<VisualId> {
        std::mem::take(&mut self.destroyed)
    }

    fn detach(&mut self, id: VisualId) {
        let parent = self.nodes.get(&id).and_then(|n| n.parent);
        match parent.and_then(|p| self.nodes.get_mut(&p)) {
            Some(parent_node) => parent_node.children.retain(|c| *c != id),
            None => self.roots.retain(|r| *r != id),
        }
    }

    fn is_ancestor_or_self(&self, ancestor: VisualId, mut node: VisualId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.parent(node) {
                Some(p) => node = p,
                None => return false,
            }
        }
    }
}
