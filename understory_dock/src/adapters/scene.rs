// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Docking host for Understory Scene.
//!
//! ## Feature
//!
//! Enable with `scene_adapter`.
//!
//! ## Notes
//!
//! The scene knows nothing about docking. [`DockScene`] wraps it and keeps one
//! [`DockControl`] per docked node in a side table. Removing a node through
//! [`DockScene::remove_node`] drops the controls of its whole subtree; removing it behind the
//! adapter's back leaves stale entries that are ignored because every lookup checks liveness.

use hashbrown::HashMap;
use kurbo::Vec2;
use understory_scene::{LocalNode, NodeFlags, NodeId, Scene};

use crate::control::DockControl;
use crate::host::PositionedNode;
use crate::types::{Extent, Translation};

/// An [`understory_scene::Scene`] that can be laid out by the docking engine.
#[derive(Debug, Default)]
pub struct DockScene {
    scene: Scene,
    controls: HashMap<NodeId, DockControl<NodeId>>,
}

impl DockScene {
    /// Wrap an existing scene. No node starts out docked.
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            controls: HashMap::new(),
        }
    }

    /// The wrapped scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The wrapped scene, mutably.
    ///
    /// Geometry written directly is overwritten the next time the node's container resolves it.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Unwrap the scene, dropping every dock control.
    pub fn into_scene(self) -> Scene {
        self.scene
    }

    /// Insert a node into the scene. Shorthand for [`Scene::insert`].
    pub fn insert(&mut self, parent: Option<NodeId>, local: LocalNode) -> NodeId {
        self.scene.insert(parent, local)
    }

    /// Remove a node and its subtree from the scene, dropping their dock controls.
    ///
    /// Containers that still list a removed node keep a stale handle; undock it first with
    /// [`RootPane::remove_child`](crate::RootPane::remove_child), or with
    /// [`RootPane::remove_container`](crate::RootPane::remove_container) if it hosts children.
    pub fn remove_node(&mut self, id: NodeId) {
        self.scene.remove(id);
        let scene = &self.scene;
        self.controls.retain(|node, _| scene.is_alive(*node));
    }

    /// Number of dock controls currently stored.
    pub fn control_count(&self) -> usize {
        self.controls.len()
    }
}

impl PositionedNode for DockScene {
    type Id = NodeId;

    fn is_gui_element(&self, id: NodeId) -> bool {
        self.scene
            .flags(id)
            .is_some_and(|f| f.contains(NodeFlags::GUI_ELEMENT))
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.scene.parent_of(id)
    }

    fn attach_child(&mut self, parent: NodeId, child: NodeId) {
        self.scene.reparent(child, Some(parent));
    }

    fn detach(&mut self, id: NodeId) {
        self.scene.detach(id);
    }

    fn local_translation(&self, id: NodeId) -> Translation {
        self.scene
            .translation(id)
            .map(|(xy, z)| Translation { xy, z })
            .unwrap_or(Translation::ZERO)
    }

    fn set_local_translation(&mut self, id: NodeId, translation: Translation) {
        self.scene
            .set_translation(id, Vec2::new(translation.x(), translation.y()), translation.z);
    }

    fn size(&self, id: NodeId) -> Extent {
        self.scene
            .size(id)
            .map(|(size, depth)| Extent { size, depth })
            .unwrap_or(Extent::ZERO)
    }

    fn set_size(&mut self, id: NodeId, size: Extent) {
        self.scene.set_size(id, size.size, size.depth);
    }

    fn preferred_size(&self, id: NodeId) -> Option<Extent> {
        self.scene
            .preferred_size(id)
            .map(|(size, depth)| Extent { size, depth })
    }

    fn is_visible(&self, id: NodeId) -> bool {
        self.scene
            .flags(id)
            .is_some_and(|f| f.contains(NodeFlags::VISIBLE))
    }

    fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(mut flags) = self.scene.flags(id) {
            flags.set(NodeFlags::VISIBLE, visible);
            self.scene.set_flags(id, flags);
        }
    }

    fn control(&self, id: NodeId) -> Option<&DockControl<NodeId>> {
        if !self.scene.is_alive(id) {
            return None;
        }
        self.controls.get(&id)
    }

    fn control_mut(&mut self, id: NodeId) -> Option<&mut DockControl<NodeId>> {
        if !self.scene.is_alive(id) {
            return None;
        }
        self.controls.get_mut(&id)
    }

    fn insert_control(
        &mut self,
        id: NodeId,
        control: DockControl<NodeId>,
    ) -> Option<DockControl<NodeId>> {
        if !self.scene.is_alive(id) {
            return None;
        }
        self.controls.insert(id, control)
    }

    fn remove_control(&mut self, id: NodeId) -> Option<DockControl<NodeId>> {
        self.controls.remove(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::DockStyle;

    #[test]
    fn spatial_nodes_are_not_gui_elements() {
        let mut host = DockScene::default();
        let mesh = host.insert(None, LocalNode::spatial());
        let panel = host.insert(None, LocalNode::panel(10.0, 10.0));
        assert!(!host.is_gui_element(mesh));
        assert!(host.is_gui_element(panel));
    }

    #[test]
    fn removing_a_subtree_drops_its_controls() {
        let mut host = DockScene::default();
        let outer = host.insert(None, LocalNode::panel(10.0, 10.0));
        let inner = host.insert(Some(outer), LocalNode::panel(5.0, 5.0));
        let other = host.insert(None, LocalNode::panel(5.0, 5.0));
        for id in [outer, inner, other] {
            host.insert_control(id, DockControl::new(id, DockStyle::default()));
        }
        assert_eq!(host.control_count(), 3);

        host.remove_node(outer);
        assert_eq!(host.control_count(), 1);
        assert!(host.control(other).is_some());
        assert!(host.control(inner).is_none());
    }

    #[test]
    fn stale_handles_answer_neutrally() {
        let mut host = DockScene::default();
        let id = host.insert(None, LocalNode::panel(10.0, 10.0));
        host.remove_node(id);
        assert_eq!(host.size(id), Extent::ZERO);
        assert_eq!(host.local_translation(id), Translation::ZERO);
        assert!(!host.is_visible(id));
        assert!(host.insert_control(id, DockControl::new(id, DockStyle::default())).is_none());
        assert!(host.control(id).is_none());
    }

    #[test]
    fn visibility_toggles_only_the_visible_flag() {
        let mut host = DockScene::default();
        let id = host.insert(None, LocalNode::panel(10.0, 10.0));
        host.set_visible(id, false);
        assert!(!host.is_visible(id));
        assert!(host.is_gui_element(id));
        host.set_visible(id, true);
        assert!(host.is_visible(id));
    }
}
