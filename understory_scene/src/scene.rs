// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core scene implementation: structure, updates, queries.

use alloc::vec::Vec;
use kurbo::{Rect, Size, Vec2};
use smallvec::SmallVec;

use crate::types::{LocalNode, NodeFlags, NodeId};

/// Retained scene graph of panel nodes.
///
/// Unlike a batched spatial tree, every setter takes effect immediately: there is no commit
/// step, and world-space queries walk the parent chain on demand. Scenes holding GUI panels are
/// shallow, so the walk is cheap.
///
/// ## Example
///
/// ```rust
/// use kurbo::{Rect, Vec2};
/// use understory_scene::{LocalNode, Scene};
///
/// let mut scene = Scene::new();
/// let root = scene.insert(None, LocalNode::default());
/// let panel = scene.insert(Some(root), LocalNode::panel(100.0, 50.0));
///
/// scene.set_translation(root, Vec2::new(10.0, 200.0), 0.0);
/// scene.set_translation(panel, Vec2::new(5.0, -5.0), 1.0);
/// scene.set_size(panel, kurbo::Size::new(100.0, 50.0), 0.0);
///
/// assert_eq!(scene.world_translation(panel), Some((Vec2::new(15.0, 195.0), 1.0)));
/// assert_eq!(
///     scene.world_bounds(panel),
///     Some(Rect::new(15.0, 145.0, 115.0, 195.0))
/// );
/// ```
pub struct Scene {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Scene")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .finish_non_exhaustive()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
    local: LocalNode,
}

impl Node {
    fn new(generation: u32, local: LocalNode) -> Self {
        Self {
            generation,
            parent: None,
            children: SmallVec::new(),
            local,
        }
    }
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Insert a new node as a child of `parent` (or detached if `None`).
    pub fn insert(&mut self, parent: Option<NodeId>, local: LocalNode) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "slot indices are stored as u32 in NodeId"
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, local)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "slot indices are stored as u32 in NodeId"
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        if let Some(p) = parent
            && self.is_alive(p)
        {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove a node (and its subtree) from the scene.
    ///
    /// Every removed handle becomes stale immediately.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        let children = self.node(id).children.clone();
        for child in children {
            self.remove(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Reparent `id` under `new_parent`, or detach it when `new_parent` is `None`.
    ///
    /// Reparenting onto the same parent moves the node to the end of the child list.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(p) = new_parent {
            if !self.is_alive(p) {
                return;
            }
            debug_assert!(
                p != id && !self.is_ancestor(id, p),
                "reparenting a node under its own subtree"
            );
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
    }

    /// Detach `id` from its parent. The node stays alive as a detached root.
    pub fn detach(&mut self, id: NodeId) {
        self.reparent(id, None);
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Returns the local data of a live node.
    pub fn local(&self, id: NodeId) -> Option<&LocalNode> {
        self.node_opt(id).map(|n| &n.local)
    }

    /// Returns the parent of a node if live, or `None` for detached roots or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Get the children of a node, or empty slice if node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        match self.node_opt(id) {
            Some(n) => &n.children,
            None => &[],
        }
    }

    /// Returns true if `ancestor` is a strict ancestor of `id`.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.parent_of(id);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.parent_of(p);
        }
        false
    }

    /// Update the local translation and depth offset.
    pub fn set_translation(&mut self, id: NodeId, translation: Vec2, z: f64) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.translation = translation;
            n.local.z = z;
        }
    }

    /// Returns the local translation and depth offset of a live node.
    pub fn translation(&self, id: NodeId) -> Option<(Vec2, f64)> {
        self.local(id).map(|l| (l.translation, l.z))
    }

    /// Update the resolved size and depth extent.
    pub fn set_size(&mut self, id: NodeId, size: Size, depth: f64) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.size = size;
            n.local.depth = depth;
        }
    }

    /// Returns the resolved size and depth extent of a live node.
    pub fn size(&self, id: NodeId) -> Option<(Size, f64)> {
        self.local(id).map(|l| (l.size, l.depth))
    }

    /// Update the explicit preferred size. `None` clears it.
    pub fn set_preferred_size(&mut self, id: NodeId, size: Option<Size>, depth: f64) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.preferred_size = size;
            n.local.preferred_depth = depth;
        }
    }

    /// Returns the explicit preferred size and depth of a live node, if one is set.
    pub fn preferred_size(&self, id: NodeId) -> Option<(Size, f64)> {
        let local = self.local(id)?;
        local.preferred_size.map(|s| (s, local.preferred_depth))
    }

    /// Update node flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.flags = flags;
        }
    }

    /// Returns the flags of a node if the identifier is live.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.local(id).map(|l| l.flags)
    }

    /// Accumulate local translations from the detached root down to `id`.
    ///
    /// Returns `None` for stale identifiers.
    pub fn world_translation(&self, id: NodeId) -> Option<(Vec2, f64)> {
        let node = self.node_opt(id)?;
        let mut xy = node.local.translation;
        let mut z = node.local.z;
        let mut current = node.parent;
        while let Some(parent_id) = current {
            let Some(parent) = self.node_opt(parent_id) else {
                unreachable!("parent slot is unoccupied");
            };
            xy += parent.local.translation;
            z += parent.local.z;
            current = parent.parent;
        }
        Some((xy, z))
    }

    /// World-space rectangle covered by a live node.
    ///
    /// The node's translation is its top-left corner and the Y axis points up, so the rectangle
    /// extends downward from the translation by the node's height.
    pub fn world_bounds(&self, id: NodeId) -> Option<Rect> {
        let (origin, _) = self.world_translation(id)?;
        let size = self.local(id)?.size;
        Some(Rect::new(
            origin.x,
            origin.y - size.height,
            origin.x + size.width,
            origin.y,
        ))
    }

    // --- internals ---

    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        let parent_node = self.node_mut(parent);
        parent_node.children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        let p = self.node_mut(parent);
        p.children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_links_parent_and_children() {
        let mut scene = Scene::new();
        let root = scene.insert(None, LocalNode::default());
        let a = scene.insert(Some(root), LocalNode::default());
        let b = scene.insert(Some(root), LocalNode::default());

        assert_eq!(scene.children_of(root), &[a, b]);
        assert_eq!(scene.parent_of(a), Some(root));
        assert_eq!(scene.parent_of(root), None);
        assert!(scene.is_ancestor(root, b));
        assert!(!scene.is_ancestor(a, b));
    }

    #[test]
    fn removed_slots_are_recycled_with_a_new_generation() {
        let mut scene = Scene::new();
        let root = scene.insert(None, LocalNode::default());
        let child = scene.insert(Some(root), LocalNode::default());
        let grandchild = scene.insert(Some(child), LocalNode::default());

        scene.remove(child);
        assert!(!scene.is_alive(child));
        assert!(!scene.is_alive(grandchild), "subtree goes with its root");
        assert!(scene.children_of(root).is_empty());

        let reused = scene.insert(Some(root), LocalNode::default());
        assert_ne!(reused, child);
        assert!(scene.is_alive(reused));
        // Stale handles never reach the recycled slot.
        scene.set_translation(child, Vec2::new(1.0, 1.0), 0.0);
        assert_eq!(scene.translation(reused), Some((Vec2::ZERO, 0.0)));
    }

    #[test]
    fn reparent_and_detach() {
        let mut scene = Scene::new();
        let a = scene.insert(None, LocalNode::default());
        let b = scene.insert(None, LocalNode::default());
        let n = scene.insert(Some(a), LocalNode::default());

        scene.reparent(n, Some(b));
        assert_eq!(scene.parent_of(n), Some(b));
        assert!(scene.children_of(a).is_empty());
        assert_eq!(scene.children_of(b), &[n]);

        scene.detach(n);
        assert_eq!(scene.parent_of(n), None);
        assert!(scene.is_alive(n));
        assert!(scene.children_of(b).is_empty());
    }

    #[test]
    fn world_translation_accumulates_up_the_chain() {
        let mut scene = Scene::new();
        let root = scene.insert(None, LocalNode::default());
        let mid = scene.insert(Some(root), LocalNode::default());
        let leaf = scene.insert(Some(mid), LocalNode::default());

        scene.set_translation(root, Vec2::new(100.0, 100.0), 0.0);
        scene.set_translation(mid, Vec2::new(10.0, -20.0), 1.0);
        scene.set_translation(leaf, Vec2::new(1.0, -2.0), 1.0);

        assert_eq!(
            scene.world_translation(leaf),
            Some((Vec2::new(111.0, 78.0), 2.0))
        );
    }

    #[test]
    fn world_bounds_extend_downward_from_the_top_left() {
        let mut scene = Scene::new();
        let n = scene.insert(None, LocalNode::default());
        scene.set_translation(n, Vec2::new(10.0, 50.0), 0.0);
        scene.set_size(n, Size::new(30.0, 20.0), 0.0);
        assert_eq!(scene.world_bounds(n), Some(Rect::new(10.0, 30.0, 40.0, 50.0)));
    }

    #[test]
    fn preferred_size_and_flags() {
        let mut scene = Scene::new();
        let panel = scene.insert(None, LocalNode::panel(200.0, 100.0));
        let mesh = scene.insert(None, LocalNode::spatial());

        assert_eq!(
            scene.preferred_size(panel),
            Some((Size::new(200.0, 100.0), 0.0))
        );
        assert_eq!(scene.preferred_size(mesh), None);
        assert!(scene.flags(panel).unwrap().contains(NodeFlags::GUI_ELEMENT));
        assert!(!scene.flags(mesh).unwrap().contains(NodeFlags::GUI_ELEMENT));

        scene.set_preferred_size(panel, None, 0.0);
        assert_eq!(scene.preferred_size(panel), None);
    }
}
