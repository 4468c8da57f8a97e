// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Containers of docked children.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashSet;

use crate::control::{DockControl, nearest_docked_ancestor};
use crate::error::DockError;
use crate::host::PositionedNode;
use crate::scalable::SurfaceScale;
use crate::style::{Constraint, DockStyle};
use crate::types::Extent;

/// Preferred size reported by a container whose own node is not docked.
pub const MIN_PREFERRED_SIZE: Extent = Extent::new(1.0, 1.0, 0.0);

/// What a layout strategy needs to do its work: the host scene and the current scale.
#[derive(Debug)]
pub struct LayoutCx<'a, H> {
    /// The host scene.
    pub host: &'a mut H,
    /// Scale of the root surface at the time of the call.
    pub scale: SurfaceScale,
}

impl<'a, H> LayoutCx<'a, H> {
    /// Bundle a host and a scale snapshot.
    pub fn new(host: &'a mut H, scale: SurfaceScale) -> Self {
        Self { host, scale }
    }
}

/// The shape a pluggable container layout presents to the hosting GUI framework.
pub trait LayoutStrategy<H: PositionedNode> {
    /// How big the container naturally wants to be.
    fn calculate_preferred_size(&self, host: &H) -> Extent;

    /// The container's own bounds changed: refresh every child's size and geometry.
    fn reshape(&mut self, cx: &mut LayoutCx<'_, H>);

    /// Add (or re-style) a child. Returns the child's handle.
    fn add_child(
        &mut self,
        cx: &mut LayoutCx<'_, H>,
        child: H::Id,
        constraints: &[Constraint],
    ) -> Result<H::Id, DockError>;

    /// Remove a child. Returns false if it was not a child of this container.
    fn remove_child(&mut self, cx: &mut LayoutCx<'_, H>, child: H::Id) -> bool;

    /// Remove every child.
    fn clear_children(&mut self, cx: &mut LayoutCx<'_, H>);

    /// The current children, in no particular order.
    fn children(&self) -> impl Iterator<Item = H::Id> + '_;

    /// The container was attached under a live parent.
    fn attach(&mut self, cx: &mut LayoutCx<'_, H>);

    /// The container was detached from its parent.
    fn detach(&mut self, cx: &mut LayoutCx<'_, H>);
}

/// Docking layout for one container node.
///
/// Children are kept in an identity-keyed set of handles; each child's [`DockControl`] lives in
/// the host's per-node slot. Children stay registered across detach/attach, so re-attaching a
/// container is cheap.
#[derive(Clone, Debug)]
pub struct DynamicLayout<K> {
    node: K,
    children: HashSet<K>,
    attached: bool,
    invalid: bool,
}

impl<K: Copy + Eq + Hash + Debug> DynamicLayout<K> {
    /// A detached, empty layout for the container `node`.
    pub fn new(node: K) -> Self {
        Self {
            node,
            children: HashSet::new(),
            attached: false,
            invalid: false,
        }
    }

    /// The container node this layout arranges.
    pub fn node(&self) -> K {
        self.node
    }

    /// Returns true if `child` is registered here.
    pub fn contains(&self, child: K) -> bool {
        self.children.contains(&child)
    }

    /// The registered children, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = K> + '_ {
        self.children.iter().copied()
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns true if there are no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Whether the container is attached under a live parent.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether the children need a reshape.
    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// Request a reshape.
    pub fn invalidate(&mut self) {
        self.invalid = true;
    }

    pub(crate) fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
    }

    /// Recompute every child's geometry from its current style.
    ///
    /// Unlike [`LayoutStrategy::reshape`], this does not re-read natural sizes.
    pub fn restart<H: PositionedNode<Id = K>>(&self, cx: &mut LayoutCx<'_, H>) {
        for &child in &self.children {
            if let Some(control) = cx.host.control(child).copied() {
                control.update_geometry(cx.host, &cx.scale);
            }
        }
    }

    /// Unregister `child` and detach it from the scene, leaving its control in place.
    ///
    /// Used when a docked node moves to another container.
    pub(crate) fn release<H: PositionedNode<Id = K>>(&mut self, host: &mut H, child: K) -> bool {
        if !self.children.remove(&child) {
            return false;
        }
        if host.parent(child) == Some(self.node) {
            host.detach(child);
        }
        if let Some(control) = host.control_mut(child) {
            control.detach();
        }
        self.invalidate();
        true
    }

    /// Copy the child's natural size into its style and resolve it.
    fn reshape_child<H: PositionedNode<Id = K>>(cx: &mut LayoutCx<'_, H>, child: K) {
        let natural = cx.host.preferred_size(child);
        let Some(control) = cx.host.control_mut(child) else {
            return;
        };
        // Without a natural size of its own, the child keeps the size already in its style.
        if let Some(size) = natural {
            control.style_mut().set_extent(Some(size));
        }
        let control = *control;
        control.update_geometry(cx.host, &cx.scale);
    }

    /// Insert the child into the scene under this container and refresh its parent link.
    fn attach_child<H: PositionedNode<Id = K>>(&self, host: &mut H, child: K) {
        if host.parent(child) != Some(self.node) {
            host.attach_child(self.node, child);
        }
        let parent = nearest_docked_ancestor(host, child);
        if let Some(control) = host.control_mut(child) {
            control.set_parent(parent);
        }
    }
}

/// Natural size of a container node: its own docked size, or a degenerate minimum.
pub(crate) fn container_preferred_size<H: PositionedNode>(host: &H, node: H::Id) -> Extent {
    host.control(node)
        .map(|c| c.style().size)
        .unwrap_or(MIN_PREFERRED_SIZE)
}

impl<H: PositionedNode> LayoutStrategy<H> for DynamicLayout<H::Id> {
    fn calculate_preferred_size(&self, host: &H) -> Extent {
        container_preferred_size(host, self.node)
    }

    fn reshape(&mut self, cx: &mut LayoutCx<'_, H>) {
        for &child in &self.children {
            Self::reshape_child(cx, child);
        }
        self.invalid = false;
    }

    fn add_child(
        &mut self,
        cx: &mut LayoutCx<'_, H>,
        child: H::Id,
        constraints: &[Constraint],
    ) -> Result<H::Id, DockError> {
        if !cx.host.is_gui_element(child) {
            return Err(DockError::NotAGuiElement);
        }
        let style = DockStyle::from_constraints(constraints.iter().copied());
        match cx.host.control_mut(child) {
            // Offsets and size belong to the node; the tags only carry anchor and lock.
            Some(existing) => {
                let current = existing.style_mut();
                current.anchor = style.anchor;
                current.lock_scaling = style.lock_scaling;
            }
            None => {
                cx.host.insert_control(child, DockControl::new(child, style));
            }
        }
        self.children.insert(child);
        if self.attached {
            self.attach_child(cx.host, child);
        }
        Self::reshape_child(cx, child);
        self.invalidate();
        tracing::debug!(
            container = ?self.node,
            ?child,
            anchor = %style.anchor,
            attached = self.attached,
            "docked child"
        );
        Ok(child)
    }

    fn remove_child(&mut self, cx: &mut LayoutCx<'_, H>, child: H::Id) -> bool {
        if !self.children.remove(&child) {
            return false;
        }
        if cx.host.parent(child) == Some(self.node) {
            cx.host.detach(child);
        }
        cx.host.remove_control(child);
        self.invalidate();
        tracing::debug!(container = ?self.node, ?child, "removed docked child");
        true
    }

    fn clear_children(&mut self, cx: &mut LayoutCx<'_, H>) {
        let children: Vec<H::Id> = self.children.drain().collect();
        for child in children {
            if cx.host.parent(child) == Some(self.node) {
                cx.host.detach(child);
            }
            cx.host.remove_control(child);
        }
        self.invalidate();
    }

    fn children(&self) -> impl Iterator<Item = H::Id> + '_ {
        self.iter()
    }

    fn attach(&mut self, cx: &mut LayoutCx<'_, H>) {
        self.attached = true;
        for &child in &self.children {
            self.attach_child(cx.host, child);
            Self::reshape_child(cx, child);
        }
        self.invalid = false;
    }

    fn detach(&mut self, cx: &mut LayoutCx<'_, H>) {
        self.attached = false;
        for &child in &self.children {
            if cx.host.parent(child) == Some(self.node) {
                cx.host.detach(child);
            }
            if let Some(control) = cx.host.control_mut(child) {
                control.detach();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use hashbrown::HashMap;
    use kurbo::Size;

    use super::*;
    use crate::style::Dock;
    use crate::types::Translation;

    /// Flat host: nodes are indices, every node is a GUI element except the ones in `spatial`.
    #[derive(Debug, Default)]
    struct Flat {
        parents: HashMap<u32, u32>,
        sizes: HashMap<u32, Extent>,
        natural: HashMap<u32, Extent>,
        translations: HashMap<u32, Translation>,
        controls: HashMap<u32, DockControl<u32>>,
        hidden: HashSet<u32>,
        spatial: HashSet<u32>,
    }

    impl PositionedNode for Flat {
        type Id = u32;

        fn is_gui_element(&self, id: u32) -> bool {
            !self.spatial.contains(&id)
        }
        fn parent(&self, id: u32) -> Option<u32> {
            self.parents.get(&id).copied()
        }
        fn attach_child(&mut self, parent: u32, child: u32) {
            self.parents.insert(child, parent);
        }
        fn detach(&mut self, id: u32) {
            self.parents.remove(&id);
        }
        fn local_translation(&self, id: u32) -> Translation {
            self.translations.get(&id).copied().unwrap_or_default()
        }
        fn set_local_translation(&mut self, id: u32, translation: Translation) {
            self.translations.insert(id, translation);
        }
        fn size(&self, id: u32) -> Extent {
            self.sizes.get(&id).copied().unwrap_or_default()
        }
        fn set_size(&mut self, id: u32, size: Extent) {
            self.sizes.insert(id, size);
        }
        fn preferred_size(&self, id: u32) -> Option<Extent> {
            self.natural.get(&id).copied()
        }
        fn is_visible(&self, id: u32) -> bool {
            !self.hidden.contains(&id)
        }
        fn set_visible(&mut self, id: u32, visible: bool) {
            if visible {
                self.hidden.remove(&id);
            } else {
                self.hidden.insert(id);
            }
        }
        fn control(&self, id: u32) -> Option<&DockControl<u32>> {
            self.controls.get(&id)
        }
        fn control_mut(&mut self, id: u32) -> Option<&mut DockControl<u32>> {
            self.controls.get_mut(&id)
        }
        fn insert_control(
            &mut self,
            id: u32,
            control: DockControl<u32>,
        ) -> Option<DockControl<u32>> {
            self.controls.insert(id, control)
        }
        fn remove_control(&mut self, id: u32) -> Option<DockControl<u32>> {
            self.controls.remove(&id)
        }
    }

    const ROOT: u32 = 0;

    fn scale() -> SurfaceScale {
        SurfaceScale::identity(Size::new(1024.0, 576.0))
    }

    fn attached_root() -> DynamicLayout<u32> {
        let mut layout = DynamicLayout::new(ROOT);
        layout.set_attached(true);
        layout
    }

    #[test]
    fn non_gui_children_leave_no_trace() {
        let mut host = Flat::default();
        host.spatial.insert(1);
        let mut layout = attached_root();
        let result = layout.add_child(&mut LayoutCx::new(&mut host, scale()), 1, &[]);
        assert_eq!(result, Err(DockError::NotAGuiElement));
        assert!(layout.is_empty());
        assert!(!layout.is_invalid());
        assert!(host.controls.is_empty());
        assert!(host.parents.is_empty());
    }

    #[test]
    fn adding_resolves_and_invalidates() {
        let mut host = Flat::default();
        host.natural.insert(1, Extent::new(100.0, 50.0, 0.0));
        let mut layout = attached_root();
        layout
            .add_child(
                &mut LayoutCx::new(&mut host, scale()),
                1,
                &[Constraint::Dock(Dock::TopLeft)],
            )
            .unwrap();
        assert!(layout.contains(1));
        assert!(layout.is_invalid());
        assert_eq!(host.parent(1), Some(ROOT));
        assert_eq!(host.size(1), Extent::new(100.0, 50.0, 0.0));
        assert_eq!(host.local_translation(1), Translation::new(0.0, 576.0, 1.0));

        LayoutStrategy::reshape(&mut layout, &mut LayoutCx::new(&mut host, scale()));
        assert!(!layout.is_invalid());
    }

    #[test]
    fn re_adding_keeps_the_control_and_restyles_on_change() {
        let mut host = Flat::default();
        let mut layout = attached_root();
        let mut cx = LayoutCx::new(&mut host, scale());
        layout.add_child(&mut cx, 1, &[]).unwrap();
        layout
            .add_child(&mut cx, 1, &[Constraint::Dock(Dock::BottomLeft)])
            .unwrap();
        assert_eq!(layout.len(), 1);
        assert_eq!(host.controls[&1].style().anchor, Dock::BottomLeft);
    }

    #[test]
    fn re_adding_keeps_offsets_set_on_the_node() {
        let mut host = Flat::default();
        host.natural.insert(1, Extent::new(30.0, 20.0, 0.0));
        let mut layout = attached_root();
        let mut cx = LayoutCx::new(&mut host, scale());
        layout
            .add_child(&mut cx, 1, &[Constraint::Dock(Dock::TopLeft)])
            .unwrap();
        cx.host.control_mut(1).unwrap().style_mut().set_offset(5.0, 6.0);

        layout
            .add_child(&mut cx, 1, &[Constraint::Dock(Dock::TopLeft)])
            .unwrap();
        assert_eq!(cx.host.controls[&1].style().offset, Translation::new(5.0, 6.0, 1.0));

        layout
            .add_child(&mut cx, 1, &[Constraint::LockScaling(true)])
            .unwrap();
        let style = host.controls[&1].style();
        assert_eq!(style.offset, Translation::new(5.0, 6.0, 1.0));
        assert_eq!(style.size, Extent::new(30.0, 20.0, 0.0));
        assert_eq!(style.anchor, Dock::Center);
        assert!(style.lock_scaling);
    }

    #[test]
    fn unattached_containers_do_not_touch_the_scene() {
        let mut host = Flat::default();
        let mut layout = DynamicLayout::new(7);
        layout
            .add_child(&mut LayoutCx::new(&mut host, scale()), 1, &[])
            .unwrap();
        assert!(layout.contains(1));
        assert_eq!(host.parent(1), None);
        assert!(host.controls.contains_key(&1));
    }

    #[test]
    fn restart_keeps_the_style_size() {
        let mut host = Flat::default();
        host.natural.insert(1, Extent::new(100.0, 50.0, 0.0));
        let mut layout = attached_root();
        layout
            .add_child(&mut LayoutCx::new(&mut host, scale()), 1, &[])
            .unwrap();

        // A new natural size is only picked up by a reshape.
        host.natural.insert(1, Extent::new(10.0, 10.0, 0.0));
        layout.restart(&mut LayoutCx::new(&mut host, scale()));
        assert_eq!(host.size(1), Extent::new(100.0, 50.0, 0.0));
        LayoutStrategy::reshape(&mut layout, &mut LayoutCx::new(&mut host, scale()));
        assert_eq!(host.size(1), Extent::new(10.0, 10.0, 0.0));
    }

    #[test]
    fn detach_then_attach_round_trips() {
        let mut host = Flat::default();
        host.controls.insert(ROOT, DockControl::new(ROOT, DockStyle::default()));
        let mut layout = attached_root();
        for child in [1, 2] {
            layout
                .add_child(&mut LayoutCx::new(&mut host, scale()), child, &[])
                .unwrap();
        }
        assert_eq!(host.controls[&1].parent(), Some(ROOT));

        LayoutStrategy::detach(&mut layout, &mut LayoutCx::new(&mut host, scale()));
        assert!(!layout.is_attached());
        assert_eq!(layout.len(), 2);
        assert!(host.parents.is_empty());
        assert_eq!(host.controls[&1].parent(), None);

        LayoutStrategy::attach(&mut layout, &mut LayoutCx::new(&mut host, scale()));
        let mut parents: Vec<_> = [1, 2].iter().map(|c| host.parent(*c)).collect();
        parents.dedup();
        assert_eq!(parents, vec![Some(ROOT)]);
        assert_eq!(host.controls[&2].parent(), Some(ROOT));
    }

    #[test]
    fn removal_drops_the_control() {
        let mut host = Flat::default();
        let mut layout = attached_root();
        let mut cx = LayoutCx::new(&mut host, scale());
        layout.add_child(&mut cx, 1, &[]).unwrap();
        assert!(layout.remove_child(&mut cx, 1));
        assert!(!layout.remove_child(&mut cx, 1));
        assert!(host.controls.is_empty());
        assert_eq!(host.parent(1), None);
    }

    #[test]
    fn preferred_size_comes_from_the_container_control() {
        let mut host = Flat::default();
        let layout = DynamicLayout::new(3);
        assert_eq!(layout.calculate_preferred_size(&host), MIN_PREFERRED_SIZE);
        host.controls.insert(
            3,
            DockControl::new(3, DockStyle::default().with_size(Extent::new(4.0, 5.0, 6.0))),
        );
        assert_eq!(layout.calculate_preferred_size(&host), Extent::new(4.0, 5.0, 6.0));
    }
}
