// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The root surface: scale factors plus the tree of docking containers beneath it.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::Size;

use crate::control::ResolvedGeometry;
use crate::error::DockError;
use crate::host::PositionedNode;
use crate::layout::{DynamicLayout, LayoutCx, LayoutStrategy, container_preferred_size};
use crate::scalable::Scalable;
use crate::style::{Constraint, Dock, DockStyle};
use crate::types::{Extent, Translation};
use crate::viewport::ViewportSize;

/// The root of a docked GUI.
///
/// `RootPane` is the [`Scalable`] surface every control resolves against: its design extent
/// (by default the minimum resolution, 1024×576) and the current [`ViewportSize`] give the two
/// scale factors. It also owns one [`DynamicLayout`] per container node, starting with its own
/// root node, and drives every cross-container operation: reparenting, cascading reshapes and
/// restarts into nested containers, and attach/detach propagation.
///
/// Every mutating call resolves the affected geometry before it returns.
#[derive(Clone, Debug)]
pub struct RootPane<K> {
    node: K,
    design_size: Size,
    viewport: ViewportSize,
    layouts: HashMap<K, DynamicLayout<K>>,
}

impl<K: Copy + Eq + Hash + Debug> RootPane<K> {
    /// Create a root surface for the scene node `node`, shown at `viewport`.
    ///
    /// The root node is the live top of the docked tree; its layout starts attached.
    pub fn new(node: K, viewport: ViewportSize) -> Self {
        let mut root_layout = DynamicLayout::new(node);
        root_layout.set_attached(true);
        let mut layouts = HashMap::new();
        layouts.insert(node, root_layout);
        Self {
            node,
            design_size: Size::new(ViewportSize::MIN_WIDTH, ViewportSize::MIN_HEIGHT),
            viewport,
            layouts,
        }
    }

    /// The root scene node.
    pub fn node(&self) -> K {
        self.node
    }

    /// The design extent every design-time size and offset is expressed in.
    pub fn design_size(&self) -> Size {
        self.design_size
    }

    /// Replace the design extent and recompute everything.
    pub fn set_design_size<H: PositionedNode<Id = K>>(
        &mut self,
        host: &mut H,
        size: Size,
    ) -> Result<(), DockError> {
        DockError::check_finite("width", size.width)?;
        DockError::check_finite("height", size.height)?;
        self.design_size = size;
        if !self.surface_scale().is_well_formed() {
            tracing::warn!(?size, "degenerate design size; scale factors are not finite");
        }
        self.restart(host);
        Ok(())
    }

    /// Replace the viewport size (for example after a window resize) and recompute everything.
    pub fn set_viewport<H: PositionedNode<Id = K>>(
        &mut self,
        host: &mut H,
        viewport: ViewportSize,
    ) {
        if viewport == self.viewport {
            return;
        }
        tracing::debug!(from = %self.viewport, to = %viewport, "viewport changed");
        self.viewport = viewport;
        self.restart(host);
    }

    /// The layout of a container node, if it has one.
    pub fn layout(&self, container: K) -> Option<&DynamicLayout<K>> {
        self.layouts.get(&container)
    }

    /// The docked children of a container, in no particular order.
    pub fn children(&self, container: K) -> impl Iterator<Item = K> + '_ {
        self.layouts
            .get(&container)
            .into_iter()
            .flat_map(|l| l.iter())
    }

    /// The container a node is docked in, if any.
    pub fn container_of(&self, child: K) -> Option<K> {
        self.layouts
            .values()
            .find(|l| l.contains(child))
            .map(DynamicLayout::node)
    }

    /// Returns true if the container is the root or is docked under an attached container.
    fn is_live(&self, container: K) -> bool {
        container == self.node
            || self
                .layouts
                .values()
                .any(|l| l.is_attached() && l.contains(container))
    }

    /// Returns true if `node` is `of` or sits above it, either in the scene or in the docked
    /// tree (a detached container is not in the scene but still registered with its parent).
    fn is_ancestor_or_self<H: PositionedNode<Id = K>>(&self, host: &H, node: K, of: K) -> bool {
        let mut scene = Some(of);
        while let Some(current) = scene {
            if current == node {
                return true;
            }
            scene = host.parent(current);
        }
        let mut docked = Some(of);
        let mut steps = 0;
        while let Some(current) = docked
            && steps <= self.layouts.len()
        {
            if current == node {
                return true;
            }
            docked = self.container_of(current);
            steps += 1;
        }
        false
    }

    /// Dock `child` into `container`.
    ///
    /// The container gets a layout on first use. A node already docked elsewhere keeps its
    /// control and moves here; `constraints` then only update its anchor and lock flag, while
    /// offsets and size set on the node are kept. Fails before touching any state with
    /// [`DockError::NotAGuiElement`] if `child` is not a GUI element, and with
    /// [`DockError::CyclicDock`] if `child` is `container` or one of its ancestors.
    pub fn add_child<H: PositionedNode<Id = K>>(
        &mut self,
        host: &mut H,
        container: K,
        child: K,
        constraints: &[Constraint],
    ) -> Result<K, DockError> {
        if !host.is_gui_element(child) {
            return Err(DockError::NotAGuiElement);
        }
        if self.is_ancestor_or_self(host, child, container) {
            return Err(DockError::CyclicDock);
        }
        if let Some(previous) = self.container_of(child)
            && previous != container
            && let Some(layout) = self.layouts.get_mut(&previous)
        {
            layout.release(host, child);
            tracing::debug!(?child, from = ?previous, to = ?container, "moving docked child");
        }

        let live = self.is_live(container);
        let scale = self.surface_scale();
        let layout = self.layouts.entry(container).or_insert_with(|| {
            let mut layout = DynamicLayout::new(container);
            layout.set_attached(live);
            layout
        });
        layout.add_child(&mut LayoutCx::new(host, scale), child, constraints)?;
        let attached = layout.is_attached();

        // A nested container follows its node in and out of the live tree.
        if self.layouts.contains_key(&child) {
            if attached {
                self.attach(host, child);
            } else {
                self.detach(host, child);
            }
        }
        self.validate(host, container);
        Ok(child)
    }

    /// Undock `child` from `container`. No-op if it is not docked there.
    pub fn remove_child<H: PositionedNode<Id = K>>(
        &mut self,
        host: &mut H,
        container: K,
        child: K,
    ) {
        let scale = self.surface_scale();
        let Some(layout) = self.layouts.get_mut(&container) else {
            return;
        };
        if layout.remove_child(&mut LayoutCx::new(host, scale), child) {
            if self.layouts.contains_key(&child) {
                self.detach(host, child);
            }
            self.validate(host, container);
        }
    }

    /// Undock every child of `container`.
    pub fn clear_children<H: PositionedNode<Id = K>>(&mut self, host: &mut H, container: K) {
        let scale = self.surface_scale();
        let Some(layout) = self.layouts.get_mut(&container) else {
            return;
        };
        let children: Vec<K> = layout.iter().collect();
        layout.clear_children(&mut LayoutCx::new(host, scale));
        for child in children {
            if self.layouts.contains_key(&child) {
                self.detach(host, child);
            }
        }
        self.validate(host, container);
    }

    /// Forget a container entirely: undock it from its own container, undock every child, and
    /// drop its layout. Nested containers below it are forgotten too.
    ///
    /// Call this before deleting a container node from the host scene. The root container
    /// cannot be forgotten; for it this only clears the children. Returns false if `container`
    /// had no layout.
    pub fn remove_container<H: PositionedNode<Id = K>>(
        &mut self,
        host: &mut H,
        container: K,
    ) -> bool {
        if container == self.node {
            self.clear_children(host, container);
            return false;
        }
        if let Some(parent) = self.container_of(container) {
            self.remove_child(host, parent, container);
        }
        let Some(mut layout) = self.layouts.remove(&container) else {
            return false;
        };
        let children: Vec<K> = layout.iter().collect();
        layout.clear_children(&mut LayoutCx::new(host, self.surface_scale()));
        for child in children {
            if self.layouts.contains_key(&child) {
                self.remove_container(host, child);
            }
        }
        tracing::debug!(?container, "forgot container");
        true
    }

    /// Number of containers with a layout, the root included.
    pub fn container_count(&self) -> usize {
        self.layouts.len()
    }

    /// The container's bounds changed: re-read natural sizes and re-resolve its children, then
    /// cascade into nested containers.
    pub fn reshape<H: PositionedNode<Id = K>>(&mut self, host: &mut H, container: K) {
        let scale = self.surface_scale();
        let Some(layout) = self.layouts.get_mut(&container) else {
            return;
        };
        layout.reshape(&mut LayoutCx::new(host, scale));
        for nested in self.nested_of(container) {
            self.reshape(host, nested);
        }
    }

    /// Recompute every docked node under the root, parents before children.
    ///
    /// This is what a viewport change triggers. Calling it again without an intervening change
    /// reproduces the same geometry.
    pub fn restart<H: PositionedNode<Id = K>>(&self, host: &mut H) {
        let scale = self.surface_scale();
        tracing::debug!(
            viewport = %self.viewport,
            factor_width = scale.factor_width,
            factor_height = scale.factor_height,
            "restarting docked layout"
        );
        self.restart_from(host, self.node);
    }

    fn restart_from<H: PositionedNode<Id = K>>(&self, host: &mut H, container: K) {
        let Some(layout) = self.layouts.get(&container) else {
            return;
        };
        layout.restart(&mut LayoutCx::new(host, self.surface_scale()));
        for nested in self.nested_of(container) {
            self.restart_from(host, nested);
        }
    }

    /// Attach a container under its live parent: re-insert its children into the scene and
    /// refresh their parent links, then cascade into nested containers.
    pub fn attach<H: PositionedNode<Id = K>>(&mut self, host: &mut H, container: K) {
        let scale = self.surface_scale();
        let Some(layout) = self.layouts.get_mut(&container) else {
            return;
        };
        layout.attach(&mut LayoutCx::new(host, scale));
        for nested in self.nested_of(container) {
            self.attach(host, nested);
        }
    }

    /// Detach a container: its children leave the scene but stay registered, and their parent
    /// links are cleared. Cascades into nested containers.
    pub fn detach<H: PositionedNode<Id = K>>(&mut self, host: &mut H, container: K) {
        let scale = self.surface_scale();
        let Some(layout) = self.layouts.get_mut(&container) else {
            return;
        };
        layout.detach(&mut LayoutCx::new(host, scale));
        for nested in self.nested_of(container) {
            self.detach(host, nested);
        }
    }

    /// How big a container naturally wants to be: its own docked size, or `(1, 1, 0)` if the
    /// container node itself is not docked.
    pub fn calculate_preferred_size<H: PositionedNode<Id = K>>(
        &self,
        host: &H,
        container: K,
    ) -> Extent {
        match self.layouts.get(&container) {
            Some(layout) => layout.calculate_preferred_size(host),
            None => container_preferred_size(host, container),
        }
    }

    /// Move a docked node's planar offset and re-resolve it.
    pub fn set_position<H: PositionedNode<Id = K>>(
        &self,
        host: &mut H,
        node: K,
        x: f64,
        y: f64,
    ) -> Result<ResolvedGeometry, DockError> {
        self.restyle(host, node, |style| style.set_offset(x, y))
    }

    /// Change a docked node's depth offset and re-resolve it.
    pub fn set_depth<H: PositionedNode<Id = K>>(
        &self,
        host: &mut H,
        node: K,
        z: f64,
    ) -> Result<ResolvedGeometry, DockError> {
        self.restyle(host, node, |style| style.set_depth(z))
    }

    /// Change a docked node's anchor (`None` means [`Dock::Center`]) and re-resolve it.
    pub fn set_dock<H: PositionedNode<Id = K>>(
        &self,
        host: &mut H,
        node: K,
        dock: Option<Dock>,
    ) -> Result<ResolvedGeometry, DockError> {
        self.restyle(host, node, |style| style.anchor = dock.unwrap_or_default())
    }

    /// Change a docked node's lock-scaling flag and re-resolve it.
    pub fn set_lock_scaling<H: PositionedNode<Id = K>>(
        &self,
        host: &mut H,
        node: K,
        lock_scaling: bool,
    ) -> Result<ResolvedGeometry, DockError> {
        self.restyle(host, node, |style| style.lock_scaling = lock_scaling)
    }

    /// Replace a docked node's whole style and re-resolve it.
    pub fn set_dock_style<H: PositionedNode<Id = K>>(
        &self,
        host: &mut H,
        node: K,
        dock_style: DockStyle,
    ) -> Result<ResolvedGeometry, DockError> {
        self.restyle(host, node, |style| *style = dock_style)
    }

    fn restyle<H: PositionedNode<Id = K>>(
        &self,
        host: &mut H,
        node: K,
        edit: impl FnOnce(&mut DockStyle),
    ) -> Result<ResolvedGeometry, DockError> {
        let control = host.control_mut(node).ok_or(DockError::NotDocked)?;
        edit(control.style_mut());
        let control = *control;
        let geometry = control.update_geometry(host, &self.surface_scale());
        // A container's children resolve against its new size.
        self.restart_from(host, node);
        Ok(geometry)
    }

    /// Show or cull a docked node.
    pub fn set_visible<H: PositionedNode<Id = K>>(
        &self,
        host: &mut H,
        node: K,
        visible: bool,
    ) -> Result<(), DockError> {
        if host.control(node).is_none() {
            return Err(DockError::NotDocked);
        }
        host.set_visible(node, visible);
        Ok(())
    }

    /// Whether a node is currently shown.
    pub fn is_visible<H: PositionedNode<Id = K>>(&self, host: &H, node: K) -> bool {
        host.is_visible(node)
    }

    /// A docked node's local translation shifted by half the scaled root extent.
    ///
    /// For nodes docked directly under the root this converts from the root's centred frame to
    /// screen coordinates with the origin at the bottom-left.
    pub fn screen_position<H: PositionedNode<Id = K>>(
        &self,
        host: &H,
        node: K,
    ) -> Option<Translation> {
        host.control(node)?;
        let half = self.surface_scale().scaled_extent() * 0.5;
        let local = host.local_translation(node);
        Some(Translation::new(
            local.x() + half.width,
            local.y() + half.height,
            local.z,
        ))
    }

    /// Scale a design-time font size to the current viewport.
    pub fn scaled_font_size(&self, size: f64) -> f64 {
        self.surface_scale().scale_font(size)
    }

    /// Reshape the container if a mutation left it invalid.
    fn validate<H: PositionedNode<Id = K>>(&mut self, host: &mut H, container: K) {
        if self.layouts.get(&container).is_some_and(DynamicLayout::is_invalid) {
            self.reshape(host, container);
        }
    }

    /// Children of `container` that host a layout of their own.
    fn nested_of(&self, container: K) -> Vec<K> {
        let Some(layout) = self.layouts.get(&container) else {
            return Vec::new();
        };
        layout
            .iter()
            .filter(|c| self.layouts.contains_key(c))
            .collect()
    }
}

impl<K> Scalable for RootPane<K> {
    fn width(&self) -> f64 {
        self.design_size.width
    }

    fn height(&self) -> f64 {
        self.design_size.height
    }

    fn viewport(&self) -> ViewportSize {
        self.viewport
    }
}
