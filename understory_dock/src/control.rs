// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-panel docking state and geometry resolution.

use core::fmt::Debug;
use core::hash::Hash;

use kurbo::Size;

use crate::host::PositionedNode;
use crate::scalable::SurfaceScale;
use crate::style::{Dock, DockStyle, HorizontalAnchor, VerticalAnchor};
use crate::types::{Extent, Translation};

/// Docking state attached to exactly one panel node.
///
/// A control pairs the node's [`DockStyle`] with a direct handle to its nearest docked ancestor.
/// The handle is set when the node is attached under a live container and cleared when it is
/// detached; resolution never walks the scene to find it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DockControl<K> {
    node: K,
    style: DockStyle,
    parent: Option<K>,
}

/// The outcome of resolving a [`DockControl`] against its frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResolvedGeometry {
    /// The node's size in viewport units.
    pub size: Extent,
    /// Origin of the anchor frame in the node's parent space.
    ///
    /// Under the root surface this is the centre of the scaled root extent; under a docked
    /// parent it is `(parent_width / 2, -parent_height / 2)`.
    pub anchor: Translation,
    /// Position of the node's centre relative to [`ResolvedGeometry::anchor`].
    pub docked: Translation,
    /// Position of the node's top-left corner relative to [`ResolvedGeometry::anchor`].
    pub position: Translation,
}

impl ResolvedGeometry {
    /// The local translation written to the node: anchor origin plus recentred position.
    pub fn translation(&self) -> Translation {
        self.anchor + self.position
    }
}

impl<K: Copy + Eq + Hash + Debug> DockControl<K> {
    /// Create an unattached control for `node`.
    pub fn new(node: K, style: DockStyle) -> Self {
        Self {
            node,
            style,
            parent: None,
        }
    }

    /// The node this control positions.
    pub fn node(&self) -> K {
        self.node
    }

    /// A copy of the current style.
    pub fn style(&self) -> DockStyle {
        self.style
    }

    pub(crate) fn style_mut(&mut self) -> &mut DockStyle {
        &mut self.style
    }

    /// Handle of the nearest docked ancestor, if attached under one.
    pub fn parent(&self) -> Option<K> {
        self.parent
    }

    /// Returns true if this control resolves against a docked parent rather than the root.
    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    /// Whether horizontal scaling follows the vertical factor.
    pub fn is_lock_scaling(&self) -> bool {
        self.style.lock_scaling
    }

    /// Link this control to its nearest docked ancestor.
    pub fn attach<H: PositionedNode<Id = K>>(&mut self, host: &H) {
        self.parent = nearest_docked_ancestor(host, self.node);
    }

    /// Drop the parent link.
    pub fn detach(&mut self) {
        self.parent = None;
    }

    pub(crate) fn set_parent(&mut self, parent: Option<K>) {
        self.parent = parent;
    }

    /// Extent of the frame this control is docked into.
    pub fn parent_extent<H: PositionedNode<Id = K>>(&self, host: &H, scale: &SurfaceScale) -> Size {
        match self.parent {
            Some(p) => host.size(p).size,
            None => scale.scaled_extent(),
        }
    }

    fn parent_locks_scaling<H: PositionedNode<Id = K>>(&self, host: &H) -> bool {
        self.parent
            .and_then(|p| host.control(p))
            .is_some_and(Self::is_lock_scaling)
    }

    /// Resolve size and position without touching the host.
    pub fn resolve<H: PositionedNode<Id = K>>(
        &self,
        host: &H,
        scale: &SurfaceScale,
    ) -> ResolvedGeometry {
        let pref = self.style.size;
        let size = Extent::new(
            pref.width() * scale.horizontal_factor(self.style.lock_scaling),
            pref.height() * scale.factor_height,
            pref.depth,
        );

        let parent = self.parent_extent(host, scale);
        let anchor = if self.has_parent() {
            Translation::new(parent.width * 0.5, -parent.height * 0.5, 0.0)
        } else {
            Translation::new(parent.width * 0.5, parent.height * 0.5, 0.0)
        };

        // Offsets follow the parent's lock flag, while the size above follows this node's own.
        let factor_x = scale.horizontal_factor(self.parent_locks_scaling(host));
        let docked = calculate_position(
            self.style.anchor,
            parent,
            size.size,
            self.style.offset,
            factor_x,
            scale.factor_height,
        );
        let position = docked + Translation::new(-size.width() * 0.5, size.height() * 0.5, 0.0);

        ResolvedGeometry {
            size,
            anchor,
            docked,
            position,
        }
    }

    /// Resolve and write the node's size and local translation into the host.
    pub fn update_geometry<H: PositionedNode<Id = K>>(
        &self,
        host: &mut H,
        scale: &SurfaceScale,
    ) -> ResolvedGeometry {
        let geometry = self.resolve(host, scale);
        host.set_size(self.node, geometry.size);
        host.set_local_translation(self.node, geometry.translation());
        tracing::trace!(
            node = ?self.node,
            anchor = %self.style.anchor,
            parent = ?self.parent,
            width = geometry.size.width(),
            height = geometry.size.height(),
            x = geometry.translation().x(),
            y = geometry.translation().y(),
            "resolved dock geometry"
        );
        geometry
    }
}

/// Walk up from `node` to the nearest ancestor carrying a dock control.
pub fn nearest_docked_ancestor<H: PositionedNode>(host: &H, node: H::Id) -> Option<H::Id> {
    let mut current = host.parent(node);
    while let Some(p) = current {
        if host.control(p).is_some() {
            return Some(p);
        }
        current = host.parent(p);
    }
    None
}

/// Centre of a child of size `child` docked at `anchor` inside a frame of size `parent`,
/// relative to the frame's centre.
///
/// Edges pull the child flush against the parent; the offset then pushes it inward (or, on
/// centred axes, along the axis with Y up). The depth offset is passed through unscaled.
fn calculate_position(
    anchor: Dock,
    parent: Size,
    child: Size,
    offset: Translation,
    factor_x: f64,
    factor_y: f64,
) -> Translation {
    let ox = offset.x() * factor_x;
    let oy = offset.y() * factor_y;
    let x = match anchor.horizontal() {
        HorizontalAnchor::Left => -(parent.width * 0.5) + child.width * 0.5 + ox,
        HorizontalAnchor::Center => ox,
        HorizontalAnchor::Right => parent.width * 0.5 - child.width * 0.5 - ox,
    };
    let y = match anchor.vertical() {
        VerticalAnchor::Top => parent.height * 0.5 - child.height * 0.5 - oy,
        VerticalAnchor::Center => oy,
        VerticalAnchor::Bottom => -(parent.height * 0.5) + child.height * 0.5 + oy,
    };
    Translation::new(x, y, offset.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARENT: Size = Size::new(1920.0, 1080.0);
    const CHILD: Size = Size::new(187.5, 93.75);

    #[test]
    fn centre_is_a_fixed_point() {
        let p = calculate_position(
            Dock::Center,
            PARENT,
            CHILD,
            Translation::new(0.0, 0.0, 1.0),
            1.875,
            1.875,
        );
        assert_eq!(p, Translation::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn bottom_right_pulls_to_the_corner_then_offsets_inward() {
        let p = calculate_position(
            Dock::BottomRight,
            PARENT,
            CHILD,
            Translation::new(10.0, 10.0, 0.0),
            1.875,
            1.875,
        );
        assert_eq!(p.x(), 1920.0 / 2.0 - 187.5 / 2.0 - 10.0 * 1.875);
        assert_eq!(p.y(), -(1080.0 / 2.0) + 93.75 / 2.0 + 10.0 * 1.875);
        assert_eq!(p.z, 0.0);
    }

    #[test]
    fn every_anchor_touches_its_edges() {
        let half_gap_x = (PARENT.width - CHILD.width) * 0.5;
        let half_gap_y = (PARENT.height - CHILD.height) * 0.5;
        for anchor in Dock::ALL {
            let p = calculate_position(anchor, PARENT, CHILD, Translation::ZERO, 2.0, 3.0);
            let expected_x = match anchor.horizontal() {
                HorizontalAnchor::Left => -half_gap_x,
                HorizontalAnchor::Center => 0.0,
                HorizontalAnchor::Right => half_gap_x,
            };
            let expected_y = match anchor.vertical() {
                VerticalAnchor::Top => half_gap_y,
                VerticalAnchor::Center => 0.0,
                VerticalAnchor::Bottom => -half_gap_y,
            };
            assert_eq!(p, Translation::new(expected_x, expected_y, 0.0), "{anchor:?}");
        }
    }

    #[test]
    fn offsets_use_the_supplied_factors() {
        let p = calculate_position(
            Dock::TopLeft,
            Size::new(100.0, 100.0),
            Size::new(20.0, 20.0),
            Translation::new(1.0, 1.0, 5.0),
            2.0,
            3.0,
        );
        assert_eq!(p, Translation::new(-40.0 + 2.0, 40.0 - 3.0, 5.0));
    }
}
