// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: node identifiers, flags, and local geometry.

use kurbo::{Size, Vec2};

/// Identifier for a node in the scene (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Node flags controlling visibility and GUI participation.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is visible (not culled).
        const VISIBLE     = 0b0000_0001;
        /// Node is a GUI element: it has a size and can be laid out by a GUI container.
        const GUI_ELEMENT = 0b0000_0010;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::GUI_ELEMENT
    }
}

/// Local data for a node.
#[derive(Clone, Debug, PartialEq)]
pub struct LocalNode {
    /// Position of the node's top-left corner in parent space.
    pub translation: Vec2,
    /// Depth offset relative to the parent.
    pub z: f64,
    /// Resolved size, as last written by the node's layout owner.
    pub size: Size,
    /// Resolved depth extent.
    pub depth: f64,
    /// Explicit natural size, if the node has one.
    ///
    /// Containers read this when they are reshaped. `None` means "no opinion"; the layout owner
    /// falls back to its own notion of the node's size.
    pub preferred_size: Option<Size>,
    /// Depth extent that goes with [`LocalNode::preferred_size`].
    pub preferred_depth: f64,
    /// Visibility and GUI flags.
    pub flags: NodeFlags,
}

impl Default for LocalNode {
    fn default() -> Self {
        Self {
            translation: Vec2::ZERO,
            z: 0.0,
            size: Size::ZERO,
            depth: 0.0,
            preferred_size: None,
            preferred_depth: 0.0,
            flags: NodeFlags::default(),
        }
    }
}

impl LocalNode {
    /// A GUI panel with an explicit preferred size.
    pub fn panel(width: f64, height: f64) -> Self {
        Self {
            preferred_size: Some(Size::new(width, height)),
            ..Self::default()
        }
    }

    /// A visible scene node that is not a GUI element (for example a 3D mesh holder).
    pub fn spatial() -> Self {
        Self {
            flags: NodeFlags::VISIBLE,
            ..Self::default()
        }
    }
}
