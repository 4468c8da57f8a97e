// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The capability surface the engine needs from a host scene graph.

use core::fmt::Debug;
use core::hash::Hash;

use crate::control::DockControl;
use crate::types::{Extent, Translation};

/// A scene graph whose nodes can be positioned by the docking engine.
///
/// Nodes are addressed by small copyable handles. Hosts are expected to ignore calls on stale
/// handles and to answer queries on them with neutral values (zero geometry, no parent, no
/// control).
///
/// Each node has room for at most one [`DockControl`]; the host stores it but never interprets
/// it.
pub trait PositionedNode {
    /// Stable node handle.
    type Id: Copy + Eq + Hash + Debug;

    /// Whether the node carries the GUI-element marker and can be docked.
    fn is_gui_element(&self, id: Self::Id) -> bool;

    /// The node's parent in the scene, if it is attached.
    fn parent(&self, id: Self::Id) -> Option<Self::Id>;

    /// Attach `child` under `parent`, detaching it from any previous parent first.
    fn attach_child(&mut self, parent: Self::Id, child: Self::Id);

    /// Detach the node from its parent.
    fn detach(&mut self, id: Self::Id);

    /// The node's local translation (top-left corner in parent space).
    fn local_translation(&self, id: Self::Id) -> Translation;

    /// Replace the node's local translation.
    fn set_local_translation(&mut self, id: Self::Id, translation: Translation);

    /// The node's resolved size.
    fn size(&self, id: Self::Id) -> Extent;

    /// Replace the node's resolved size.
    fn set_size(&mut self, id: Self::Id, size: Extent);

    /// The node's natural size, if it has one of its own.
    fn preferred_size(&self, id: Self::Id) -> Option<Extent>;

    /// Whether the node is currently shown.
    fn is_visible(&self, id: Self::Id) -> bool;

    /// Show or cull the node.
    fn set_visible(&mut self, id: Self::Id, visible: bool);

    /// The node's dock control, if any.
    fn control(&self, id: Self::Id) -> Option<&DockControl<Self::Id>>;

    /// The node's dock control, mutably.
    fn control_mut(&mut self, id: Self::Id) -> Option<&mut DockControl<Self::Id>>;

    /// Store a control on the node, returning the one it replaces.
    fn insert_control(
        &mut self,
        id: Self::Id,
        control: DockControl<Self::Id>,
    ) -> Option<DockControl<Self::Id>>;

    /// Take the node's control away.
    fn remove_control(&mut self, id: Self::Id) -> Option<DockControl<Self::Id>>;
}
