// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Scene: a small retained scene graph of GUI panel nodes.
//!
//! This crate is the host side of a retained-mode GUI that lives inside a larger scene:
//!
//! - Represents a hierarchy of panel nodes with a local translation, a depth, a resolved size,
//!   and an optional explicit preferred size.
//! - Hands out generational [`NodeId`] handles so that stale handles are rejected instead of
//!   silently aliasing a recycled slot.
//! - Answers world-space questions ([`Scene::world_translation`], [`Scene::world_bounds`]) by
//!   accumulating local translations up the parent chain.
//!
//! ## Coordinate convention
//!
//! A node's translation is the position of its top-left corner in its parent's space. The Y
//! axis points up, so a node of height `h` covers `y - h ..= y` vertically. Depth (`z`) is a
//! plain stacking offset and is accumulated like the 2D part.
//!
//! ## Not a layout engine
//!
//! Nodes are positioned by whoever owns them. The `understory_dock` crate is one such owner: it
//! resolves docking constraints into the translations and sizes stored here.
//!
//! ## API overview
//!
//! - [`Scene`]: container managing node slots, generations, and parent/child links.
//! - [`LocalNode`]: per-node data (translation, depth, size, preferred size, flags).
//! - [`NodeFlags`]: visibility and the GUI-element marker.
//! - [`NodeId`]: generational handle of a node.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod scene;
mod types;

pub use scene::Scene;
pub use types::{LocalNode, NodeFlags, NodeId};
