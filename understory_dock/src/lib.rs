// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Dock: resolution-independent docking layout for retained-mode GUI panels.
//!
//! A GUI that lives inside a scene graph is usually designed against one reference resolution
//! (for example 1024×576) and then shown on a surface of whatever size the window happens to
//! have. This crate keeps such a UI coherent across resolutions without the caller ever
//! restating absolute coordinates:
//!
//! - Each docked panel carries a [`DockStyle`]: one of nine [`Dock`] anchors on its parent's
//!   bounds, a design-time offset, a design-time size, and a lock-scaling flag.
//! - The root surface ([`RootPane`], through the [`Scalable`] contract) derives independent
//!   horizontal and vertical scale factors from its [`ViewportSize`] and its own design extent.
//! - A [`DockControl`] per panel turns the style and the current scale factors into a concrete
//!   size and local translation, relative to its nearest docked ancestor.
//! - A [`DynamicLayout`] per container owns the set of docked children and drives the
//!   attach/detach lifecycle and the recompute cascade into nested containers.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_dock::adapters::scene::DockScene;
//! use understory_dock::{Constraint, Dock, RootPane, ViewportSize};
//! use understory_scene::{LocalNode, Scene};
//!
//! let mut host = DockScene::new(Scene::new());
//! let root = host.insert(None, LocalNode::default());
//! let viewport = ViewportSize::new(1920.0, 1080.0).unwrap();
//! let mut pane = RootPane::new(root, viewport);
//!
//! // A 100×50 design-size panel in the bottom-right corner.
//! let hud = host.insert(None, LocalNode::panel(100.0, 50.0));
//! pane.add_child(&mut host, root, hud, &[Constraint::Dock(Dock::BottomRight)])
//!     .unwrap();
//!
//! // The design size is scaled by 1920/1024 = 1080/576 = 1.875.
//! let bounds = host.scene().world_bounds(hud).unwrap();
//! assert_eq!(bounds.width(), 187.5);
//! assert_eq!(bounds.x1, 1920.0);
//! assert_eq!(bounds.y0, 0.0);
//! ```
//!
//! ## Host integration
//!
//! The engine never owns scene nodes. Everything it needs from the host scene graph is the
//! [`PositionedNode`] capability: translations, sizes, parent links, a GUI-element marker,
//! a visibility toggle, and one [`DockControl`] slot per node. The `scene_adapter` feature
//! implements it for `understory_scene` via [`adapters::scene::DockScene`].
//!
//! ## Coordinate convention
//!
//! Translations place a node's top-left corner and the Y axis points up. Under the root
//! surface, a panel's anchor frame is centred on the scaled root extent; under a docked parent,
//! it is centred on the parent's resolved size at `(width / 2, -height / 2)`.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//! - `serde` (default): `Serialize`/`Deserialize` for [`ViewportSize`].
//! - `scene_adapter` (default): the [`adapters::scene`] module.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;

mod control;
mod error;
mod host;
mod layout;
mod root;
mod scalable;
mod style;
mod types;
mod viewport;

pub use control::{DockControl, ResolvedGeometry, nearest_docked_ancestor};
pub use error::DockError;
pub use host::PositionedNode;
pub use layout::{DynamicLayout, LayoutCx, LayoutStrategy, MIN_PREFERRED_SIZE};
pub use root::RootPane;
pub use scalable::{Scalable, SurfaceScale};
pub use style::{Constraint, Dock, DockStyle, HorizontalAnchor, VerticalAnchor};
pub use types::{Extent, Translation};
pub use viewport::ViewportSize;
