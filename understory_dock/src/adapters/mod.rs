// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other Understory crates.
//!
//! Each adapter is gated behind a feature flag so the core engine stays host-agnostic.
//!
//! ## Available Adapters
//!
//! - [`scene`] (`scene_adapter` feature): a [`PositionedNode`](crate::PositionedNode) host built
//!   on [`understory_scene::Scene`], storing dock controls in a side table keyed by node.

#[cfg(feature = "scene_adapter")]
pub mod scene;
