// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use thiserror::Error;

/// Errors reported by the docking engine.
///
/// Every check is local and synchronous; a failed operation leaves prior state unchanged.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum DockError {
    /// A NaN or infinite value was assigned to a dimension.
    #[error("invalid {axis}: {value}")]
    InvalidDimension {
        /// Which dimension was rejected (`"width"` or `"height"`).
        axis: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The node does not carry the GUI-element marker and cannot be docked.
    #[error("child is not a GUI element")]
    NotAGuiElement,
    /// The child is the container itself or one of its ancestors.
    #[error("cannot dock a node into itself or its own subtree")]
    CyclicDock,
    /// The node has no dock control attached.
    #[error("node has no dock control")]
    NotDocked,
    /// An anchor name did not match any of the nine docking positions.
    #[error("unknown dock anchor `{0}`")]
    UnknownAnchor(String),
}

impl DockError {
    pub(crate) fn check_finite(axis: &'static str, value: f64) -> Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::InvalidDimension { axis, value })
        }
    }
}
