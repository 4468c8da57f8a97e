// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering surface's current resolution.

use core::fmt;
use core::hash::{Hash, Hasher};

use kurbo::Size;

use crate::error::DockError;

/// Width and height of the rendering surface, in pixels.
///
/// Both values are always finite: every constructor and setter rejects NaN and infinities with
/// [`DockError::InvalidDimension`] and leaves the previous value in place.
///
/// The default is the minimum supported resolution,
/// [`ViewportSize::MIN_WIDTH`]×[`ViewportSize::MIN_HEIGHT`]. With the `serde` feature, these are
/// also the values used for fields missing from a persisted record.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "ViewportRecord")
)]
pub struct ViewportSize {
    width: f64,
    height: f64,
}

impl ViewportSize {
    /// Smallest width the surface is designed for.
    pub const MIN_WIDTH: f64 = 1024.0;
    /// Smallest height the surface is designed for.
    pub const MIN_HEIGHT: f64 = 576.0;

    /// Create a viewport size, rejecting non-finite dimensions.
    pub fn new(width: f64, height: f64) -> Result<Self, DockError> {
        Ok(Self {
            width: DockError::check_finite("width", width)?,
            height: DockError::check_finite("height", height)?,
        })
    }

    /// Create a viewport size from integer pixel dimensions, as reported by window settings.
    pub fn from_pixels(width: u32, height: u32) -> Self {
        Self {
            width: f64::from(width),
            height: f64::from(height),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Both dimensions as a [`Size`].
    pub fn as_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Replace the width. Non-finite values are rejected and the width is left unchanged.
    pub fn set_width(&mut self, width: f64) -> Result<(), DockError> {
        self.width = DockError::check_finite("width", width)?;
        Ok(())
    }

    /// Replace the height. Non-finite values are rejected and the height is left unchanged.
    pub fn set_height(&mut self, height: f64) -> Result<(), DockError> {
        self.height = DockError::check_finite("height", height)?;
        Ok(())
    }
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: Self::MIN_WIDTH,
            height: Self::MIN_HEIGHT,
        }
    }
}

// Dimensions are finite, so equality is total.
impl Eq for ViewportSize {}

impl Hash for ViewportSize {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // `+ 0.0` folds -0.0 into 0.0 so equal values hash equally.
        (self.width + 0.0).to_bits().hash(state);
        (self.height + 0.0).to_bits().hash(state);
    }
}

impl fmt::Display for ViewportSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ViewportRecord {
    #[serde(default = "default_width")]
    width: f64,
    #[serde(default = "default_height")]
    height: f64,
}

#[cfg(feature = "serde")]
fn default_width() -> f64 {
    ViewportSize::MIN_WIDTH
}

#[cfg(feature = "serde")]
fn default_height() -> f64 {
    ViewportSize::MIN_HEIGHT
}

#[cfg(feature = "serde")]
impl TryFrom<ViewportRecord> for ViewportSize {
    type Error = DockError;

    fn try_from(record: ViewportRecord) -> Result<Self, DockError> {
        Self::new(record.width, record.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_minimum_resolution() {
        let v = ViewportSize::default();
        assert_eq!(v.width(), 1024.0);
        assert_eq!(v.height(), 576.0);
    }

    #[test]
    fn non_finite_values_are_rejected_without_partial_writes() {
        let mut v = ViewportSize::new(1920.0, 1080.0).unwrap();

        // NaN never compares equal, so match on the shape.
        assert!(matches!(
            v.set_width(f64::NAN),
            Err(DockError::InvalidDimension { axis: "width", value }) if value.is_nan()
        ));
        assert!(matches!(
            v.set_height(f64::INFINITY),
            Err(DockError::InvalidDimension { axis: "height", .. })
        ));
        assert!(ViewportSize::new(f64::NEG_INFINITY, 1.0).is_err());
        assert_eq!(v, ViewportSize::new(1920.0, 1080.0).unwrap());
    }

    #[test]
    fn setters_accept_finite_values() {
        let mut v = ViewportSize::default();
        v.set_width(1280.0).unwrap();
        v.set_height(720.0).unwrap();
        assert_eq!(v.as_size(), Size::new(1280.0, 720.0));
        assert_eq!(v, ViewportSize::from_pixels(1280, 720));
    }

    #[test]
    fn display_is_width_by_height() {
        let v = ViewportSize::from_pixels(1920, 1080);
        assert_eq!(alloc::format!("{v}"), "1920x1080");
    }
}
