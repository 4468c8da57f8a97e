// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scaling contract between the root surface and everything docked beneath it.

use kurbo::Size;

use crate::viewport::ViewportSize;

/// A surface that knows its own design extent and the current viewport.
///
/// The scale factors are the ratio of the viewport to the surface's own extent, computed per
/// axis. Every design-time size and offset beneath the surface is multiplied by them.
///
/// Forcing a full recompute is a mutating operation on the host scene and is provided by the
/// concrete surface ([`RootPane::restart`](crate::RootPane::restart)).
pub trait Scalable {
    /// The surface's own rendered width (its design width).
    fn width(&self) -> f64;

    /// The surface's own rendered height (its design height).
    fn height(&self) -> f64;

    /// The current viewport size.
    fn viewport(&self) -> ViewportSize;

    /// Horizontal scale factor: viewport width over own width.
    fn scale_factor_width(&self) -> f64 {
        self.viewport().width() / self.width()
    }

    /// Vertical scale factor: viewport height over own height.
    fn scale_factor_height(&self) -> f64 {
        self.viewport().height() / self.height()
    }

    /// Snapshot of the extent and both factors, for passing into geometry resolution.
    fn surface_scale(&self) -> SurfaceScale {
        SurfaceScale {
            extent: Size::new(self.width(), self.height()),
            factor_width: self.scale_factor_width(),
            factor_height: self.scale_factor_height(),
        }
    }
}

/// A by-value snapshot of a [`Scalable`] surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceScale {
    /// The surface's own (design) extent.
    pub extent: Size,
    /// Horizontal scale factor.
    pub factor_width: f64,
    /// Vertical scale factor.
    pub factor_height: f64,
}

impl SurfaceScale {
    /// A surface of the given extent shown at exactly its own size.
    pub fn identity(extent: Size) -> Self {
        Self {
            extent,
            factor_width: 1.0,
            factor_height: 1.0,
        }
    }

    /// Compute the factors for a surface of `extent` shown in `viewport`.
    pub fn new(extent: Size, viewport: ViewportSize) -> Self {
        Self {
            extent,
            factor_width: viewport.width() / extent.width,
            factor_height: viewport.height() / extent.height,
        }
    }

    /// The surface's extent in current viewport units.
    pub fn scaled_extent(&self) -> Size {
        Size::new(
            self.extent.width * self.factor_width,
            self.extent.height * self.factor_height,
        )
    }

    /// The factor applied to horizontal quantities.
    ///
    /// Locked scaling follows the vertical factor so that aspect ratios survive non-uniform
    /// resizing.
    pub fn horizontal_factor(&self, lock_scaling: bool) -> f64 {
        if lock_scaling {
            self.factor_height
        } else {
            self.factor_width
        }
    }

    /// Scale a design-time font size. Text follows the vertical factor.
    pub fn scale_font(&self, size: f64) -> f64 {
        size * self.factor_height
    }

    /// Returns true if both factors are finite and positive.
    pub fn is_well_formed(&self) -> bool {
        self.factor_width.is_finite()
            && self.factor_height.is_finite()
            && self.factor_width > 0.0
            && self.factor_height > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        own: Size,
        viewport: ViewportSize,
    }

    impl Scalable for Fixed {
        fn width(&self) -> f64 {
            self.own.width
        }

        fn height(&self) -> f64 {
            self.own.height
        }

        fn viewport(&self) -> ViewportSize {
            self.viewport
        }
    }

    #[test]
    fn factors_are_viewport_over_own_extent() {
        let s = Fixed {
            own: Size::new(1024.0, 576.0),
            viewport: ViewportSize::from_pixels(1920, 720),
        };
        assert_eq!(s.scale_factor_width(), 1.875);
        assert_eq!(s.scale_factor_height(), 1.25);

        let snapshot = s.surface_scale();
        assert_eq!(
            snapshot,
            SurfaceScale::new(Size::new(1024.0, 576.0), s.viewport)
        );
        assert_eq!(snapshot.scaled_extent(), Size::new(1920.0, 720.0));
        assert_eq!(snapshot.horizontal_factor(false), 1.875);
        assert_eq!(snapshot.horizontal_factor(true), 1.25);
        assert_eq!(snapshot.scale_font(16.0), 20.0);
    }

    #[test]
    fn zero_extent_is_not_well_formed() {
        let s = SurfaceScale::new(Size::ZERO, ViewportSize::default());
        assert!(!s.is_well_formed());
        assert!(SurfaceScale::identity(Size::new(10.0, 10.0)).is_well_formed());
    }
}
