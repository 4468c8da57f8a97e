// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry values with a depth component.

use core::ops::Add;

use kurbo::{Size, Vec2};

/// A 2D translation plus a depth offset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Translation {
    /// Planar part.
    pub xy: Vec2,
    /// Depth offset.
    pub z: f64,
}

impl Translation {
    /// The zero translation.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a translation from its three components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            xy: Vec2::new(x, y),
            z,
        }
    }

    /// Horizontal component.
    pub const fn x(&self) -> f64 {
        self.xy.x
    }

    /// Vertical component.
    pub const fn y(&self) -> f64 {
        self.xy.y
    }
}

impl Add for Translation {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            xy: self.xy + rhs.xy,
            z: self.z + rhs.z,
        }
    }
}

/// A 2D size plus a depth extent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Extent {
    /// Planar part.
    pub size: Size,
    /// Depth extent.
    pub depth: f64,
}

impl Extent {
    /// The empty extent.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create an extent from width, height, and depth.
    pub const fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            size: Size::new(width, height),
            depth,
        }
    }

    /// Width of the extent.
    pub const fn width(&self) -> f64 {
        self.size.width
    }

    /// Height of the extent.
    pub const fn height(&self) -> f64 {
        self.size.height
    }
}
