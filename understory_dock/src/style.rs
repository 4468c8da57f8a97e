// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Docking anchors and the per-child style record.

use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use crate::error::DockError;
use crate::types::{Extent, Translation};

/// One of nine reference points on a parent's bounds.
///
/// The anchors form a 3×3 grid. A docked child is pulled against the named edge or corner of
/// its parent, and its offset is measured inward from there. On axes where the anchor is
/// centred, the offset is measured from the parent's centre instead.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Dock {
    /// Top-left corner.
    TopLeft,
    /// Centre of the top edge.
    TopCenter,
    /// Top-right corner.
    TopRight,
    /// Centre of the left edge.
    LeftCenter,
    /// Centre of the parent.
    #[default]
    Center,
    /// Centre of the right edge.
    RightCenter,
    /// Bottom-left corner.
    BottomLeft,
    /// Centre of the bottom edge.
    BottomCenter,
    /// Bottom-right corner.
    BottomRight,
}

/// Horizontal component of a [`Dock`] anchor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HorizontalAnchor {
    /// Against the left edge.
    Left,
    /// Centred.
    Center,
    /// Against the right edge.
    Right,
}

/// Vertical component of a [`Dock`] anchor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VerticalAnchor {
    /// Against the top edge.
    Top,
    /// Centred.
    Center,
    /// Against the bottom edge.
    Bottom,
}

impl Dock {
    /// All nine anchors, row by row from the top-left.
    pub const ALL: [Self; 9] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::LeftCenter,
        Self::Center,
        Self::RightCenter,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];

    /// The column of the grid this anchor sits in.
    pub const fn horizontal(self) -> HorizontalAnchor {
        match self {
            Self::TopLeft | Self::LeftCenter | Self::BottomLeft => HorizontalAnchor::Left,
            Self::TopCenter | Self::Center | Self::BottomCenter => HorizontalAnchor::Center,
            Self::TopRight | Self::RightCenter | Self::BottomRight => HorizontalAnchor::Right,
        }
    }

    /// The row of the grid this anchor sits in.
    pub const fn vertical(self) -> VerticalAnchor {
        match self {
            Self::TopLeft | Self::TopCenter | Self::TopRight => VerticalAnchor::Top,
            Self::LeftCenter | Self::Center | Self::RightCenter => VerticalAnchor::Center,
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => VerticalAnchor::Bottom,
        }
    }

    /// Canonical name, as accepted by [`Dock::from_str`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::TopLeft => "TopLeft",
            Self::TopCenter => "TopCenter",
            Self::TopRight => "TopRight",
            Self::LeftCenter => "LeftCenter",
            Self::Center => "Center",
            Self::RightCenter => "RightCenter",
            Self::BottomLeft => "BottomLeft",
            Self::BottomCenter => "BottomCenter",
            Self::BottomRight => "BottomRight",
        }
    }

    /// Column-first alias (`LeftTop`, `CenterBottom`, ...), also accepted by [`Dock::from_str`].
    const fn column_first_name(self) -> &'static str {
        match self {
            Self::TopLeft => "LeftTop",
            Self::TopCenter => "CenterTop",
            Self::TopRight => "RightTop",
            Self::LeftCenter => "LeftCenter",
            Self::Center => "Center",
            Self::RightCenter => "RightCenter",
            Self::BottomLeft => "LeftBottom",
            Self::BottomCenter => "CenterBottom",
            Self::BottomRight => "RightBottom",
        }
    }
}

/// Compare ignoring ASCII case, `-`, and `_`.
fn loose_eq(input: &str, name: &str) -> bool {
    let mut a = input.chars().filter(|c| *c != '-' && *c != '_');
    let mut b = name.chars();
    loop {
        match (a.next(), b.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) if x.eq_ignore_ascii_case(&y) => {}
            _ => return false,
        }
    }
}

impl fmt::Display for Dock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dock {
    type Err = DockError;

    /// Parse an anchor name such as `"BottomRight"`, `"bottom-right"`, or `"RightBottom"`.
    fn from_str(s: &str) -> Result<Self, DockError> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| loose_eq(s, d.name()) || loose_eq(s, d.column_first_name()))
            .ok_or_else(|| DockError::UnknownAnchor(s.to_string()))
    }
}

/// A styling tag attached when docking a child.
///
/// Callers pass a short, unordered list of tags. The first tag of each kind wins.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Constraint {
    /// The anchor to dock against.
    Dock(Dock),
    /// Whether horizontal scaling follows the vertical factor.
    LockScaling(bool),
}

impl From<Dock> for Constraint {
    fn from(dock: Dock) -> Self {
        Self::Dock(dock)
    }
}

impl From<bool> for Constraint {
    fn from(lock: bool) -> Self {
        Self::LockScaling(lock)
    }
}

/// Per-child docking constraints.
///
/// `DockStyle` is a plain value: copying it never aliases another control's style. Setting a
/// style on a docked node goes through [`RootPane`](crate::RootPane), which re-resolves the
/// node's geometry immediately.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DockStyle {
    /// Reference point on the parent's bounds.
    pub anchor: Dock,
    /// Whether the horizontal axis follows the vertical scale factor.
    pub lock_scaling: bool,
    /// Design-time offset from the anchor. `z` is applied unscaled.
    pub offset: Translation,
    /// Design-time size. `depth` is applied unscaled.
    pub size: Extent,
}

impl Default for DockStyle {
    fn default() -> Self {
        Self {
            anchor: Dock::Center,
            lock_scaling: false,
            offset: Self::DEFAULT_OFFSET,
            size: Extent::ZERO,
        }
    }
}

impl DockStyle {
    /// Offset of a freshly constructed style: in front of the parent by one unit.
    pub const DEFAULT_OFFSET: Translation = Translation::new(0.0, 0.0, 1.0);

    /// A style with the given anchor and lock flag and default geometry.
    pub fn new(anchor: Dock, lock_scaling: bool) -> Self {
        Self {
            anchor,
            lock_scaling,
            ..Self::default()
        }
    }

    /// Build a style from an unordered list of tags.
    ///
    /// The first [`Constraint::Dock`] and the first [`Constraint::LockScaling`] are used; later
    /// tags of the same kind and `None` entries are skipped. Missing kinds fall back to
    /// [`Dock::Center`] and `false`.
    ///
    /// ```rust
    /// use understory_dock::{Constraint, Dock, DockStyle};
    ///
    /// let style = DockStyle::from_constraints([
    ///     None,
    ///     Some(Constraint::LockScaling(true)),
    ///     Some(Constraint::Dock(Dock::TopRight)),
    ///     Some(Constraint::Dock(Dock::BottomLeft)),
    /// ]);
    /// assert_eq!(style.anchor, Dock::TopRight);
    /// assert!(style.lock_scaling);
    /// ```
    pub fn from_constraints<I>(constraints: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Constraint>>,
    {
        let mut anchor = None;
        let mut lock_scaling = None;
        for constraint in constraints
            .into_iter()
            .filter_map(Into::<Option<Constraint>>::into)
        {
            match constraint {
                Constraint::Dock(d) if anchor.is_none() => anchor = Some(d),
                Constraint::LockScaling(l) if lock_scaling.is_none() => lock_scaling = Some(l),
                _ => {}
            }
            if anchor.is_some() && lock_scaling.is_some() {
                break;
            }
        }
        Self::new(anchor.unwrap_or_default(), lock_scaling.unwrap_or(false))
    }

    /// Replace the offset, builder style.
    #[must_use]
    pub fn with_offset(mut self, offset: Translation) -> Self {
        self.offset = offset;
        self
    }

    /// Replace the size, builder style.
    #[must_use]
    pub fn with_size(mut self, size: Extent) -> Self {
        self.size = size;
        self
    }

    /// Set the planar offset, keeping the depth offset.
    pub fn set_offset(&mut self, x: f64, y: f64) {
        self.offset = Translation::new(x, y, self.offset.z);
    }

    /// Replace the whole offset. `None` resets it to zero.
    pub fn set_offset3(&mut self, offset: Option<Translation>) {
        self.offset = offset.unwrap_or(Translation::ZERO);
    }

    /// Set the depth offset, keeping the planar offset.
    pub fn set_depth(&mut self, z: f64) {
        self.offset.z = z;
    }

    /// Set the planar size, keeping the depth extent.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.size = Extent::new(width, height, self.size.depth);
    }

    /// Replace the whole size. `None` resets it to zero.
    pub fn set_extent(&mut self, size: Option<Extent>) {
        self.size = size.unwrap_or(Extent::ZERO);
    }
}
