// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchor points: normalized attachment coordinates on a view's bounding box.
//!
//! An [`Anchor`] is a point in the unit square, where `(0, 0)` is the top-leading
//! corner and `(1, 1)` is the bottom-trailing corner.
//! Nine named presets cover the corners, edge midpoints, and the center; they are
//! enumerated by [`AnchorPreset`].
//!
//! ## Opposition
//!
//! [`Anchor::opposite`] derives a popover's attachment point from its source's
//! attachment point, so the popover appears to grow away from its trigger.
//! Presets map to their mirror across the center. Any other coordinate maps to
//! [`Anchor::CENTER`]; this is an approximation, not a reflection.
//!
//! ```
//! use tether_geometry::Anchor;
//!
//! assert_eq!(Anchor::TOP.opposite(), Anchor::BOTTOM);
//! assert_eq!(Anchor::BOTTOM_LEADING.opposite(), Anchor::TOP_TRAILING);
//! assert_eq!(Anchor::CENTER.opposite(), Anchor::CENTER);
//! assert_eq!(Anchor::new(0.25, 0.8).opposite(), Anchor::CENTER);
//! ```

use kurbo::{Point, Rect, Size, Vec2};

/// A normalized point on a bounding box.
///
/// Coordinates are fractions of the box size; values outside `[0, 1]` are
/// allowed and resolve outside the box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Anchor {
    /// Horizontal fraction, `0` at the leading edge.
    pub x: f64,
    /// Vertical fraction, `0` at the top edge.
    pub y: f64,
}

/// The named anchor presets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AnchorPreset {
    /// `(0, 0)`.
    TopLeading,
    /// `(0.5, 0)`.
    Top,
    /// `(1, 0)`.
    TopTrailing,
    /// `(0, 0.5)`.
    Leading,
    /// `(0.5, 0.5)`.
    Center,
    /// `(1, 0.5)`.
    Trailing,
    /// `(0, 1)`.
    BottomLeading,
    /// `(0.5, 1)`.
    Bottom,
    /// `(1, 1)`.
    BottomTrailing,
}

impl AnchorPreset {
    /// All presets, in row-major order.
    pub const ALL: [Self; 9] = [
        Self::TopLeading,
        Self::Top,
        Self::TopTrailing,
        Self::Leading,
        Self::Center,
        Self::Trailing,
        Self::BottomLeading,
        Self::Bottom,
        Self::BottomTrailing,
    ];

    /// The preset mirrored across the center.
    pub const fn opposite(self) -> Self {
        match self {
            Self::TopLeading => Self::BottomTrailing,
            Self::Top => Self::Bottom,
            Self::TopTrailing => Self::BottomLeading,
            Self::Leading => Self::Trailing,
            Self::Center => Self::Center,
            Self::Trailing => Self::Leading,
            Self::BottomLeading => Self::TopTrailing,
            Self::Bottom => Self::Top,
            Self::BottomTrailing => Self::TopLeading,
        }
    }

    /// The coordinate of this preset.
    pub const fn anchor(self) -> Anchor {
        match self {
            Self::TopLeading => Anchor::TOP_LEADING,
            Self::Top => Anchor::TOP,
            Self::TopTrailing => Anchor::TOP_TRAILING,
            Self::Leading => Anchor::LEADING,
            Self::Center => Anchor::CENTER,
            Self::Trailing => Anchor::TRAILING,
            Self::BottomLeading => Anchor::BOTTOM_LEADING,
            Self::Bottom => Anchor::BOTTOM,
            Self::BottomTrailing => Anchor::BOTTOM_TRAILING,
        }
    }
}

impl From<AnchorPreset> for Anchor {
    fn from(preset: AnchorPreset) -> Self {
        preset.anchor()
    }
}

impl Anchor {
    /// Top-leading corner.
    pub const TOP_LEADING: Self = Self::new(0.0, 0.0);
    /// Midpoint of the top edge.
    pub const TOP: Self = Self::new(0.5, 0.0);
    /// Top-trailing corner.
    pub const TOP_TRAILING: Self = Self::new(1.0, 0.0);
    /// Midpoint of the leading edge.
    pub const LEADING: Self = Self::new(0.0, 0.5);
    /// Center of the box.
    pub const CENTER: Self = Self::new(0.5, 0.5);
    /// Midpoint of the trailing edge.
    pub const TRAILING: Self = Self::new(1.0, 0.5);
    /// Bottom-leading corner.
    pub const BOTTOM_LEADING: Self = Self::new(0.0, 1.0);
    /// Midpoint of the bottom edge.
    pub const BOTTOM: Self = Self::new(0.5, 1.0);
    /// Bottom-trailing corner.
    pub const BOTTOM_TRAILING: Self = Self::new(1.0, 1.0);

    /// Create an anchor from unit-square fractions.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The named preset this anchor equals, if any.
    ///
    /// Comparison is exact.
    pub fn preset(self) -> Option<AnchorPreset> {
        AnchorPreset::ALL.into_iter().find(|p| p.anchor() == self)
    }

    /// Returns true if this anchor is one of the nine named presets.
    pub fn is_preset(self) -> bool {
        self.preset().is_some()
    }

    /// The anchor on the opposite side of the box.
    ///
    /// Presets swap top/bottom and leading/trailing; [`Anchor::CENTER`] maps to itself.
    /// Any non-preset coordinate maps to [`Anchor::CENTER`].
    pub fn opposite(self) -> Self {
        match self.preset() {
            Some(p) => p.opposite().anchor(),
            None => Self::CENTER,
        }
    }

    /// Offset of this anchor from the origin of a box of the given size.
    pub fn offset_in(self, size: Size) -> Vec2 {
        Vec2::new(self.x * size.width, self.y * size.height)
    }

    /// Location of this anchor on `rect`.
    pub fn resolve(self, rect: Rect) -> Point {
        rect.origin() + self.offset_in(rect.size())
    }
}

impl Default for Anchor {
    /// [`Anchor::BOTTOM`], the default attachment of a popover source.
    fn default() -> Self {
        Self::BOTTOM
    }
}
