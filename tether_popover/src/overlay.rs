// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay description produced by the coordinator each frame.

use kurbo::{Affine, Point, Rect};
use tether_geometry::Anchor;

use crate::transition::Appearance;

/// What to draw above the screen while a popover is rendered.
#[derive(Clone, Debug)]
pub struct Overlay<K, V> {
    /// Transparent, input-capturing region beneath the popover.
    ///
    /// Present only while a popover is presented; an exiting popover has no backdrop.
    pub backdrop: Option<Rect>,
    /// The popover itself.
    pub popover: PopoverOverlay<K, V>,
}

/// Placement and appearance of the popover content.
#[derive(Clone, Debug)]
pub struct PopoverOverlay<K, V> {
    /// Identifier of the rendered popover.
    pub key: K,
    /// Content built for `key`.
    pub content: V,
    /// World-space frame before the transition transform.
    pub frame: Rect,
    /// Attachment point on the popover, opposite the source's attachment point.
    pub anchor: Anchor,
    /// True if the frame was positioned from a recorded source.
    pub matched: bool,
    /// Opacity, scale, and blur at the current visibility.
    pub appearance: Appearance,
}

impl<K, V> PopoverOverlay<K, V> {
    /// Transform to apply to the content: the transition scale about the popover's anchor point.
    pub fn transform(&self) -> Affine {
        let pivot = self.anchor.resolve(self.frame).to_vec2();
        Affine::translate(pivot) * Affine::scale(self.appearance.scale) * Affine::translate(-pivot)
    }

    /// Bounds of the content as drawn, with [`PopoverOverlay::transform`] applied.
    ///
    /// Taps are tested against this rect, so a partly grown popover only captures what is visible.
    pub fn visual_frame(&self) -> Rect {
        self.transform().transform_rect_bbox(self.frame)
    }
}

/// Part of the overlay under a point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OverlayPart {
    /// The popover content.
    Content,
    /// The dismiss backdrop.
    Backdrop,
}

/// Result of [`MatchedPopover::tap`](crate::coordinator::MatchedPopover::tap).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    /// The tap landed on the popover content; deliver it there.
    Content,
    /// The tap landed on the backdrop and cleared the selection.
    Dismissed,
    /// The overlay did not capture the tap.
    PassThrough,
}

/// Hit-testable geometry of the last rendered overlay.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct HitRegion {
    pub(crate) backdrop: Option<Rect>,
    // Frame as drawn: after the transition scale.
    pub(crate) frame: Rect,
}

impl HitRegion {
    pub(crate) fn of<K, V>(overlay: &Overlay<K, V>) -> Self {
        Self {
            backdrop: overlay.backdrop,
            frame: overlay.popover.visual_frame(),
        }
    }

    /// Content only captures input while the backdrop does.
    pub(crate) fn hit(&self, pt: Point) -> Option<OverlayPart> {
        let backdrop = self.backdrop?;
        if self.frame.contains(pt) {
            Some(OverlayPart::Content)
        } else if backdrop.contains(pt) {
            Some(OverlayPart::Backdrop)
        } else {
            None
        }
    }
}

impl<K, V> Overlay<K, V> {
    /// The overlay part under `pt`, if the overlay captures input there.
    pub fn hit_test(&self, pt: Point) -> Option<OverlayPart> {
        HitRegion::of(self).hit(pt)
    }
}
