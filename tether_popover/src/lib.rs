// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=tether_popover --heading-base-level=0

//! Tether Popover: a matched popover that grows out of the view that triggered it.
//!
//! ## Overview
//!
//! One optional identifier, the [`Selection`](crate::selection::Selection), decides which popover is shown.
//! A [`MatchedPopover`](crate::coordinator::MatchedPopover) coordinator at the screen root follows it, and
//! any number of [`PopoverSource`](crate::scope::PopoverSource) markers record where their popovers come from.
//! The popover's frame is pinned to its source through [`tether_geometry::MatchedGeometry`], attaching at the
//! [opposite](tether_geometry::Anchor::opposite) of the source's anchor.
//!
//! ## Switching
//!
//! Switching directly from one popover to another never morphs between them.
//! The [`Presenter`](crate::presenter::Presenter) retracts the current popover first and presents the next one
//! only when the retraction signals completion. If the selection changes again in the meantime, the newest value wins.
//!
//! ## Frame loop
//!
//! Nothing here runs on its own. Drive the coordinator from your UI thread:
//!
//! 1) Lay out the screen; mark trigger views with the coordinator's [`scope`](crate::coordinator::MatchedPopover::scope).
//! 2) Call [`advance`](crate::coordinator::MatchedPopover::advance) with the frame time.
//! 3) Call [`render`](crate::coordinator::MatchedPopover::render) and draw the returned [`Overlay`](crate::overlay::Overlay).
//! 4) Send taps that reach the overlay to [`tap`](crate::coordinator::MatchedPopover::tap).
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use kurbo::{Point, Rect, Size};
//! use tether_geometry::Anchor;
//! use tether_popover::attach_matched_popover;
//! use tether_popover::overlay::TapOutcome;
//! use tether_popover::scope::PopoverSource;
//! use tether_popover::selection::Selection;
//!
//! let screen = Rect::new(0.0, 0.0, 390.0, 844.0);
//! let selection: Selection<&str> = Selection::new(None);
//! let mut popover = attach_matched_popover(
//!     selection.clone(),
//!     |_| Anchor::BOTTOM,
//!     |_| Size::new(200.0, 120.0),
//! );
//!
//! // Layout: the share button records its frame in the coordinator's scope.
//! let share = PopoverSource::new("share");
//! share.mark(Some(popover.scope()), Rect::new(300.0, 50.0, 344.0, 94.0));
//!
//! // The app selects; the popover animates in below the button.
//! selection.set(Some("share"));
//! popover.advance(Duration::from_millis(500));
//! let overlay = popover.render(screen).unwrap();
//! assert!(overlay.popover.matched);
//! assert_eq!(overlay.popover.frame.y0, 94.0);
//!
//! // Tapping outside dismisses through the selection.
//! assert_eq!(popover.tap(Point::new(10.0, 400.0)), TapOutcome::Dismissed);
//! assert_eq!(selection.get(), None);
//! ```

pub mod animator;
pub mod coordinator;
pub mod overlay;
pub mod presenter;
pub mod scope;
pub mod selection;
pub mod transition;

pub use coordinator::{MatchedPopover, PopoverContent, attach_matched_popover};
pub use scope::{PopoverScope, PopoverSource, mark_as_popover_source};
pub use selection::Selection;
