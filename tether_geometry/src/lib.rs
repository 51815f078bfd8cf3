// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=tether_geometry --heading-base-level=0

//! Tether Geometry: anchors, namespaces, and matched geometry for popovers.
//!
//! This crate holds the geometric half of a matched popover: where a trigger view attaches,
//! where the popover attaches, and how the two frames are correlated across unrelated subtrees.
//!
//! - [`Anchor`]: a normalized point on a bounding box, with nine named presets and
//!   [`Anchor::opposite`] for deriving the popover's attachment from the source's.
//! - [`Namespace`]: an opaque token scoping geometry matching. Sources and targets only link under the same namespace.
//! - [`MatchedGeometry`]: a registry mapping (namespace, key) to the last frame a source recorded.
//!   Targets query it with [`MatchedGeometry::place`].
//!
//! ## Not a layout engine
//!
//! Like a box tree, this crate does not measure or arrange views.
//! Upstream code computes world-space frames and records them here; the registry only remembers and correlates them.
//!
//! ## Minimal usage
//!
//! ```
//! use tether_geometry::{Anchor, MatchedGeometry, Namespace};
//! use kurbo::{Rect, Size};
//!
//! let ns = Namespace::new();
//! let mut registry = MatchedGeometry::new();
//!
//! // A toolbar button publishes its frame, attaching at its bottom edge.
//! let _ = registry.record(ns, "share", Rect::new(100.0, 20.0, 140.0, 44.0), Anchor::BOTTOM);
//!
//! // The popover attaches at the opposite point: its top edge hangs from the button.
//! let frame = registry
//!     .place(ns, &"share", Size::new(200.0, 120.0), Anchor::BOTTOM.opposite())
//!     .unwrap();
//! assert_eq!(frame, Rect::new(20.0, 44.0, 220.0, 164.0));
//!
//! // Unknown keys do not match; callers fall back to their own layout.
//! assert!(registry.place(ns, &"other", Size::new(10.0, 10.0), Anchor::TOP).is_none());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod anchor;
mod namespace;
mod registry;

pub use anchor::{Anchor, AnchorPreset};
pub use namespace::Namespace;
pub use registry::{MatchedGeometry, SourceGeometry};
