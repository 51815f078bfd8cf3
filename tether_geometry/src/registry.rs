// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Matched-geometry registry: (namespace, key) → last recorded source frame.
//!
//! ## Usage
//!
//! 1) During layout, each source view calls [`MatchedGeometry::record`] with its world-space frame and anchor.
//! 2) When laying out a target (for example a popover), call [`MatchedGeometry::place`] with the target's
//!    measured size and its own anchor to get a frame that pins the target's anchor onto the source's anchor.
//! 3) If nothing was recorded under the key, `place` returns `None` and the caller falls back to its own layout.
//!
//! Matching is position-only: the target keeps its own size.
//!
//! The registry is a flat vector with linear scans. It holds a handful of entries per screen, so keys only
//! need [`Eq`].

use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Point, Rect, Size};

use crate::anchor::Anchor;
use crate::namespace::Namespace;

/// The geometry a source published.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SourceGeometry {
    /// World-space frame of the source view.
    pub frame: Rect,
    /// Where on the frame the source attaches.
    pub anchor: Anchor,
}

impl SourceGeometry {
    /// The source's attachment point in world space.
    pub fn anchor_point(&self) -> Point {
        self.anchor.resolve(self.frame)
    }
}

#[derive(Clone, Debug)]
struct Entry<K> {
    namespace: Namespace,
    key: K,
    geometry: SourceGeometry,
}

/// Registry correlating source views with targets under a shared namespace.
pub struct MatchedGeometry<K> {
    entries: Vec<Entry<K>>,
}

impl<K> Default for MatchedGeometry<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K> Debug for MatchedGeometry<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MatchedGeometry")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl<K: Eq + Debug> MatchedGeometry<K> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded sources across all namespaces.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, namespace: Namespace, key: &K) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.namespace == namespace && e.key == *key)
    }

    /// Record (or overwrite) the source geometry for `key` under `namespace`.
    ///
    /// Returns the previously recorded geometry, if any.
    /// Frames with non-finite coordinates are ignored and leave any earlier entry in place.
    pub fn record(
        &mut self,
        namespace: Namespace,
        key: K,
        frame: Rect,
        anchor: Anchor,
    ) -> Option<SourceGeometry> {
        if !frame.is_finite() {
            log::warn!("ignoring non-finite source frame {frame:?} for {key:?}");
            return None;
        }
        log::trace!("record source {key:?} in {namespace:?}: {frame:?} @ {anchor:?}");
        let geometry = SourceGeometry { frame, anchor };
        match self.position(namespace, &key) {
            Some(i) => Some(core::mem::replace(&mut self.entries[i].geometry, geometry)),
            None => {
                self.entries.push(Entry {
                    namespace,
                    key,
                    geometry,
                });
                None
            }
        }
    }

    /// Remove the source recorded for `key` under `namespace`.
    ///
    /// Returns true if an entry was removed.
    pub fn remove(&mut self, namespace: Namespace, key: &K) -> bool {
        match self.position(namespace, key) {
            Some(i) => {
                self.entries.swap_remove(i);
                true
            }
            None => false,
        }
    }

    /// Remove every source recorded under `namespace`.
    pub fn clear_namespace(&mut self, namespace: Namespace) {
        self.entries.retain(|e| e.namespace != namespace);
    }

    /// Remove all sources.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The geometry recorded for `key` under `namespace`.
    pub fn source(&self, namespace: Namespace, key: &K) -> Option<SourceGeometry> {
        self.position(namespace, key).map(|i| self.entries[i].geometry)
    }

    /// Frame for a target of `size` whose `target_anchor` sits on the source's anchor point.
    ///
    /// Returns `None` when no source is recorded for `key` under `namespace`.
    pub fn place(
        &self,
        namespace: Namespace,
        key: &K,
        size: Size,
        target_anchor: Anchor,
    ) -> Option<Rect> {
        let source = self.source(namespace, key)?;
        let origin = source.anchor_point() - target_anchor.offset_in(size);
        Some(Rect::from_origin_size(origin, size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_and_lookup() {
        let ns = Namespace::new();
        let mut reg = MatchedGeometry::new();
        let frame = Rect::new(10.0, 10.0, 50.0, 30.0);
        assert!(reg.record(ns, 1_u32, frame, Anchor::BOTTOM).is_none());
        let src = reg.source(ns, &1).unwrap();
        assert_eq!(src.frame, frame);
        assert_eq!(src.anchor_point(), Point::new(30.0, 30.0));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn record_overwrites_same_key() {
        let ns = Namespace::new();
        let mut reg = MatchedGeometry::new();
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 15.0, 15.0);
        let _ = reg.record(ns, "menu", a, Anchor::TOP);
        let prev = reg.record(ns, "menu", b, Anchor::TOP).unwrap();
        assert_eq!(prev.frame, a);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.source(ns, &"menu").unwrap().frame, b);
    }

    // Same key under different namespaces must not link.
    #[test]
    fn namespaces_isolate_keys() {
        let ns1 = Namespace::new();
        let ns2 = Namespace::new();
        let mut reg = MatchedGeometry::new();
        let _ = reg.record(ns1, 7_u8, Rect::new(0.0, 0.0, 10.0, 10.0), Anchor::CENTER);
        assert!(reg.source(ns2, &7).is_none());
        assert!(reg.place(ns2, &7, Size::new(5.0, 5.0), Anchor::CENTER).is_none());
    }

    // A bottom-anchored source and a top-anchored target: the target hangs below the source.
    #[test]
    fn place_pins_target_anchor_on_source_anchor() {
        let ns = Namespace::new();
        let mut reg = MatchedGeometry::new();
        let _ = reg.record(ns, 1_u32, Rect::new(100.0, 40.0, 140.0, 60.0), Anchor::BOTTOM);
        let placed = reg
            .place(ns, &1, Size::new(80.0, 50.0), Anchor::BOTTOM.opposite())
            .unwrap();
        assert_eq!(placed, Rect::new(80.0, 60.0, 160.0, 110.0));
    }

    #[test]
    fn place_with_corner_anchors() {
        let ns = Namespace::new();
        let mut reg = MatchedGeometry::new();
        let _ = reg.record(ns, 1_u32, Rect::new(0.0, 0.0, 20.0, 20.0), Anchor::TOP_TRAILING);
        let placed = reg
            .place(ns, &1, Size::new(30.0, 10.0), Anchor::TOP_TRAILING.opposite())
            .unwrap();
        // Bottom-leading corner of the target sits on (20, 0).
        assert_eq!(placed, Rect::new(20.0, -10.0, 50.0, 0.0));
    }

    #[test]
    fn non_finite_frame_is_ignored() {
        let ns = Namespace::new();
        let mut reg = MatchedGeometry::new();
        let good = Rect::new(0.0, 0.0, 1.0, 1.0);
        let _ = reg.record(ns, 1_u32, good, Anchor::TOP);
        let _ = reg.record(ns, 1_u32, Rect::new(f64::NAN, 0.0, 1.0, 1.0), Anchor::TOP);
        let _ = reg.record(ns, 2_u32, Rect::new(0.0, 0.0, f64::INFINITY, 1.0), Anchor::TOP);
        assert_eq!(reg.source(ns, &1).unwrap().frame, good);
        assert!(reg.source(ns, &2).is_none());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn remove_and_clear() {
        let ns1 = Namespace::new();
        let ns2 = Namespace::new();
        let mut reg = MatchedGeometry::new();
        let r = Rect::new(0.0, 0.0, 1.0, 1.0);
        let _ = reg.record(ns1, 1_u32, r, Anchor::TOP);
        let _ = reg.record(ns1, 2_u32, r, Anchor::TOP);
        let _ = reg.record(ns2, 1_u32, r, Anchor::TOP);
        assert!(reg.remove(ns1, &1));
        assert!(!reg.remove(ns1, &1));
        assert_eq!(reg.len(), 2);
        reg.clear_namespace(ns1);
        assert_eq!(reg.len(), 1);
        assert!(reg.source(ns2, &1).is_some());
        reg.clear();
        assert!(reg.is_empty());
    }
}
