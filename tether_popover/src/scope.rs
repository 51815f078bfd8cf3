// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popover scope and source markers.
//!
//! A [`PopoverScope`] pairs a [`Namespace`] with a shared [`MatchedGeometry`] registry.
//! The coordinator creates one and hands it down the view-construction chain as explicit context;
//! every [`PopoverSource`] built under that coordinator records its frame into it during layout.
//!
//! A source marked without a scope records into a freshly created, detached scope that nothing reads.
//! Its popover still appears, just without a matched position.

use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

use kurbo::{Rect, Size};
use tether_geometry::{Anchor, MatchedGeometry, Namespace, SourceGeometry};

/// Context handle correlating popover sources with one coordinator.
pub struct PopoverScope<K> {
    namespace: Namespace,
    registry: Rc<RefCell<MatchedGeometry<K>>>,
}

impl<K> Clone for PopoverScope<K> {
    fn clone(&self) -> Self {
        Self {
            namespace: self.namespace,
            registry: self.registry.clone(),
        }
    }
}

impl<K> Debug for PopoverScope<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PopoverScope")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

impl<K: Eq + Debug> Default for PopoverScope<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Debug> PopoverScope<K> {
    /// Create a scope with a fresh namespace and its own registry.
    pub fn new() -> Self {
        Self::with_registry(Rc::new(RefCell::new(MatchedGeometry::new())))
    }

    /// Create a scope with a fresh namespace over a shared registry.
    ///
    /// Several screens can share one registry; their namespaces keep equal keys apart.
    pub fn with_registry(registry: Rc<RefCell<MatchedGeometry<K>>>) -> Self {
        Self {
            namespace: Namespace::new(),
            registry,
        }
    }

    /// The namespace token of this scope.
    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Record the frame of the source for `key`.
    pub fn record(&self, key: K, frame: Rect, anchor: Anchor) {
        let _ = self
            .registry
            .borrow_mut()
            .record(self.namespace, key, frame, anchor);
    }

    /// Forget the source for `key`. Returns true if it was recorded.
    pub fn remove(&self, key: &K) -> bool {
        self.registry.borrow_mut().remove(self.namespace, key)
    }

    /// Forget every source recorded in this scope.
    pub fn clear(&self) {
        self.registry.borrow_mut().clear_namespace(self.namespace);
    }

    /// The geometry recorded for `key`.
    pub fn source(&self, key: &K) -> Option<SourceGeometry> {
        self.registry.borrow().source(self.namespace, key)
    }

    /// Frame for a target of `size` whose `anchor` sits on the source's anchor point.
    pub fn place(&self, key: &K, size: Size, anchor: Anchor) -> Option<Rect> {
        self.registry
            .borrow()
            .place(self.namespace, key, size, anchor)
    }
}

/// Marks a view as the trigger of a popover.
///
/// ```
/// use kurbo::Rect;
/// use tether_geometry::Anchor;
/// use tether_popover::scope::{PopoverScope, PopoverSource};
///
/// let scope = PopoverScope::new();
/// let button = PopoverSource::new("filters").with_anchor(Anchor::TRAILING);
/// button.mark(Some(&scope), Rect::new(0.0, 0.0, 44.0, 44.0));
/// assert_eq!(scope.source(&"filters").unwrap().anchor, Anchor::TRAILING);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PopoverSource<K> {
    id: K,
    anchor: Anchor,
}

impl<K: Clone + Eq + Debug> PopoverSource<K> {
    /// A source for `id`, attaching at [`Anchor::BOTTOM`].
    ///
    /// `id` must stay the same across layouts of the same view.
    pub fn new(id: K) -> Self {
        Self {
            id,
            anchor: Anchor::default(),
        }
    }

    /// Set the attachment point.
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// The identifier of the popover this view triggers.
    pub fn id(&self) -> &K {
        &self.id
    }

    /// The attachment point.
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Record `frame` (world space) as this source's geometry in `scope`.
    pub fn mark(&self, scope: Option<&PopoverScope<K>>, frame: Rect) {
        match scope {
            Some(scope) => scope.record(self.id.clone(), frame, self.anchor),
            None => {
                log::trace!("{:?} marked outside any popover scope; it will not match", self.id);
                PopoverScope::new().record(self.id.clone(), frame, self.anchor);
            }
        }
    }

    /// Remove this source's geometry from `scope`, for when the view goes away.
    pub fn unmark(&self, scope: Option<&PopoverScope<K>>) -> bool {
        scope.is_some_and(|s| s.remove(&self.id))
    }
}

/// Mark a view with frame `frame` as the popover source for `id`.
///
/// Shorthand for [`PopoverSource::mark`].
pub fn mark_as_popover_source<K: Clone + Eq + Debug>(
    scope: Option<&PopoverScope<K>>,
    id: K,
    anchor: Anchor,
    frame: Rect,
) {
    PopoverSource::new(id).with_anchor(anchor).mark(scope, frame);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_defaults_to_bottom() {
        let s = PopoverSource::new(1_u32);
        assert_eq!(s.anchor(), Anchor::BOTTOM);
        assert_eq!(*s.id(), 1);
    }

    #[test]
    fn marked_source_is_placeable() {
        let scope = PopoverScope::new();
        mark_as_popover_source(Some(&scope), 1_u32, Anchor::BOTTOM, Rect::new(0.0, 0.0, 40.0, 20.0));
        let frame = scope
            .place(&1, Size::new(100.0, 60.0), Anchor::TOP)
            .unwrap();
        assert_eq!(frame, Rect::new(-30.0, 20.0, 70.0, 80.0));
    }

    // Without a scope the mark is recorded nowhere a coordinator can see.
    #[test]
    fn unscoped_mark_does_not_match() {
        let scope: PopoverScope<u32> = PopoverScope::new();
        PopoverSource::new(1_u32).mark(None, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(scope.source(&1).is_none());
    }

    #[test]
    fn scopes_sharing_a_registry_stay_apart() {
        let registry = Rc::new(RefCell::new(MatchedGeometry::new()));
        let a = PopoverScope::with_registry(registry.clone());
        let b = PopoverScope::with_registry(registry.clone());
        a.record(1_u32, Rect::new(0.0, 0.0, 10.0, 10.0), Anchor::TOP);
        assert!(a.source(&1).is_some());
        assert!(b.source(&1).is_none());
        assert_eq!(registry.borrow().len(), 1);
        b.record(1_u32, Rect::new(5.0, 5.0, 10.0, 10.0), Anchor::TOP);
        a.clear();
        assert!(a.source(&1).is_none());
        assert!(b.source(&1).is_some());
    }

    #[test]
    fn unmark_removes_geometry() {
        let scope = PopoverScope::new();
        let s = PopoverSource::new("menu");
        s.mark(Some(&scope), Rect::new(0.0, 0.0, 1.0, 1.0));
        assert!(s.unmark(Some(&scope)));
        assert!(!s.unmark(Some(&scope)));
        assert!(!s.unmark(None));
        assert!(scope.source(&"menu").is_none());
    }
}
