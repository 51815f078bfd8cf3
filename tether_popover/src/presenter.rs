// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presenter: mirror a selection into the presented popover, one transition at a time.
//!
//! ## Protocol
//!
//! The presenter owns the *presented* identifier and follows the selection with these rules:
//!
//! | presented | selection | result |
//! |-----------|-----------|--------|
//! | none      | none      | nothing |
//! | none      | `b`       | show `b` |
//! | `a`       | none      | hide `a` |
//! | `a`       | `a`       | nothing |
//! | `a`       | `b`       | hide `a`, then show `b` once the hide completes |
//!
//! Every hide must be acknowledged with [`Presenter::complete`] before another popover is shown.
//! While a hide is in flight the presenter keeps a single pending identifier: the latest non-null selection.
//! A null selection drops it. When the hide completes, the pending identifier (if any) is shown.
//!
//! ## Minimal example
//!
//! ```
//! use tether_popover::presenter::Presenter;
//!
//! let mut p: Presenter<&str> = Presenter::new();
//! p.appear(None);
//!
//! let show = p.update(Some(&"a")).unwrap();
//! assert_eq!((show.from, show.to), (None, Some("a")));
//!
//! // Switching retracts first...
//! let hide = p.update(Some(&"b")).unwrap();
//! assert_eq!((hide.from, hide.to), (Some("a"), None));
//! assert_eq!(p.presented(), None);
//!
//! // ...and presents once the retraction signals completion.
//! let show = p.complete(hide.id).unwrap();
//! assert_eq!((show.from, show.to), (None, Some("b")));
//! assert_eq!(p.presented(), Some(&"b"));
//! ```

use std::fmt::Debug;

/// Identifies one transition emitted by a [`Presenter`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionId(u64);

/// A change of the presented identifier.
///
/// Exactly one of `from` and `to` is `Some`: transitions always pass through none.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition<K> {
    /// Identifier of this transition, used to signal completion.
    pub id: TransitionId,
    /// Presented identifier before the transition.
    pub from: Option<K>,
    /// Presented identifier after the transition.
    pub to: Option<K>,
}

impl<K> Transition<K> {
    /// Returns true if this transition presents a popover.
    pub fn is_show(&self) -> bool {
        self.to.is_some()
    }

    /// Returns true if this transition retracts a popover.
    pub fn is_hide(&self) -> bool {
        self.to.is_none()
    }
}

/// Hide-then-show state machine over an optional identifier.
#[derive(Clone, Debug)]
pub struct Presenter<K> {
    presented: Option<K>,
    appeared: bool,
    hiding: Option<TransitionId>,
    pending: Option<K>,
    next_id: u64,
}

impl<K> Default for Presenter<K> {
    fn default() -> Self {
        Self {
            presented: None,
            appeared: false,
            hiding: None,
            pending: None,
            next_id: 0,
        }
    }
}

impl<K: Clone + PartialEq + Debug> Presenter<K> {
    /// Create a presenter with nothing presented.
    pub fn new() -> Self {
        Self::default()
    }

    /// The presented identifier.
    pub fn presented(&self) -> Option<&K> {
        self.presented.as_ref()
    }

    /// The identifier waiting for the in-flight hide to complete.
    pub fn pending(&self) -> Option<&K> {
        self.pending.as_ref()
    }

    /// Returns true while a hide awaits [`Presenter::complete`].
    pub fn is_hiding(&self) -> bool {
        self.hiding.is_some()
    }

    /// Synchronize with the selection on first display, without a transition.
    ///
    /// Only the first call (before any [`Presenter::update`]) has an effect.
    pub fn appear(&mut self, selection: Option<&K>) {
        if self.appeared {
            return;
        }
        self.appeared = true;
        self.presented = selection.cloned();
    }

    /// Follow a new selection value.
    ///
    /// Returns the transition to run, if any. While a hide is in flight this never
    /// returns a transition; it only updates the pending identifier.
    pub fn update(&mut self, selection: Option<&K>) -> Option<Transition<K>> {
        self.appeared = true;
        if self.hiding.is_some() {
            if self.pending.as_ref() != selection {
                log::trace!("pending popover {:?} -> {selection:?}", self.pending);
                self.pending = selection.cloned();
            }
            return None;
        }
        match (self.presented.take(), selection) {
            (None, None) => None,
            (None, Some(to)) => Some(self.show(to.clone())),
            (Some(from), None) => Some(self.hide(from, None)),
            (Some(from), Some(to)) if from == *to => {
                self.presented = Some(from);
                None
            }
            (Some(from), Some(to)) => Some(self.hide(from, Some(to.clone()))),
        }
    }

    /// Signal that transition `id` finished.
    ///
    /// Completing the in-flight hide starts the pending show, if there is one.
    /// Any other id (a show, or a hide that was already completed) is ignored.
    pub fn complete(&mut self, id: TransitionId) -> Option<Transition<K>> {
        if self.hiding != Some(id) {
            log::trace!("ignoring completion of {id:?}");
            return None;
        }
        self.hiding = None;
        let next = self.pending.take()?;
        Some(self.show(next))
    }

    fn next_id(&mut self) -> TransitionId {
        let id = TransitionId(self.next_id);
        self.next_id += 1;
        id
    }

    fn show(&mut self, to: K) -> Transition<K> {
        let id = self.next_id();
        self.presented = Some(to.clone());
        Transition {
            id,
            from: None,
            to: Some(to),
        }
    }

    fn hide(&mut self, from: K, then: Option<K>) -> Transition<K> {
        let id = self.next_id();
        self.presented = None;
        self.hiding = Some(id);
        self.pending = then;
        Transition {
            id,
            from: Some(from),
            to: None,
        }
    }
}
