// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container coordinator: owns the popover overlay of one screen.
//!
//! ## Usage
//!
//! 1) Create a [`MatchedPopover`] at the screen root with the shared [`Selection`], a content builder,
//!    and optionally the source anchor for each identifier (default [`Anchor::TOP`]).
//! 2) Pass [`MatchedPopover::scope`] down to the views that trigger popovers; mark them with
//!    [`PopoverSource::mark`](crate::scope::PopoverSource::mark) during layout.
//! 3) Each frame, call [`MatchedPopover::advance`] with the frame time, then [`MatchedPopover::render`]
//!    to get the [`Overlay`] to draw.
//! 4) Route taps that reach the overlay layer through [`MatchedPopover::tap`].
//!
//! The selection is the source of truth. The coordinator observes it and only writes to it when the
//! backdrop is tapped.

use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;
use std::time::Duration;

use kurbo::{Point, Rect, Size};
use tether_geometry::Anchor;

use crate::animator::Animator;
use crate::overlay::{HitRegion, Overlay, OverlayPart, PopoverOverlay, TapOutcome};
use crate::presenter::{Presenter, Transition};
use crate::scope::PopoverScope;
use crate::selection::{Selection, SubscriptionId};
use crate::transition::TransitionStyle;

/// Content that can be measured for placement.
pub trait PopoverContent {
    /// Size of the content given the space available on screen.
    fn preferred_size(&self, available: Size) -> Size;
}

impl PopoverContent for Size {
    fn preferred_size(&self, _available: Size) -> Size {
        *self
    }
}

struct State<K> {
    presenter: Presenter<K>,
    animator: Animator<K>,
}

impl<K: Clone + Eq + Debug> State<K> {
    fn selection_changed(&mut self, selection: Option<&K>) {
        if let Some(t) = self.presenter.update(selection) {
            self.apply(t);
        }
    }

    fn apply(&mut self, t: Transition<K>) {
        log::debug!("popover transition {:?}: {:?} -> {:?}", t.id, t.from, t.to);
        match t.to {
            Some(key) => self.animator.show(t.id, key),
            None => self.animator.hide(t.id),
        }
    }

    fn advance(&mut self, dt: Duration) {
        if let Some(done) = self.animator.advance(dt)
            && let Some(next) = self.presenter.complete(done)
        {
            self.apply(next);
        }
    }
}

/// Matched popover coordinator for one screen.
pub struct MatchedPopover<K: Clone + Eq + Debug + 'static, V> {
    selection: Selection<K>,
    subscription: SubscriptionId,
    state: Rc<RefCell<State<K>>>,
    scope: PopoverScope<K>,
    source_anchor: Box<dyn Fn(&K) -> Anchor>,
    content: Box<dyn Fn(&K) -> V>,
    hit_region: Option<HitRegion>,
}

impl<K: Clone + Eq + Debug + 'static, V> Debug for MatchedPopover<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("MatchedPopover")
            .field("selection", &self.selection)
            .field("presented", &state.presenter.presented())
            .field("shown", &state.animator.shown())
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

impl<K: Clone + Eq + Debug + 'static, V: PopoverContent> MatchedPopover<K, V> {
    /// Attach a coordinator to `selection`, building popover content with `content`.
    ///
    /// The current selection is presented immediately, without an entrance transition.
    pub fn new(selection: Selection<K>, content: impl Fn(&K) -> V + 'static) -> Self {
        let initial = selection.get();
        let mut presenter = Presenter::new();
        presenter.appear(initial.as_ref());
        let mut animator = Animator::default();
        animator.snap(initial);

        let state = Rc::new(RefCell::new(State {
            presenter,
            animator,
        }));
        let weak = Rc::downgrade(&state);
        let subscription = selection.subscribe(move |value| {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().selection_changed(value);
            }
        });

        Self {
            selection,
            subscription,
            state,
            scope: PopoverScope::new(),
            source_anchor: Box::new(|_| Anchor::TOP),
            content: Box::new(content),
            hit_region: None,
        }
    }

    /// Set the source anchor for each identifier. The popover attaches at the opposite point.
    pub fn source_anchor(mut self, anchor_of: impl Fn(&K) -> Anchor + 'static) -> Self {
        self.source_anchor = Box::new(anchor_of);
        self
    }

    /// Use `scope` instead of a fresh one, for example one built with
    /// [`PopoverScope::with_registry`] to share a registry between screens.
    ///
    /// Sources must be marked in the scope the coordinator ends up with.
    pub fn in_scope(mut self, scope: PopoverScope<K>) -> Self {
        self.scope.clear();
        self.scope = scope;
        self
    }

    /// Set the entrance and exit transition.
    pub fn transition(self, style: TransitionStyle) -> Self {
        self.state.borrow_mut().animator.set_style(style);
        self
    }

    /// The context handle for source markers under this coordinator.
    pub fn scope(&self) -> &PopoverScope<K> {
        &self.scope
    }

    /// The selection this coordinator follows.
    pub fn selection(&self) -> &Selection<K> {
        &self.selection
    }

    /// The presented identifier.
    pub fn presented(&self) -> Option<K> {
        self.state.borrow().presenter.presented().cloned()
    }

    /// The identifier waiting for the current popover to retract.
    pub fn pending(&self) -> Option<K> {
        self.state.borrow().presenter.pending().cloned()
    }

    /// The identifier whose popover is rendered, including one that is exiting.
    pub fn shown(&self) -> Option<K> {
        self.state.borrow().animator.shown().cloned()
    }

    /// Returns true while an entrance or exit is running.
    pub fn is_animating(&self) -> bool {
        self.state.borrow().animator.is_animating()
    }

    /// Step transitions by `dt` and start any show that was waiting on a finished hide.
    pub fn advance(&self, dt: Duration) {
        self.state.borrow_mut().advance(dt);
    }

    /// Describe the overlay for a screen occupying `container`.
    ///
    /// Returns `None` when no popover is rendered. Without a recorded source for the popover's
    /// identifier, the popover is centered in `container` and `matched` is false.
    pub fn render(&mut self, container: Rect) -> Option<Overlay<K, V>> {
        let shown = {
            let state = self.state.borrow();
            state.animator.shown().cloned().map(|key| {
                (
                    key,
                    state.animator.appearance(),
                    state.presenter.presented().is_some(),
                )
            })
        };
        let Some((key, appearance, presented)) = shown else {
            self.hit_region = None;
            return None;
        };

        let content = (self.content)(&key);
        let size = content.preferred_size(container.size());
        let anchor = (self.source_anchor)(&key).opposite();
        let (frame, matched) = match self.scope.place(&key, size, anchor) {
            Some(frame) => (frame, true),
            None => (Rect::from_center_size(container.center(), size), false),
        };

        let overlay = Overlay {
            backdrop: presented.then_some(container),
            popover: PopoverOverlay {
                key,
                content,
                frame,
                anchor,
                matched,
                appearance,
            },
        };
        self.hit_region = Some(HitRegion::of(&overlay));
        Some(overlay)
    }

    /// Deliver a tap at `pt` to the overlay last returned by [`MatchedPopover::render`].
    ///
    /// A tap on the backdrop clears the selection, which retracts the popover.
    pub fn tap(&mut self, pt: Point) -> TapOutcome {
        let presented = self.state.borrow().presenter.presented().is_some();
        let hit = self.hit_region.and_then(|r| r.hit(pt));
        match hit {
            Some(OverlayPart::Content) if presented => TapOutcome::Content,
            Some(OverlayPart::Backdrop) if presented => {
                log::debug!("backdrop tap at {pt:?} dismisses {:?}", self.selection.get());
                self.hit_region = None;
                self.selection.clear();
                TapOutcome::Dismissed
            }
            _ => TapOutcome::PassThrough,
        }
    }
}

impl<K: Clone + Eq + Debug + 'static, V> Drop for MatchedPopover<K, V> {
    fn drop(&mut self) {
        let _ = self.selection.unsubscribe(self.subscription);
        self.scope.clear();
    }
}

/// Attach a matched popover to a screen.
///
/// `source_anchor` gives the source's attachment point for each identifier; `content` builds the popover.
pub fn attach_matched_popover<K, V>(
    selection: Selection<K>,
    source_anchor: impl Fn(&K) -> Anchor + 'static,
    content: impl Fn(&K) -> V + 'static,
) -> MatchedPopover<K, V>
where
    K: Clone + Eq + Debug + 'static,
    V: PopoverContent,
{
    MatchedPopover::new(selection, content).source_anchor(source_anchor)
}
