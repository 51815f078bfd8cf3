// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animator: drive the visibility of the single popover overlay.
//!
//! The animator is an explicit clock. The host calls [`Animator::advance`] once per frame;
//! when the running transition finishes, `advance` returns its [`TransitionId`], which is
//! the completion signal a [`Presenter`](crate::presenter::Presenter) waits for.
//!
//! A hide keeps rendering the departing popover until it completes, then drops it.
//! A hide that interrupts an entrance starts from the current visibility rather than jumping.

use std::fmt::Debug;
use std::time::Duration;

use crate::presenter::TransitionId;
use crate::transition::{Appearance, TransitionStyle};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Direction {
    In,
    Out,
}

#[derive(Copy, Clone, Debug)]
struct Running {
    id: TransitionId,
    direction: Direction,
    start: f64,
    elapsed: Duration,
}

impl Running {
    fn target(&self) -> f64 {
        match self.direction {
            Direction::In => 1.0,
            Direction::Out => 0.0,
        }
    }
}

/// Visibility driver for at most one popover instance.
#[derive(Clone, Debug)]
pub struct Animator<K> {
    shown: Option<K>,
    visibility: f64,
    running: Option<Running>,
    style: TransitionStyle,
}

impl<K> Default for Animator<K> {
    fn default() -> Self {
        Self::new(TransitionStyle::default())
    }
}

impl<K> Animator<K> {
    /// Create an idle animator with nothing shown.
    pub fn new(style: TransitionStyle) -> Self {
        Self {
            shown: None,
            visibility: 0.0,
            running: None,
            style,
        }
    }

    /// The popover currently rendered, including one that is still exiting.
    pub fn shown(&self) -> Option<&K> {
        self.shown.as_ref()
    }

    /// Current visibility, `0` hidden and `1` shown (may overshoot during a bouncy entrance).
    pub fn visibility(&self) -> f64 {
        self.visibility
    }

    /// Appearance of the shown popover at the current visibility.
    pub fn appearance(&self) -> Appearance {
        Appearance::at(&self.style, self.visibility)
    }

    /// Returns true while a transition is running.
    pub fn is_animating(&self) -> bool {
        self.running.is_some()
    }

    /// The transition style.
    pub fn style(&self) -> &TransitionStyle {
        &self.style
    }

    /// Replace the transition style. A running transition picks it up on the next frame.
    pub fn set_style(&mut self, style: TransitionStyle) {
        self.style = style;
    }

    /// Jump to `key` fully shown (or to nothing), without a transition.
    pub fn snap(&mut self, key: Option<K>) {
        self.visibility = if key.is_some() { 1.0 } else { 0.0 };
        self.shown = key;
        self.running = None;
    }

    /// Advance the running transition by `dt`.
    ///
    /// Returns the id of the transition that finished during this step, if any.
    pub fn advance(&mut self, dt: Duration) -> Option<TransitionId> {
        let running = self.running.as_mut()?;
        running.elapsed += dt;
        let spring = self.style.spring;
        let progress = spring.value(running.elapsed);
        let running = *running;
        self.visibility = running.start + (running.target() - running.start) * progress;
        if running.elapsed < spring.duration {
            return None;
        }
        self.visibility = running.target();
        self.running = None;
        if running.direction == Direction::Out {
            self.shown = None;
        }
        Some(running.id)
    }
}

impl<K: PartialEq + Debug> Animator<K> {
    /// Start an entrance of `key` under transition `id`.
    ///
    /// A different popover that is still rendered is replaced and the entrance starts from zero.
    pub fn show(&mut self, id: TransitionId, key: K) {
        if self.shown.as_ref() != Some(&key) {
            if let Some(prev) = &self.shown {
                log::debug!("replacing rendered popover {prev:?} with {key:?}");
            }
            self.visibility = 0.0;
            self.shown = Some(key);
        }
        self.running = Some(Running {
            id,
            direction: Direction::In,
            start: self.visibility,
            elapsed: Duration::ZERO,
        });
    }

    /// Start an exit of the shown popover under transition `id`.
    pub fn hide(&mut self, id: TransitionId) {
        self.running = Some(Running {
            id,
            direction: Direction::Out,
            start: self.visibility,
            elapsed: Duration::ZERO,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::Presenter;
    use crate::transition::Spring;

    const FRAME: Duration = Duration::from_millis(16);

    fn linear_style(ms: u64) -> TransitionStyle {
        TransitionStyle {
            spring: Spring::smooth(Duration::from_millis(ms)),
            ..Default::default()
        }
    }

    fn ids() -> (TransitionId, TransitionId) {
        // Obtain real ids through the presenter's protocol.
        let mut p = Presenter::new();
        p.appear(None);
        let a = p.update(Some(&1_u32)).unwrap().id;
        let b = p.update(None).unwrap().id;
        (a, b)
    }

    #[test]
    fn show_runs_to_completion() {
        let (show, _) = ids();
        let mut anim: Animator<u32> = Animator::new(linear_style(100));
        anim.show(show, 1);
        assert_eq!(anim.visibility(), 0.0);
        assert!(anim.is_animating());
        assert!(anim.advance(Duration::from_millis(50)).is_none());
        assert!(anim.visibility() > 0.0 && anim.visibility() < 1.0);
        assert_eq!(anim.advance(Duration::from_millis(50)), Some(show));
        assert_eq!(anim.visibility(), 1.0);
        assert_eq!(anim.shown(), Some(&1));
        assert!(!anim.is_animating());
        assert!(anim.advance(FRAME).is_none());
    }

    #[test]
    fn hide_drops_popover_on_completion() {
        let (_, hide) = ids();
        let mut anim: Animator<u32> = Animator::new(linear_style(100));
        anim.snap(Some(1));
        anim.hide(hide);
        assert!(anim.advance(Duration::from_millis(40)).is_none());
        // Still rendered while exiting.
        assert_eq!(anim.shown(), Some(&1));
        assert_eq!(anim.advance(Duration::from_millis(60)), Some(hide));
        assert_eq!(anim.shown(), None);
        assert_eq!(anim.visibility(), 0.0);
    }

    #[test]
    fn hide_interrupting_show_starts_from_current_visibility() {
        let (show, hide) = ids();
        let mut anim: Animator<u32> = Animator::new(linear_style(100));
        anim.show(show, 1);
        let _ = anim.advance(Duration::from_millis(30));
        let mid = anim.visibility();
        anim.hide(hide);
        assert_eq!(anim.visibility(), mid);
        let _ = anim.advance(Duration::from_millis(1));
        assert!(anim.visibility() <= mid);
        assert_eq!(anim.advance(Duration::from_millis(200)), Some(hide));
    }

    #[test]
    fn zero_duration_completes_on_next_advance() {
        let (show, _) = ids();
        let mut anim: Animator<u32> = Animator::new(TransitionStyle::none());
        anim.show(show, 1);
        assert_eq!(anim.advance(Duration::ZERO), Some(show));
        assert_eq!(anim.appearance(), Appearance::IDENTITY);
    }

    #[test]
    fn snap_sets_state_without_animation() {
        let mut anim: Animator<u32> = Animator::default();
        anim.snap(Some(4));
        assert_eq!(anim.shown(), Some(&4));
        assert_eq!(anim.appearance(), Appearance::IDENTITY);
        assert!(!anim.is_animating());
        anim.snap(None);
        assert_eq!(anim.shown(), None);
    }
}
