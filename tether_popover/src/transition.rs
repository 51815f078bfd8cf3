// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition timing and appearance for popover entrance and exit.
//!
//! A popover's visibility runs from `0` (gone) to `1` (fully shown) along a [`Spring`] curve.
//! A [`TransitionStyle`] maps visibility to an [`Appearance`]: opacity, scale, and blur,
//! each enabled by a [`TransitionEffects`] flag.
//!
//! ```
//! use std::time::Duration;
//! use tether_popover::transition::{Appearance, Spring, TransitionStyle};
//!
//! let spring = Spring::bouncy();
//! assert_eq!(spring.value(Duration::ZERO), 0.0);
//! assert_eq!(spring.value(spring.duration), 1.0);
//!
//! let style = TransitionStyle::default();
//! assert_eq!(Appearance::at(&style, 1.0), Appearance::IDENTITY);
//! assert_eq!(Appearance::at(&style, 0.0).opacity, 0.0);
//! ```

use std::f64::consts::PI;
use std::time::Duration;

/// A damped spring progress curve with a fixed settling duration.
///
/// `bounce` of `0` is critically damped (no overshoot); values towards `1` overshoot more.
/// The curve is cut to exactly `1.0` once `duration` has elapsed, which is when the
/// transition reports completion.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Spring {
    /// Time until the transition is considered complete.
    pub duration: Duration,
    /// Overshoot amount in `[0, 1)`; negative values are treated as `0`.
    pub bounce: f64,
}

impl Spring {
    /// A short, lively spring: 0.3 seconds with a bounce of 0.3.
    pub const fn bouncy() -> Self {
        Self {
            duration: Duration::from_millis(300),
            bounce: 0.3,
        }
    }

    /// A critically damped spring settling in `duration`.
    pub const fn smooth(duration: Duration) -> Self {
        Self {
            duration,
            bounce: 0.0,
        }
    }

    /// Progress at `elapsed`, starting at `0.0` and ending at `1.0`.
    ///
    /// May exceed `1.0` in between when `bounce > 0`.
    pub fn value(&self, elapsed: Duration) -> f64 {
        let d = self.duration.as_secs_f64();
        let t = elapsed.as_secs_f64();
        if d <= 0.0 || t >= d {
            return 1.0;
        }
        // One undamped period spans the duration.
        let omega = 2.0 * PI / d;
        let zeta = 1.0 - self.bounce.clamp(0.0, 0.95);
        if zeta >= 1.0 {
            return 1.0 - (-omega * t).exp() * (1.0 + omega * t);
        }
        let damped = omega * (1.0 - zeta * zeta).sqrt();
        let decay = (-zeta * omega * t).exp();
        1.0 - decay * ((damped * t).cos() + (zeta * omega / damped) * (damped * t).sin())
    }
}

impl Default for Spring {
    fn default() -> Self {
        Self::bouncy()
    }
}

bitflags::bitflags! {
    /// Visual effects applied while a popover enters or exits.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TransitionEffects: u8 {
        /// Fade between transparent and opaque.
        const OPACITY = 0b0000_0001;
        /// Grow from [`TransitionStyle::hidden_scale`] to full size about the popover's anchor.
        const SCALE   = 0b0000_0010;
        /// Sharpen from [`TransitionStyle::blur_radius`] to no blur.
        const BLUR    = 0b0000_0100;
    }
}

impl Default for TransitionEffects {
    fn default() -> Self {
        Self::all()
    }
}

/// Configuration of a popover's entrance and exit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransitionStyle {
    /// Which effects run.
    pub effects: TransitionEffects,
    /// Scale factor at zero visibility.
    pub hidden_scale: f64,
    /// Blur radius at zero visibility.
    pub blur_radius: f64,
    /// Timing curve for both directions.
    pub spring: Spring,
}

impl Default for TransitionStyle {
    fn default() -> Self {
        Self {
            effects: TransitionEffects::default(),
            hidden_scale: 0.5,
            blur_radius: 10.0,
            spring: Spring::bouncy(),
        }
    }
}

impl TransitionStyle {
    /// A style with no effects that completes immediately.
    pub const fn none() -> Self {
        Self {
            effects: TransitionEffects::empty(),
            hidden_scale: 1.0,
            blur_radius: 0.0,
            spring: Spring::smooth(Duration::ZERO),
        }
    }
}

/// Visual state of a popover at some visibility.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Appearance {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Uniform scale about the popover's anchor.
    pub scale: f64,
    /// Gaussian blur radius.
    pub blur: f64,
}

impl Appearance {
    /// Fully shown: opaque, unscaled, sharp.
    pub const IDENTITY: Self = Self {
        opacity: 1.0,
        scale: 1.0,
        blur: 0.0,
    };

    /// Appearance of `style` at `visibility` (`0` hidden, `1` shown).
    ///
    /// Opacity is clamped; scale follows overshoot so bouncy springs visibly bounce.
    pub fn at(style: &TransitionStyle, visibility: f64) -> Self {
        let mut out = Self::IDENTITY;
        if style.effects.contains(TransitionEffects::OPACITY) {
            out.opacity = visibility.clamp(0.0, 1.0);
        }
        if style.effects.contains(TransitionEffects::SCALE) {
            out.scale = style.hidden_scale + (1.0 - style.hidden_scale) * visibility;
        }
        if style.effects.contains(TransitionEffects::BLUR) {
            out.blur = (style.blur_radius * (1.0 - visibility)).max(0.0);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spring_endpoints() {
        for s in [Spring::bouncy(), Spring::smooth(Duration::from_millis(250))] {
            assert_eq!(s.value(Duration::ZERO), 0.0);
            assert_eq!(s.value(s.duration), 1.0);
            assert_eq!(s.value(s.duration * 2), 1.0);
        }
    }

    #[test]
    fn zero_duration_is_immediate() {
        let s = Spring::smooth(Duration::ZERO);
        assert_eq!(s.value(Duration::ZERO), 1.0);
    }

    #[test]
    fn smooth_spring_is_monotonic_and_bounded() {
        let s = Spring::smooth(Duration::from_millis(300));
        let mut prev = 0.0;
        for ms in 1..300 {
            let v = s.value(Duration::from_millis(ms));
            assert!(v >= prev, "critically damped spring must not reverse at {ms}ms");
            assert!(v <= 1.0, "critically damped spring must not overshoot at {ms}ms");
            prev = v;
        }
    }

    #[test]
    fn bouncy_spring_overshoots() {
        let s = Spring::bouncy();
        let peak = (1..300)
            .map(|ms| s.value(Duration::from_millis(ms)))
            .fold(0.0_f64, f64::max);
        assert!(peak > 1.0, "bouncy spring should overshoot, peak {peak}");
        assert!(peak < 1.2, "overshoot should stay modest, peak {peak}");
    }

    #[test]
    fn appearance_endpoints() {
        let style = TransitionStyle::default();
        let hidden = Appearance::at(&style, 0.0);
        assert_eq!(hidden.opacity, 0.0);
        assert_eq!(hidden.scale, 0.5);
        assert_eq!(hidden.blur, 10.0);
        assert_eq!(Appearance::at(&style, 1.0), Appearance::IDENTITY);
    }

    #[test]
    fn overshoot_clamps_opacity_and_blur_only() {
        let style = TransitionStyle::default();
        let a = Appearance::at(&style, 1.1);
        assert_eq!(a.opacity, 1.0);
        assert_eq!(a.blur, 0.0);
        assert!(a.scale > 1.0);
    }

    #[test]
    fn disabled_effects_stay_identity() {
        let style = TransitionStyle {
            effects: TransitionEffects::OPACITY,
            ..Default::default()
        };
        let a = Appearance::at(&style, 0.25);
        assert_eq!(a.opacity, 0.25);
        assert_eq!(a.scale, 1.0);
        assert_eq!(a.blur, 0.0);
        assert_eq!(Appearance::at(&TransitionStyle::none(), 0.0), Appearance::IDENTITY);
    }
}
