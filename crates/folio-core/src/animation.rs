#![forbid(unsafe_code)]

//! Animation primitives.
//!
//! Two families live here:
//!
//! - [`Fade`], a time-based progression producing a normalized `f32` in
//!   [0.0, 1.0] for a given elapsed time.
//! - Frame-based exponential smoothing ([`Smoother`]) that moves an
//!   [`Orientation`] a fixed fraction of the way toward a target on every
//!   step. It has no notion of time; one call is one frame.
//!
//! Nothing here schedules work. The runtime decides when to tick.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Easing functions
// ---------------------------------------------------------------------------

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f32) -> f32;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-out (slow end).
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

// ---------------------------------------------------------------------------
// Fade
// ---------------------------------------------------------------------------

/// Progression from 0.0 to 1.0 over a duration, with configurable easing.
///
/// Callers position it with [`set_elapsed`](Fade::set_elapsed) and read
/// [`value`](Fade::value).
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Fade {
    /// Create a fade with the given duration and linear easing.
    ///
    /// A zero duration is complete at any positive elapsed time.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            easing: linear,
        }
    }

    /// Set the easing function.
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Jump to an absolute elapsed time.
    pub fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
    }

    /// Raw linear progress (before easing), in [0.0, 1.0].
    #[must_use]
    pub fn raw_progress(&self) -> f32 {
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (t as f32).clamp(0.0, 1.0)
    }

    /// Eased output, in [0.0, 1.0].
    #[must_use]
    pub fn value(&self) -> f32 {
        (self.easing)(self.raw_progress())
    }
}

// ---------------------------------------------------------------------------
// Exponential smoothing
// ---------------------------------------------------------------------------

/// Default per-frame smoothing factor.
pub const DEFAULT_SMOOTHING: f64 = 0.1;

/// A pair of rotation angles in degrees.
///
/// `x` rotates around the horizontal axis (tilt), `y` around the vertical
/// axis (turn).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    /// Rotation around the horizontal axis.
    pub x: f64,
    /// Rotation around the vertical axis.
    pub y: f64,
}

impl Orientation {
    /// Create an orientation.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Largest per-axis absolute difference.
    #[must_use]
    pub fn max_delta(self, other: Orientation) -> f64 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

/// Exponential smoother: `current += (target - current) * factor` per step.
///
/// # Invariants
/// - `factor` is clamped into (0, 1]. A factor of 1 snaps to the target.
/// - With a fixed target, each step shrinks the distance by `(1 - factor)`,
///   so `current` converges monotonically and never overshoots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoother {
    factor: f64,
    current: Orientation,
}

impl Smoother {
    /// Create a smoother starting at `initial`.
    #[must_use]
    pub fn new(factor: f64, initial: Orientation) -> Self {
        let factor = if factor.is_finite() {
            factor.clamp(f64::EPSILON, 1.0)
        } else {
            DEFAULT_SMOOTHING
        };
        Self {
            factor,
            current: initial,
        }
    }

    /// Advance one frame toward `target`, returning the new current value.
    pub fn step(&mut self, target: Orientation) -> Orientation {
        self.current.x += (target.x - self.current.x) * self.factor;
        self.current.y += (target.y - self.current.y) * self.factor;
        self.current
    }

    /// Current smoothed value.
    #[must_use]
    pub fn current(&self) -> Orientation {
        self.current
    }

    /// The effective smoothing factor.
    #[must_use]
    pub fn factor(&self) -> f64 {
        self.factor
    }
}

impl Default for Smoother {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING, Orientation::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn easing_endpoints() {
        for f in [linear, ease_out] {
            assert_eq!(f(0.0), 0.0);
            assert!((f(1.0) - 1.0).abs() < 1e-6);
            assert_eq!(f(-1.0), 0.0);
        }
    }

    #[test]
    fn fade_progresses_and_saturates() {
        let mut fade = Fade::new(Duration::from_millis(300));
        assert_eq!(fade.value(), 0.0);
        fade.set_elapsed(MS_100);
        assert!((fade.value() - 1.0 / 3.0).abs() < 1e-4);
        fade.set_elapsed(MS_100 * 4);
        assert_eq!(fade.value(), 1.0);
    }

    #[test]
    fn fade_zero_duration_completes_immediately() {
        let mut fade = Fade::new(Duration::ZERO);
        fade.set_elapsed(Duration::from_nanos(1));
        assert_eq!(fade.value(), 1.0);
    }

    #[test]
    fn fade_set_elapsed_with_easing() {
        let mut fade = Fade::new(MS_100 * 2).easing(ease_out);
        fade.set_elapsed(MS_100);
        assert!((fade.value() - 0.75).abs() < 1e-4);
        assert!((fade.raw_progress() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn smoother_moves_a_tenth_per_step() {
        let mut s = Smoother::default();
        let next = s.step(Orientation::new(10.0, -20.0));
        assert!((next.x - 1.0).abs() < 1e-12);
        assert!((next.y + 2.0).abs() < 1e-12);
    }

    #[test]
    fn smoother_converges_without_overshoot() {
        let target = Orientation::new(45.0, -30.0);
        let mut s = Smoother::default();
        let mut last = target.max_delta(s.current());
        for _ in 0..200 {
            s.step(target);
            let d = target.max_delta(s.current());
            assert!(d <= last);
            last = d;
        }
        assert!(last < 1e-6);
    }

    #[test]
    fn smoother_factor_is_clamped() {
        assert_eq!(Smoother::new(3.0, Orientation::default()).factor(), 1.0);
        assert_eq!(
            Smoother::new(f64::NAN, Orientation::default()).factor(),
            DEFAULT_SMOOTHING
        );
        let mut snap = Smoother::new(1.0, Orientation::default());
        assert_eq!(snap.step(Orientation::new(5.0, 6.0)), Orientation::new(5.0, 6.0));
    }
}
