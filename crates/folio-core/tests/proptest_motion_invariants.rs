//! Property-based invariant tests for pointer throttling and smoothing.
//!
//! 1. Throttled releases are never closer than the interval.
//! 2. The most recent pushed value is always delivered, either on the leading
//!    edge or at the trailing deadline.
//! 3. Exponential smoothing converges geometrically toward a fixed target.
//! 4. Smoothing never overshoots the target on either axis.

use std::time::Duration;

use folio_core::animation::{Orientation, Smoother};
use folio_core::throttle::Throttle;
use proptest::prelude::*;
use web_time::Instant;

// ── Helpers ─────────────────────────────────────────────────────────────

const INTERVAL: Duration = Duration::from_millis(50);

fn gaps_strategy() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..120, 1..80)
}

fn angle_strategy() -> impl Strategy<Value = f64> {
    -180.0f64..180.0
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Minimum spacing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn releases_respect_interval(gaps in gaps_strategy()) {
        let start = Instant::now();
        let mut t = Throttle::new(INTERVAL);
        let mut releases: Vec<Instant> = Vec::new();
        let mut now = start;

        for (i, gap) in gaps.iter().enumerate() {
            now += Duration::from_millis(*gap);
            // Deliver any trailing value that came due before this push.
            if let Some(deadline) = t.trailing_deadline() {
                if deadline <= now && t.poll(deadline).is_some() {
                    releases.push(deadline);
                }
            }
            if t.push(i, now).is_some() {
                releases.push(now);
            }
        }

        for pair in releases.windows(2) {
            prop_assert!(pair[1].duration_since(pair[0]) >= INTERVAL);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Latest value is never lost
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn latest_value_is_delivered(gaps in gaps_strategy()) {
        let mut t = Throttle::new(INTERVAL);
        let mut now = Instant::now();
        let mut delivered = None;
        let last = gaps.len() - 1;

        for (i, gap) in gaps.iter().enumerate() {
            now += Duration::from_millis(*gap);
            if let Some(deadline) = t.trailing_deadline() {
                if deadline <= now {
                    if let Some(v) = t.poll(deadline) {
                        delivered = Some(v);
                    }
                }
            }
            if let Some(v) = t.push(i, now) {
                delivered = Some(v);
            }
        }
        if let Some(deadline) = t.trailing_deadline() {
            if let Some(v) = t.poll(deadline) {
                delivered = Some(v);
            }
        }

        prop_assert_eq!(delivered, Some(last));
        prop_assert!(!t.has_pending());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Geometric convergence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn smoothing_converges(
        tx in angle_strategy(),
        ty in angle_strategy(),
        factor in 0.05f64..1.0,
        steps in 1usize..200,
    ) {
        let target = Orientation::new(tx, ty);
        let mut s = Smoother::new(factor, Orientation::default());
        let initial = target.max_delta(s.current());
        for _ in 0..steps {
            s.step(target);
        }
        let bound = initial * (1.0 - factor).powi(steps as i32) + 1e-9;
        prop_assert!(target.max_delta(s.current()) <= bound);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. No overshoot
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn smoothing_never_overshoots(
        sx in angle_strategy(),
        sy in angle_strategy(),
        tx in angle_strategy(),
        ty in angle_strategy(),
    ) {
        let target = Orientation::new(tx, ty);
        let mut s = Smoother::new(0.1, Orientation::new(sx, sy));
        for _ in 0..100 {
            let before = s.current();
            let after = s.step(target);
            prop_assert!((after.x - tx).abs() <= (before.x - tx).abs() + 1e-12);
            prop_assert!((after.y - ty).abs() <= (before.y - ty).abs() + 1e-12);
            prop_assert!((after.x - before.x) * (tx - before.x) >= 0.0);
        }
    }
}
