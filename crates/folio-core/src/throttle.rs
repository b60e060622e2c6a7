#![forbid(unsafe_code)]

//! Leading and trailing edge throttle for high-frequency input.
//!
//! Pointer moves arrive far faster than anything downstream needs them.
//! [`Throttle`] lets at most one value through per interval:
//!
//! - **Leading edge**: a value pushed when the window is open passes
//!   through immediately and closes the window for `interval`.
//! - **Trailing edge**: values pushed while the window is closed coalesce
//!   (latest wins). Once the window reopens, [`poll`](Throttle::poll)
//!   releases the held value and closes the window again.
//!
//! The throttle holds no timers. The caller schedules a wake-up at
//! [`trailing_deadline`](Throttle::trailing_deadline) and calls `poll` then.
//!
//! # Invariants
//! 1. Two released values are never closer together than `interval`.
//! 2. At most one value is held; a newer push replaces it.
//! 3. No value pushed is lost except by being superseded or by
//!    [`cancel`](Throttle::cancel).

use std::time::Duration;

use web_time::Instant;

/// Default minimum spacing between released values.
pub const DEFAULT_THROTTLE_INTERVAL: Duration = Duration::from_millis(50);

/// Rate limiter with latest-wins trailing delivery.
#[derive(Debug, Clone)]
pub struct Throttle<T> {
    interval: Duration,
    last_release: Option<Instant>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    /// Create a throttle with the given minimum spacing.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_release: None,
            pending: None,
        }
    }

    /// Push a value.
    ///
    /// Returns `Some(value)` if it passes on the leading edge, or `None` if
    /// it is held for the trailing edge.
    pub fn push(&mut self, value: T, now: Instant) -> Option<T> {
        if self.is_open(now) {
            self.last_release = Some(now);
            self.pending = None;
            Some(value)
        } else {
            self.pending = Some(value);
            None
        }
    }

    /// Release the held value if the window has reopened.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.pending.is_some() && self.is_open(now) {
            self.last_release = Some(now);
            self.pending.take()
        } else {
            None
        }
    }

    /// When the held value becomes releasable, if one is held.
    #[must_use]
    pub fn trailing_deadline(&self) -> Option<Instant> {
        match (&self.pending, self.last_release) {
            (Some(_), Some(last)) => Some(last + self.interval),
            _ => None,
        }
    }

    /// Time until the window reopens (zero if already open).
    #[must_use]
    pub fn time_until_ready(&self, now: Instant) -> Duration {
        self.last_release.map_or(Duration::ZERO, |last| {
            (last + self.interval).saturating_duration_since(now)
        })
    }

    /// Returns true if a value is held for the trailing edge.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The configured interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Drop any held value. The window state is kept.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    fn is_open(&self, now: Instant) -> bool {
        self.last_release
            .is_none_or(|last| now.saturating_duration_since(last) >= self.interval)
    }
}

impl<T> Default for Throttle<T> {
    fn default() -> Self {
        Self::new(DEFAULT_THROTTLE_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_10: Duration = Duration::from_millis(10);
    const MS_50: Duration = Duration::from_millis(50);

    #[test]
    fn first_push_passes_leading_edge() {
        let mut t = Throttle::default();
        let now = Instant::now();
        assert_eq!(t.push(1, now), Some(1));
        assert!(!t.has_pending());
    }

    #[test]
    fn pushes_inside_window_coalesce_latest_wins() {
        let mut t = Throttle::default();
        let now = Instant::now();
        t.push(1, now);
        assert_eq!(t.push(2, now + MS_10), None);
        assert_eq!(t.push(3, now + MS_10 * 2), None);
        assert_eq!(t.trailing_deadline(), Some(now + MS_50));
        assert_eq!(t.poll(now + MS_10 * 4), None);
        assert_eq!(t.poll(now + MS_50), Some(3));
        assert!(!t.has_pending());
    }

    #[test]
    fn trailing_release_closes_window() {
        let mut t = Throttle::default();
        let now = Instant::now();
        t.push(1, now);
        t.push(2, now + MS_10);
        assert_eq!(t.poll(now + MS_50), Some(2));
        // Window restarted at the trailing release.
        assert_eq!(t.push(3, now + MS_50 + MS_10), None);
        assert_eq!(t.poll(now + MS_50 * 2), Some(3));
    }

    #[test]
    fn push_after_window_passes_and_drops_nothing() {
        let mut t = Throttle::default();
        let now = Instant::now();
        t.push(1, now);
        assert_eq!(t.push(2, now + MS_50), Some(2));
        assert_eq!(t.poll(now + MS_50 * 3), None);
    }

    #[test]
    fn time_until_ready_counts_down() {
        let mut t: Throttle<u8> = Throttle::default();
        let now = Instant::now();
        assert_eq!(t.time_until_ready(now), Duration::ZERO);
        t.push(0, now);
        assert_eq!(t.time_until_ready(now + MS_10), Duration::from_millis(40));
        assert_eq!(t.time_until_ready(now + MS_50 * 2), Duration::ZERO);
    }

    #[test]
    fn cancel_keeps_window_closed() {
        let mut t = Throttle::new(MS_50);
        let now = Instant::now();
        t.push(1, now);
        t.push(2, now);
        t.cancel();
        assert_eq!(t.poll(now + MS_50), None);
        assert_eq!(t.push(3, now + MS_10), None);
        assert_eq!(t.poll(now + MS_50), Some(3));
    }
}
