#![forbid(unsafe_code)]

//! Per-object animation frame scheduler.
//!
//! Mirrors a display's frame callback: an object requests the next frame,
//! and at the next frame boundary every requested object is called back
//! once. Requests are one-shot; an animation that wants to keep running
//! requests again from inside its frame callback.
//!
//! # Invariants
//! 1. An object has at most one outstanding request.
//! 2. Cancelling an object's request only affects that object.
//! 3. With no outstanding requests there is no next frame, so an idle page
//!    costs nothing.

use std::fmt::Debug;
use std::time::Duration;

use web_time::Instant;

/// Default frame interval (~60 Hz).
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Lifetime counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frame requests accepted (duplicates of an outstanding request excluded).
    pub requested: u64,
    /// Outstanding requests cancelled.
    pub cancelled: u64,
    /// Frame callbacks delivered.
    pub fired: u64,
}

/// Frame request scheduler keyed by object.
#[derive(Debug)]
pub struct FrameScheduler<K> {
    interval: Duration,
    requested: Vec<K>,
    next_frame: Option<Instant>,
    stats: FrameStats,
}

impl<K: PartialEq + Clone + Debug> FrameScheduler<K> {
    /// Create a scheduler with the given frame interval.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            requested: Vec::new(),
            next_frame: None,
            stats: FrameStats::default(),
        }
    }

    /// Request a frame callback for `key`.
    ///
    /// Returns false if a request was already outstanding.
    pub fn request(&mut self, key: K, now: Instant) -> bool {
        if self.requested.contains(&key) {
            return false;
        }
        self.requested.push(key);
        self.stats.requested += 1;
        if self.next_frame.is_none() {
            self.next_frame = Some(now + self.interval);
        }
        true
    }

    /// Cancel `key`'s outstanding request. Returns true if there was one.
    pub fn cancel(&mut self, key: &K) -> bool {
        let before = self.requested.len();
        self.requested.retain(|k| k != key);
        let removed = self.requested.len() != before;
        if removed {
            self.stats.cancelled += 1;
            crate::debug_trace!("frame cancelled: {:?}", key);
        }
        if self.requested.is_empty() {
            self.next_frame = None;
        }
        removed
    }

    /// Cancel every outstanding request. Returns how many there were.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.requested.len();
        self.requested.clear();
        self.next_frame = None;
        self.stats.cancelled += n as u64;
        n
    }

    /// When the next frame boundary falls, if anything is requested.
    #[must_use]
    pub fn next_frame_at(&self) -> Option<Instant> {
        self.next_frame
    }

    /// Take the requests due at `now`, in request order.
    ///
    /// Returns an empty list if no frame boundary has been reached.
    pub fn begin_frame(&mut self, now: Instant) -> Vec<K> {
        match self.next_frame {
            Some(at) if at <= now => {
                self.next_frame = None;
                let due = std::mem::take(&mut self.requested);
                self.stats.fired += due.len() as u64;
                due
            }
            _ => Vec::new(),
        }
    }

    /// Whether `key` has an outstanding request.
    #[must_use]
    pub fn is_requested(&self, key: &K) -> bool {
        self.requested.contains(key)
    }

    /// Number of outstanding requests.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.requested.len()
    }

    /// Configured frame interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Lifetime counters.
    #[must_use]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }
}

impl<K: PartialEq + Clone + Debug> Default for FrameScheduler<K> {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL)
    }
}
