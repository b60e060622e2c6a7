#![forbid(unsafe_code)]

//! Timer registry: named, cancellable one-shot and periodic timers.
//!
//! The registry owns no clock and no threads. Callers arm timers against a
//! deadline and later ask which timers are due at a given instant with
//! [`pop_due`](TimerRegistry::pop_due). This keeps the page controller
//! deterministic: the same sequence of calls always fires the same timers in
//! the same order.
//!
//! # Invariants
//! 1. Each key has at most one pending timer. Arming an armed key replaces
//!    its deadline (supersede, never stack).
//! 2. Due timers are popped in `(deadline, arm order)` order.
//! 3. A periodic timer is rescheduled one period after the deadline it
//!    fired at, so it does not drift when the caller polls late.
//! 4. After [`cancel_all`](TimerRegistry::cancel_all) nothing is pending and
//!    nothing fires until a new timer is armed.
//!
//! # Failure Modes
//! - A zero period is raised to [`MIN_PERIOD`] so a periodic timer cannot
//!   starve the loop.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;

use web_time::Instant;

/// Smallest period accepted for periodic timers.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy)]
struct Entry {
    deadline: Instant,
    period: Option<Duration>,
    seq: u64,
}

/// Lifetime counters for leak and churn assertions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerStats {
    /// Timers armed (including re-arms).
    pub armed: u64,
    /// Re-arms that replaced a pending timer.
    pub superseded: u64,
    /// Explicit cancellations of pending timers.
    pub cancelled: u64,
    /// Timer callbacks delivered.
    pub fired: u64,
}

/// Registry of named timers.
#[derive(Debug)]
pub struct TimerRegistry<K> {
    entries: HashMap<K, Entry>,
    next_seq: u64,
    stats: TimerStats,
}

impl<K> Default for TimerRegistry<K> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            next_seq: 0,
            stats: TimerStats::default(),
        }
    }
}

impl<K: Eq + Hash + Clone + Debug> TimerRegistry<K> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a one-shot timer at `deadline`.
    ///
    /// Returns true if a pending timer with the same key was replaced.
    pub fn arm(&mut self, key: K, deadline: Instant) -> bool {
        self.insert(key, deadline, None)
    }

    /// Arm a one-shot timer `after` from `now`.
    pub fn arm_after(&mut self, key: K, now: Instant, after: Duration) -> bool {
        self.arm(key, now + after)
    }

    /// Arm a periodic timer. The first fire is one `period` after `now`.
    pub fn arm_every(&mut self, key: K, now: Instant, period: Duration) -> bool {
        let period = period.max(MIN_PERIOD);
        self.insert(key, now + period, Some(period))
    }

    fn insert(&mut self, key: K, deadline: Instant, period: Option<Duration>) -> bool {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.stats.armed += 1;
        let replaced = self
            .entries
            .insert(
                key.clone(),
                Entry {
                    deadline,
                    period,
                    seq,
                },
            )
            .is_some();
        if replaced {
            self.stats.superseded += 1;
        }
        crate::debug_trace!("timer armed: {:?} replaced={}", key, replaced);
        replaced
    }

    /// Cancel a pending timer. Returns true if one was pending.
    pub fn cancel(&mut self, key: &K) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.stats.cancelled += 1;
            crate::debug_trace!("timer cancelled: {:?}", key);
        }
        removed
    }

    /// Cancel every pending timer. Returns how many were pending.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.entries.len();
        self.entries.clear();
        self.stats.cancelled += n as u64;
        n
    }

    /// Whether `key` has a pending timer.
    #[must_use]
    pub fn is_armed(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Deadline of `key`'s pending timer.
    #[must_use]
    pub fn deadline(&self, key: &K) -> Option<Instant> {
        self.entries.get(key).map(|e| e.deadline)
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.values().map(|e| e.deadline).min()
    }

    /// Pop the earliest timer due at or before `now`.
    ///
    /// Returns the key and the deadline it fired at. One-shot timers are
    /// removed; periodic timers are rescheduled.
    pub fn pop_due(&mut self, now: Instant) -> Option<(K, Instant)> {
        let key = self
            .entries
            .iter()
            .filter(|(_, e)| e.deadline <= now)
            .min_by_key(|(_, e)| (e.deadline, e.seq))
            .map(|(k, _)| k.clone())?;

        let fired_at = match self.entries.get_mut(&key) {
            Some(entry) => match entry.period {
                Some(period) => {
                    let fired_at = entry.deadline;
                    entry.deadline = fired_at + period;
                    entry.seq = self.next_seq;
                    self.next_seq += 1;
                    fired_at
                }
                None => {
                    let fired_at = entry.deadline;
                    self.entries.remove(&key);
                    fired_at
                }
            },
            None => return None,
        };

        self.stats.fired += 1;
        Some((key, fired_at))
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lifetime counters.
    #[must_use]
    pub fn stats(&self) -> TimerStats {
        self.stats
    }
}
