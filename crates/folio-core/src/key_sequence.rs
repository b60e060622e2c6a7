#![forbid(unsafe_code)]

//! Fixed key sequence matcher (the "secret code").
//!
//! [`SequenceMatcher`] watches the key press stream for one fixed, ordered
//! target sequence. It is a pure state machine: it never schedules anything,
//! and every call that depends on time takes `now` as an argument.
//!
//! # Design
//!
//! ## Invariants
//! 1. `0 <= progress <= target.len()`, and `progress` is back to 0 after every
//!    call to [`feed`](SequenceMatcher::feed) that returns
//!    [`SequenceOutcome::Matched`].
//! 2. A key that breaks the run resets progress to 0 and is discarded; it is
//!    not re-tested as the first element of a new run.
//! 3. Only press events count. Repeats and releases leave state untouched.
//! 4. A match opens an active window of [`KeySequenceConfig::active_duration`];
//!    a later match while active extends the window from the new match.
//!
//! ## Failure Modes
//! - There are none. Mismatches are silent resets, not errors.
//!
//! # Example
//!
//! ```
//! use folio_core::event::{KeyCode, KeyEvent};
//! use folio_core::key_sequence::{SequenceMatcher, SequenceOutcome, KONAMI};
//! use web_time::Instant;
//!
//! let mut matcher = SequenceMatcher::with_defaults();
//! let now = Instant::now();
//!
//! let mut last = SequenceOutcome::Ignored;
//! for code in KONAMI {
//!     last = matcher.feed(&KeyEvent::new(code), now);
//! }
//! assert_eq!(last, SequenceOutcome::Matched);
//! assert!(matcher.is_active());
//! assert_eq!(matcher.progress(), 0);
//! ```

use std::time::Duration;

use web_time::Instant;

use crate::event::{KeyCode, KeyEvent};

/// The fixed target: Up Up Down Down Left Right Left Right b a.
pub const KONAMI: [KeyCode; 10] = [
    KeyCode::Up,
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Char('b'),
    KeyCode::Char('a'),
];

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Default length of the active window opened by a match.
pub const DEFAULT_ACTIVE_DURATION: Duration = Duration::from_secs(5);

/// Configuration for the sequence matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySequenceConfig {
    /// How long the matched state stays active (default: 5s).
    pub active_duration: Duration,
}

impl Default for KeySequenceConfig {
    fn default() -> Self {
        Self {
            active_duration: DEFAULT_ACTIVE_DURATION,
        }
    }
}

impl KeySequenceConfig {
    /// Set the active window length.
    #[must_use]
    pub fn with_active_duration(mut self, duration: Duration) -> Self {
        self.active_duration = duration;
        self
    }
}

// ---------------------------------------------------------------------------
// SequenceOutcome
// ---------------------------------------------------------------------------

/// Result of feeding one key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceOutcome {
    /// Not a press event; state unchanged.
    Ignored,
    /// The key matched the next element; carries the new progress.
    Advanced(usize),
    /// The key broke the run; progress is back to 0.
    Reset,
    /// The final element matched. Progress is back to 0 and the active
    /// window has (re)started.
    Matched,
}

impl SequenceOutcome {
    /// Returns true if this outcome completed the sequence.
    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Matched)
    }
}

// ---------------------------------------------------------------------------
// SequenceMatcher
// ---------------------------------------------------------------------------

/// Matcher for one fixed key sequence.
#[derive(Debug, Clone)]
pub struct SequenceMatcher {
    config: KeySequenceConfig,
    target: &'static [KeyCode],
    progress: usize,
    active_until: Option<Instant>,
}

impl SequenceMatcher {
    /// Create a matcher for [`KONAMI`] with the given configuration.
    #[must_use]
    pub fn new(config: KeySequenceConfig) -> Self {
        Self {
            config,
            target: &KONAMI,
            progress: 0,
            active_until: None,
        }
    }

    /// Create a matcher with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(KeySequenceConfig::default())
    }

    /// Feed a key event.
    ///
    /// On [`SequenceOutcome::Matched`] the active window starts at `now`.
    pub fn feed(&mut self, event: &KeyEvent, now: Instant) -> SequenceOutcome {
        if !event.is_press() {
            return SequenceOutcome::Ignored;
        }

        if self.target.get(self.progress) != Some(&event.code) {
            if self.progress > 0 {
                crate::trace!(target: "folio.sequence", was = self.progress, "sequence reset");
            }
            self.progress = 0;
            return SequenceOutcome::Reset;
        }

        self.progress += 1;
        if self.progress < self.target.len() {
            return SequenceOutcome::Advanced(self.progress);
        }

        self.progress = 0;
        self.active_until = Some(now + self.config.active_duration);
        crate::debug!(target: "folio.sequence", "sequence matched");
        SequenceOutcome::Matched
    }

    /// Clear the active state if its window has elapsed.
    ///
    /// Returns true if the state was active and is now cleared.
    pub fn check_timeout(&mut self, now: Instant) -> bool {
        match self.active_until {
            Some(deadline) if now >= deadline => {
                self.active_until = None;
                true
            }
            _ => false,
        }
    }

    /// Time remaining in the active window, if active.
    #[must_use]
    pub fn time_until_timeout(&self, now: Instant) -> Option<Duration> {
        self.active_until
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Whether a match's active window is currently open.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active_until.is_some()
    }

    /// Number of target elements matched so far.
    #[must_use]
    pub fn progress(&self) -> usize {
        self.progress
    }

    /// The fixed target sequence.
    #[must_use]
    pub fn target(&self) -> &'static [KeyCode] {
        self.target
    }

    /// Get a reference to the current configuration.
    #[must_use]
    pub fn config(&self) -> &KeySequenceConfig {
        &self.config
    }
}

impl Default for SequenceMatcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::KeyEventKind;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code)
    }

    fn feed_all(m: &mut SequenceMatcher, codes: &[KeyCode], now: Instant) -> usize {
        codes
            .iter()
            .filter(|c| m.feed(&press(**c), now).is_match())
            .count()
    }

    #[test]
    fn full_sequence_matches_once() {
        let mut m = SequenceMatcher::with_defaults();
        assert_eq!(feed_all(&mut m, &KONAMI, Instant::now()), 1);
        assert_eq!(m.progress(), 0);
        assert!(m.is_active());
    }

    #[test]
    fn interleaved_mismatch_never_matches() {
        use KeyCode::*;
        let seq = [
            Up,
            Up,
            Down,
            Left,
            Down,
            Right,
            Left,
            Right,
            Char('b'),
            Char('a'),
        ];
        let mut m = SequenceMatcher::with_defaults();
        assert_eq!(feed_all(&mut m, &seq, Instant::now()), 0);
        assert!(!m.is_active());
    }

    #[test]
    fn mismatch_discards_the_breaking_key() {
        let mut m = SequenceMatcher::with_defaults();
        let t = Instant::now();
        assert_eq!(m.feed(&press(KeyCode::Up), t), SequenceOutcome::Advanced(1));
        assert_eq!(m.feed(&press(KeyCode::Up), t), SequenceOutcome::Advanced(2));
        // A third Up breaks the run and is not counted as a new first Up.
        assert_eq!(m.feed(&press(KeyCode::Up), t), SequenceOutcome::Reset);
        assert_eq!(m.progress(), 0);
    }

    #[test]
    fn uppercase_letters_do_not_match() {
        let mut seq = KONAMI;
        seq[8] = KeyCode::Char('B');
        let mut m = SequenceMatcher::with_defaults();
        assert_eq!(feed_all(&mut m, &seq, Instant::now()), 0);
    }

    #[test]
    fn releases_and_repeats_are_ignored() {
        let mut m = SequenceMatcher::with_defaults();
        let t = Instant::now();
        m.feed(&press(KeyCode::Up), t);
        let release = press(KeyCode::Left).with_kind(KeyEventKind::Release);
        let repeat = press(KeyCode::Left).with_kind(KeyEventKind::Repeat);
        assert_eq!(m.feed(&release, t), SequenceOutcome::Ignored);
        assert_eq!(m.feed(&repeat, t), SequenceOutcome::Ignored);
        assert_eq!(m.progress(), 1);
    }

    #[test]
    fn active_window_expires() {
        let mut m = SequenceMatcher::with_defaults();
        let t = Instant::now();
        feed_all(&mut m, &KONAMI, t);
        assert_eq!(m.time_until_timeout(t), Some(DEFAULT_ACTIVE_DURATION));
        assert!(!m.check_timeout(t + Duration::from_millis(4_999)));
        assert!(m.is_active());
        assert!(m.check_timeout(t + DEFAULT_ACTIVE_DURATION));
        assert!(!m.is_active());
        assert!(!m.check_timeout(t + DEFAULT_ACTIVE_DURATION));
    }

    #[test]
    fn second_match_extends_window() {
        let mut m = SequenceMatcher::with_defaults();
        let t = Instant::now();
        feed_all(&mut m, &KONAMI, t);
        let later = t + Duration::from_secs(3);
        feed_all(&mut m, &KONAMI, later);
        assert!(!m.check_timeout(t + DEFAULT_ACTIVE_DURATION));
        assert!(m.check_timeout(later + DEFAULT_ACTIVE_DURATION));
    }

    #[test]
    fn custom_duration() {
        let config = KeySequenceConfig::default().with_active_duration(Duration::from_secs(1));
        let mut m = SequenceMatcher::new(config);
        let t = Instant::now();
        feed_all(&mut m, &KONAMI, t);
        assert!(m.check_timeout(t + Duration::from_secs(1)));
    }

    #[test]
    fn target_is_ten_long() {
        assert_eq!(SequenceMatcher::default().target().len(), 10);
    }
}
