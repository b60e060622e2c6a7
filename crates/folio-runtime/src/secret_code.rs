#![forbid(unsafe_code)]

//! Secret code listener.
//!
//! Wraps [`SequenceMatcher`] with the revert timer: a match turns the
//! success state on and arms [`TimerName::SecretCode`]; the timer turns it
//! off. A second match while active re-arms the timer, extending the window.

use folio_core::event::KeyEvent;
use folio_core::key_sequence::{KeySequenceConfig, SequenceMatcher, SequenceOutcome};
use web_time::Instant;

use crate::effect::{Cmd, TimerName};

/// Listens to every key press for the fixed secret sequence.
#[derive(Debug, Clone)]
pub struct SecretCode {
    matcher: SequenceMatcher,
    matches: u64,
}

impl SecretCode {
    /// Create a listener.
    #[must_use]
    pub fn new(config: KeySequenceConfig) -> Self {
        Self {
            matcher: SequenceMatcher::new(config),
            matches: 0,
        }
    }

    /// Feed a key event.
    pub fn on_key(&mut self, key: &KeyEvent, now: Instant) -> Cmd {
        match self.matcher.feed(key, now) {
            SequenceOutcome::Matched => {
                self.matches += 1;
                tracing::info!(
                    target: "folio.secret_code",
                    matches = self.matches,
                    "secret code matched"
                );
                Cmd::arm(TimerName::SecretCode, self.matcher.config().active_duration)
            }
            _ => Cmd::none(),
        }
    }

    /// Handle the revert timer.
    pub fn on_timeout(&mut self, now: Instant) {
        if self.matcher.check_timeout(now) {
            tracing::debug!(target: "folio.secret_code", "secret code state cleared");
        }
    }

    /// Whether the success state is showing.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.matcher.is_active()
    }

    /// Current match progress.
    #[must_use]
    pub fn progress(&self) -> usize {
        self.matcher.progress()
    }

    /// Total matches since creation.
    #[must_use]
    pub fn matches(&self) -> u64 {
        self.matches
    }
}

impl Default for SecretCode {
    fn default() -> Self {
        Self::new(KeySequenceConfig::default())
    }
}
