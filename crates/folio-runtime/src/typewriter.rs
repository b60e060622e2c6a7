#![forbid(unsafe_code)]

//! Typewriter: incremental reveal of a text payload.
//!
//! [`set_text`](Typewriter::set_text) resets the reveal to zero and starts a
//! periodic tick; every tick reveals one more grapheme cluster until the
//! whole text is visible, then the tick is cancelled. The cursor blinks on
//! its own timer for the lifetime of the component, unrelated to reveal
//! progress.
//!
//! # Invariants
//! 1. `0 <= revealed <= len`, counted in grapheme clusters.
//! 2. For a text of length N, `revealed` takes each value `0, 1, ..., N`
//!    exactly once, in order, then ticking stops.
//! 3. Replacing the text restarts at 0; the old tick is superseded.

use std::time::Duration;

use unicode_segmentation::UnicodeSegmentation;

use crate::cursor::{BlinkingCursor, DEFAULT_BLINK_PERIOD};
use crate::effect::{Cmd, TimerName};

/// Default delay between revealed graphemes.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(25);

/// Typewriter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypewriterConfig {
    /// Reveal cadence (default: 25ms).
    pub tick_interval: Duration,
    /// Cursor blink half-period (default: 500ms).
    pub cursor_blink: Duration,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            cursor_blink: DEFAULT_BLINK_PERIOD,
        }
    }
}

impl TypewriterConfig {
    /// Set the reveal cadence.
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Set the cursor blink period.
    #[must_use]
    pub fn with_cursor_blink(mut self, period: Duration) -> Self {
        self.cursor_blink = period;
        self
    }
}

/// Incrementally revealed text with a blinking cursor.
#[derive(Debug, Clone)]
pub struct Typewriter {
    config: TypewriterConfig,
    full_text: String,
    /// Byte offset of the end of each grapheme cluster.
    boundaries: Vec<usize>,
    revealed: usize,
    ticking: bool,
    cursor: BlinkingCursor,
}

impl Typewriter {
    /// Create an empty typewriter.
    #[must_use]
    pub fn new(config: TypewriterConfig) -> Self {
        let cursor = BlinkingCursor::new(TimerName::TypewriterCursor, config.cursor_blink);
        Self {
            config,
            full_text: String::new(),
            boundaries: Vec::new(),
            revealed: 0,
            ticking: false,
            cursor,
        }
    }

    /// Start the cursor blinking.
    pub fn start_cursor(&mut self) -> Cmd {
        self.cursor.start()
    }

    /// Replace the text and restart the reveal at zero.
    pub fn set_text(&mut self, text: impl Into<String>) -> Cmd {
        self.full_text = text.into();
        self.boundaries = self
            .full_text
            .grapheme_indices(true)
            .map(|(i, g)| i + g.len())
            .collect();
        self.revealed = 0;
        tracing::debug!(target: "folio.typewriter", len = self.boundaries.len(), "text replaced");

        if self.boundaries.is_empty() {
            return self.stop_ticking();
        }
        self.ticking = true;
        Cmd::every(TimerName::TypewriterTick, self.config.tick_interval)
    }

    /// Handle the reveal tick.
    pub fn on_tick(&mut self) -> Cmd {
        if !self.ticking {
            return Cmd::none();
        }
        if self.revealed < self.boundaries.len() {
            self.revealed += 1;
        }
        if self.revealed == self.boundaries.len() {
            return self.stop_ticking();
        }
        Cmd::none()
    }

    /// Handle the cursor blink timer.
    pub fn on_cursor_blink(&mut self) {
        self.cursor.on_blink();
    }

    fn stop_ticking(&mut self) -> Cmd {
        if std::mem::take(&mut self.ticking) {
            Cmd::cancel(TimerName::TypewriterTick)
        } else {
            Cmd::none()
        }
    }

    /// The revealed prefix.
    #[must_use]
    pub fn visible_text(&self) -> &str {
        let end = match self.revealed {
            0 => 0,
            n => self.boundaries.get(n - 1).copied().unwrap_or(self.full_text.len()),
        };
        &self.full_text[..end]
    }

    /// The full payload.
    #[must_use]
    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    /// Graphemes revealed so far.
    #[must_use]
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// Total graphemes in the payload.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    /// Whether the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Whether the whole payload is visible.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.revealed == self.boundaries.len()
    }

    /// Whether the reveal tick is running.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    /// Whether the cursor is drawn.
    #[must_use]
    pub fn cursor_visible(&self) -> bool {
        self.cursor.is_visible()
    }
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new(TypewriterConfig::default())
    }
}
