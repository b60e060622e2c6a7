#![forbid(unsafe_code)]

//! Blinking text cursor.

use std::time::Duration;

use crate::effect::{Cmd, TimerName};

/// Default blink half-period.
pub const DEFAULT_BLINK_PERIOD: Duration = Duration::from_millis(500);

/// A cursor that toggles visibility on a fixed period for as long as it runs.
///
/// Blinking is independent of whatever text the cursor follows.
#[derive(Debug, Clone)]
pub struct BlinkingCursor {
    timer: TimerName,
    period: Duration,
    visible: bool,
    running: bool,
}

impl BlinkingCursor {
    /// Create a stopped, visible cursor driven by `timer`.
    #[must_use]
    pub fn new(timer: TimerName, period: Duration) -> Self {
        Self {
            timer,
            period,
            visible: true,
            running: false,
        }
    }

    /// Start blinking. Restarting an already running cursor is a no-op.
    pub fn start(&mut self) -> Cmd {
        if self.running {
            return Cmd::none();
        }
        self.running = true;
        self.visible = true;
        Cmd::every(self.timer, self.period)
    }

    /// Stop blinking and leave the cursor visible.
    pub fn stop(&mut self) -> Cmd {
        if !self.running {
            return Cmd::none();
        }
        self.running = false;
        self.visible = true;
        Cmd::cancel(self.timer)
    }

    /// Handle the blink timer.
    pub fn on_blink(&mut self) {
        if self.running {
            self.visible = !self.visible;
        }
    }

    /// Whether the cursor is currently drawn.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the cursor is blinking.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The timer that drives this cursor.
    #[must_use]
    pub fn timer(&self) -> TimerName {
        self.timer
    }
}
