#![forbid(unsafe_code)]

//! Effects as data.
//!
//! Every state machine transition returns a [`Cmd`] describing the side
//! effects it wants: timers to arm or cancel, animation frames to request or
//! cancel, sounds to play, overlays to show. The [`Page`](crate::page::Page)
//! executes them. Machines never touch the timer registry, the frame
//! scheduler, or the host directly, so tests can assert on effects without
//! running anything.

use std::time::Duration;

use folio_core::animation::Orientation;

// ---------------------------------------------------------------------------
// Names and identifiers
// ---------------------------------------------------------------------------

/// Identifier of an animated object (one rotating shape).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub usize);

/// Identifier of an overlay element created through the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(pub u64);

/// Call sites that own a notification. One live instance per site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotifySite {
    /// Rainbow mode switched on.
    Rainbow,
    /// Favorite keyword double-clicked.
    FavoriteKeyword,
}

/// Scheduled phases of a notification's life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotifyPhase {
    /// Start fading in.
    FadeIn,
    /// Display time is over; start fading out.
    FadeOut,
    /// Fade-out finished; remove the element.
    Remove,
}

/// Every named timer the engine can arm.
///
/// Arming a name that is already armed replaces the pending deadline, so
/// each name has at most one pending callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerName {
    /// Clears the secret code's success state.
    SecretCode,
    /// Reverts the terminal to passive mode.
    TerminalInactivity,
    /// Terminal cursor blink.
    TerminalCursor,
    /// Next step of the passive skill listing.
    SkillStep,
    /// Reveals one more character of the hero code.
    TypewriterTick,
    /// Hero code cursor blink.
    TypewriterCursor,
    /// Trailing edge of the pointer throttle.
    PointerThrottle,
    /// A notification phase for one site.
    Notification(NotifySite, NotifyPhase),
    /// Hides the footer message.
    FooterReveal,
    /// Clears the recorded project click sequence.
    ProjectIdle,
    /// Hides the secret project.
    ProjectReveal,
}

/// Fixed screen positions for overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// Top-right corner of the viewport.
    TopRight,
    /// Center of the viewport.
    Center,
}

// ---------------------------------------------------------------------------
// Host-facing payloads
// ---------------------------------------------------------------------------

/// A best-effort sound to play.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundRequest {
    /// Resource URL.
    pub url: String,
    /// Volume in [0.0, 1.0].
    pub volume: f32,
}

impl SoundRequest {
    /// Create a sound request, clamping the volume into [0.0, 1.0].
    #[must_use]
    pub fn new(url: impl Into<String>, volume: f32) -> Self {
        Self {
            url: url.into(),
            volume: volume.clamp(0.0, 1.0),
        }
    }
}

/// An operation on a transient overlay element.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayOp {
    /// Create an element, initially transparent.
    Create {
        /// Element identifier.
        id: OverlayId,
        /// Screen position.
        anchor: Anchor,
        /// Text payload.
        text: String,
    },
    /// Set the element's target opacity; the host animates the transition.
    SetOpacity {
        /// Element identifier.
        id: OverlayId,
        /// Target opacity in [0.0, 1.0].
        opacity: f32,
    },
    /// Remove the element.
    Remove {
        /// Element identifier.
        id: OverlayId,
    },
}

impl OverlayOp {
    /// The element this operation targets.
    #[must_use]
    pub const fn id(&self) -> OverlayId {
        match self {
            Self::Create { id, .. } | Self::SetOpacity { id, .. } | Self::Remove { id } => *id,
        }
    }
}

/// A request to show a notification.
#[derive(Debug, Clone, PartialEq)]
pub struct NotifyRequest {
    /// Owning call site.
    pub site: NotifySite,
    /// Screen position.
    pub anchor: Anchor,
    /// Message text.
    pub message: String,
    /// Time at full opacity before fading out.
    pub display: Duration,
}

// ---------------------------------------------------------------------------
// Cmd
// ---------------------------------------------------------------------------

/// A side effect requested by a state machine transition.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cmd {
    /// No operation.
    #[default]
    None,
    /// Execute multiple commands in order.
    Batch(Vec<Cmd>),
    /// Arm a one-shot timer `after` from now, replacing any pending one.
    Arm {
        /// Timer name.
        timer: TimerName,
        /// Delay from now.
        after: Duration,
    },
    /// Arm a periodic timer, replacing any pending one.
    Every {
        /// Timer name.
        timer: TimerName,
        /// Period; the first fire is one period from now.
        interval: Duration,
    },
    /// Cancel a timer if armed.
    Cancel(TimerName),
    /// Request an animation frame for an object.
    RequestFrame(ObjectId),
    /// Cancel a pending frame request for an object.
    CancelFrame(ObjectId),
    /// Write an object's orientation to the host.
    Orient(ObjectId, Orientation),
    /// Play a sound (best effort).
    PlaySound(SoundRequest),
    /// Apply an overlay operation.
    Overlay(OverlayOp),
    /// Show a notification through the notification manager.
    Notify(NotifyRequest),
    /// Append an output line to the terminal history.
    Log(String),
}

impl Cmd {
    /// Create a no-op command.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::None
    }

    /// Create a batch of commands.
    ///
    /// `None` entries are dropped; an empty batch is `None` and a single
    /// command is returned unwrapped.
    #[must_use]
    pub fn batch(mut cmds: Vec<Self>) -> Self {
        cmds.retain(|c| !c.is_none());
        match cmds.len() {
            0 => Self::None,
            1 => cmds.pop().unwrap_or_default(),
            _ => Self::Batch(cmds),
        }
    }

    /// Arm a one-shot timer.
    #[inline]
    #[must_use]
    pub fn arm(timer: TimerName, after: Duration) -> Self {
        Self::Arm { timer, after }
    }

    /// Arm a periodic timer.
    #[inline]
    #[must_use]
    pub fn every(timer: TimerName, interval: Duration) -> Self {
        Self::Every { timer, interval }
    }

    /// Cancel a timer.
    #[inline]
    #[must_use]
    pub fn cancel(timer: TimerName) -> Self {
        Self::Cancel(timer)
    }

    /// Append a terminal output line.
    #[inline]
    #[must_use]
    pub fn log(line: impl Into<String>) -> Self {
        Self::Log(line.into())
    }

    /// Show a notification.
    #[must_use]
    pub fn notify(
        site: NotifySite,
        anchor: Anchor,
        message: impl Into<String>,
        display: Duration,
    ) -> Self {
        Self::Notify(NotifyRequest {
            site,
            anchor,
            message: message.into(),
            display,
        })
    }

    /// Returns true for [`Cmd::None`].
    #[inline]
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Return a stable name for tracing.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Batch(_) => "Batch",
            Self::Arm { .. } => "Arm",
            Self::Every { .. } => "Every",
            Self::Cancel(_) => "Cancel",
            Self::RequestFrame(_) => "RequestFrame",
            Self::CancelFrame(_) => "CancelFrame",
            Self::Orient(..) => "Orient",
            Self::PlaySound(_) => "PlaySound",
            Self::Overlay(_) => "Overlay",
            Self::Notify(_) => "Notify",
            Self::Log(_) => "Log",
        }
    }

    /// Flatten nested batches into leaf commands, in execution order.
    ///
    /// `None` leaves are dropped.
    #[must_use]
    pub fn flatten(self) -> Vec<Cmd> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(self, out: &mut Vec<Cmd>) {
        match self {
            Self::None => {}
            Self::Batch(cmds) => {
                for cmd in cmds {
                    cmd.flatten_into(out);
                }
            }
            leaf => out.push(leaf),
        }
    }
}
