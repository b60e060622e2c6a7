#![forbid(unsafe_code)]

//! Ephemeral notifications: fade in, hold, fade out, remove.
//!
//! Each [`NotifySite`] owns at most one live notification. A notification
//! goes through these phases, each a named one-shot timer:
//!
//! ```text
//! show ──fade_in_delay──▶ FadeIn (opacity → 1)
//!      ──display────────▶ FadeOut (opacity → 0) ──fade──▶ Remove
//! ```
//!
//! # Invariants
//! 1. Showing on a site that already has a live notification removes the
//!    old overlay immediately and cancels all of its phase timers before
//!    the new one is created. No stale removal can fire later.
//! 2. Every created overlay is eventually removed, by its `Remove` phase,
//!    by a re-trigger, or by [`clear`](NotificationManager::clear).

use std::time::Duration;

use folio_core::animation::{Fade, ease_out};
use web_time::Instant;

use crate::effect::{
    Anchor, Cmd, NotifyPhase, NotifyRequest, NotifySite, OverlayId, OverlayOp, TimerName,
};

/// Default delay before the fade-in starts.
pub const DEFAULT_FADE_IN_DELAY: Duration = Duration::from_millis(10);
/// Default fade transition length.
pub const DEFAULT_FADE: Duration = Duration::from_millis(300);

/// Notification timing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationConfig {
    /// Delay between creation and fade-in (default: 10ms).
    pub fade_in_delay: Duration,
    /// Fade transition length, used both ways (default: 300ms).
    pub fade: Duration,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            fade_in_delay: DEFAULT_FADE_IN_DELAY,
            fade: DEFAULT_FADE,
        }
    }
}

impl NotificationConfig {
    /// Set the fade length.
    #[must_use]
    pub fn with_fade(mut self, fade: Duration) -> Self {
        self.fade = fade;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Pending,
    FadingIn(Instant),
    FadingOut(Instant),
}

/// A live notification.
#[derive(Debug, Clone)]
pub struct Notification {
    id: OverlayId,
    message: String,
    anchor: Anchor,
    stage: Stage,
}

impl Notification {
    /// Overlay element id.
    #[must_use]
    pub fn id(&self) -> OverlayId {
        self.id
    }

    /// Message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Screen anchor.
    #[must_use]
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }
}

const PHASES: [NotifyPhase; 3] = [NotifyPhase::FadeIn, NotifyPhase::FadeOut, NotifyPhase::Remove];

/// Owner of all live notifications.
#[derive(Debug, Clone)]
pub struct NotificationManager {
    config: NotificationConfig,
    live: Vec<(NotifySite, Notification)>,
    next_id: u64,
    shown: u64,
}

impl NotificationManager {
    /// Create a manager.
    #[must_use]
    pub fn new(config: NotificationConfig) -> Self {
        Self {
            config,
            live: Vec::new(),
            next_id: 1,
            shown: 0,
        }
    }

    /// Show a notification, replacing the site's live one.
    pub fn show(&mut self, request: NotifyRequest) -> Cmd {
        let NotifyRequest {
            site,
            anchor,
            message,
            display,
        } = request;

        let mut cmds = self.dismiss(site);

        let id = OverlayId(self.next_id);
        self.next_id += 1;
        self.shown += 1;
        tracing::debug!(target: "folio.notification", ?site, id = id.0, %message, "show");

        cmds.push(Cmd::Overlay(OverlayOp::Create {
            id,
            anchor,
            text: message.clone(),
        }));
        cmds.push(Cmd::arm(
            TimerName::Notification(site, NotifyPhase::FadeIn),
            self.config.fade_in_delay,
        ));
        cmds.push(Cmd::arm(
            TimerName::Notification(site, NotifyPhase::FadeOut),
            display,
        ));
        self.live.push((
            site,
            Notification {
                id,
                message,
                anchor,
                stage: Stage::Pending,
            },
        ));
        Cmd::batch(cmds)
    }

    /// Handle a phase timer.
    pub fn on_timer(&mut self, site: NotifySite, phase: NotifyPhase, now: Instant) -> Cmd {
        let fade = self.config.fade;
        let Some(pos) = self.live.iter().position(|(s, _)| *s == site) else {
            return Cmd::none();
        };

        match phase {
            NotifyPhase::FadeIn => {
                let n = &mut self.live[pos].1;
                n.stage = Stage::FadingIn(now);
                Cmd::Overlay(OverlayOp::SetOpacity {
                    id: n.id,
                    opacity: 1.0,
                })
            }
            NotifyPhase::FadeOut => {
                let n = &mut self.live[pos].1;
                n.stage = Stage::FadingOut(now);
                Cmd::batch(vec![
                    Cmd::cancel(TimerName::Notification(site, NotifyPhase::FadeIn)),
                    Cmd::Overlay(OverlayOp::SetOpacity {
                        id: n.id,
                        opacity: 0.0,
                    }),
                    Cmd::arm(TimerName::Notification(site, NotifyPhase::Remove), fade),
                ])
            }
            NotifyPhase::Remove => {
                let (_, n) = self.live.remove(pos);
                tracing::debug!(target: "folio.notification", ?site, id = n.id.0, "removed");
                Cmd::Overlay(OverlayOp::Remove { id: n.id })
            }
        }
    }

    /// Remove every live notification and cancel its timers.
    pub fn clear(&mut self) -> Cmd {
        let sites: Vec<NotifySite> = self.live.iter().map(|(s, _)| *s).collect();
        Cmd::batch(sites.into_iter().flat_map(|s| self.dismiss(s)).collect())
    }

    fn dismiss(&mut self, site: NotifySite) -> Vec<Cmd> {
        let Some(pos) = self.live.iter().position(|(s, _)| *s == site) else {
            return Vec::new();
        };
        let (_, old) = self.live.remove(pos);
        let mut cmds: Vec<Cmd> = PHASES
            .iter()
            .map(|p| Cmd::cancel(TimerName::Notification(site, *p)))
            .collect();
        cmds.push(Cmd::Overlay(OverlayOp::Remove { id: old.id }));
        cmds
    }

    /// Current opacity of a site's notification, for renderers that poll.
    #[must_use]
    pub fn opacity(&self, site: NotifySite, now: Instant) -> Option<f32> {
        let n = self.get(site)?;
        let mut fade = Fade::new(self.config.fade).easing(ease_out);
        Some(match n.stage {
            Stage::Pending => 0.0,
            Stage::FadingIn(since) => {
                fade.set_elapsed(now.saturating_duration_since(since));
                fade.value()
            }
            Stage::FadingOut(since) => {
                fade.set_elapsed(now.saturating_duration_since(since));
                1.0 - fade.value()
            }
        })
    }

    /// The live notification for a site.
    #[must_use]
    pub fn get(&self, site: NotifySite) -> Option<&Notification> {
        self.live.iter().find(|(s, _)| *s == site).map(|(_, n)| n)
    }

    /// Number of live notifications.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Total notifications shown.
    #[must_use]
    pub fn shown(&self) -> u64 {
        self.shown
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new(NotificationConfig::default())
    }
}
