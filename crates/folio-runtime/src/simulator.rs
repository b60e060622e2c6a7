#![forbid(unsafe_code)]

//! Deterministic page simulator for testing.
//!
//! `PageSimulator` runs a [`Page`] against a virtual clock and a
//! [`RecordingHost`], so scenarios spanning seconds of page time run
//! instantly and always produce the same effects.
//!
//! # Example
//!
//! ```ignore
//! use folio_runtime::simulator::PageSimulator;
//!
//! let mut sim = PageSimulator::sample();
//! sim.mount();
//! sim.send(Event::Click(Target::Terminal));
//! sim.type_text("help");
//! sim.send(Event::key(KeyCode::Enter));
//! sim.advance(Duration::from_secs(10));
//! assert!(!sim.page().terminal().is_interactive());
//! ```

use std::collections::HashMap;
use std::time::Duration;

use folio_core::animation::Orientation;
use folio_core::event::{Event, KeyCode};
use folio_core::geometry::Rect;
use web_time::Instant;

use crate::capability::{
    CapabilityError, CapabilityResult, ElementGeometry, OrientationSink, OverlayDisplay,
    SoundPlayer,
};
use crate::config::EngineConfig;
use crate::effect::{ObjectId, OverlayId, OverlayOp, SoundRequest};
use crate::page::{Page, PageContent};

// ---------------------------------------------------------------------------
// RecordingHost
// ---------------------------------------------------------------------------

/// Record of a host call made during simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum HostRecord {
    /// A sound was requested (recorded whether or not playback succeeded).
    Sound(SoundRequest),
    /// An overlay operation was applied.
    Overlay(OverlayOp),
    /// An orientation was written.
    Orient(ObjectId, Orientation),
}

/// A host that records every call.
///
/// Element bounds are configured per object; sound playback can be made to
/// fail to exercise the drop path.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    records: Vec<HostRecord>,
    bounds: HashMap<ObjectId, Rect>,
    live_overlays: Vec<OverlayId>,
    fail_sounds: bool,
}

impl RecordingHost {
    /// Create an empty host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Give an element bounds.
    pub fn set_bounds(&mut self, object: ObjectId, rect: Rect) {
        self.bounds.insert(object, rect);
    }

    /// Make every sound request fail.
    pub fn set_fail_sounds(&mut self, fail: bool) {
        self.fail_sounds = fail;
    }

    /// Every recorded call, in order.
    #[must_use]
    pub fn records(&self) -> &[HostRecord] {
        &self.records
    }

    /// Sound requests, in order.
    pub fn sounds(&self) -> impl Iterator<Item = &SoundRequest> {
        self.records.iter().filter_map(|r| match r {
            HostRecord::Sound(s) => Some(s),
            _ => None,
        })
    }

    /// Overlay operations, in order.
    pub fn overlay_ops(&self) -> impl Iterator<Item = &OverlayOp> {
        self.records.iter().filter_map(|r| match r {
            HostRecord::Overlay(op) => Some(op),
            _ => None,
        })
    }

    /// Overlays created and not yet removed.
    #[must_use]
    pub fn live_overlays(&self) -> &[OverlayId] {
        &self.live_overlays
    }

    /// Last orientation written for an element.
    #[must_use]
    pub fn orientation(&self, object: ObjectId) -> Option<Orientation> {
        self.records.iter().rev().find_map(|r| match r {
            HostRecord::Orient(id, o) if *id == object => Some(*o),
            _ => None,
        })
    }

    /// Number of orientation writes.
    #[must_use]
    pub fn orientation_writes(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r, HostRecord::Orient(..)))
            .count()
    }

    /// Forget recorded calls (bounds and live overlays are kept).
    pub fn clear_records(&mut self) {
        self.records.clear();
    }
}

impl SoundPlayer for RecordingHost {
    fn play(&mut self, sound: &SoundRequest) -> CapabilityResult<()> {
        self.records.push(HostRecord::Sound(sound.clone()));
        if self.fail_sounds {
            return Err(CapabilityError::Playback(format!(
                "autoplay blocked: {}",
                sound.url
            )));
        }
        Ok(())
    }
}

impl OverlayDisplay for RecordingHost {
    fn apply(&mut self, op: &OverlayOp) -> CapabilityResult<()> {
        match op {
            OverlayOp::Create { id, .. } => {
                if self.live_overlays.contains(id) {
                    return Err(CapabilityError::Rejected(format!("overlay {} exists", id.0)));
                }
                self.live_overlays.push(*id);
            }
            OverlayOp::SetOpacity { id, .. } | OverlayOp::Remove { id }
                if !self.live_overlays.contains(id) =>
            {
                return Err(CapabilityError::Rejected(format!("no overlay {}", id.0)));
            }
            OverlayOp::SetOpacity { .. } => {}
            OverlayOp::Remove { id } => self.live_overlays.retain(|o| o != id),
        }
        self.records.push(HostRecord::Overlay(op.clone()));
        Ok(())
    }
}

impl ElementGeometry for RecordingHost {
    fn bounds(&self, object: ObjectId) -> Option<Rect> {
        self.bounds.get(&object).copied()
    }
}

impl OrientationSink for RecordingHost {
    fn set_orientation(&mut self, object: ObjectId, orientation: Orientation) {
        self.records.push(HostRecord::Orient(object, orientation));
    }
}

// ---------------------------------------------------------------------------
// PageSimulator
// ---------------------------------------------------------------------------

/// Deterministic driver for [`Page`].
///
/// The clock only moves through [`advance`](Self::advance); events are
/// delivered at the current virtual instant.
#[derive(Debug)]
pub struct PageSimulator {
    page: Page<RecordingHost>,
    origin: Instant,
    elapsed: Duration,
}

impl PageSimulator {
    /// Create a simulator.
    #[must_use]
    pub fn new(config: EngineConfig, content: PageContent, host: RecordingHost) -> Self {
        Self {
            page: Page::new(config, content, host),
            origin: Instant::now(),
            elapsed: Duration::ZERO,
        }
    }

    /// Simulator over [`PageContent::sample`] with default config.
    #[must_use]
    pub fn sample() -> Self {
        Self::new(
            EngineConfig::default(),
            PageContent::sample(),
            RecordingHost::new(),
        )
    }

    /// Current virtual instant.
    #[must_use]
    pub fn now(&self) -> Instant {
        self.origin + self.elapsed
    }

    /// Virtual time since creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Mount the page at the current instant.
    pub fn mount(&mut self) {
        let now = self.now();
        self.page.mount(now);
    }

    /// Unmount the page.
    pub fn unmount(&mut self) {
        self.page.unmount();
    }

    /// Deliver an event at the current instant.
    pub fn send(&mut self, event: Event) {
        let now = self.now();
        self.page.handle_event(&event, now);
    }

    /// Deliver several events at the current instant.
    pub fn send_all(&mut self, events: impl IntoIterator<Item = Event>) {
        for event in events {
            self.send(event);
        }
    }

    /// Type each character of `text` as a key press.
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send(Event::key(KeyCode::Char(c)));
        }
    }

    /// Move the clock forward, dispatching everything that comes due.
    pub fn advance(&mut self, by: Duration) {
        self.elapsed += by;
        let now = self.now();
        self.page.advance_to(now);
    }

    /// Move the clock forward in fixed steps.
    pub fn advance_steps(&mut self, step: Duration, count: usize) {
        for _ in 0..count {
            self.advance(step);
        }
    }

    /// The page.
    #[must_use]
    pub fn page(&self) -> &Page<RecordingHost> {
        &self.page
    }

    /// The recording host.
    #[must_use]
    pub fn host(&self) -> &RecordingHost {
        self.page.host()
    }

    /// Mutable host access.
    pub fn host_mut(&mut self) -> &mut RecordingHost {
        self.page.host_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::Anchor;

    #[test]
    fn virtual_clock_advances_only_on_request() {
        let mut sim = PageSimulator::sample();
        let t0 = sim.now();
        sim.mount();
        assert_eq!(sim.now(), t0);
        sim.advance(Duration::from_millis(250));
        assert_eq!(sim.now(), t0 + Duration::from_millis(250));
    }

    #[test]
    fn recording_host_tracks_overlays() {
        let mut host = RecordingHost::new();
        let id = OverlayId(7);
        assert!(host
            .apply(&OverlayOp::Create {
                id,
                anchor: Anchor::Center,
                text: "x".into()
            })
            .is_ok());
        assert_eq!(host.live_overlays(), &[id]);
        assert!(host.apply(&OverlayOp::SetOpacity { id, opacity: 1.0 }).is_ok());
        assert!(host.apply(&OverlayOp::Remove { id }).is_ok());
        assert!(host.live_overlays().is_empty());
        assert!(host.apply(&OverlayOp::Remove { id }).is_err());
        assert_eq!(host.overlay_ops().count(), 3);
    }

    #[test]
    fn failing_sounds_are_still_recorded() {
        let mut host = RecordingHost::new();
        host.set_fail_sounds(true);
        assert!(matches!(
            host.play(&SoundRequest::new("a.mp3", 0.2)),
            Err(CapabilityError::Playback(_))
        ));
        assert_eq!(host.sounds().count(), 1);
    }
}
