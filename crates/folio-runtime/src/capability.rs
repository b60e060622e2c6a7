#![forbid(unsafe_code)]

//! Host capabilities injected into the page.
//!
//! The engine only emits intents. Whatever renders the page implements these
//! traits: play a sound, show/update/remove an overlay, report an element's
//! bounding box, and apply an orientation to a rotating object.
//!
//! # Failure Modes
//!
//! | Capability | On error | Page behavior |
//! |------------|----------|---------------|
//! | [`SoundPlayer::play`] | `Err(CapabilityError)` | logged at `debug`, dropped |
//! | [`OverlayDisplay::apply`] | `Err(CapabilityError)` | logged at `debug`, dropped |
//! | [`ElementGeometry::bounds`] | `None` | that object's frame is skipped |
//!
//! Nothing is retried and nothing reaches the user.

use std::fmt;

use folio_core::animation::Orientation;
use folio_core::geometry::Rect;

use crate::effect::{ObjectId, OverlayOp, SoundRequest};

// ─────────────────────────────────────────────────────────────────────────────
// Error Types
// ─────────────────────────────────────────────────────────────────────────────

/// Errors a host capability may report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    /// The host cannot provide this capability at all.
    Unsupported(&'static str),
    /// Playback was refused or failed (autoplay policy, decode error, ...).
    Playback(String),
    /// The host rejected an operation (unknown element, detached document, ...).
    Rejected(String),
}

impl fmt::Display for CapabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapabilityError::Unsupported(what) => write!(f, "capability unsupported: {what}"),
            CapabilityError::Playback(msg) => write!(f, "playback failed: {msg}"),
            CapabilityError::Rejected(msg) => write!(f, "host rejected operation: {msg}"),
        }
    }
}

impl std::error::Error for CapabilityError {}

/// Result type for capability calls.
pub type CapabilityResult<T> = Result<T, CapabilityError>;

// ─────────────────────────────────────────────────────────────────────────────
// Capability traits
// ─────────────────────────────────────────────────────────────────────────────

/// Fire-and-forget sound playback.
pub trait SoundPlayer {
    /// Start playing `sound`.
    fn play(&mut self, sound: &SoundRequest) -> CapabilityResult<()>;
}

/// Transient on-screen overlays.
pub trait OverlayDisplay {
    /// Apply a create/update/remove operation.
    fn apply(&mut self, op: &OverlayOp) -> CapabilityResult<()>;
}

/// Element bounding boxes in screen coordinates.
pub trait ElementGeometry {
    /// Current bounds of `object`, or `None` if it is not in the document.
    fn bounds(&self, object: ObjectId) -> Option<Rect>;
}

/// Receiver for computed orientations.
pub trait OrientationSink {
    /// Render `object` at `orientation`.
    fn set_orientation(&mut self, object: ObjectId, orientation: Orientation);
}

/// Everything the page needs from its host.
pub trait Host: SoundPlayer + OverlayDisplay + ElementGeometry + OrientationSink {}

impl<T> Host for T where T: SoundPlayer + OverlayDisplay + ElementGeometry + OrientationSink {}

// ─────────────────────────────────────────────────────────────────────────────
// NullHost
// ─────────────────────────────────────────────────────────────────────────────

/// A host with no output: sounds are unsupported, overlays and orientations
/// are discarded, and no element has bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHost;

impl SoundPlayer for NullHost {
    fn play(&mut self, _sound: &SoundRequest) -> CapabilityResult<()> {
        Err(CapabilityError::Unsupported("sound"))
    }
}

impl OverlayDisplay for NullHost {
    fn apply(&mut self, _op: &OverlayOp) -> CapabilityResult<()> {
        Ok(())
    }
}

impl ElementGeometry for NullHost {
    fn bounds(&self, _object: ObjectId) -> Option<Rect> {
        None
    }
}

impl OrientationSink for NullHost {
    fn set_orientation(&mut self, _object: ObjectId, _orientation: Orientation) {}
}
