#![forbid(unsafe_code)]

//! Pointer-tracked rotation of the 3D shapes.
//!
//! While a shape is hovered it runs a frame loop. On every frame the target
//! orientation is recomputed from the latest accepted pointer position and
//! the shape's bounding box:
//!
//! ```text
//! target.x = base.x - (pointer.y - center.y) / scale
//! target.y = base.y + (pointer.x - center.x) / scale
//! ```
//!
//! and the current orientation moves toward it by exponential smoothing.
//! Pointer moves pass through a leading/trailing throttle before they update
//! the stored position, independent of the frame cadence.
//!
//! # Invariants
//! 1. Only hovered shapes have frame requests outstanding; leaving cancels
//!    the request and no further frame is requested for that shape.
//! 2. The orientation is left where it was when hovering ends.
//! 3. A frame whose shape has no bounds (or before any pointer position is
//!    known) writes nothing but keeps the loop alive.

use std::time::Duration;

use folio_core::animation::{DEFAULT_SMOOTHING, Orientation, Smoother};
use folio_core::geometry::{Point, Rect};
use folio_core::throttle::{DEFAULT_THROTTLE_INTERVAL, Throttle};
use web_time::Instant;

use crate::effect::{Cmd, ObjectId, TimerName};

/// Default pixels-per-degree divisor.
pub const DEFAULT_SCALE: f64 = 10.0;

/// Rotation configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationConfig {
    /// Smoothing factor per frame (default: 0.1).
    pub smoothing: f64,
    /// Pointer offset divisor (default: 10).
    pub scale: f64,
    /// Minimum spacing of accepted pointer moves (default: 50ms).
    pub throttle_interval: Duration,
    /// Base orientation step per shape index (default: 30°, 45°).
    pub base_step: Orientation,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            smoothing: DEFAULT_SMOOTHING,
            scale: DEFAULT_SCALE,
            throttle_interval: DEFAULT_THROTTLE_INTERVAL,
            base_step: Orientation::new(30.0, 45.0),
        }
    }
}

impl RotationConfig {
    /// Set the smoothing factor.
    #[must_use]
    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Set the pointer divisor.
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set the pointer throttle interval.
    #[must_use]
    pub fn with_throttle_interval(mut self, interval: Duration) -> Self {
        self.throttle_interval = interval;
        self
    }
}

/// Per-shape rotation state.
#[derive(Debug, Clone)]
pub struct RotationState {
    base: Orientation,
    target: Orientation,
    smoother: Smoother,
    hovered: bool,
}

impl RotationState {
    fn new(base: Orientation, smoothing: f64) -> Self {
        Self {
            base,
            target: base,
            smoother: Smoother::new(smoothing, base),
            hovered: false,
        }
    }

    /// Current orientation.
    #[must_use]
    pub fn current(&self) -> Orientation {
        self.smoother.current()
    }

    /// Last computed target.
    #[must_use]
    pub fn target(&self) -> Orientation {
        self.target
    }

    /// Resting orientation.
    #[must_use]
    pub fn base(&self) -> Orientation {
        self.base
    }

    /// Whether the pointer is over this shape.
    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }
}

/// Rotation animator for a fixed set of shapes.
#[derive(Debug, Clone)]
pub struct RotationAnimator {
    config: RotationConfig,
    shapes: Vec<RotationState>,
    throttle: Throttle<Point>,
    pointer: Option<Point>,
}

impl RotationAnimator {
    /// Create an animator for `count` shapes.
    #[must_use]
    pub fn new(config: RotationConfig, count: usize) -> Self {
        let shapes = (0..count)
            .map(|i| {
                let i = i as f64;
                let base = Orientation::new(config.base_step.x * i, config.base_step.y * i);
                RotationState::new(base, config.smoothing)
            })
            .collect();
        let throttle = Throttle::new(config.throttle_interval);
        Self {
            config,
            shapes,
            throttle,
            pointer: None,
        }
    }

    /// Pointer entered a shape: start its frame loop.
    pub fn on_enter(&mut self, id: ObjectId) -> Cmd {
        let Some(shape) = self.shapes.get_mut(id.0) else {
            return Cmd::none();
        };
        if shape.hovered {
            return Cmd::none();
        }
        shape.hovered = true;
        tracing::debug!(target: "folio.rotation", shape = id.0, "hover start");
        Cmd::RequestFrame(id)
    }

    /// Pointer left a shape: stop its frame loop.
    pub fn on_leave(&mut self, id: ObjectId) -> Cmd {
        let Some(shape) = self.shapes.get_mut(id.0) else {
            return Cmd::none();
        };
        if !shape.hovered {
            return Cmd::none();
        }
        shape.hovered = false;
        tracing::debug!(target: "folio.rotation", shape = id.0, "hover end");

        let mut cmds = vec![Cmd::CancelFrame(id)];
        if !self.any_hovered() && self.throttle.has_pending() {
            self.throttle.cancel();
            cmds.push(Cmd::cancel(TimerName::PointerThrottle));
        }
        Cmd::batch(cmds)
    }

    /// Pointer moved. Ignored unless some shape is hovered.
    pub fn on_pointer_move(&mut self, point: Point, now: Instant) -> Cmd {
        if !self.any_hovered() {
            return Cmd::none();
        }
        match self.throttle.push(point, now) {
            Some(p) => {
                self.pointer = Some(p);
                Cmd::none()
            }
            None => Cmd::arm(
                TimerName::PointerThrottle,
                self.throttle.time_until_ready(now),
            ),
        }
    }

    /// Trailing edge of the pointer throttle.
    pub fn on_throttle_timer(&mut self, now: Instant) -> Cmd {
        if let Some(p) = self.throttle.poll(now) {
            self.pointer = Some(p);
        }
        if self.throttle.has_pending() {
            return Cmd::arm(
                TimerName::PointerThrottle,
                self.throttle.time_until_ready(now),
            );
        }
        Cmd::none()
    }

    /// One animation frame for `id`, given its current bounds.
    pub fn on_frame(&mut self, id: ObjectId, bounds: Option<Rect>) -> Cmd {
        let scale = self.config.scale;
        let pointer = self.pointer;
        let Some(shape) = self.shapes.get_mut(id.0) else {
            return Cmd::none();
        };
        if !shape.hovered {
            return Cmd::none();
        }

        let orient = match (bounds, pointer) {
            (Some(rect), Some(p)) => {
                let (dx, dy) = p.offset_from(rect.center());
                shape.target =
                    Orientation::new(shape.base.x - dy / scale, shape.base.y + dx / scale);
                let current = shape.smoother.step(shape.target);
                tracing::trace!(
                    target: "folio.rotation",
                    shape = id.0,
                    x = current.x,
                    y = current.y,
                    "frame"
                );
                Cmd::Orient(id, current)
            }
            _ => Cmd::none(),
        };
        Cmd::batch(vec![orient, Cmd::RequestFrame(id)])
    }

    fn any_hovered(&self) -> bool {
        self.shapes.iter().any(|s| s.hovered)
    }

    /// State of one shape.
    #[must_use]
    pub fn shape(&self, id: ObjectId) -> Option<&RotationState> {
        self.shapes.get(id.0)
    }

    /// Number of shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether there are no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Last accepted pointer position.
    #[must_use]
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }
}
