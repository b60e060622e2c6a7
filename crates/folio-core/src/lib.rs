#![forbid(unsafe_code)]

//! Core: input events, screen geometry, key sequences, and animation math.
//!
//! # Role in Folio
//! `folio-core` is the input layer. It owns the normalized event types the
//! page controller consumes, plus the small pure state machines (sequence
//! matching, throttling, smoothing) that have no notion of timers or effects.
//!
//! # How it fits in the system
//! The runtime (`folio-runtime`) feeds `folio-core::event::Event` values into
//! its state machines and turns their outcomes into scheduled effects. Nothing
//! in this crate schedules work; every function takes the current instant as
//! an argument and returns a decision.

pub mod animation;
pub mod event;
pub mod geometry;
pub mod key_sequence;
pub mod logging;
pub mod throttle;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace};
