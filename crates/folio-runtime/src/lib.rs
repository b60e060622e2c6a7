#![forbid(unsafe_code)]

//! Folio Runtime
//!
//! The orchestration layer of the Folio interaction engine: named timers, a
//! frame scheduler, the page's interactive state machines, and the page
//! controller that wires them together.
//!
//! # Key Components
//!
//! - [`Page`] - Owns every machine and executes their commands
//! - [`Cmd`] - Side effects requested by machine transitions
//! - [`TimerRegistry`] - Named, cancellable one-shot and periodic timers
//! - [`FrameScheduler`] - Per-object animation frame requests
//! - [`Host`] - Capability traits the embedding environment implements
//! - [`PageSimulator`] - Deterministic driver with a virtual clock
//!
//! # Role in Folio
//! `folio-runtime` consumes events from `folio-core`, routes them to the
//! machine that owns them, and turns the returned commands into timer arms,
//! frame requests, and host calls. Machines are plain state: they never see
//! the registry, the scheduler, or the host.

pub mod capability;
pub mod code_tabs;
pub mod config;
pub mod cursor;
pub mod debug_trace;
pub mod easter_egg;
pub mod effect;
pub mod frame;
pub mod notification;
pub mod page;
pub mod rotation;
pub mod secret_code;
pub mod simulator;
pub mod skill_cycle;
pub mod terminal;
pub mod timer;
pub mod typewriter;

pub use capability::{
    CapabilityError, CapabilityResult, ElementGeometry, Host, NullHost, OrientationSink,
    OverlayDisplay, SoundPlayer,
};
pub use config::{ConfigError, EngineConfig};
pub use effect::{
    Anchor, Cmd, NotifyPhase, NotifyRequest, NotifySite, ObjectId, OverlayId, OverlayOp,
    SoundRequest, TimerName,
};
pub use frame::{FrameScheduler, FrameStats};
pub use page::{EffectStats, Lifecycle, Page, PageContent};
pub use simulator::{HostRecord, PageSimulator, RecordingHost};
pub use timer::{TimerRegistry, TimerStats};
