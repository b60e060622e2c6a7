#![forbid(unsafe_code)]

//! Folio public facade crate.
//!
//! Re-exports the event types from `folio-core` and the page controller,
//! configuration, and capability traits from `folio-runtime`, plus a small
//! prelude for embedding the engine.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use folio_core::animation::Orientation;
pub use folio_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, Target};
pub use folio_core::geometry::{Point, Rect};

// --- Runtime re-exports ----------------------------------------------------

pub use folio_runtime::{
    Anchor, CapabilityError, Cmd, ConfigError, EffectStats, ElementGeometry, EngineConfig, Host,
    Lifecycle, NullHost, ObjectId, OrientationSink, OverlayDisplay, OverlayId, OverlayOp, Page,
    PageContent, PageSimulator, RecordingHost, SoundPlayer, SoundRequest,
};
pub use folio_runtime::code_tabs::CodeTab;
pub use folio_runtime::skill_cycle::Skill;

/// Clock type every `now` argument uses.
pub use web_time::Instant;

// --- Errors ---------------------------------------------------------------

/// Top-level error type for embedders.
///
/// Host capability failures never surface here; the page logs and counts
/// them (see [`EffectStats`]).
#[derive(Debug)]
pub enum Error {
    /// Configuration could not be loaded or is invalid.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for Folio APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Build a page from a validated configuration.
pub fn page<H: Host>(config: EngineConfig, content: PageContent, host: H) -> Result<Page<H>> {
    config.validate()?;
    Ok(Page::new(config, content, host))
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        EngineConfig, Error, Event, Host, Instant, KeyCode, KeyEvent, Page, PageContent, Point,
        Rect, Result, Target,
    };

    pub use crate::{core, runtime};
}

pub use folio_core as core;
pub use folio_runtime as runtime;
