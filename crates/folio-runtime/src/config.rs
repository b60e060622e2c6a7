#![forbid(unsafe_code)]

//! Engine configuration.
//!
//! [`EngineConfig`] groups the per-machine configs into one value. The
//! defaults reproduce the page's stock timing exactly.
//!
//! # Loading
//!
//! With the `config-file` feature, overrides can be read from TOML.
//! Durations are whole milliseconds and every key is optional:
//!
//! ```toml
//! frame_interval_ms = 16
//!
//! [secret_code]
//! active_ms = 5000
//!
//! [terminal]
//! inactivity_ms = 10000
//!
//! [rotation]
//! smoothing = 0.1
//! scale = 10.0
//! ```
//!
//! ```rust,ignore
//! let config = EngineConfig::from_toml_file("folio.toml")?;
//! ```

#[cfg(feature = "config-file")]
use std::path::Path;
use std::time::Duration;

use folio_core::key_sequence::KeySequenceConfig;

use crate::code_tabs::CodeTabsConfig;
use crate::easter_egg::EasterEggConfig;
use crate::frame::DEFAULT_FRAME_INTERVAL;
use crate::notification::NotificationConfig;
use crate::rotation::RotationConfig;
use crate::skill_cycle::SkillCycleConfig;
use crate::terminal::TerminalConfig;
use crate::typewriter::TypewriterConfig;

// ---------------------------------------------------------------------------
// EngineConfig
// ---------------------------------------------------------------------------

/// Configuration for every machine on the page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngineConfig {
    /// Secret code listener.
    pub secret_code: KeySequenceConfig,
    /// Terminal session.
    pub terminal: TerminalConfig,
    /// Hero typewriter.
    pub typewriter: TypewriterConfig,
    /// Passive skill listing.
    pub skills: SkillCycleConfig,
    /// Hero code tabs.
    pub code_tabs: CodeTabsConfig,
    /// Pointer-tracked rotation.
    pub rotation: RotationConfig,
    /// Notification fades.
    pub notification: NotificationConfig,
    /// Small easter eggs.
    pub easter_eggs: EasterEggConfig,
    /// Frame cadence; `None` uses [`DEFAULT_FRAME_INTERVAL`].
    pub frame_interval: Option<Duration>,
}

impl EngineConfig {
    /// Effective frame cadence.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval.unwrap_or(DEFAULT_FRAME_INTERVAL)
    }

    /// Set the frame cadence.
    #[must_use]
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = Some(interval);
        self
    }

    /// Check for values no machine can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        let mut nonzero = |name: &str, d: Duration| {
            if d.is_zero() {
                errors.push(format!("{name} must be greater than zero"));
            }
        };
        nonzero("frame_interval", self.frame_interval());
        nonzero("terminal.cursor_blink", self.terminal.cursor_blink);
        nonzero("typewriter.tick_interval", self.typewriter.tick_interval);
        nonzero("typewriter.cursor_blink", self.typewriter.cursor_blink);
        nonzero("skills.type_step", self.skills.type_step);
        nonzero("skills.erase_step", self.skills.erase_step);

        if !(self.rotation.smoothing > 0.0 && self.rotation.smoothing <= 1.0) {
            errors.push(format!(
                "rotation.smoothing must be in (0, 1], got {}",
                self.rotation.smoothing
            ));
        }
        if !(self.rotation.scale.is_finite() && self.rotation.scale > 0.0) {
            errors.push(format!(
                "rotation.scale must be positive, got {}",
                self.rotation.scale
            ));
        }
        if self.code_tabs.unlock_clicks == 0 {
            errors.push("code_tabs.unlock_clicks must be at least 1".to_string());
        }
        if self.easter_eggs.heart_clicks == 0 {
            errors.push("easter_eggs.heart_clicks must be at least 1".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from a TOML string, applying overrides on top of the defaults.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let file: file::EngineFile = toml::from_str(s).map_err(ConfigError::Toml)?;
        let config = file.apply(Self::default());
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }
}

// ---------------------------------------------------------------------------
// File representation
// ---------------------------------------------------------------------------

#[cfg(feature = "config-file")]
mod file {
    use std::time::Duration;

    use serde::Deserialize;

    use super::EngineConfig;

    fn ms(v: Option<u64>, into: &mut Duration) {
        if let Some(v) = v {
            *into = Duration::from_millis(v);
        }
    }

    fn set<T>(v: Option<T>, into: &mut T) {
        if let Some(v) = v {
            *into = v;
        }
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default, deny_unknown_fields)]
    pub(super) struct EngineFile {
        frame_interval_ms: Option<u64>,
        secret_code: SecretCodeFile,
        terminal: TerminalFile,
        typewriter: TypewriterFile,
        skills: SkillsFile,
        code_tabs: CodeTabsFile,
        rotation: RotationFile,
        notification: NotificationFile,
        easter_eggs: EasterEggsFile,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default, deny_unknown_fields)]
    struct SecretCodeFile {
        active_ms: Option<u64>,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default, deny_unknown_fields)]
    struct TerminalFile {
        inactivity_ms: Option<u64>,
        cursor_blink_ms: Option<u64>,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default, deny_unknown_fields)]
    struct TypewriterFile {
        tick_ms: Option<u64>,
        cursor_blink_ms: Option<u64>,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default, deny_unknown_fields)]
    struct SkillsFile {
        type_step_ms: Option<u64>,
        pause_ms: Option<u64>,
        erase_step_ms: Option<u64>,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default, deny_unknown_fields)]
    struct CodeTabsFile {
        unlock_clicks: Option<u32>,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default, deny_unknown_fields)]
    struct RotationFile {
        smoothing: Option<f64>,
        scale: Option<f64>,
        throttle_ms: Option<u64>,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default, deny_unknown_fields)]
    struct NotificationFile {
        fade_in_delay_ms: Option<u64>,
        fade_ms: Option<u64>,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default, deny_unknown_fields)]
    struct EasterEggsFile {
        rainbow_ms: Option<u64>,
        keyword_ms: Option<u64>,
        favorite_keywords: Option<Vec<String>>,
        heart_clicks: Option<u32>,
        footer_ms: Option<u64>,
        project_sequence: Option<Vec<usize>>,
        project_idle_ms: Option<u64>,
        project_ms: Option<u64>,
    }

    impl EngineFile {
        pub(super) fn apply(self, mut c: EngineConfig) -> EngineConfig {
            if let Some(v) = self.frame_interval_ms {
                c.frame_interval = Some(Duration::from_millis(v));
            }
            ms(self.secret_code.active_ms, &mut c.secret_code.active_duration);

            ms(self.terminal.inactivity_ms, &mut c.terminal.inactivity_timeout);
            ms(self.terminal.cursor_blink_ms, &mut c.terminal.cursor_blink);

            ms(self.typewriter.tick_ms, &mut c.typewriter.tick_interval);
            ms(self.typewriter.cursor_blink_ms, &mut c.typewriter.cursor_blink);

            ms(self.skills.type_step_ms, &mut c.skills.type_step);
            ms(self.skills.pause_ms, &mut c.skills.pause);
            ms(self.skills.erase_step_ms, &mut c.skills.erase_step);

            set(self.code_tabs.unlock_clicks, &mut c.code_tabs.unlock_clicks);

            set(self.rotation.smoothing, &mut c.rotation.smoothing);
            set(self.rotation.scale, &mut c.rotation.scale);
            ms(self.rotation.throttle_ms, &mut c.rotation.throttle_interval);

            ms(self.notification.fade_in_delay_ms, &mut c.notification.fade_in_delay);
            ms(self.notification.fade_ms, &mut c.notification.fade);

            let eggs = self.easter_eggs;
            let e = &mut c.easter_eggs;
            ms(eggs.rainbow_ms, &mut e.rainbow_display);
            ms(eggs.keyword_ms, &mut e.keyword_display);
            set(eggs.favorite_keywords, &mut e.favorite_keywords);
            set(eggs.heart_clicks, &mut e.heart_clicks);
            ms(eggs.footer_ms, &mut e.footer_display);
            set(eggs.project_sequence, &mut e.project_sequence);
            ms(eggs.project_idle_ms, &mut e.project_idle);
            ms(eggs.project_ms, &mut e.project_display);
            c
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when building an engine configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config-file")]
    Toml(toml::de::Error),
    /// Values no machine can run with.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config-file")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config-file")]
            Self::Toml(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
