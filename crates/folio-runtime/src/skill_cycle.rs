#![forbid(unsafe_code)]

//! Passive skill listing: type, pause, erase, advance.
//!
//! While the terminal is passive it cycles through the resume's skills. For
//! each skill the keywords appear one per type step; once all are shown the
//! cycle pauses, logs an `ls` line to the terminal, then erases keywords one
//! per erase step, and finally advances to the next skill (wrapping).
//!
//! Every step is a single [`TimerName::SkillStep`] one-shot. Suspending
//! cancels it and keeps the position; resuming arms the step for the
//! current phase again. Step delays are raised to [`MIN_PERIOD`] so a zero
//! step cannot re-arm the timer at the deadline it just fired at.

use std::time::Duration;

use crate::effect::{Cmd, TimerName};
use crate::timer::MIN_PERIOD;

/// Default delay between typed keywords.
pub const DEFAULT_TYPE_STEP: Duration = Duration::from_millis(100);
/// Default pause at full reveal.
pub const DEFAULT_PAUSE: Duration = Duration::from_secs(2);
/// Default delay between erased keywords.
pub const DEFAULT_ERASE_STEP: Duration = Duration::from_millis(50);

/// A skill and its keywords, as supplied by the resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    /// Display name.
    pub name: String,
    /// Keywords, in display order.
    pub keywords: Vec<String>,
}

impl Skill {
    /// Create a skill.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// The `ls` line logged at the end of the pause.
    #[must_use]
    pub fn listing(&self) -> String {
        format!(
            "ls {} => {}",
            self.name.to_lowercase(),
            self.keywords.join(", ")
        )
    }
}

/// Skill cycle timing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCycleConfig {
    /// Delay between typed keywords (default: 100ms).
    pub type_step: Duration,
    /// Pause at full reveal (default: 2s).
    pub pause: Duration,
    /// Delay between erased keywords (default: 50ms).
    pub erase_step: Duration,
}

impl Default for SkillCycleConfig {
    fn default() -> Self {
        Self {
            type_step: DEFAULT_TYPE_STEP,
            pause: DEFAULT_PAUSE,
            erase_step: DEFAULT_ERASE_STEP,
        }
    }
}

impl SkillCycleConfig {
    /// Set the type step.
    #[must_use]
    pub fn with_type_step(mut self, step: Duration) -> Self {
        self.type_step = step;
        self
    }

    /// Set the pause.
    #[must_use]
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Set the erase step.
    #[must_use]
    pub fn with_erase_step(mut self, step: Duration) -> Self {
        self.erase_step = step;
        self
    }
}

/// Direction of the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Adding keywords (or pausing once all are shown).
    Typing,
    /// Removing keywords.
    Erasing,
}

/// The cycling display.
#[derive(Debug, Clone)]
pub struct SkillCycle {
    config: SkillCycleConfig,
    skills: Vec<Skill>,
    index: usize,
    typed: usize,
    phase: Phase,
    running: bool,
}

impl SkillCycle {
    /// Create a stopped cycle over `skills`.
    #[must_use]
    pub fn new(config: SkillCycleConfig, skills: Vec<Skill>) -> Self {
        Self {
            config,
            skills,
            index: 0,
            typed: 0,
            phase: Phase::Typing,
            running: false,
        }
    }

    /// Start or resume cycling. An empty skill list never runs.
    pub fn resume(&mut self) -> Cmd {
        if self.running || self.skills.is_empty() {
            return Cmd::none();
        }
        self.running = true;
        Cmd::arm(TimerName::SkillStep, self.next_delay())
    }

    /// Pause cycling, keeping the current position.
    pub fn suspend(&mut self) -> Cmd {
        if !std::mem::take(&mut self.running) {
            return Cmd::none();
        }
        Cmd::cancel(TimerName::SkillStep)
    }

    /// Handle the step timer.
    pub fn on_step(&mut self) -> Cmd {
        if !self.running {
            return Cmd::none();
        }
        let Some(total) = self.skills.get(self.index).map(|s| s.keywords.len()) else {
            return Cmd::none();
        };

        let mut log = Cmd::none();
        match self.phase {
            Phase::Typing if self.typed < total => self.typed += 1,
            Phase::Typing => {
                self.phase = Phase::Erasing;
                if let Some(skill) = self.skills.get(self.index) {
                    log = Cmd::log(skill.listing());
                }
            }
            Phase::Erasing if self.typed > 0 => self.typed -= 1,
            Phase::Erasing => {
                self.index = (self.index + 1) % self.skills.len();
                self.phase = Phase::Typing;
                tracing::trace!(target: "folio.skill_cycle", index = self.index, "advanced");
            }
        }
        Cmd::batch(vec![log, Cmd::arm(TimerName::SkillStep, self.next_delay())])
    }

    fn next_delay(&self) -> Duration {
        let delay = match self.phase {
            Phase::Typing if self.typed < self.current_len() => self.config.type_step,
            Phase::Typing => self.config.pause,
            Phase::Erasing => self.config.erase_step,
        };
        delay.max(MIN_PERIOD)
    }

    fn current_len(&self) -> usize {
        self.skills
            .get(self.index)
            .map_or(0, |s| s.keywords.len())
    }

    /// The skill being shown.
    #[must_use]
    pub fn current(&self) -> Option<&Skill> {
        self.skills.get(self.index)
    }

    /// Keywords currently shown.
    #[must_use]
    pub fn visible_keywords(&self) -> &[String] {
        self.skills
            .get(self.index)
            .map_or(&[][..], |s| &s.keywords[..self.typed.min(s.keywords.len())])
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the cycle is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_skills() -> Vec<Skill> {
        vec![
            Skill::new("Programming", ["Rust", "Python"]),
            Skill::new("Tools", ["Git"]),
        ]
    }

    fn step(c: &mut SkillCycle) -> Cmd {
        c.on_step()
    }

    #[test]
    fn empty_list_never_runs() {
        let mut c = SkillCycle::new(SkillCycleConfig::default(), vec![]);
        assert_eq!(c.resume(), Cmd::None);
        assert!(!c.is_running());
    }

    #[test]
    fn full_cycle_timing_and_log() {
        let mut c = SkillCycle::new(SkillCycleConfig::default(), two_skills());
        assert_eq!(c.resume(), Cmd::arm(TimerName::SkillStep, DEFAULT_TYPE_STEP));

        assert_eq!(step(&mut c), Cmd::arm(TimerName::SkillStep, DEFAULT_TYPE_STEP));
        assert_eq!(c.visible_keywords(), ["Rust"]);
        // Second keyword shown; now the pause.
        assert_eq!(step(&mut c), Cmd::arm(TimerName::SkillStep, DEFAULT_PAUSE));
        assert_eq!(c.visible_keywords(), ["Rust", "Python"]);

        assert_eq!(
            step(&mut c),
            Cmd::batch(vec![
                Cmd::log("ls programming => Rust, Python"),
                Cmd::arm(TimerName::SkillStep, DEFAULT_ERASE_STEP),
            ])
        );
        assert_eq!(c.phase(), Phase::Erasing);

        step(&mut c);
        step(&mut c);
        assert!(c.visible_keywords().is_empty());
        // Empty: advance to the next skill.
        assert_eq!(step(&mut c), Cmd::arm(TimerName::SkillStep, DEFAULT_TYPE_STEP));
        assert_eq!(c.current().map(|s| s.name.as_str()), Some("Tools"));
        assert_eq!(c.phase(), Phase::Typing);
    }

    #[test]
    fn zero_steps_are_raised_to_min_period() {
        let config = SkillCycleConfig {
            type_step: Duration::ZERO,
            pause: Duration::ZERO,
            erase_step: Duration::ZERO,
        };
        let mut c = SkillCycle::new(config, two_skills());
        assert_eq!(c.resume(), Cmd::arm(TimerName::SkillStep, MIN_PERIOD));
        assert_eq!(step(&mut c), Cmd::arm(TimerName::SkillStep, MIN_PERIOD));
        assert_eq!(step(&mut c), Cmd::arm(TimerName::SkillStep, MIN_PERIOD));
    }

    #[test]
    fn wraps_around() {
        let mut c = SkillCycle::new(
            SkillCycleConfig::default(),
            vec![Skill::new("Only", ["x"])],
        );
        c.resume();
        for _ in 0..4 {
            step(&mut c);
        }
        assert_eq!(c.current().map(|s| s.name.as_str()), Some("Only"));
        assert_eq!(c.phase(), Phase::Typing);
    }

    #[test]
    fn suspend_keeps_position() {
        let mut c = SkillCycle::new(SkillCycleConfig::default(), two_skills());
        c.resume();
        step(&mut c);
        assert_eq!(c.suspend(), Cmd::cancel(TimerName::SkillStep));
        assert_eq!(step(&mut c), Cmd::None);
        assert_eq!(c.visible_keywords(), ["Rust"]);
        assert_eq!(c.resume(), Cmd::arm(TimerName::SkillStep, DEFAULT_TYPE_STEP));
        assert_eq!(c.suspend(), Cmd::cancel(TimerName::SkillStep));
        assert_eq!(c.suspend(), Cmd::None);
    }

    #[test]
    fn skill_without_keywords_pauses_then_advances() {
        let mut c = SkillCycle::new(
            SkillCycleConfig::default(),
            vec![Skill::new("Empty", Vec::<String>::new()), Skill::new("Next", ["a"])],
        );
        assert_eq!(c.resume(), Cmd::arm(TimerName::SkillStep, DEFAULT_PAUSE));
        assert_eq!(
            step(&mut c),
            Cmd::batch(vec![
                Cmd::log("ls empty => "),
                Cmd::arm(TimerName::SkillStep, DEFAULT_ERASE_STEP),
            ])
        );
        step(&mut c);
        assert_eq!(c.current().map(|s| s.name.as_str()), Some("Next"));
    }
}
