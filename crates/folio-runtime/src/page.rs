#![forbid(unsafe_code)]

//! Page controller: owns every machine, the timer registry, and the frame
//! scheduler, and executes the commands the machines return.
//!
//! # Lifecycle
//!
//! ```text
//! Created ──mount──▶ Mounted ──unmount──▶ Unmounted
//! ```
//!
//! Events and clock advances are only processed while `Mounted`.
//!
//! # Time
//!
//! The page owns no clock. Callers pass `now` into
//! [`handle_event`](Page::handle_event) and [`advance_to`](Page::advance_to);
//! every timer and frame due at or before `now` is dispatched first, in
//! deadline order, and each handler sees its own deadline as the current
//! time. Feeding the same calls with the same instants always produces the
//! same effects.
//!
//! # Invariants
//! 1. Machines never touch the registry, scheduler, or host directly; all
//!    side effects flow through [`Cmd`] and [`execute`](Page::execute).
//! 2. After [`unmount`](Page::unmount) no timer is pending, no frame is
//!    requested, no overlay remains, and nothing fires again.
//! 3. Capability failures are logged and counted, never propagated.

use folio_core::event::{Event, Target};
use tracing::{debug, debug_span, info};
use web_time::Instant;

use crate::capability::Host;
use crate::code_tabs::{CodeTab, CodeTabs};
use crate::config::EngineConfig;
use crate::easter_egg::EasterEggs;
use crate::effect::{Cmd, ObjectId, OverlayOp, TimerName};
use crate::frame::{FrameScheduler, FrameStats};
use crate::notification::NotificationManager;
use crate::rotation::RotationAnimator;
use crate::secret_code::SecretCode;
use crate::skill_cycle::{Skill, SkillCycle};
use crate::terminal::TerminalSession;
use crate::timer::{TimerRegistry, TimerStats};
use crate::typewriter::Typewriter;

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// Resume-derived content the page animates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    /// Visible hero code tabs.
    pub code_tabs: Vec<CodeTab>,
    /// Hidden tab revealed by the red button.
    pub secret_tab: Option<CodeTab>,
    /// Skills for the passive listing.
    pub skills: Vec<Skill>,
    /// Number of pointer-tracked shapes.
    pub shape_count: usize,
}

impl PageContent {
    /// A small fixed page, handy for demos and tests.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            code_tabs: vec![
                CodeTab::new("profile.js", "const name = 'Folio';"),
                CodeTab::new("skills.js", "const skills = ['Rust'];"),
                CodeTab::new("contact.js", "const email = 'hi@example.com';"),
            ],
            secret_tab: Some(CodeTab::new("secret.js", "// you found it")),
            skills: vec![
                Skill::new("Programming", ["Python", "JavaScript", "TypeScript"]),
                Skill::new("Frameworks", ["React", "Next.js"]),
            ],
            shape_count: 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Page lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    /// Constructed, not yet mounted.
    #[default]
    Created,
    /// Processing events and time.
    Mounted,
    /// Torn down; everything is ignored.
    Unmounted,
}

/// Counters for executed side effects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectStats {
    /// Leaf commands executed.
    pub commands: u64,
    /// Sounds the host accepted.
    pub sounds_played: u64,
    /// Sounds the host rejected or could not play.
    pub sounds_failed: u64,
    /// Overlay operations the host accepted.
    pub overlay_ops: u64,
    /// Overlay operations the host rejected.
    pub overlay_failed: u64,
    /// Orientation writes.
    pub orientations: u64,
    /// Timer callbacks dispatched.
    pub timers_fired: u64,
    /// Frames dispatched.
    pub frames: u64,
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// The interactive page.
#[derive(Debug)]
pub struct Page<H: Host> {
    host: H,
    timers: TimerRegistry<TimerName>,
    frames: FrameScheduler<ObjectId>,
    secret_code: SecretCode,
    terminal: TerminalSession,
    typewriter: Typewriter,
    skills: SkillCycle,
    code_tabs: CodeTabs,
    rotation: RotationAnimator,
    notifications: NotificationManager,
    eggs: EasterEggs,
    lifecycle: Lifecycle,
    stats: EffectStats,
}

impl<H: Host> Page<H> {
    /// Build a page. Nothing runs until [`mount`](Self::mount).
    #[must_use]
    pub fn new(config: EngineConfig, content: PageContent, host: H) -> Self {
        let frame_interval = config.frame_interval();
        let EngineConfig {
            secret_code,
            terminal,
            typewriter,
            skills,
            code_tabs,
            rotation,
            notification,
            easter_eggs,
            ..
        } = config;
        Self {
            host,
            timers: TimerRegistry::new(),
            frames: FrameScheduler::new(frame_interval),
            secret_code: SecretCode::new(secret_code),
            terminal: TerminalSession::new(terminal),
            typewriter: Typewriter::new(typewriter),
            skills: SkillCycle::new(skills, content.skills),
            code_tabs: CodeTabs::new(code_tabs, content.code_tabs, content.secret_tab),
            rotation: RotationAnimator::new(rotation, content.shape_count),
            notifications: NotificationManager::new(notification),
            eggs: EasterEggs::new(easter_eggs),
            lifecycle: Lifecycle::Created,
            stats: EffectStats::default(),
        }
    }

    /// Start cursors, the typewriter, and the skill listing.
    ///
    /// Mounting twice, or after unmount, does nothing.
    pub fn mount(&mut self, now: Instant) {
        if self.lifecycle != Lifecycle::Created {
            return;
        }
        self.lifecycle = Lifecycle::Mounted;
        info!(target: "folio.page", "mounted");

        let text = self.code_tabs.active_content().unwrap_or_default().to_owned();
        let cmd = Cmd::batch(vec![
            self.terminal.start(),
            self.typewriter.start_cursor(),
            self.typewriter.set_text(text),
            self.skills.resume(),
        ]);
        self.execute(cmd, now);
    }

    /// Deliver an input event at `now`.
    ///
    /// Everything due at or before `now` is dispatched first.
    pub fn handle_event(&mut self, event: &Event, now: Instant) {
        if self.lifecycle != Lifecycle::Mounted {
            return;
        }
        self.advance_to(now);
        let cmd = self.route(event, now);
        self.execute(cmd, now);
    }

    /// Dispatch every timer and frame due at or before `now`.
    ///
    /// Timers win ties against frames.
    pub fn advance_to(&mut self, now: Instant) {
        if self.lifecycle != Lifecycle::Mounted {
            return;
        }
        loop {
            let timer = self.timers.next_deadline().filter(|d| *d <= now);
            let frame = self.frames.next_frame_at().filter(|d| *d <= now);
            match (timer, frame) {
                (None, None) => break,
                (Some(t), Some(f)) if f < t => self.run_frame(f),
                (None, Some(f)) => self.run_frame(f),
                (Some(t), _) => match self.timers.pop_due(t) {
                    Some((name, at)) => self.fire(name, at),
                    None => break,
                },
            }
        }
    }

    /// Tear down: remove overlays, cancel every timer and frame.
    ///
    /// Later events and clock advances are ignored.
    pub fn unmount(&mut self) {
        if self.lifecycle != Lifecycle::Mounted {
            self.lifecycle = Lifecycle::Unmounted;
            return;
        }
        let overlays = self.notifications.clear();
        // Cancels inside `overlays` are moot; only the removals matter.
        for cmd in overlays.flatten() {
            if let Cmd::Overlay(op) = cmd {
                self.apply_overlay(&op);
            }
        }
        let timers = self.timers.cancel_all();
        let frames = self.frames.cancel_all();
        self.lifecycle = Lifecycle::Unmounted;
        info!(target: "folio.page", timers, frames, "unmounted");
    }

    fn route(&mut self, event: &Event, now: Instant) -> Cmd {
        match event {
            Event::Key(key) => {
                let mut cmds = vec![self.secret_code.on_key(key, now), self.eggs.on_key(key)];
                if self.terminal.is_interactive() {
                    cmds.push(self.terminal.on_key(key));
                    if !self.terminal.is_interactive() {
                        cmds.push(self.skills.resume());
                    }
                }
                Cmd::batch(cmds)
            }
            Event::Click(target) => self.click(target),
            Event::DoubleClick(Target::Keyword(keyword)) => self.eggs.double_click_keyword(keyword),
            Event::DoubleClick(_) => Cmd::none(),
            Event::PointerEnter(Target::Shape(i)) => self.rotation.on_enter(ObjectId(*i)),
            Event::PointerLeave(Target::Shape(i)) => self.rotation.on_leave(ObjectId(*i)),
            Event::PointerEnter(_) | Event::PointerLeave(_) => Cmd::none(),
            Event::PointerMove(point) => self.rotation.on_pointer_move(*point, now),
        }
    }

    fn click(&mut self, target: &Target) -> Cmd {
        match target {
            Target::Terminal => {
                if self.terminal.is_interactive() {
                    return Cmd::none();
                }
                Cmd::batch(vec![self.terminal.activate(), self.skills.suspend()])
            }
            Target::RedButton => {
                self.code_tabs.click_red_button();
                Cmd::none()
            }
            Target::Tab(index) => match self.code_tabs.select(*index) {
                Some(content) => self.typewriter.set_text(content.to_owned()),
                None => Cmd::none(),
            },
            Target::Name => self.eggs.click_name(),
            Target::Heart => self.eggs.click_heart(),
            Target::Project(index) => self.eggs.click_project(*index),
            Target::Shape(_) | Target::Keyword(_) => Cmd::none(),
        }
    }

    fn fire(&mut self, name: TimerName, at: Instant) {
        self.stats.timers_fired += 1;
        let cmd = match name {
            TimerName::SecretCode => {
                self.secret_code.on_timeout(at);
                Cmd::none()
            }
            TimerName::TerminalInactivity => {
                let cmd = self.terminal.on_inactivity_timeout();
                Cmd::batch(vec![cmd, self.skills.resume()])
            }
            TimerName::TerminalCursor => {
                self.terminal.on_cursor_blink();
                Cmd::none()
            }
            TimerName::SkillStep => self.skills.on_step(),
            TimerName::TypewriterTick => self.typewriter.on_tick(),
            TimerName::TypewriterCursor => {
                self.typewriter.on_cursor_blink();
                Cmd::none()
            }
            TimerName::PointerThrottle => self.rotation.on_throttle_timer(at),
            TimerName::Notification(site, phase) => self.notifications.on_timer(site, phase, at),
            TimerName::FooterReveal => {
                self.eggs.on_footer_timeout();
                Cmd::none()
            }
            TimerName::ProjectIdle => {
                self.eggs.on_project_idle();
                Cmd::none()
            }
            TimerName::ProjectReveal => {
                self.eggs.on_project_reveal_timeout();
                Cmd::none()
            }
        };
        self.execute(cmd, at);
    }

    fn run_frame(&mut self, at: Instant) {
        for id in self.frames.begin_frame(at) {
            self.stats.frames += 1;
            let bounds = self.host.bounds(id);
            let cmd = self.rotation.on_frame(id, bounds);
            self.execute(cmd, at);
        }
    }

    /// Execute a command at `now`.
    pub fn execute(&mut self, cmd: Cmd, now: Instant) {
        if cmd.is_none() {
            return;
        }
        let _span = debug_span!(target: "folio.effect", "folio.effect", cmd_type = cmd.type_name())
            .entered();
        self.execute_inner(cmd, now);
    }

    fn execute_inner(&mut self, cmd: Cmd, now: Instant) {
        match cmd {
            Cmd::None => return,
            Cmd::Batch(cmds) => {
                for c in cmds {
                    self.execute_inner(c, now);
                }
                return;
            }
            Cmd::Arm { timer, after } => {
                self.timers.arm_after(timer, now, after);
            }
            Cmd::Every { timer, interval } => {
                self.timers.arm_every(timer, now, interval);
            }
            Cmd::Cancel(timer) => {
                self.timers.cancel(&timer);
            }
            Cmd::RequestFrame(id) => {
                self.frames.request(id, now);
            }
            Cmd::CancelFrame(id) => {
                self.frames.cancel(&id);
            }
            Cmd::Orient(id, orientation) => {
                self.host.set_orientation(id, orientation);
                self.stats.orientations += 1;
            }
            Cmd::PlaySound(sound) => match self.host.play(&sound) {
                Ok(()) => self.stats.sounds_played += 1,
                Err(err) => {
                    self.stats.sounds_failed += 1;
                    debug!(target: "folio.effect", url = %sound.url, error = %err, "sound dropped");
                }
            },
            Cmd::Overlay(op) => self.apply_overlay(&op),
            Cmd::Notify(request) => {
                let cmd = self.notifications.show(request);
                self.execute_inner(cmd, now);
            }
            Cmd::Log(line) => self.terminal.append_output(line),
        }
        self.stats.commands += 1;
    }

    fn apply_overlay(&mut self, op: &OverlayOp) {
        match self.host.apply(op) {
            Ok(()) => self.stats.overlay_ops += 1,
            Err(err) => {
                self.stats.overlay_failed += 1;
                debug!(target: "folio.effect", id = op.id().0, error = %err, "overlay op dropped");
            }
        }
    }

    // --- accessors ---------------------------------------------------------

    /// Current lifecycle stage.
    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// The host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access, for adjusting bounds between frames.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Secret code listener.
    #[must_use]
    pub fn secret_code(&self) -> &SecretCode {
        &self.secret_code
    }

    /// Terminal session.
    #[must_use]
    pub fn terminal(&self) -> &TerminalSession {
        &self.terminal
    }

    /// Hero typewriter.
    #[must_use]
    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    /// Passive skill listing.
    #[must_use]
    pub fn skills(&self) -> &SkillCycle {
        &self.skills
    }

    /// Hero code tabs.
    #[must_use]
    pub fn code_tabs(&self) -> &CodeTabs {
        &self.code_tabs
    }

    /// Rotation animator.
    #[must_use]
    pub fn rotation(&self) -> &RotationAnimator {
        &self.rotation
    }

    /// Live notifications.
    #[must_use]
    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    /// Easter egg state.
    #[must_use]
    pub fn easter_eggs(&self) -> &EasterEggs {
        &self.eggs
    }

    /// Timer registry (read-only).
    #[must_use]
    pub fn timers(&self) -> &TimerRegistry<TimerName> {
        &self.timers
    }

    /// Timer registry counters.
    #[must_use]
    pub fn timer_stats(&self) -> TimerStats {
        self.timers.stats()
    }

    /// Frame scheduler counters.
    #[must_use]
    pub fn frame_stats(&self) -> FrameStats {
        self.frames.stats()
    }

    /// Frame requests outstanding.
    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.frames.pending()
    }

    /// Effect counters.
    #[must_use]
    pub fn effect_stats(&self) -> EffectStats {
        self.stats
    }

    /// Earliest instant at which something is due, if anything.
    #[must_use]
    pub fn next_wakeup(&self) -> Option<Instant> {
        match (self.timers.next_deadline(), self.frames.next_frame_at()) {
            (Some(t), Some(f)) => Some(t.min(f)),
            (t, f) => t.or(f),
        }
    }
}
