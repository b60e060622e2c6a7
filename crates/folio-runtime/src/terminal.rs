#![forbid(unsafe_code)]

//! Terminal session: a miniature command interpreter.
//!
//! The session is `Passive` until activated (a click on the terminal). While
//! `Interactive` it captures key presses into a buffer and resolves submitted
//! lines against the static [`CommandRegistry`].
//!
//! # Invariants
//! 1. The buffer is empty whenever the mode is `Passive`.
//! 2. [`TimerName::TerminalInactivity`] is armed only by a submission (Enter)
//!    and each submission supersedes the previous deadline. Typing without
//!    submitting does not extend it.
//! 3. Escape and the inactivity timeout both return to `Passive`, clear the
//!    buffer, and leave no inactivity timer pending.
//! 4. History is append-only except for the `clear` command.
//!
//! # Failure Modes
//! - Unknown commands are answered with an informational `Output` entry.
//! - An empty (or whitespace-only) submission changes nothing but still
//!   re-arms the inactivity timer.

use std::time::Duration;

use folio_core::event::{KeyCode, KeyEvent};
use unicode_segmentation::UnicodeSegmentation;

use crate::cursor::{BlinkingCursor, DEFAULT_BLINK_PERIOD};
use crate::effect::{Cmd, TimerName};

// ---------------------------------------------------------------------------
// Command registry
// ---------------------------------------------------------------------------

/// What a command does when submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    /// Echo the input and print a fixed reply.
    Reply(&'static str),
    /// Wipe the history; nothing is echoed.
    ClearHistory,
    /// Flip matrix mode and report the transition.
    ToggleMatrixMode,
}

/// A registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    /// Lowercase command name.
    pub name: &'static str,
    /// Action to run.
    pub action: CommandAction,
}

const fn reply(name: &'static str, text: &'static str) -> Command {
    Command {
        name,
        action: CommandAction::Reply(text),
    }
}

static STANDARD_COMMANDS: &[Command] = &[
    reply(
        "help",
        "Available commands: help, clear, matrix, skills, about, joke, fortune",
    ),
    Command {
        name: "clear",
        action: CommandAction::ClearHistory,
    },
    Command {
        name: "matrix",
        action: CommandAction::ToggleMatrixMode,
    },
    reply(
        "skills",
        "My top skills: Problem solving, JavaScript, React, Node.js, TypeScript",
    ),
    reply(
        "about",
        "I'm a software developer passionate about creating elegant solutions to complex problems.",
    ),
    reply(
        "joke",
        "Why do programmers prefer dark mode? Because light attracts bugs!",
    ),
    reply(
        "fortune",
        "You will soon find great success in your coding endeavors.",
    ),
    reply(
        "sudo",
        "Nice try! But you don't have root privileges here 😉",
    ),
    reply(
        "exit",
        "You can check out any time you like, but you can never leave...",
    ),
    reply("hello", "Hello there! Type 'help' to see available commands."),
    reply("hi", "Hi! Type 'help' to see available commands."),
    reply(
        "42",
        "Yes, that's the answer to life, the universe, and everything!",
    ),
    reply("konami", "⬆️⬆️⬇️⬇️⬅️➡️⬅️➡️🅱️🅰️"),
    reply(
        "easteregg",
        "You found me! There are more secrets to discover...",
    ),
];

/// Banner appended when interactive mode starts.
pub const UNLOCK_BANNER: &str =
    "🔒 Terminal unlocked. Type commands and press Enter. Type 'help' for available commands.";

/// Reply when matrix mode turns on.
pub const MATRIX_ON: &str = "Entering the Matrix...";

/// Reply when matrix mode turns off.
pub const MATRIX_OFF: &str = "Matrix mode deactivated";

/// Reply for an unknown command.
#[must_use]
pub fn not_found(command: &str) -> String {
    format!("Command not found: {command}. Type 'help' for available commands.")
}

/// Immutable mapping from lowercase name to action.
#[derive(Debug, Clone, Copy)]
pub struct CommandRegistry {
    commands: &'static [Command],
}

impl CommandRegistry {
    /// The built-in command set.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            commands: STANDARD_COMMANDS,
        }
    }

    /// Look up an already normalized (trimmed, lowercase) name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<CommandAction> {
        self.commands
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.action)
    }

    /// All command names, in registry order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().map(|c| c.name)
    }

    /// Number of commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Default inactivity timeout after a submission.
pub const DEFAULT_INACTIVITY_TIMEOUT: Duration = Duration::from_secs(10);

/// Terminal configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalConfig {
    /// Time after the last submission before reverting to passive (default: 10s).
    pub inactivity_timeout: Duration,
    /// Cursor blink half-period (default: 500ms).
    pub cursor_blink: Duration,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            inactivity_timeout: DEFAULT_INACTIVITY_TIMEOUT,
            cursor_blink: DEFAULT_BLINK_PERIOD,
        }
    }
}

impl TerminalConfig {
    /// Set the inactivity timeout.
    #[must_use]
    pub fn with_inactivity_timeout(mut self, timeout: Duration) -> Self {
        self.inactivity_timeout = timeout;
        self
    }

    /// Set the cursor blink period.
    #[must_use]
    pub fn with_cursor_blink(mut self, period: Duration) -> Self {
        self.cursor_blink = period;
        self
    }
}

/// Input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Showing the skill listing; keys are ignored.
    #[default]
    Passive,
    /// Capturing keys into the command buffer.
    Interactive,
}

/// One line of terminal history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEntry {
    /// The submitted input, verbatim.
    Echo(String),
    /// A reply or informational line.
    Output(String),
}

impl HistoryEntry {
    /// The entry's text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Echo(s) | Self::Output(s) => s,
        }
    }
}

/// The terminal's interactive state.
#[derive(Debug, Clone)]
pub struct TerminalSession {
    config: TerminalConfig,
    registry: CommandRegistry,
    mode: Mode,
    buffer: String,
    history: Vec<HistoryEntry>,
    matrix_mode: bool,
    inactivity_armed: bool,
    cursor: BlinkingCursor,
}

impl TerminalSession {
    /// Create a passive session with the standard registry.
    #[must_use]
    pub fn new(config: TerminalConfig) -> Self {
        let cursor = BlinkingCursor::new(TimerName::TerminalCursor, config.cursor_blink);
        Self {
            config,
            registry: CommandRegistry::standard(),
            mode: Mode::Passive,
            buffer: String::new(),
            history: Vec::new(),
            matrix_mode: false,
            inactivity_armed: false,
            cursor,
        }
    }

    /// Start the cursor blinking.
    pub fn start(&mut self) -> Cmd {
        self.cursor.start()
    }

    /// Handle the activation trigger.
    ///
    /// Ignored when already interactive.
    pub fn activate(&mut self) -> Cmd {
        if self.mode == Mode::Interactive {
            return Cmd::none();
        }
        self.mode = Mode::Interactive;
        self.buffer.clear();
        self.history.push(HistoryEntry::Output(UNLOCK_BANNER.to_string()));
        tracing::info!(target: "folio.terminal", "interactive mode on");
        Cmd::none()
    }

    /// Handle a key event. Passive sessions ignore every key.
    pub fn on_key(&mut self, key: &KeyEvent) -> Cmd {
        if self.mode == Mode::Passive || !key.is_press() {
            return Cmd::none();
        }
        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Escape => self.deactivate("escape"),
            KeyCode::Backspace => {
                if let Some((idx, _)) = self.buffer.grapheme_indices(true).next_back() {
                    self.buffer.truncate(idx);
                }
                Cmd::none()
            }
            _ => {
                if let Some(c) = key.printable() {
                    self.buffer.push(c);
                }
                Cmd::none()
            }
        }
    }

    /// Handle the inactivity timer.
    pub fn on_inactivity_timeout(&mut self) -> Cmd {
        self.inactivity_armed = false;
        if self.mode == Mode::Interactive {
            self.deactivate("inactivity")
        } else {
            Cmd::none()
        }
    }

    /// Handle the cursor blink timer.
    pub fn on_cursor_blink(&mut self) {
        self.cursor.on_blink();
    }

    /// Append an output line (used by the passive skill listing).
    pub fn append_output(&mut self, line: impl Into<String>) {
        self.history.push(HistoryEntry::Output(line.into()));
    }

    fn submit(&mut self) -> Cmd {
        let raw = std::mem::take(&mut self.buffer);
        let command = raw.trim().to_lowercase();

        match self.registry.lookup(&command) {
            Some(CommandAction::Reply(text)) => {
                self.history.push(HistoryEntry::Echo(raw));
                self.history.push(HistoryEntry::Output(text.to_string()));
            }
            Some(CommandAction::ClearHistory) => self.history.clear(),
            Some(CommandAction::ToggleMatrixMode) => {
                let was_on = self.matrix_mode;
                self.matrix_mode = !was_on;
                self.history.push(HistoryEntry::Echo(raw));
                let text = if was_on { MATRIX_OFF } else { MATRIX_ON };
                self.history.push(HistoryEntry::Output(text.to_string()));
            }
            None if !command.is_empty() => {
                self.history.push(HistoryEntry::Echo(raw));
                self.history.push(HistoryEntry::Output(not_found(&command)));
            }
            None => {}
        }
        tracing::debug!(target: "folio.terminal", command = %command, "command submitted");

        self.inactivity_armed = true;
        Cmd::arm(TimerName::TerminalInactivity, self.config.inactivity_timeout)
    }

    fn deactivate(&mut self, reason: &'static str) -> Cmd {
        self.mode = Mode::Passive;
        self.buffer.clear();
        tracing::info!(target: "folio.terminal", reason, "interactive mode off");
        if std::mem::take(&mut self.inactivity_armed) {
            Cmd::cancel(TimerName::TerminalInactivity)
        } else {
            Cmd::none()
        }
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether the session is capturing keys.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.mode == Mode::Interactive
    }

    /// The pending input.
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// All history entries, oldest first.
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Whether matrix mode is on.
    #[must_use]
    pub fn matrix_mode(&self) -> bool {
        self.matrix_mode
    }

    /// Whether the terminal cursor is drawn.
    #[must_use]
    pub fn cursor_visible(&self) -> bool {
        self.cursor.is_visible()
    }

    /// The command registry.
    #[must_use]
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }
}

impl Default for TerminalSession {
    fn default() -> Self {
        Self::new(TerminalConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::event::Modifiers;

    fn typed(session: &mut TerminalSession, text: &str) {
        for c in text.chars() {
            session.on_key(&KeyEvent::new(KeyCode::Char(c)));
        }
    }

    fn enter(session: &mut TerminalSession) -> Cmd {
        session.on_key(&KeyEvent::new(KeyCode::Enter))
    }

    fn interactive() -> TerminalSession {
        let mut s = TerminalSession::default();
        s.activate();
        s
    }

    fn outputs_after_banner(s: &TerminalSession) -> &[HistoryEntry] {
        &s.history()[1..]
    }

    #[test]
    fn passive_ignores_keys() {
        let mut s = TerminalSession::default();
        typed(&mut s, "help");
        assert_eq!(enter(&mut s), Cmd::None);
        assert!(s.buffer().is_empty());
        assert!(s.history().is_empty());
    }

    #[test]
    fn activation_adds_banner_once() {
        let mut s = interactive();
        s.activate();
        assert_eq!(
            s.history(),
            &[HistoryEntry::Output(UNLOCK_BANNER.to_string())]
        );
        assert!(s.is_interactive());
    }

    #[test]
    fn help_is_case_insensitive() {
        let mut lower = interactive();
        typed(&mut lower, "help");
        enter(&mut lower);
        let mut upper = interactive();
        typed(&mut upper, "HELP");
        enter(&mut upper);

        let out = |s: &TerminalSession| s.history()[2].clone();
        assert_eq!(out(&lower), out(&upper));
        assert_eq!(upper.history()[1], HistoryEntry::Echo("HELP".into()));
    }

    #[test]
    fn echo_keeps_original_spacing() {
        let mut s = interactive();
        typed(&mut s, "  Sudo ");
        enter(&mut s);
        assert_eq!(
            outputs_after_banner(&s),
            &[
                HistoryEntry::Echo("  Sudo ".into()),
                HistoryEntry::Output("Nice try! But you don't have root privileges here 😉".into()),
            ]
        );
    }

    #[test]
    fn clear_empties_history() {
        let mut s = interactive();
        typed(&mut s, "joke");
        enter(&mut s);
        typed(&mut s, "clear");
        enter(&mut s);
        assert!(s.history().is_empty());
    }

    #[test]
    fn matrix_twice_round_trips_with_pre_toggle_messages() {
        let mut s = interactive();
        typed(&mut s, "matrix");
        enter(&mut s);
        assert!(s.matrix_mode());
        typed(&mut s, "matrix");
        enter(&mut s);
        assert!(!s.matrix_mode());
        assert_eq!(
            outputs_after_banner(&s),
            &[
                HistoryEntry::Echo("matrix".into()),
                HistoryEntry::Output(MATRIX_ON.into()),
                HistoryEntry::Echo("matrix".into()),
                HistoryEntry::Output(MATRIX_OFF.into()),
            ]
        );
    }

    #[test]
    fn unknown_command_reports() {
        let mut s = interactive();
        typed(&mut s, "LS -la");
        enter(&mut s);
        assert_eq!(
            s.history()[2],
            HistoryEntry::Output(
                "Command not found: ls -la. Type 'help' for available commands.".into()
            )
        );
    }

    #[test]
    fn empty_submission_changes_nothing_but_rearms() {
        let mut s = interactive();
        typed(&mut s, "   ");
        let cmd = enter(&mut s);
        assert_eq!(s.history().len(), 1);
        assert_eq!(
            cmd,
            Cmd::arm(TimerName::TerminalInactivity, DEFAULT_INACTIVITY_TIMEOUT)
        );
    }

    #[test]
    fn backspace_removes_last_grapheme() {
        let mut s = interactive();
        typed(&mut s, "hé");
        s.on_key(&KeyEvent::new(KeyCode::Backspace));
        assert_eq!(s.buffer(), "h");
        s.on_key(&KeyEvent::new(KeyCode::Backspace));
        s.on_key(&KeyEvent::new(KeyCode::Backspace));
        assert_eq!(s.buffer(), "");
    }

    #[test]
    fn shortcuts_and_named_keys_are_not_typed() {
        let mut s = interactive();
        s.on_key(&KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL));
        s.on_key(&KeyEvent::new(KeyCode::Tab));
        s.on_key(&KeyEvent::new(KeyCode::Up));
        assert!(s.buffer().is_empty());
    }

    #[test]
    fn escape_returns_to_passive_and_cancels_timer() {
        let mut s = interactive();
        typed(&mut s, "hi");
        enter(&mut s);
        typed(&mut s, "ab");
        let cmd = s.on_key(&KeyEvent::new(KeyCode::Escape));
        assert_eq!(cmd, Cmd::cancel(TimerName::TerminalInactivity));
        assert_eq!(s.mode(), Mode::Passive);
        assert!(s.buffer().is_empty());
    }

    #[test]
    fn escape_without_submission_has_nothing_to_cancel() {
        let mut s = interactive();
        assert_eq!(s.on_key(&KeyEvent::new(KeyCode::Escape)), Cmd::None);
    }

    #[test]
    fn inactivity_timeout_reverts() {
        let mut s = interactive();
        typed(&mut s, "hi");
        enter(&mut s);
        typed(&mut s, "half");
        s.on_inactivity_timeout();
        assert_eq!(s.mode(), Mode::Passive);
        assert!(s.buffer().is_empty());
    }

    #[test]
    fn registry_has_every_command() {
        let reg = CommandRegistry::standard();
        let names: Vec<_> = reg.names().collect();
        assert_eq!(
            names,
            vec![
                "help", "clear", "matrix", "skills", "about", "joke", "fortune", "sudo", "exit",
                "hello", "hi", "42", "konami", "easteregg"
            ]
        );
        assert_eq!(reg.lookup("clear"), Some(CommandAction::ClearHistory));
        assert_eq!(reg.lookup("HELP"), None);
    }
}
