#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! This module defines the events the interaction engine consumes: keyboard
//! input, pointer motion, hover transitions, and clicks on the page's
//! interactive targets. The host translates whatever its platform delivers
//! (DOM events, a test script) into these values.
//!
//! # Design Notes
//!
//! - Pointer coordinates are screen pixels with the origin at the top-left,
//!   matching [`Rect`](crate::geometry::Rect).
//! - `KeyEventKind` defaults to `Press`; only presses drive the state machines.
//! - Key names follow the DOM `KeyboardEvent.key` vocabulary, see
//!   [`KeyCode::from_key_name`].

use bitflags::bitflags;

use crate::geometry::Point;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// The pointer moved to a new screen position.
    PointerMove(Point),

    /// The pointer entered an interactive target.
    PointerEnter(Target),

    /// The pointer left an interactive target.
    PointerLeave(Target),

    /// A single click on a target.
    Click(Target),

    /// A double click on a target.
    DoubleClick(Target),
}

impl Event {
    /// Convenience constructor for a plain key press.
    #[must_use]
    pub const fn key(code: KeyCode) -> Self {
        Self::Key(KeyEvent::new(code))
    }

    /// Convenience constructor for a pointer move.
    #[must_use]
    pub const fn pointer(x: f64, y: f64) -> Self {
        Self::PointerMove(Point::new(x, y))
    }
}

/// Interactive targets on the page.
///
/// Index-carrying variants refer to positions in the lists the host renders
/// (tabs, projects, shapes) in display order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// The skills terminal panel.
    Terminal,
    /// The red "close" dot on the hero code window.
    RedButton,
    /// A hero code tab.
    Tab(usize),
    /// The name heading in the hero section.
    Name,
    /// The heart button in the footer.
    Heart,
    /// A project card.
    Project(usize),
    /// A rotating 3D shape.
    Shape(usize),
    /// A skill keyword chip, carrying its label.
    Keyword(String),
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if this is a press (not a repeat or release).
    #[must_use]
    pub const fn is_press(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press)
    }

    /// The printable character carried by this key, if any.
    ///
    /// Keys held with Ctrl, Alt, or Super are shortcuts, not text.
    #[must_use]
    pub fn printable(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c)
                if !self
                    .modifiers
                    .intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::SUPER)
                    && !c.is_control() =>
            {
                Some(c)
            }
            _ => None,
        }
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Backspace key.
    Backspace,

    /// Tab key.
    Tab,

    /// Delete key.
    Delete,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,

    /// Any named key the engine does not distinguish (F-keys, Home, ...).
    Other,
}

impl KeyCode {
    /// Map a DOM `KeyboardEvent.key` value to a key code.
    ///
    /// Single characters map to [`KeyCode::Char`] verbatim (case preserved);
    /// unrecognized multi-character names map to [`KeyCode::Other`].
    #[must_use]
    pub fn from_key_name(name: &str) -> Self {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Self::Char(c);
        }
        match name {
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            "Backspace" => Self::Backspace,
            "Tab" => Self::Tab,
            "Delete" => Self::Delete,
            "ArrowUp" | "Up" => Self::Up,
            "ArrowDown" | "Down" => Self::Down,
            "ArrowLeft" | "Left" => Self::Left,
            "ArrowRight" | "Right" => Self::Right,
            _ => Self::Other,
        }
    }
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_is_char() {
        let event = KeyEvent::new(KeyCode::Char('q'));
        assert!(event.is_char('q'));
        assert!(!event.is_char('x'));
    }

    #[test]
    fn key_event_default_is_press() {
        let event = KeyEvent::new(KeyCode::Enter);
        assert!(event.is_press());
        assert!(!event.with_kind(KeyEventKind::Release).is_press());
    }

    #[test]
    fn printable_rejects_shortcuts_and_named_keys() {
        assert_eq!(KeyEvent::new(KeyCode::Char('s')).printable(), Some('s'));
        assert_eq!(
            KeyEvent::new(KeyCode::Char('S'))
                .with_modifiers(Modifiers::SHIFT)
                .printable(),
            Some('S')
        );
        assert_eq!(
            KeyEvent::new(KeyCode::Char('c'))
                .with_modifiers(Modifiers::CTRL)
                .printable(),
            None
        );
        assert_eq!(KeyEvent::new(KeyCode::Enter).printable(), None);
        assert_eq!(KeyEvent::new(KeyCode::Char('\u{7f}')).printable(), None);
    }

    #[test]
    fn key_names_map_to_codes() {
        assert_eq!(KeyCode::from_key_name("ArrowUp"), KeyCode::Up);
        assert_eq!(KeyCode::from_key_name("ArrowDown"), KeyCode::Down);
        assert_eq!(KeyCode::from_key_name("ArrowLeft"), KeyCode::Left);
        assert_eq!(KeyCode::from_key_name("ArrowRight"), KeyCode::Right);
        assert_eq!(KeyCode::from_key_name("Enter"), KeyCode::Enter);
        assert_eq!(KeyCode::from_key_name("Escape"), KeyCode::Escape);
        assert_eq!(KeyCode::from_key_name("Backspace"), KeyCode::Backspace);
        assert_eq!(KeyCode::from_key_name("F5"), KeyCode::Other);
    }

    #[test]
    fn single_character_names_preserve_case() {
        assert_eq!(KeyCode::from_key_name("b"), KeyCode::Char('b'));
        assert_eq!(KeyCode::from_key_name("B"), KeyCode::Char('B'));
        assert_eq!(KeyCode::from_key_name(" "), KeyCode::Char(' '));
        assert_eq!(KeyCode::from_key_name("é"), KeyCode::Char('é'));
    }

    #[test]
    fn modifiers_default_is_none() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
        let combined = Modifiers::SHIFT | Modifiers::CTRL;
        assert!(combined.contains(Modifiers::CTRL));
        assert!(!combined.contains(Modifiers::ALT));
    }

    #[test]
    fn event_constructors() {
        assert_eq!(
            Event::key(KeyCode::Escape),
            Event::Key(KeyEvent::new(KeyCode::Escape))
        );
        assert_eq!(
            Event::pointer(3.0, 4.0),
            Event::PointerMove(Point::new(3.0, 4.0))
        );
    }

    #[test]
    fn targets_compare_by_payload() {
        assert_eq!(Target::Shape(1), Target::Shape(1));
        assert_ne!(Target::Shape(1), Target::Shape(2));
        assert_eq!(
            Target::Keyword("React".into()),
            Target::Keyword("React".into())
        );
    }
}
