//! Synthetic input events, decoupled from any windowing or terminal backend.
//!
//! The host feeds [`UiEvent`]s into [`App::handle_event`](crate::app::App::handle_event).
//! Pointer events carry pre-resolved element targets: hit testing belongs to
//! the presentation layer, not this crate.

use std::ops::{BitAnd, BitOr};

use crate::page::ElementId;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key, backend-neutral. Only the keys the controllers act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Escape,
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Modifier key bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);

    /// Check whether `self` contains all the bits in `other`.
    pub fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether no modifier bits are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitAnd for Modifiers {
    type Output = Modifiers;
    fn bitand(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// KeyEvent
// ---------------------------------------------------------------------------

/// A keyboard event with key and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event.
    pub fn new(code: Key, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// A key event with no modifiers.
    pub fn plain(code: Key) -> Self {
        Self::new(code, Modifiers::NONE)
    }
}

// ---------------------------------------------------------------------------
// UiEvent
// ---------------------------------------------------------------------------

/// Top-level synthetic event.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// The document scrolled to the given offset.
    Scroll { top: i64 },
    /// The visible window height changed.
    Resize { height: i64 },
    /// A key was pressed.
    Key(KeyEvent),
    /// A pointer press. `target` is the element under the pointer, if any.
    PointerDown { target: Option<ElementId> },
    /// An activation (click) of a specific control.
    Click { target: ElementId },
    /// A field's input value changed.
    Input { field: ElementId, value: String },
    /// A field lost focus.
    Blur { field: ElementId },
    /// A checkbox was toggled.
    Toggle { field: ElementId, checked: bool },
    /// The form was submitted.
    Submit,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Modifiers ────────────────────────────────────────────────────

    #[test]
    fn modifiers_none_is_empty() {
        assert!(Modifiers::NONE.is_empty());
        assert!(!Modifiers::ALT.is_empty());
    }

    #[test]
    fn modifiers_contains() {
        let m = Modifiers::CTRL | Modifiers::ALT;
        assert!(m.contains(Modifiers::CTRL));
        assert!(m.contains(Modifiers::ALT));
        assert!(!m.contains(Modifiers::SHIFT));
    }

    #[test]
    fn modifiers_bitand() {
        let m = (Modifiers::CTRL | Modifiers::ALT) & Modifiers::ALT;
        assert_eq!(m, Modifiers::ALT);
    }

    // ── KeyEvent ─────────────────────────────────────────────────────

    #[test]
    fn key_event_plain_has_no_modifiers() {
        let ke = KeyEvent::plain(Key::Escape);
        assert_eq!(ke.code, Key::Escape);
        assert!(ke.modifiers.is_empty());
    }

    #[test]
    fn key_event_with_modifiers() {
        let ke = KeyEvent::new(Key::Char('t'), Modifiers::ALT);
        assert!(ke.modifiers.contains(Modifiers::ALT));
    }
}
