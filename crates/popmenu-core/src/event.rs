#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! The menu consumes a small, normalized event vocabulary: keyboard input,
//! pointer (mouse) input, and IME composition updates. All events derive
//! `Clone` and `PartialEq` for use in tests and pattern matching.
//!
//! # Design Notes
//!
//! - Coordinates are 0-indexed cells, origin at top-left.
//! - `KeyEventKind` defaults to `Press` when the source cannot distinguish
//!   press/repeat/release.
//! - `Modifiers` use bitflags for easy combination.
//! - IME composition is delivered as explicit phase events so consumers can
//!   suppress key handling (notably Enter) while a preedit is active.

use bitflags::bitflags;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A mouse event.
    Mouse(MouseEvent),

    /// An IME composition event.
    Ime(ImeEvent),
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// Whether this is a press, repeat, or release.
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key press event with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Set the modifiers (builder).
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the event kind (builder).
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if this event is the given character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if Ctrl is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Alt is held.
    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    /// Check if Shift is held.
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

    /// Delete key.
    Delete,

    /// Tab key.
    Tab,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,
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

/// A mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// The type of mouse event.
    pub kind: MouseEventKind,

    /// X coordinate (0-indexed, leftmost column is 0).
    pub x: u16,

    /// Y coordinate (0-indexed, topmost row is 0).
    pub y: u16,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Create a new mouse event.
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: u16, y: u16) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a mouse event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Get the position as a tuple.
    #[must_use]
    pub const fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }
}

/// The type of mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// Mouse button pressed down.
    Down(MouseButton),

    /// Mouse button released.
    Up(MouseButton),

    /// Mouse dragged while button held.
    Drag(MouseButton),

    /// Mouse moved (no button pressed).
    Moved,
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left (primary) mouse button.
    Left,

    /// Right (secondary) mouse button.
    Right,

    /// Middle mouse button (scroll wheel click).
    Middle,
}

/// An IME composition event.
///
/// Text input methods (Japanese, Chinese, Korean, ...) build text through a
/// preedit phase before committing it. Consumers must not treat keys routed
/// through an active composition as ordinary input; in particular Enter
/// confirms the preedit rather than submitting a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImeEvent {
    /// Which phase of composition this event represents.
    pub phase: ImePhase,

    /// The preedit (for `Update`) or final (for `Commit`) text.
    pub text: String,
}

impl ImeEvent {
    /// Create a new IME event.
    #[must_use]
    pub fn new(phase: ImePhase, text: impl Into<String>) -> Self {
        Self {
            phase,
            text: text.into(),
        }
    }

    /// A composition-start event.
    #[must_use]
    pub fn start() -> Self {
        Self::new(ImePhase::Start, "")
    }

    /// A preedit-update event.
    #[must_use]
    pub fn update(text: impl Into<String>) -> Self {
        Self::new(ImePhase::Update, text)
    }

    /// A commit event carrying the final text.
    #[must_use]
    pub fn commit(text: impl Into<String>) -> Self {
        Self::new(ImePhase::Commit, text)
    }

    /// A composition-cancel event.
    #[must_use]
    pub fn cancel() -> Self {
        Self::new(ImePhase::Cancel, "")
    }
}

/// The phase of an IME composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImePhase {
    /// Composition started; a preedit is now active.
    Start,

    /// The preedit text changed.
    Update,

    /// The composition was confirmed; `text` is final.
    Commit,

    /// The composition was abandoned.
    Cancel,
}
