//! Key representation for line editor input
//!
//! Every backend normalizes its raw input onto one shared signed code
//! space: printable bytes keep their value (0-255), control keys get the
//! negative codes in [`codes`].

use crate::character::CharCell;
use crate::error::Result;

/// Canonical key codes shared by all backends
pub mod codes {
    pub const RETURN: i16 = -1;
    pub const BACKSPACE: i16 = -2;
    pub const ESCAPE: i16 = -3;
    pub const UP: i16 = -4;
    pub const DOWN: i16 = -5;
    pub const RIGHT: i16 = -6;
    pub const LEFT: i16 = -7;
    pub const DELETE: i16 = -8;
    pub const TAB: i16 = -9;
    /// Ctrl-C
    pub const SIGINT: i16 = -10;
    /// Ctrl-Z
    pub const SIGSTOP: i16 = -11;
    /// Ctrl-D
    pub const EOF: i16 = -12;
}

/// Non-printable keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKey {
    Return,
    Backspace,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Delete,
    Tab,
    SigInt,
    SigStop,
    Eof,
    /// A negative code outside the canonical set
    RawOther(i16),
}

impl ControlKey {
    /// The canonical code for this key
    #[must_use]
    pub fn code(self) -> i16 {
        match self {
            ControlKey::Return => codes::RETURN,
            ControlKey::Backspace => codes::BACKSPACE,
            ControlKey::Escape => codes::ESCAPE,
            ControlKey::Up => codes::UP,
            ControlKey::Down => codes::DOWN,
            ControlKey::Right => codes::RIGHT,
            ControlKey::Left => codes::LEFT,
            ControlKey::Delete => codes::DELETE,
            ControlKey::Tab => codes::TAB,
            ControlKey::SigInt => codes::SIGINT,
            ControlKey::SigStop => codes::SIGSTOP,
            ControlKey::Eof => codes::EOF,
            ControlKey::RawOther(code) => code,
        }
    }

    /// Map a negative canonical code back to its key
    #[must_use]
    pub fn from_code(code: i16) -> Self {
        match code {
            codes::RETURN => ControlKey::Return,
            codes::BACKSPACE => ControlKey::Backspace,
            codes::ESCAPE => ControlKey::Escape,
            codes::UP => ControlKey::Up,
            codes::DOWN => ControlKey::Down,
            codes::RIGHT => ControlKey::Right,
            codes::LEFT => ControlKey::Left,
            codes::DELETE => ControlKey::Delete,
            codes::TAB => ControlKey::Tab,
            codes::SIGINT => ControlKey::SigInt,
            codes::SIGSTOP => ControlKey::SigStop,
            codes::EOF => ControlKey::Eof,
            other => ControlKey::RawOther(other),
        }
    }
}

/// Represents one normalized key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A character to insert into the line
    Printable(CharCell),
    /// Everything else
    Control(ControlKey),
}

impl Key {
    /// Shorthand for a printable key from a `char`
    #[must_use]
    pub fn char(c: char) -> Self {
        Key::Printable(CharCell::from(c))
    }

    /// The canonical code of the key; printable keys report their lead byte
    #[must_use]
    pub fn code(&self) -> i16 {
        match self {
            Key::Printable(cell) => i16::from(cell.raw()[0]),
            Key::Control(control) => control.code(),
        }
    }
}

/// Anything that yields normalized keys, one per call.
/// Blocks until a key is available; reports the end of input as an
/// `ErrorType::Input` error.
pub trait KeySource {
    fn read_key(&mut self) -> Result<Key>;
}

impl From<ControlKey> for Key {
    fn from(control: ControlKey) -> Self {
        Key::Control(control)
    }
}

#[cfg(test)]
#[path = "key_tests.rs"]
mod tests;
