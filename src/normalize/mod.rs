//! Key normalization
//! Turns a platform's raw input bytes into canonical keys

/// ## normalize/ Invariants
///
/// - Exactly one canonical code is produced per raw read (plus whatever
///   bytes the platform's extended sequence occupies).
/// - Raw platform codes never leak above this layer.
/// - Malformed UTF-8 is passed on as an empty-prefix cell, never an error.
use std::io::Read;

use crate::character::CharCell;
use crate::error::Result;
use crate::key::{codes, ControlKey, Key, KeySource};
use crate::utf8;

/// Raw codes as the platforms deliver them
pub mod raw {
    pub const ESCAPE: u8 = 27;
    pub const TAB: u8 = 9;
    /// Ctrl-C
    pub const SIGINT: u8 = 3;
    /// Ctrl-Z
    pub const SIGSTOP: u8 = 26;
    /// Ctrl-D
    pub const EOF: u8 = 4;

    pub mod unix {
        pub const RETURN: u8 = 10;
        /// Raw-mode terminals without ICRNL deliver Enter as CR
        pub const CARRIAGE_RETURN: u8 = 13;
        pub const BACKSPACE: u8 = 127;
        pub const CSI: u8 = b'[';
        pub const SS3: u8 = b'O';
        pub const UP: u8 = b'A';
        pub const DOWN: u8 = b'B';
        pub const RIGHT: u8 = b'C';
        pub const LEFT: u8 = b'D';
        /// `ESC [ 3 ~`
        pub const DELETE: u8 = b'3';
        pub const DELETE_TERMINATOR: u8 = b'~';

        /// CSI parameter bytes (`0-9 : ; < = > ?`)
        pub const PARAMETER: std::ops::RangeInclusive<u8> = 0x30..=0x3F;
        /// CSI intermediate bytes (space through `/`)
        pub const INTERMEDIATE: std::ops::RangeInclusive<u8> = 0x20..=0x2F;
        /// CSI final bytes (`@` through `~`)
        pub const FINAL: std::ops::RangeInclusive<u8> = 0x40..=0x7E;
        /// Longest CSI body read before giving up on a final byte
        pub const MAX_SEQUENCE: usize = 16;
    }

    pub mod windows {
        pub const RETURN: u8 = 13;
        pub const BACKSPACE: u8 = 8;
        /// Prefixes announcing an extended key
        pub const EXTENDED: [u8; 2] = [0, 224];
        pub const UP: u8 = b'H';
        pub const DOWN: u8 = b'P';
        pub const RIGHT: u8 = b'M';
        pub const LEFT: u8 = b'K';
        pub const DELETE: u8 = 83;
    }
}

/// Which platform's raw key layout to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawKeyTable {
    /// VT100 style: arrows arrive as `ESC [ A..D`
    Unix,
    /// conio style: arrows arrive as `0`/`224` followed by a scan code
    Windows,
}

impl RawKeyTable {
    /// The layout of the platform this crate was built for
    #[must_use]
    pub fn native() -> Self {
        if cfg!(windows) {
            RawKeyTable::Windows
        } else {
            RawKeyTable::Unix
        }
    }

    /// Parse a table name as used by `LINETERM_KEYS`
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "unix" | "vt100" => Some(RawKeyTable::Unix),
            "windows" | "conio" => Some(RawKeyTable::Windows),
            _ => None,
        }
    }
}

/// Blocking single-byte reads from the input device
pub trait ByteSource {
    /// Blocks until a byte is available
    fn read_byte(&mut self) -> Result<u8>;
}

impl<R: Read> ByteSource for R {
    fn read_byte(&mut self) -> Result<u8> {
        let mut byte = [0u8; 1];
        self.read_exact(&mut byte)?;
        Ok(byte[0])
    }
}

/// Reads raw bytes and yields canonical codes and keys
pub struct KeyNormalizer<S: ByteSource> {
    source: S,
    table: RawKeyTable,
    /// A byte read ahead while probing for an escape sequence
    pending: Option<u8>,
}

impl<S: ByteSource> KeyNormalizer<S> {
    pub fn new(source: S, table: RawKeyTable) -> Self {
        Self {
            source,
            table,
            pending: None,
        }
    }

    #[must_use]
    pub fn table(&self) -> RawKeyTable {
        self.table
    }

    fn next_byte(&mut self) -> Result<u8> {
        match self.pending.take() {
            Some(byte) => Ok(byte),
            None => self.source.read_byte(),
        }
    }

    /// Read one raw key and map it onto the canonical code space.
    /// Non-negative results are raw byte values.
    pub fn next_code(&mut self) -> Result<i16> {
        let byte = self.next_byte()?;
        match self.table {
            RawKeyTable::Unix => self.normalize_unix(byte),
            RawKeyTable::Windows => self.normalize_windows(byte),
        }
    }

    fn normalize_common(byte: u8) -> Option<i16> {
        match byte {
            raw::TAB => Some(codes::TAB),
            raw::SIGINT => Some(codes::SIGINT),
            raw::SIGSTOP => Some(codes::SIGSTOP),
            raw::EOF => Some(codes::EOF),
            _ => None,
        }
    }

    fn normalize_unix(&mut self, byte: u8) -> Result<i16> {
        use raw::unix;

        match byte {
            unix::RETURN | unix::CARRIAGE_RETURN => Ok(codes::RETURN),
            unix::BACKSPACE => Ok(codes::BACKSPACE),
            raw::ESCAPE => match self.next_byte()? {
                unix::CSI => self.read_csi(),
                unix::SS3 => {
                    let selector = self.next_byte()?;
                    Ok(Self::arrow(selector).unwrap_or_else(|| {
                        tracing::trace!(selector, "unknown SS3 sequence");
                        codes::ESCAPE
                    }))
                }
                next => {
                    // a lone escape; the byte belongs to the next key
                    self.pending = Some(next);
                    Ok(codes::ESCAPE)
                }
            },
            other => Ok(Self::normalize_common(other).unwrap_or(i16::from(other))),
        }
    }

    fn arrow(selector: u8) -> Option<i16> {
        use raw::unix;

        match selector {
            unix::UP => Some(codes::UP),
            unix::DOWN => Some(codes::DOWN),
            unix::RIGHT => Some(codes::RIGHT),
            unix::LEFT => Some(codes::LEFT),
            _ => None,
        }
    }

    /// Consume a CSI body up to and including its final byte. Only plain
    /// arrows and `3~` have a canonical code; any other complete sequence
    /// is Escape, so none of its bytes end up as text.
    fn read_csi(&mut self) -> Result<i16> {
        use raw::unix;

        let mut parameters = Vec::new();
        let mut intermediate = false;

        for _ in 0..unix::MAX_SEQUENCE {
            let byte = self.next_byte()?;
            if unix::PARAMETER.contains(&byte) && !intermediate {
                parameters.push(byte);
            } else if unix::INTERMEDIATE.contains(&byte) {
                intermediate = true;
            } else if unix::FINAL.contains(&byte) {
                let code = match (parameters.as_slice(), intermediate, byte) {
                    ([], false, selector) => Self::arrow(selector),
                    ([unix::DELETE], false, unix::DELETE_TERMINATOR) => Some(codes::DELETE),
                    _ => None,
                };
                return Ok(code.unwrap_or_else(|| {
                    tracing::trace!(?parameters, last = byte, "unmapped CSI sequence");
                    codes::ESCAPE
                }));
            } else {
                // not part of a sequence; it starts the next key
                self.pending = Some(byte);
                return Ok(codes::ESCAPE);
            }
        }

        tracing::trace!("CSI sequence without a final byte");
        Ok(codes::ESCAPE)
    }

    fn normalize_windows(&mut self, byte: u8) -> Result<i16> {
        use raw::windows;

        if windows::EXTENDED.contains(&byte) {
            // the code describing the real key
            let code = match self.next_byte()? {
                windows::UP => codes::UP,
                windows::DOWN => codes::DOWN,
                windows::RIGHT => codes::RIGHT,
                windows::LEFT => codes::LEFT,
                windows::DELETE => codes::DELETE,
                other => i16::from(other),
            };
            return Ok(code);
        }

        match byte {
            raw::ESCAPE => Ok(codes::ESCAPE),
            windows::BACKSPACE => Ok(codes::BACKSPACE),
            windows::RETURN => Ok(codes::RETURN),
            other => Ok(Self::normalize_common(other).unwrap_or(i16::from(other))),
        }
    }

    /// Assemble the next key: a control key, or one character read byte by
    /// byte until a 2, 3 or 4 byte rule matches (at most 4 bytes).
    pub fn next_key(&mut self) -> Result<Key> {
        let code = self.next_code()?;
        if code < 0 {
            return Ok(Key::Control(ControlKey::from_code(code)));
        }

        let mut bytes = [0u8; 4];
        // non-negative codes are always raw byte values
        bytes[0] = code as u8;

        if utf8::is_1_byte_utf8(&bytes) || !(0xC2..=0xF4).contains(&bytes[0]) {
            return Ok(Key::Printable(CharCell::from_bytes(&bytes)));
        }

        bytes[1] = self.next_byte()?;
        if utf8::is_2_byte_utf8(&bytes) {
            return Ok(Key::Printable(CharCell::from_bytes(&bytes)));
        }

        bytes[2] = self.next_byte()?;
        if utf8::is_3_byte_utf8(&bytes) {
            return Ok(Key::Printable(CharCell::from_bytes(&bytes)));
        }

        bytes[3] = self.next_byte()?;
        Ok(Key::Printable(CharCell::from_bytes(&bytes)))
    }
}

impl<S: ByteSource> KeySource for KeyNormalizer<S> {
    fn read_key(&mut self) -> Result<Key> {
        let key = self.next_key()?;
        tracing::trace!(?key, "normalized key");
        Ok(key)
    }
}
