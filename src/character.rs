use std::fmt::{self, Display, Formatter};
use unicode_width::UnicodeWidthChar;

use crate::utf8;

/// One decoded character: the UTF-8 encoding of a single Unicode scalar,
/// stored inline in 4 bytes. The all-zero value is the empty sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CharCell {
    bytes: [u8; 4],
}

impl CharCell {
    /// Empty sentinel, used for cleared buffer slots
    pub const EMPTY: CharCell = CharCell { bytes: [0; 4] };

    /// Copy up to 4 bytes from `source`, stopping early at a zero byte
    #[must_use]
    pub fn from_bytes(source: &[u8]) -> Self {
        let mut bytes = [0u8; 4];
        for (slot, &byte) in bytes.iter_mut().zip(source.iter().take_while(|&&b| b != 0)) {
            *slot = byte;
        }
        CharCell { bytes }
    }

    /// Raw storage, including the bytes past the valid prefix
    #[must_use]
    pub fn raw(&self) -> [u8; 4] {
        self.bytes
    }

    /// Length of the valid UTF-8 prefix; 0 for the sentinel or malformed cells
    #[must_use]
    pub fn len(&self) -> usize {
        if self.bytes[0] == 0 {
            return 0;
        }
        utf8::valid_len(&self.bytes)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The valid-length prefix of the stored bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len()]
    }

    #[must_use]
    pub fn to_char(&self) -> Option<char> {
        std::str::from_utf8(self.as_bytes())
            .ok()
            .and_then(|s| s.chars().next())
    }

    /// Number of terminal columns the character occupies
    #[must_use]
    pub fn display_width(&self) -> usize {
        self.to_char()
            .and_then(UnicodeWidthChar::width)
            .unwrap_or(0)
    }
}

impl Display for CharCell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.to_char() {
            Some(c) => write!(f, "{}", c),
            None => Ok(()),
        }
    }
}

impl From<char> for CharCell {
    fn from(c: char) -> Self {
        let mut bytes = [0u8; 4];
        c.encode_utf8(&mut bytes);
        CharCell { bytes }
    }
}

#[cfg(test)]
#[path = "character_tests.rs"]
mod tests;
