//! UTF-8 byte classification
//!
//! Decides from up to 4 leading bytes whether they form a well-formed
//! 1, 2, 3 or 4 byte UTF-8 sequence. Overlong encodings and UTF-16
//! surrogate halves are rejected. Missing bytes count as `0x00`, which is
//! never a continuation byte, so short input simply fails the longer rules.

/// Width of a well-formed UTF-8 sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf8Width {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
}

impl Utf8Width {
    /// Number of bytes in the sequence
    #[must_use]
    pub fn len(self) -> usize {
        self as usize
    }
}

#[inline]
fn byte_at(bytes: &[u8], index: usize) -> u8 {
    bytes.get(index).copied().unwrap_or(0)
}

#[inline]
fn is_continuation(byte: u8) -> bool {
    (0x80..=0xBF).contains(&byte)
}

/// ASCII, including the control characters
#[must_use]
pub fn is_1_byte_utf8(bytes: &[u8]) -> bool {
    !bytes.is_empty() && bytes[0] <= 0x7F
}

/// Non-overlong 2-byte sequence
#[must_use]
pub fn is_2_byte_utf8(bytes: &[u8]) -> bool {
    (0xC2..=0xDF).contains(&byte_at(bytes, 0)) && is_continuation(byte_at(bytes, 1))
}

#[must_use]
pub fn is_3_byte_utf8(bytes: &[u8]) -> bool {
    let (lead, second, third) = (byte_at(bytes, 0), byte_at(bytes, 1), byte_at(bytes, 2));

    let second_ok = match lead {
        // excluding overlongs
        0xE0 => (0xA0..=0xBF).contains(&second),
        0xE1..=0xEC | 0xEE | 0xEF => is_continuation(second),
        // excluding surrogates
        0xED => (0x80..=0x9F).contains(&second),
        _ => false,
    };

    second_ok && is_continuation(third)
}

#[must_use]
pub fn is_4_byte_utf8(bytes: &[u8]) -> bool {
    let lead = byte_at(bytes, 0);
    let second = byte_at(bytes, 1);

    let second_ok = match lead {
        // planes 1-3
        0xF0 => (0x90..=0xBF).contains(&second),
        // planes 4-15
        0xF1..=0xF3 => is_continuation(second),
        // plane 16
        0xF4 => (0x80..=0x8F).contains(&second),
        _ => false,
    };

    second_ok && is_continuation(byte_at(bytes, 2)) && is_continuation(byte_at(bytes, 3))
}

/// Classify the sequence starting at `bytes[0]`.
/// Returns `None` when no rule matches.
#[must_use]
pub fn classify(bytes: &[u8]) -> Option<Utf8Width> {
    if is_1_byte_utf8(bytes) {
        Some(Utf8Width::One)
    } else if is_2_byte_utf8(bytes) {
        Some(Utf8Width::Two)
    } else if is_3_byte_utf8(bytes) {
        Some(Utf8Width::Three)
    } else if is_4_byte_utf8(bytes) {
        Some(Utf8Width::Four)
    } else {
        None
    }
}

/// Number of valid bytes at the start of `bytes`, 0 if malformed
#[must_use]
pub fn valid_len(bytes: &[u8]) -> usize {
    classify(bytes).map_or(0, Utf8Width::len)
}

/// True iff `text` partitions completely into well-formed sequences
#[must_use]
pub fn is_valid_utf8(text: &[u8]) -> bool {
    let mut rest = text;

    while !rest.is_empty() {
        match classify(rest) {
            Some(width) if width.len() <= rest.len() => rest = &rest[width.len()..],
            _ => return false,
        }
    }

    true
}
