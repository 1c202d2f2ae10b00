//! Serializes a finished line into newline-terminated UTF-8

use crate::line::LineBuffer;

/// Compose the user's input as a single UTF-8 string ending in `\n`.
/// Cells without a valid prefix contribute nothing.
#[must_use]
pub fn compose(line: &LineBuffer) -> String {
    let length: usize = line.iter().map(|cell| cell.len()).sum();

    let mut bytes = Vec::with_capacity(length + 1);
    for cell in line.iter() {
        bytes.extend_from_slice(cell.as_bytes());
    }
    bytes.push(b'\n');

    // every cell contributes a well-formed sequence, so this never replaces anything
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

#[cfg(test)]
#[path = "compose_tests.rs"]
mod tests;
