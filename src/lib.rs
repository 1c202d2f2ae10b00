//! lineterm - interactive line input for terminals
//!
//! Reads one line at a time with in-place editing (insert anywhere,
//! backspace, left/right) and redraws only what an edit changed. Input is
//! decoded as UTF-8 from raw bytes or from terminal events; output goes
//! through a VT100 backend.

pub mod character;
pub mod compose;
pub mod config;
pub mod constants;
pub mod error;
pub mod key;
pub mod line;
pub mod liner;
pub mod normalize;
pub mod session;
pub mod stream;
pub mod term;
pub mod utf8;

#[cfg(test)]
pub mod test_utils;

pub use character::CharCell;
pub use config::{InputDecoding, LinerConfig};
pub use error::{LinerError, Result};
pub use key::{ControlKey, Key, KeySource};
pub use liner::{is_interactive, LineSource, Liner, PlainLines, StdioLiner};
pub use stream::TerminalStream;
