//! Terminal backend abstraction
//! Provides platform-agnostic interface for terminal operations

/// ## term/ Invariants
///
/// - All coordinates are 0-indexed `(column, row)`.
/// - The backend is the only source of truth for the physical cursor;
///   callers re-query it instead of caching positions.
/// - Leaving raw mode restores exactly the configuration saved on entry.
/// - Failures are returned as `LinerError` and also remembered so that
///   `is_ok()`/`last_error()` report them.
/// - Terminal code never depends on session internals.
use crate::character::CharCell;
use crate::error::{LinerError, Result};

pub mod ansi;
pub mod crossterm;
pub mod vt100;

/// Terminal size information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub cols: u16,
    pub rows: u16,
}

/// A cell on the terminal grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub col: u16,
    pub row: u16,
}

impl Position {
    #[must_use]
    pub fn new(col: u16, row: u16) -> Self {
        Self { col, row }
    }
}

/// Fold a column past the right edge onto the following rows
#[must_use]
pub fn wrap_position(mut position: Position, columns: u16) -> Position {
    if columns > 0 {
        while position.col >= columns {
            position.col -= columns;
            position.row = position.row.saturating_add(1);
        }
    }
    position
}

/// Terminal backend trait
/// All terminal backends must implement these operations
pub trait TerminalBackend {
    /// True iff the backend is initialized and no error has been recorded
    fn is_ok(&self) -> bool;

    /// The most recent recorded failure, if any
    fn last_error(&self) -> Option<&LinerError>;

    /// Number of columns and rows. A failed query is recorded like any
    /// other backend failure.
    fn get_size(&mut self) -> Result<Size>;

    /// Width of the terminal window
    fn get_columns(&mut self) -> Result<u16> {
        Ok(self.get_size()?.cols)
    }

    /// Current physical cursor position
    fn get_cursor(&mut self) -> Result<Position>;

    /// Move the cursor; a column past the right edge wraps onto later rows
    fn set_cursor(&mut self, position: Position) -> Result<()>;

    /// Print the valid prefix of the cell and advance the cursor
    fn put(&mut self, cell: CharCell) -> Result<()>;

    /// Move left, or to the end of the previous row at column 0
    fn move_left(&mut self) -> Result<()>;

    /// Move right, or to the start of the next row at the last column
    fn move_right(&mut self) -> Result<()>;

    fn move_down(&mut self, count: u16) -> Result<()>;

    fn move_up(&mut self, count: u16) -> Result<()>;

    /// Move to `column` on the current row
    fn move_to_column(&mut self, column: u16) -> Result<()>;

    fn show_cursor(&mut self) -> Result<()>;

    fn hide_cursor(&mut self) -> Result<()>;

    /// Switch to byte-by-byte input without echo
    fn enter_raw_mode(&mut self) -> Result<()>;

    /// Restore the configuration saved by `enter_raw_mode`
    fn leave_raw_mode(&mut self) -> Result<()>;

    /// Push pending output to the device
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
