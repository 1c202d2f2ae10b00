//! Test utilities
//! Shared testing helpers and mocks

use std::collections::VecDeque;

use crate::character::CharCell;
use crate::constants::errors;
use crate::error::{ErrorType, LinerError, Result};
use crate::key::{Key, KeySource};
use crate::term::{wrap_position, Position, Size, TerminalBackend};

/// One call made against the mock terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Put(CharCell),
    MoveLeft,
    MoveRight,
    MoveDown(u16),
    MoveUp(u16),
    MoveToColumn(u16),
    SetCursor(Position),
    ShowCursor,
    HideCursor,
    EnterRaw,
    LeaveRaw,
}

/// Mock terminal backend for testing
/// Simulates a grid that wraps eagerly and records all operations
pub struct MockTerminal {
    pub size: Size,
    pub cursor: Position,
    pub grid: Vec<Vec<CharCell>>,
    pub ops: Vec<Op>,
    pub cursor_queries: usize,
    pub cursor_visible: bool,
    pub raw_mode: bool,
    pub fail_raw_mode: bool,
    pub last_error: Option<LinerError>,
}

impl MockTerminal {
    /// Create a new mock terminal with specified dimensions
    pub fn new(cols: u16, rows: u16) -> Self {
        MockTerminal {
            size: Size { cols, rows },
            cursor: Position::default(),
            grid: Vec::new(),
            ops: Vec::new(),
            cursor_queries: 0,
            cursor_visible: true,
            raw_mode: false,
            fail_raw_mode: false,
            last_error: None,
        }
    }

    /// Start with the cursor somewhere else, e.g. after a prompt
    pub fn with_cursor(mut self, col: u16, row: u16) -> Self {
        self.cursor = Position::new(col, row);
        self
    }

    /// Text of one row with trailing blanks removed
    pub fn row_text(&self, row: u16) -> String {
        let text: String = self
            .grid
            .get(usize::from(row))
            .map(|cells| cells.iter().map(|cell| match cell.to_char() {
                Some(c) => c,
                None => ' ',
            }).collect())
            .unwrap_or_default();
        text.trim_end().to_string()
    }

    /// Recorded operations excluding puts
    pub fn movements(&self) -> Vec<Op> {
        self.ops
            .iter()
            .filter(|op| !matches!(op, Op::Put(_)))
            .cloned()
            .collect()
    }

    /// Clear all recorded operations
    pub fn clear(&mut self) {
        self.ops.clear();
        self.cursor_queries = 0;
    }

    fn write_cell(&mut self, cell: CharCell) {
        let row = usize::from(self.cursor.row);
        let cols = usize::from(self.size.cols);
        if self.grid.len() <= row {
            self.grid.resize(row + 1, Vec::new());
        }
        let line = &mut self.grid[row];
        if line.len() < cols {
            line.resize(cols, CharCell::EMPTY);
        }
        if let Some(slot) = line.get_mut(usize::from(self.cursor.col)) {
            *slot = cell;
        }

        let advanced = Position::new(
            self.cursor.col.saturating_add(cell.display_width() as u16),
            self.cursor.row,
        );
        self.cursor = wrap_position(advanced, self.size.cols);
    }
}

impl TerminalBackend for MockTerminal {
    fn is_ok(&self) -> bool {
        self.last_error.is_none()
    }

    fn last_error(&self) -> Option<&LinerError> {
        self.last_error.as_ref()
    }

    fn get_size(&mut self) -> Result<Size> {
        Ok(self.size)
    }

    fn get_cursor(&mut self) -> Result<Position> {
        self.cursor_queries += 1;
        Ok(self.cursor)
    }

    fn set_cursor(&mut self, position: Position) -> Result<()> {
        self.ops.push(Op::SetCursor(position));
        self.cursor = wrap_position(position, self.size.cols);
        Ok(())
    }

    fn put(&mut self, cell: CharCell) -> Result<()> {
        self.ops.push(Op::Put(cell));
        if !cell.is_empty() {
            self.write_cell(cell);
        }
        Ok(())
    }

    fn move_left(&mut self) -> Result<()> {
        self.ops.push(Op::MoveLeft);
        if self.cursor.col != 0 {
            self.cursor.col -= 1;
        } else {
            self.cursor.row = self.cursor.row.saturating_sub(1);
            self.cursor.col = self.size.cols.saturating_sub(1);
        }
        Ok(())
    }

    fn move_right(&mut self) -> Result<()> {
        self.ops.push(Op::MoveRight);
        if self.cursor.col + 1 != self.size.cols {
            self.cursor.col += 1;
        } else {
            self.cursor.row += 1;
            self.cursor.col = 0;
        }
        Ok(())
    }

    fn move_down(&mut self, count: u16) -> Result<()> {
        self.ops.push(Op::MoveDown(count));
        self.cursor.row += count;
        Ok(())
    }

    fn move_up(&mut self, count: u16) -> Result<()> {
        self.ops.push(Op::MoveUp(count));
        self.cursor.row = self.cursor.row.saturating_sub(count);
        Ok(())
    }

    fn move_to_column(&mut self, column: u16) -> Result<()> {
        self.ops.push(Op::MoveToColumn(column));
        self.cursor.col = column;
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.ops.push(Op::ShowCursor);
        self.cursor_visible = true;
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.ops.push(Op::HideCursor);
        self.cursor_visible = false;
        Ok(())
    }

    fn enter_raw_mode(&mut self) -> Result<()> {
        if self.fail_raw_mode {
            let err = LinerError::new(
                ErrorType::Mode,
                errors::RAW_MODE_FAILED,
                "Couldn't set the raw console mode",
            );
            self.last_error = Some(err.clone());
            return Err(err);
        }
        self.ops.push(Op::EnterRaw);
        self.raw_mode = true;
        Ok(())
    }

    fn leave_raw_mode(&mut self) -> Result<()> {
        self.ops.push(Op::LeaveRaw);
        self.raw_mode = false;
        Ok(())
    }
}

/// Replays a fixed list of keys, then reports the end of input
#[derive(Debug, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<Key>,
}

impl ScriptedKeys {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        ScriptedKeys {
            keys: keys.into_iter().collect(),
        }
    }

    /// Printable keys for every character of `text`
    pub fn typed(text: &str) -> Self {
        Self::new(text.chars().map(Key::char))
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn read_key(&mut self) -> Result<Key> {
        self.keys.pop_front().ok_or_else(LinerError::end_of_input)
    }
}
