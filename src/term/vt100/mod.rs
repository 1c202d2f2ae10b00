//! VT100 terminal backend
//!
//! Cursor movement, visibility and character output are written as escape
//! sequences to `out`; size and cursor queries, absolute positioning and the
//! raw mode switch go through a platform [`TerminalDevice`].

use std::io::Write;

use crate::character::CharCell;
use crate::constants::errors;
use crate::error::{ErrorType, LinerError, Result};
use crate::term::ansi;
use crate::term::{wrap_position, Position, Size, TerminalBackend};

/// OS-specific terminal operations
pub trait TerminalDevice {
    fn size(&self) -> Result<Size>;

    fn cursor(&mut self) -> Result<Position>;

    /// Absolute positioning; `position` is already inside the grid
    fn move_to(&mut self, position: Position) -> Result<()>;

    /// Save the current configuration and switch to raw input
    fn enable_raw_mode(&mut self) -> Result<()>;

    /// Restore the configuration saved by `enable_raw_mode`
    fn disable_raw_mode(&mut self) -> Result<()>;
}

/// VT100-based terminal backend implementation
pub struct Vt100Terminal<W: Write, D: TerminalDevice> {
    out: W,
    device: D,
    last_error: Option<LinerError>,
}

impl<W: Write, D: TerminalDevice> Vt100Terminal<W, D> {
    pub fn new(out: W, device: D) -> Self {
        Vt100Terminal {
            out,
            device,
            last_error: None,
        }
    }

    /// Forget a previously recorded error
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn into_parts(self) -> (W, D) {
        (self.out, self.device)
    }

    fn record<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            tracing::warn!(%err, "terminal backend error");
            self.last_error = Some(err.clone());
        }
        result
    }

    fn emit(&mut self, bytes: &[u8]) -> Result<()> {
        let result = self.out.write_all(bytes).map_err(|e| {
            LinerError::new(
                ErrorType::Io,
                errors::WRITE_FAILED,
                format!("Write failed: {e}"),
            )
        });
        self.record(result)
    }

    fn emit_str(&mut self, sequence: &str) -> Result<()> {
        self.emit(sequence.as_bytes())
    }

    fn flush_out(&mut self) -> Result<()> {
        let result = self.out.flush().map_err(|e| {
            LinerError::new(
                ErrorType::Io,
                errors::WRITE_FAILED,
                format!("Flush failed: {e}"),
            )
        });
        self.record(result)
    }
}

impl<W: Write, D: TerminalDevice> TerminalBackend for Vt100Terminal<W, D> {
    fn is_ok(&self) -> bool {
        self.last_error.is_none()
    }

    fn last_error(&self) -> Option<&LinerError> {
        self.last_error.as_ref()
    }

    fn get_size(&mut self) -> Result<Size> {
        let result = self.device.size();
        self.record(result)
    }

    fn get_cursor(&mut self) -> Result<Position> {
        // the device answers for what has actually reached the terminal
        self.flush_out()?;
        let result = self.device.cursor();
        self.record(result)
    }

    fn set_cursor(&mut self, position: Position) -> Result<()> {
        let columns = self.get_columns()?;
        self.flush_out()?;
        let result = self.device.move_to(wrap_position(position, columns));
        self.record(result)
    }

    fn put(&mut self, cell: CharCell) -> Result<()> {
        self.emit(cell.as_bytes())
    }

    fn move_left(&mut self) -> Result<()> {
        if self.get_cursor()?.col != 0 {
            self.emit_str(ansi::CURSOR_LEFT)
        } else {
            let columns = self.get_columns()?;
            self.emit_str(&ansi::format_wrap_left(columns))
        }
    }

    fn move_right(&mut self) -> Result<()> {
        let columns = self.get_columns()?;
        if self.get_cursor()?.col.saturating_add(1) != columns {
            self.emit_str(ansi::CURSOR_RIGHT)
        } else {
            self.emit_str(&ansi::format_wrap_right())
        }
    }

    fn move_down(&mut self, count: u16) -> Result<()> {
        self.emit_str(&ansi::format_move_down(count))
    }

    fn move_up(&mut self, count: u16) -> Result<()> {
        self.emit_str(&ansi::format_move_up(count))
    }

    fn move_to_column(&mut self, column: u16) -> Result<()> {
        self.emit_str(&ansi::format_move_to_column(column))
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.emit_str(ansi::SHOW_CURSOR)?;
        self.flush_out()
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.emit_str(ansi::HIDE_CURSOR)
    }

    fn enter_raw_mode(&mut self) -> Result<()> {
        self.flush_out()?;
        let result = self.device.enable_raw_mode();
        if result.is_ok() {
            tracing::debug!("terminal raw mode enabled");
        }
        self.record(result)
    }

    fn leave_raw_mode(&mut self) -> Result<()> {
        self.flush_out()?;
        let result = self.device.disable_raw_mode();
        if result.is_ok() {
            tracing::debug!("terminal raw mode disabled");
        }
        self.record(result)
    }

    fn flush(&mut self) -> Result<()> {
        self.flush_out()
    }
}
