//! Edit session
//! Drives one line read: consumes keys, edits the line and repaints only
//! what the edit changed

/// ## session/ Invariants
///
/// - `0 <= position <= line.len()` after every key.
/// - The physical cursor is re-queried from the backend before every
///   decision that depends on it; it is never cached across keys.
/// - An edit repaints only the characters after the edit point.
/// - The cursor is hidden while repainting and shown again afterwards.
/// - A failed buffer mutation aborts the session before anything is drawn.
use crate::character::CharCell;
use crate::compose::compose;
use crate::config::LinerConfig;
use crate::error::Result;
use crate::key::{ControlKey, Key, KeySource};
use crate::line::LineBuffer;
use crate::term::TerminalBackend;

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Accepting keys
    Reading,
    /// Return was pressed; the line is complete
    Terminating,
}

/// The result of a finished session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    /// The composed line, always ending in `\n`
    pub line: String,
    /// The key source ran dry instead of delivering Return
    pub end_of_input: bool,
}

/// Holds the state of one line read
pub struct EditSession<'a, T: TerminalBackend> {
    /// The current ('virtual') line
    line: LineBuffer,
    /// The caret position within the line
    position: usize,
    terminal: &'a mut T,
    state: SessionState,
}

/// Columns a cell covers on screen
fn columns_of(cell: CharCell) -> usize {
    cell.display_width()
}

impl<'a, T: TerminalBackend> EditSession<'a, T> {
    pub fn new(terminal: &'a mut T, config: &LinerConfig) -> Result<Self> {
        Ok(EditSession {
            line: LineBuffer::with_capacity(config.initial_capacity, config.max_capacity)?,
            position: 0,
            terminal,
            state: SessionState::Reading,
        })
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn line(&self) -> &LineBuffer {
        &self.line
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Dispatch one key
    pub fn process_key(&mut self, key: Key) -> Result<SessionState> {
        if self.state == SessionState::Terminating {
            return Ok(self.state);
        }

        tracing::trace!(?key, position = self.position, size = self.line.len(), "key");

        match key {
            Key::Printable(cell) => {
                // malformed input and C0 controls are not insertable
                if cell.to_char().is_some_and(|c| !c.is_control()) {
                    self.insert(cell)?;
                }
            }
            Key::Control(ControlKey::Backspace) if self.position > 0 => self.backspace()?,
            Key::Control(ControlKey::Right) if self.position < self.line.len() => {
                self.move_right()?;
            }
            Key::Control(ControlKey::Left) if self.position > 0 => self.move_left()?,
            Key::Control(ControlKey::Return) => self.state = SessionState::Terminating,
            // Reserved: prompt input leaves job control to the caller
            Key::Control(ControlKey::SigInt | ControlKey::SigStop | ControlKey::Eof) => {}
            Key::Control(_) => {}
        }

        Ok(self.state)
    }

    fn insert(&mut self, cell: CharCell) -> Result<()> {
        let before = self.terminal.get_cursor()?;
        let columns = self.terminal.get_columns()?;

        if self.position >= self.line.len() {
            self.line.append(cell)?;
        } else {
            self.line.insert(cell, self.position)?;
        }

        // prevents blinking all over the place
        self.terminal.hide_cursor()?;
        self.terminal.put(cell)?;

        // forces the cursor to move to the next line
        if usize::from(before.col) + columns_of(cell) >= usize::from(columns) {
            self.terminal.put(CharCell::from(' '))?;
            self.terminal.move_left()?;
        }

        // we're at the right place, so remember that
        let restore = self.terminal.get_cursor()?;

        for index in self.position + 1..self.line.len() {
            self.terminal.put(self.line.cells()[index])?;
        }

        self.terminal.set_cursor(restore)?;
        self.terminal.show_cursor()?;
        self.position += 1;
        Ok(())
    }

    fn backspace(&mut self) -> Result<()> {
        self.terminal.hide_cursor()?;

        let erased = self.line.cells()[self.position - 1];
        for _ in 0..columns_of(erased) {
            self.terminal.move_left()?;
        }
        self.position -= 1;

        let restore = self.terminal.get_cursor()?;
        self.line.erase(self.position)?;

        for index in self.position..self.line.len() {
            self.terminal.put(self.line.cells()[index])?;
        }

        // everything moved left, so blank the stale last character
        for _ in 0..columns_of(erased).max(1) {
            self.terminal.put(CharCell::from(' '))?;
        }

        self.terminal.set_cursor(restore)?;
        self.terminal.show_cursor()
    }

    fn move_right(&mut self) -> Result<()> {
        let cell = self.line.cells()[self.position];
        for _ in 0..columns_of(cell) {
            self.terminal.move_right()?;
        }
        self.position += 1;
        Ok(())
    }

    fn move_left(&mut self) -> Result<()> {
        self.position -= 1;
        let cell = self.line.cells()[self.position];
        for _ in 0..columns_of(cell) {
            self.terminal.move_left()?;
        }
        Ok(())
    }

    /// Park the cursor after the line, print `terminator` and compose
    pub fn finish(mut self, terminator: &str) -> Result<String> {
        while self.position < self.line.len() {
            self.move_right()?;
        }
        for c in terminator.chars() {
            self.terminal.put(CharCell::from(c))?;
        }
        self.terminal.flush()?;
        Ok(compose(&self.line))
    }

    /// Read keys until Return or the end of input, then finish the line
    pub fn run<K: KeySource + ?Sized>(
        mut self,
        keys: &mut K,
        terminator: &str,
    ) -> Result<SessionOutcome> {
        tracing::debug!("edit session started");

        let mut end_of_input = false;
        while self.state == SessionState::Reading {
            match keys.read_key() {
                Ok(key) => {
                    self.process_key(key)?;
                }
                Err(err) if err.is_end_of_input() => {
                    end_of_input = true;
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        let line = self.finish(terminator)?;
        tracing::debug!(bytes = line.len(), end_of_input, "edit session finished");
        Ok(SessionOutcome { line, end_of_input })
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
