//! Crossterm-based terminal device
//! Cross-platform raw mode, size and cursor queries using crossterm

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute, terminal,
};
use std::io::{stdout, IsTerminal, Stdout};

use crate::constants::errors;
use crate::error::{ErrorType, LinerError, Result};
use crate::key::{ControlKey, Key, KeySource};
use crate::term::vt100::{TerminalDevice, Vt100Terminal};
use crate::term::{Position, Size};

/// Crossterm-based device implementation
pub struct CrosstermDevice {
    raw_mode_enabled: bool,
}

impl CrosstermDevice {
    /// Fails when stdout is not attached to a terminal
    pub fn new() -> Result<Self> {
        if !stdout().is_terminal() {
            return Err(LinerError::critical(
                ErrorType::Backend,
                errors::TERMINAL_UNAVAILABLE,
                "Standard output is not a terminal",
            ));
        }

        terminal::size().map_err(|e| {
            LinerError::critical(
                ErrorType::Backend,
                errors::TERMINAL_UNAVAILABLE,
                format!("Couldn't query the console: {e}"),
            )
        })?;

        Ok(CrosstermDevice {
            raw_mode_enabled: false,
        })
    }
}

impl TerminalDevice for CrosstermDevice {
    fn size(&self) -> Result<Size> {
        let (cols, rows) = terminal::size().map_err(|e| {
            LinerError::new(
                ErrorType::Io,
                errors::SIZE_QUERY_FAILED,
                format!("Failed to get terminal size: {e}"),
            )
        })?;
        Ok(Size { cols, rows })
    }

    fn cursor(&mut self) -> Result<Position> {
        let (col, row) = cursor::position().map_err(|e| {
            LinerError::new(
                ErrorType::Io,
                errors::CURSOR_QUERY_FAILED,
                format!("Failed to get cursor position: {e}"),
            )
        })?;
        Ok(Position { col, row })
    }

    fn move_to(&mut self, position: Position) -> Result<()> {
        execute!(stdout(), cursor::MoveTo(position.col, position.row)).map_err(|e| {
            LinerError::new(
                ErrorType::Io,
                errors::CURSOR_MOVE_FAILED,
                format!("Failed to move cursor: {e}"),
            )
        })
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        terminal::enable_raw_mode().map_err(|e| {
            LinerError::new(
                ErrorType::Mode,
                errors::RAW_MODE_FAILED,
                format!("Couldn't set the raw console mode: {e}"),
            )
        })?;
        self.raw_mode_enabled = true;
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        if !self.raw_mode_enabled {
            return Ok(());
        }
        terminal::disable_raw_mode().map_err(|e| {
            LinerError::new(
                ErrorType::Mode,
                errors::NORMAL_MODE_FAILED,
                format!("Couldn't recover from the raw console mode: {e}"),
            )
        })?;
        self.raw_mode_enabled = false;
        Ok(())
    }
}

impl Drop for CrosstermDevice {
    fn drop(&mut self) {
        if self.raw_mode_enabled {
            let _ = terminal::disable_raw_mode();
        }
    }
}

/// The VT100 backend on the process's standard output
pub type StdoutTerminal = Vt100Terminal<Stdout, CrosstermDevice>;

/// Build the VT100 backend for the attached terminal
pub fn stdout_terminal() -> Result<StdoutTerminal> {
    Ok(Vt100Terminal::new(stdout(), CrosstermDevice::new()?))
}

/// Keys decoded by crossterm's event reader instead of raw bytes
#[derive(Debug, Default)]
pub struct EventKeys;

impl KeySource for EventKeys {
    fn read_key(&mut self) -> Result<Key> {
        loop {
            let event = event::read().map_err(|e| {
                LinerError::new(
                    ErrorType::Io,
                    errors::IO_ERROR,
                    format!("Failed to read event: {e}"),
                )
            })?;

            if let Event::Key(key_event) = event {
                // Ignore key releases
                if key_event.kind != event::KeyEventKind::Press {
                    continue;
                }
                if let Some(key) = translate_key_event(key_event) {
                    return Ok(key);
                }
            }
        }
    }
}

/// Translate crossterm `KeyEvent` to a normalized key.
/// Keys without a canonical meaning yield `None`.
pub(crate) fn translate_key_event(key_event: KeyEvent) -> Option<Key> {
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

    let control = match key_event.code {
        KeyCode::Char(ch) => {
            // Handle Enter key that comes through as character (some terminals send '\r' or '\n')
            if ch == '\r' || ch == '\n' {
                return Some(Key::Control(ControlKey::Return));
            }
            if !ctrl {
                return Some(Key::char(ch));
            }
            match ch.to_ascii_lowercase() {
                'c' => ControlKey::SigInt,
                'z' => ControlKey::SigStop,
                'd' => ControlKey::Eof,
                'h' => ControlKey::Backspace,
                _ => return None,
            }
        }
        KeyCode::Backspace => ControlKey::Backspace,
        KeyCode::Enter => ControlKey::Return,
        KeyCode::Esc => ControlKey::Escape,
        KeyCode::Tab => ControlKey::Tab,
        KeyCode::Up => ControlKey::Up,
        KeyCode::Down => ControlKey::Down,
        KeyCode::Left => ControlKey::Left,
        KeyCode::Right => ControlKey::Right,
        KeyCode::Delete => ControlKey::Delete,
        _ => return None,
    };

    Some(Key::Control(control))
}
