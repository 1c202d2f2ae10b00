//! Line provider
//!
//! The surface callers use: ask whether more input can be requested, read
//! one edited line, hand it back when done. The caller builds the backend
//! and key source once and threads them through; nothing here is global.

use std::io::{stdin, BufRead, IsTerminal};

use crate::config::{InputDecoding, LinerConfig};
use crate::error::{ErrorType, LinerError, Result};
use crate::key::KeySource;
use crate::normalize::KeyNormalizer;
use crate::session::EditSession;
use crate::term::crossterm::{stdout_terminal, EventKeys, StdoutTerminal};
use crate::term::TerminalBackend;

/// Something that hands out complete lines
pub trait LineSource {
    /// True while another line can be requested
    fn has_next(&self) -> bool;

    /// The next line, always ending in `\n`
    fn read_line(&mut self) -> Result<String>;
}

/// True if both standard input and output are attached to a terminal
#[must_use]
pub fn is_interactive() -> bool {
    stdin().is_terminal() && std::io::stdout().is_terminal()
}

/// Interactive line reader over a terminal backend and a key source
pub struct Liner<T: TerminalBackend, K: KeySource + ?Sized> {
    terminal: T,
    config: LinerConfig,
    exhausted: bool,
    /// Editing goes on without raw mode after a tolerated mode failure
    degraded: bool,
    keys: Box<K>,
}

/// A liner on the attached terminal, with keys chosen by the config
pub type StdioLiner = Liner<StdoutTerminal, dyn KeySource>;

impl StdioLiner {
    /// Build the liner for the process's own terminal
    pub fn stdio(config: LinerConfig) -> Result<Self> {
        let terminal = stdout_terminal()?;
        let keys: Box<dyn KeySource> = match config.input {
            InputDecoding::Bytes(table) => Box::new(KeyNormalizer::new(stdin(), table)),
            InputDecoding::Events => Box::new(EventKeys),
        };
        tracing::debug!(input = ?config.input, "stdio liner created");
        Ok(Liner::from_boxed(terminal, keys, config))
    }
}

impl<T: TerminalBackend, K: KeySource> Liner<T, K> {
    pub fn new(terminal: T, keys: K, config: LinerConfig) -> Self {
        Self::from_boxed(terminal, Box::new(keys), config)
    }
}

impl<T: TerminalBackend, K: KeySource + ?Sized> Liner<T, K> {
    pub fn from_boxed(terminal: T, keys: Box<K>, config: LinerConfig) -> Self {
        Liner {
            terminal,
            config,
            exhausted: false,
            degraded: false,
            keys,
        }
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }

    pub fn config(&self) -> &LinerConfig {
        &self.config
    }

    /// True while more input can be requested. In degraded mode the
    /// recorded raw mode failure does not count against the terminal.
    pub fn has_next(&self) -> bool {
        if self.exhausted {
            return false;
        }
        match self.terminal.last_error() {
            None => self.terminal.is_ok(),
            Some(err) => self.degraded && err.kind == ErrorType::Mode,
        }
    }

    /// True once a line was edited without raw mode
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Edit one line interactively. Blocks until Return (or the end of
    /// input) and returns the line with a trailing `\n`.
    pub fn read_line(&mut self) -> Result<String> {
        if self.exhausted {
            return Err(LinerError::end_of_input());
        }

        let raw = match self.terminal.enter_raw_mode() {
            Ok(()) => true,
            Err(err) if self.config.allow_degraded => {
                if !self.degraded {
                    tracing::warn!(%err, "editing without raw mode");
                }
                self.degraded = true;
                false
            }
            Err(err) => return Err(err),
        };

        let outcome = EditSession::new(&mut self.terminal, &self.config)
            .and_then(|session| session.run(self.keys.as_mut(), &self.config.line_terminator));

        // restore the terminal even when the session failed
        let restored = if raw {
            self.terminal.leave_raw_mode()
        } else {
            Ok(())
        };

        match outcome {
            Ok(outcome) => {
                if outcome.end_of_input {
                    self.exhausted = true;
                }
                restored?;
                Ok(outcome.line)
            }
            Err(err) => {
                if err.is_end_of_input() {
                    self.exhausted = true;
                }
                Err(err)
            }
        }
    }

    /// Give back a line returned by `read_line`
    pub fn release(&self, line: String) {
        drop(line);
    }
}

impl<T: TerminalBackend, K: KeySource + ?Sized> LineSource for Liner<T, K> {
    fn has_next(&self) -> bool {
        Liner::has_next(self)
    }

    fn read_line(&mut self) -> Result<String> {
        Liner::read_line(self)
    }
}

/// Plain buffered lines, for input that is not a terminal
pub struct PlainLines<R: BufRead> {
    reader: R,
    exhausted: bool,
}

impl<R: BufRead> PlainLines<R> {
    pub fn new(reader: R) -> Self {
        PlainLines {
            reader,
            exhausted: false,
        }
    }
}

impl<R: BufRead> LineSource for PlainLines<R> {
    fn has_next(&self) -> bool {
        !self.exhausted
    }

    fn read_line(&mut self) -> Result<String> {
        if self.exhausted {
            return Err(LinerError::end_of_input());
        }

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            self.exhausted = true;
            return Err(LinerError::end_of_input());
        }
        if !line.ends_with('\n') {
            // the last line of a file without a trailing newline
            self.exhausted = true;
            line.push('\n');
        }
        Ok(line)
    }
}
