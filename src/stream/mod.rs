//! Character stream over a line source
//!
//! Lets a parser consume interactive input one `char` at a time. Lines are
//! pulled lazily: finishing a line only marks that another one is needed,
//! so the user is never asked for the next line before the parser has
//! looked past the `\n` of the current one.

/// ## stream/ Invariants
///
/// - A line is read only when one of its characters is requested.
/// - `\r` never reaches the consumer.
/// - `offset()` counts every character stepped over since creation.
use crate::error::Result;
use crate::liner::LineSource;

pub struct TerminalStream<S: LineSource> {
    source: S,
    /// Characters of the current line
    buffer: Vec<char>,
    /// Index of the next character in `buffer`
    next: usize,
    /// Characters in all lines before the current one
    consumed: usize,
    /// The current line is used up
    should_read: bool,
    /// The source reported the end of input
    finished: bool,
}

impl<S: LineSource> TerminalStream<S> {
    pub fn new(source: S) -> Self {
        TerminalStream {
            source,
            buffer: Vec::new(),
            next: 0,
            consumed: 0,
            should_read: true,
            finished: false,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    fn read_next_line(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }

        let line = match self.source.read_line() {
            Ok(line) => line,
            Err(err) if err.is_end_of_input() => {
                tracing::debug!("line source exhausted");
                self.finished = true;
                String::new()
            }
            Err(err) => return Err(err),
        };

        self.consumed += self.buffer.len();
        self.buffer = line.chars().filter(|&c| c != '\r').collect();
        self.next = 0;
        self.should_read = false;
        Ok(())
    }

    fn fill(&mut self) -> Result<()> {
        if self.should_read {
            self.read_next_line()?;
        }
        Ok(())
    }

    /// True while another character may be available
    pub fn has_next(&self) -> bool {
        if !self.should_read && self.next < self.buffer.len() {
            return true;
        }
        !self.finished && self.source.has_next()
    }

    /// The next character without consuming it
    pub fn peek(&mut self) -> Result<Option<char>> {
        self.fill()?;
        Ok(self.buffer.get(self.next).copied())
    }

    /// Move past the next character
    pub fn step(&mut self) -> Result<()> {
        self.fill()?;
        if self.next >= self.buffer.len() {
            return Ok(());
        }

        self.next += 1;
        if self.next == self.buffer.len() {
            self.should_read = true;
        }
        Ok(())
    }

    /// The next character, consumed
    pub fn grab(&mut self) -> Result<Option<char>> {
        let c = self.peek()?;
        if c.is_some() {
            self.step()?;
        }
        Ok(c)
    }

    /// The character `distance` places ahead in the current line.
    /// Never reads a new line.
    pub fn lookahead(&self, distance: usize) -> Option<char> {
        self.buffer.get(self.next + distance).copied()
    }

    /// Characters consumed so far
    pub fn offset(&self) -> usize {
        self.consumed + self.next
    }

    /// The whole current line
    pub fn text(&self) -> String {
        self.buffer.iter().collect()
    }

    /// Length in chars of `prefix` if the unread part of the current line
    /// starts with it, otherwise 0
    pub fn match_text(&self, prefix: &str) -> usize {
        let rest = &self.buffer[self.next.min(self.buffer.len())..];
        let mut matched = 0;
        for c in prefix.chars() {
            if rest.get(matched) != Some(&c) {
                return 0;
            }
            matched += 1;
        }
        matched
    }
}

impl<S: LineSource> Iterator for TerminalStream<S> {
    type Item = Result<char>;

    fn next(&mut self) -> Option<Self::Item> {
        self.grab().transpose()
    }
}
