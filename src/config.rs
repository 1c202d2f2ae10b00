//! Line editor configuration

use crate::constants::{env, line};
use crate::normalize::RawKeyTable;

/// How keys are read from the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputDecoding {
    /// Raw bytes from stdin through the key normalizer
    Bytes(RawKeyTable),
    /// Crossterm's event reader
    Events,
}

impl InputDecoding {
    /// Raw bytes on Unix, crossterm events on Windows consoles
    #[must_use]
    pub fn native() -> Self {
        if cfg!(windows) {
            InputDecoding::Events
        } else {
            InputDecoding::Bytes(RawKeyTable::native())
        }
    }

    /// Parse the value of `LINETERM_KEYS`
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if name.trim().eq_ignore_ascii_case("events") {
            return Some(InputDecoding::Events);
        }
        RawKeyTable::from_name(name).map(InputDecoding::Bytes)
    }
}

/// Configuration for a `Liner`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinerConfig {
    /// Cells a fresh line can hold before the first doubling
    pub initial_capacity: usize,
    /// Cells a line may never grow past
    pub max_capacity: usize,
    /// Where keys come from
    pub input: InputDecoding,
    /// Written after the line when Return ends a session
    pub line_terminator: String,
    /// Keep editing without raw mode when it cannot be entered
    pub allow_degraded: bool,
}

impl Default for LinerConfig {
    fn default() -> Self {
        Self {
            initial_capacity: line::INITIAL_CAPACITY,
            max_capacity: line::MAX_CAPACITY,
            input: InputDecoding::native(),
            line_terminator: "\r\n".to_string(),
            allow_degraded: false,
        }
    }
}

impl LinerConfig {
    /// Defaults with `LINETERM_*` overrides from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults with overrides from `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(value) = lookup(env::INITIAL_CAPACITY) {
            match value.trim().parse::<usize>() {
                Ok(capacity) if capacity > 0 => config.initial_capacity = capacity,
                _ => tracing::warn!(%value, "ignoring invalid {}", env::INITIAL_CAPACITY),
            }
        }

        if let Some(value) = lookup(env::KEYS) {
            match InputDecoding::from_name(&value) {
                Some(input) => config.input = input,
                None => tracing::warn!(%value, "ignoring invalid {}", env::KEYS),
            }
        }

        config
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_max_capacity(mut self, capacity: usize) -> Self {
        self.max_capacity = capacity;
        self
    }

    pub fn with_input(mut self, input: InputDecoding) -> Self {
        self.input = input;
        self
    }

    pub fn with_line_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.line_terminator = terminator.into();
        self
    }

    pub fn with_allow_degraded(mut self, allow: bool) -> Self {
        self.allow_degraded = allow;
        self
    }
}
