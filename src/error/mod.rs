//! Structured errors for the line editor
//! Every fallible operation in the crate returns a `LinerError`

use std::fmt;

use crate::constants::errors;

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational message (not really an error)
    Info,
    /// Warning - the session can continue in a degraded way
    Warning,
    /// Standard error - the operation failed
    Error,
    /// Critical error - interactive editing is not possible
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Category of the error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    /// The terminal device could not be located or configured
    Backend,
    /// Switching between raw and normal mode failed
    Mode,
    /// The line buffer could not grow
    Allocation,
    /// An index outside the buffer was passed in
    Bounds,
    /// Reading or writing the terminal failed
    Io,
    /// The input stream has ended
    Input,
    /// Internal logic or invariant violations
    Internal,
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backend => write!(f, "Backend"),
            Self::Mode => write!(f, "Mode"),
            Self::Allocation => write!(f, "Allocation"),
            Self::Bounds => write!(f, "Bounds"),
            Self::Io => write!(f, "IO"),
            Self::Input => write!(f, "Input"),
            Self::Internal => write!(f, "Internal"),
        }
    }
}

/// A structured line editor error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinerError {
    /// How serious the error is
    pub severity: ErrorSeverity,
    /// What kind of error occurred
    pub kind: ErrorType,
    /// Machine-readable error code (see `constants::errors`)
    pub code: String,
    /// Human-readable description
    pub message: String,
}

impl LinerError {
    /// Create a new standard error (Severity: Error)
    pub fn new(kind: ErrorType, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ErrorSeverity::Error,
            kind,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a new critical error (Severity: Critical)
    pub fn critical(kind: ErrorType, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ErrorSeverity::Critical,
            kind,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a new warning (Severity: Warning)
    pub fn warning(kind: ErrorType, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ErrorSeverity::Warning,
            kind,
            code: code.into(),
            message: message.into(),
        }
    }

    /// The input stream is exhausted
    pub fn end_of_input() -> Self {
        Self::new(ErrorType::Input, errors::END_OF_INPUT, "Input stream has ended")
    }

    /// True if this error only signals the end of the input stream
    #[must_use]
    pub fn is_end_of_input(&self) -> bool {
        self.kind == ErrorType::Input && self.code == errors::END_OF_INPUT
    }

    /// Check if the message contains a substring (useful for tests)
    pub fn contains_msg(&self, sub: &str) -> bool {
        self.message.contains(sub)
    }
}

impl fmt::Display for LinerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}({}): {}",
            self.severity, self.kind, self.code, self.message
        )
    }
}

impl std::error::Error for LinerError {}

impl From<std::io::Error> for LinerError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            return Self::end_of_input();
        }
        Self::new(ErrorType::Io, errors::IO_ERROR, err.to_string())
    }
}

/// Result alias for line editor operations
pub type Result<T> = std::result::Result<T, LinerError>;
