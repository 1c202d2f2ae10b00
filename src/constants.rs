//! Global constants for the line editor

pub mod errors {
    // Error Codes
    pub const TERMINAL_UNAVAILABLE: &str = "TERMINAL_UNAVAILABLE";
    pub const RAW_MODE_FAILED: &str = "RAW_MODE_FAILED";
    pub const NORMAL_MODE_FAILED: &str = "NORMAL_MODE_FAILED";
    pub const SIZE_QUERY_FAILED: &str = "SIZE_QUERY_FAILED";
    pub const CURSOR_QUERY_FAILED: &str = "CURSOR_QUERY_FAILED";
    pub const CURSOR_MOVE_FAILED: &str = "CURSOR_MOVE_FAILED";
    pub const WRITE_FAILED: &str = "WRITE_FAILED";
    pub const CAPACITY_OVERFLOW: &str = "CAPACITY_OVERFLOW";
    pub const ALLOCATION_FAILED: &str = "ALLOCATION_FAILED";
    pub const INDEX_OUT_OF_BOUNDS: &str = "INDEX_OUT_OF_BOUNDS";
    pub const END_OF_INPUT: &str = "END_OF_INPUT";
    pub const IO_ERROR: &str = "IO_ERROR";
}

pub mod line {
    /// Number of cells a fresh line buffer can hold before growing
    pub const INITIAL_CAPACITY: usize = 64;

    /// Largest cell count whose byte size still fits in `usize`
    pub const MAX_CAPACITY: usize = usize::MAX / std::mem::size_of::<crate::character::CharCell>();
}

pub mod env {
    /// `EnvFilter` directives for the binary's log file
    pub const LOG: &str = "LINETERM_LOG";
    /// Path of the binary's log file
    pub const LOG_FILE: &str = "LINETERM_LOG_FILE";
    /// Overrides `LinerConfig::initial_capacity`
    pub const INITIAL_CAPACITY: &str = "LINETERM_INITIAL_CAPACITY";
    /// Selects key decoding (`unix`, `windows` or `events`)
    pub const KEYS: &str = "LINETERM_KEYS";

    pub const DEFAULT_LOG_FILE: &str = "lineterm.log";
}
