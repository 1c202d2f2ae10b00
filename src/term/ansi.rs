//! Escape sequences emitted by the VT100 backend
//! The byte sequences are fixed; keep them bit-exact

/// Cursor one cell left within the row
pub const CURSOR_LEFT: &str = "\x1bD";
/// Cursor one cell right within the row
pub const CURSOR_RIGHT: &str = "\x1bC";
/// Cursor one row up, keeping the column
pub const ROW_UP: &str = "\x1bA";
/// Cursor one row down, keeping the column
pub const ROW_DOWN: &str = "\x1bB";
/// Start-of-row snap used when wrapping right
pub const ROW_START: &str = "\x1b[0G";
pub const HIDE_CURSOR: &str = "\x1b[?25l";
pub const SHOW_CURSOR: &str = "\x1b[?25h";

/// Move down `count` rows
pub fn format_move_down(count: u16) -> String {
    format!("\x1b[{}B", count)
}

/// Move up `count` rows
pub fn format_move_up(count: u16) -> String {
    format!("\x1b[{}A", count)
}

/// Move to the 0-indexed `column` (the sequence itself is 1-indexed)
pub fn format_move_to_column(column: u16) -> String {
    format!("\x1b[{}G", u32::from(column) + 1)
}

/// Wrap left from column 0 to the last column of the previous row
pub fn format_wrap_left(columns: u16) -> String {
    format!("{}\x1b[{}G", ROW_UP, columns)
}

/// Wrap right from the last column to the start of the next row
pub fn format_wrap_right() -> String {
    format!("{}{}", ROW_DOWN, ROW_START)
}
