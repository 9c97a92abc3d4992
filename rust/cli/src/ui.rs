//! Small helpers for consistent terminal output.

use std::io::Write;

pub const SEPARATOR: &str = "----------------------------------------";

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

pub fn header(out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "{}", SEPARATOR)?;
    writeln!(out, "  B L A C K J A C K")?;
    writeln!(out, "{}", SEPARATOR)
}
