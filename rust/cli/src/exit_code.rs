//! Exit codes returned by [`crate::run`].

pub const SUCCESS: i32 = 0;

/// Bad arguments, bad config, I/O or engine failure.
pub const ERROR: i32 = 2;

/// The player quit or stdin ran dry mid-session.
pub const INTERRUPTED: i32 = 130;
