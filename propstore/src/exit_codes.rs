//! Stable exit codes for propstore CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Command failed due to invalid config, an unreadable settings file or other errors.
pub const INVALID: i32 = 1;
/// A queried property was unknown, or `set` got a name without a value.
pub const FAILED: i32 = 2;
