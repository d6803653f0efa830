//! Exit code constants for redislockrun.
//!
//! - 0: The guarded command ran and exited successfully
//! - 1: Lock held by another active holder, or the guarded command failed
//! - 2: Usage error (no command, bad flags, invalid config)
//! - 3: Lock store failure (unreachable store or malformed lock value)

/// The guarded command ran and exited successfully.
pub const SUCCESS: i32 = 0;

/// Another holder owns an unexpired lock; the command was not run.
pub const LOCK_HELD: i32 = 1;

/// The guarded command could not be spawned or exited unsuccessfully.
pub const COMMAND_FAILED: i32 = 1;

/// Bad arguments or invalid configuration.
pub const USAGE_ERROR: i32 = 2;

/// The lock store could not be reached or returned malformed data.
pub const STORE_FAILURE: i32 = 3;
