//! Error types for redislockrun.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for guarded runs.
///
/// Each variant maps to a specific exit code; see [`exit_codes`].
#[derive(Error, Debug)]
pub enum LockRunError {
    /// No command given, bad flag value, or invalid configuration.
    #[error("{0}")]
    Usage(String),

    /// The lock store is unreachable or holds a malformed lock value.
    #[error("lock store error: {0}")]
    Store(String),

    /// Another holder owns the lock and it has not expired yet.
    #[error("lock '{key}' is held by another process until {expires_at}")]
    LockDenied { key: String, expires_at: String },

    /// The guarded command failed to launch or exited unsuccessfully.
    #[error("error running {command}: {reason}")]
    ChildExecution { command: String, reason: String },
}

impl LockRunError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LockRunError::Usage(_) => exit_codes::USAGE_ERROR,
            LockRunError::Store(_) => exit_codes::STORE_FAILURE,
            LockRunError::LockDenied { .. } => exit_codes::LOCK_HELD,
            LockRunError::ChildExecution { .. } => exit_codes::COMMAND_FAILED,
        }
    }
}

impl From<redis::RedisError> for LockRunError {
    fn from(err: redis::RedisError) -> Self {
        LockRunError::Store(err.to_string())
    }
}

/// Result type alias for redislockrun operations.
pub type Result<T> = std::result::Result<T, LockRunError>;
