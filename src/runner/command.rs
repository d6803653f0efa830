//! Guarded command description and child process execution.

use crate::error::{LockRunError, Result};
use std::fmt;
use std::process::{Command, Stdio};
use std::time::Duration;

/// The command to run under the lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    /// Build from the trailing command-line words. The first word is the
    /// program; an empty list is a usage error.
    pub fn from_words(words: Vec<String>) -> Result<Self> {
        let mut words = words.into_iter();
        let program = words
            .next()
            .ok_or_else(|| LockRunError::Usage("no command given to run".to_string()))?;
        Ok(Self {
            program,
            args: words.collect(),
        })
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// One guarded execution: what to run and how long the lock stays valid.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub command: CommandLine,
    pub lock_timeout: Duration,
}

impl RunRequest {
    pub fn new(words: Vec<String>, lock_timeout: Duration) -> Result<Self> {
        if lock_timeout.is_zero() {
            return Err(LockRunError::Usage(
                "lock timeout must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            command: CommandLine::from_words(words)?,
            lock_timeout,
        })
    }
}

/// Run `command` to completion with the parent's stdin, stdout and stderr.
///
/// A spawn failure, a non-zero exit, or termination by a signal is a
/// `ChildExecution` error.
pub fn execute(command: &CommandLine) -> Result<()> {
    let status = Command::new(&command.program)
        .args(&command.args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| LockRunError::ChildExecution {
            command: command.to_string(),
            reason: format!("failed to start: {}", e),
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(LockRunError::ChildExecution {
            command: command.to_string(),
            reason: status.to_string(),
        })
    }
}
