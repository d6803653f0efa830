//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for one guarded run.
///
/// Loaded from an optional YAML file, then overridden by environment
/// variables and command-line flags. Unknown YAML fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Lock settings
    // =========================================================================
    /// Name of the lock key in the store (default: "lock").
    #[serde(default = "default_key")]
    pub key: String,

    /// How long an acquired lock stays valid (default: 30m).
    ///
    /// This does not bound the guarded command's runtime. A command that
    /// outlives it can have its lock taken over by another host while it is
    /// still running, so size it above the longest expected run.
    #[serde(default = "default_lock_timeout", with = "duration_string")]
    pub lock_timeout: Duration,

    // =========================================================================
    // Store settings
    // =========================================================================
    /// Redis address as `host:port` (default: "127.0.0.1:6379").
    #[serde(default = "default_addr")]
    pub addr: String,

    /// Redis password, if the server requires AUTH.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Redis database index.
    #[serde(default)]
    pub db: i64,

    /// Timeout for establishing the store connection (default: 5s).
    #[serde(default = "default_connect_timeout", with = "duration_string")]
    pub connect_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key: default_key(),
            lock_timeout: default_lock_timeout(),
            addr: default_addr(),
            password: None,
            db: 0,
            connect_timeout: default_connect_timeout(),
        }
    }
}

/// Values that take precedence over the config file.
///
/// Each field is `None` when neither the flag nor its environment variable
/// was given.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub key: Option<String>,
    pub lock_timeout: Option<Duration>,
    pub addr: Option<String>,
    pub password: Option<String>,
    pub db: Option<i64>,
}
