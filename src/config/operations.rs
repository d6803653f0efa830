//! Config loading, layering, and validation.

use super::model::{Config, ConfigOverrides};
use super::types::format_duration;
use crate::error::{LockRunError, Result};
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            LockRunError::Usage(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| LockRunError::Usage(format!("failed to parse config YAML: {}", e)))
    }

    /// Build the effective config: defaults, then the optional file, then
    /// overrides. The result is validated.
    pub fn resolve(path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let base = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        let config = base.with_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides on top of this config.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(key) = overrides.key {
            self.key = key;
        }
        if let Some(lock_timeout) = overrides.lock_timeout {
            self.lock_timeout = lock_timeout;
        }
        if let Some(addr) = overrides.addr {
            self.addr = addr;
        }
        if let Some(password) = overrides.password {
            self.password = Some(password);
        }
        if let Some(db) = overrides.db {
            self.db = db;
        }
        self
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `key` and `addr` must be non-empty
    /// - `db` must not be negative
    /// - `lock_timeout` and `connect_timeout` must be positive
    pub fn validate(&self) -> Result<()> {
        if self.key.trim().is_empty() {
            return Err(LockRunError::Usage(
                "config validation failed: key must not be empty".to_string(),
            ));
        }

        if self.addr.trim().is_empty() {
            return Err(LockRunError::Usage(
                "config validation failed: addr must not be empty".to_string(),
            ));
        }

        if self.db < 0 {
            return Err(LockRunError::Usage(format!(
                "config validation failed: db must not be negative (found {})",
                self.db
            )));
        }

        if self.lock_timeout.is_zero() {
            return Err(LockRunError::Usage(
                "config validation failed: lock timeout must be greater than 0".to_string(),
            ));
        }

        if self.connect_timeout.is_zero() {
            return Err(LockRunError::Usage(
                "config validation failed: connect_timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// One-line rendering for logs, with the password redacted.
    pub fn summary(&self) -> String {
        format!(
            "key={} timeout={} addr={} db={} password={} connect_timeout={}",
            self.key,
            format_duration(self.lock_timeout),
            self.addr,
            self.db,
            if self.password.is_some() { "<set>" } else { "<none>" },
            format_duration(self.connect_timeout)
        )
    }
}
