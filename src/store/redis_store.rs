//! Redis-backed lock store.

use super::LockStore;
use crate::config::Config;
use crate::error::{LockRunError, Result};
use redis::{Commands, Connection, IntoConnectionInfo};

/// Lock store over a synchronous Redis connection.
///
/// Uses `SETNX`, `GETSET`, `GET` and `DEL`, each of which Redis executes
/// atomically.
pub struct RedisStore {
    conn: Connection,
}

impl RedisStore {
    /// Open a connection using the address, credentials and database index
    /// from `config`.
    pub fn connect(config: &Config) -> Result<Self> {
        let mut info = format!("redis://{}", config.addr)
            .into_connection_info()
            .map_err(|e| {
                LockRunError::Usage(format!("invalid redis address '{}': {}", config.addr, e))
            })?;
        info.redis.db = config.db;
        info.redis.password = config.password.clone();

        let client = redis::Client::open(info)?;
        let conn = client
            .get_connection_with_timeout(config.connect_timeout)
            .map_err(|e| {
                LockRunError::Store(format!("failed to connect to '{}': {}", config.addr, e))
            })?;

        tracing::debug!(addr = %config.addr, db = config.db, "connected to lock store");
        Ok(Self { conn })
    }
}

impl LockStore for RedisStore {
    fn set_if_absent(&mut self, key: &str, value: &str) -> Result<bool> {
        Ok(self.conn.set_nx(key, value)?)
    }

    fn get_and_set(&mut self, key: &str, value: &str) -> Result<Option<String>> {
        Ok(self.conn.getset(key, value)?)
    }

    fn get(&mut self, key: &str) -> Result<Option<String>> {
        Ok(self.conn.get(key)?)
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        let _removed: i64 = self.conn.del(key)?;
        Ok(())
    }
}
