//! In-memory lock store for tests.

use super::LockStore;
use crate::error::{LockRunError, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct State {
    values: HashMap<String, String>,
    unavailable: bool,
    failing_deletes: bool,
}

/// Shared in-memory store.
///
/// Clones share the same map, so several coordinators can contend on one
/// key the way separate hosts contend on one Redis server.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `key` with a raw value.
    pub fn insert(&self, key: &str, value: &str) {
        self.lock().values.insert(key.to_string(), value.to_string());
    }

    /// Current raw value of `key`.
    pub fn value(&self, key: &str) -> Option<String> {
        self.lock().values.get(key).cloned()
    }

    /// Make every subsequent operation fail as if the server were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    /// Make only `delete` fail, leaving reads and writes working.
    pub fn set_failing_deletes(&self, failing: bool) {
        self.lock().failing_deletes = failing;
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poison| poison.into_inner())
    }

    fn available(&self) -> Result<MutexGuard<'_, State>> {
        let state = self.lock();
        if state.unavailable {
            return Err(LockRunError::Store("connection refused".to_string()));
        }
        Ok(state)
    }
}

impl LockStore for MemoryStore {
    fn set_if_absent(&mut self, key: &str, value: &str) -> Result<bool> {
        let mut state = self.available()?;
        if state.values.contains_key(key) {
            return Ok(false);
        }
        state.values.insert(key.to_string(), value.to_string());
        Ok(true)
    }

    fn get_and_set(&mut self, key: &str, value: &str) -> Result<Option<String>> {
        let mut state = self.available()?;
        Ok(state.values.insert(key.to_string(), value.to_string()))
    }

    fn get(&mut self, key: &str) -> Result<Option<String>> {
        Ok(self.available()?.values.get(key).cloned())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        let mut state = self.available()?;
        if state.failing_deletes {
            return Err(LockRunError::Store("DEL rejected".to_string()));
        }
        state.values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_if_absent_only_creates_once() {
        let mut store = MemoryStore::new();
        assert!(store.set_if_absent("lock", "1").unwrap());
        assert!(!store.set_if_absent("lock", "2").unwrap());
        assert_eq!(store.value("lock").as_deref(), Some("1"));
    }

    #[test]
    fn get_and_set_returns_previous_value() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_and_set("lock", "1").unwrap(), None);
        assert_eq!(store.get_and_set("lock", "2").unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("lock").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn clones_share_state() {
        let mut a = MemoryStore::new();
        let mut b = a.clone();
        a.set_if_absent("lock", "1").unwrap();
        assert!(!b.set_if_absent("lock", "2").unwrap());
        b.delete("lock").unwrap();
        assert_eq!(a.value("lock"), None);
    }

    #[test]
    fn unavailable_store_fails_every_operation() {
        let mut store = MemoryStore::new();
        store.set_unavailable(true);
        assert!(store.set_if_absent("lock", "1").is_err());
        assert!(store.get_and_set("lock", "1").is_err());
        assert!(store.get("lock").is_err());
        assert!(store.delete("lock").is_err());
    }
}
