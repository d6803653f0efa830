//! Key-value store used as the coordination point for the lock.
//!
//! The lock protocol only needs four primitives. `set_if_absent` and
//! `get_and_set` must be atomic with respect to other clients; the
//! coordinator does no client-side locking of its own.

mod redis_store;

#[cfg(test)]
pub mod memory;

pub use redis_store::RedisStore;

use crate::error::Result;

/// The store operations the lock protocol relies on.
///
/// Every failure to reach the store, or a reply of the wrong shape, is
/// reported as [`LockRunError::Store`](crate::error::LockRunError::Store).
pub trait LockStore {
    /// Set `key` to `value` only if it does not exist.
    ///
    /// Returns `true` if the key was created.
    fn set_if_absent(&mut self, key: &str, value: &str) -> Result<bool>;

    /// Set `key` to `value` and return the previous value, if any.
    fn get_and_set(&mut self, key: &str, value: &str) -> Result<Option<String>>;

    /// Read the value of `key`, if any.
    fn get(&mut self, key: &str) -> Result<Option<String>>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&mut self, key: &str) -> Result<()>;
}
