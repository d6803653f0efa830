//! RAII guard for an acquired lock.

use super::clock::Clock;
use super::coordinator::LockCoordinator;
use super::types::{Expiry, ReleaseOutcome};
use crate::error::Result;
use crate::store::LockStore;

/// RAII guard for an acquired lock.
///
/// When dropped without an explicit [`release`](Self::release), the lock is
/// released on a best-effort basis. Failures are logged, never panicked on.
pub struct LockGuard<'a, S: LockStore, C: Clock> {
    coordinator: &'a mut LockCoordinator<S, C>,

    /// Expiry this process wrote when it took the lock.
    expiry: Expiry,

    /// Whether the lock has been released manually.
    released: bool,
}

impl<'a, S: LockStore, C: Clock> LockGuard<'a, S, C> {
    pub(crate) fn new(coordinator: &'a mut LockCoordinator<S, C>, expiry: Expiry) -> Self {
        Self {
            coordinator,
            expiry,
            released: false,
        }
    }

    pub fn expiry(&self) -> Expiry {
        self.expiry
    }

    /// Release the lock and report what happened.
    pub fn release(mut self) -> Result<ReleaseOutcome> {
        self.released = true;
        self.coordinator.release()
    }
}

impl<S: LockStore, C: Clock> Drop for LockGuard<'_, S, C> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        match self.coordinator.release() {
            Ok(ReleaseOutcome::Released) => {}
            Ok(ReleaseOutcome::NotOwned) => tracing::warn!(
                key = %self.coordinator.key(),
                "lock expired before it was released"
            ),
            Err(e) => tracing::warn!(
                key = %self.coordinator.key(),
                error = %e,
                "failed to release lock"
            ),
        }
    }
}
