//! The acquire / verify / release protocol over a [`LockStore`].

use super::clock::Clock;
use super::types::{AcquireOutcome, Expiry, ReacquireOutcome, ReleaseOutcome};
use crate::config::Config;
use crate::error::Result;
use crate::store::LockStore;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, info};

/// Coordinates one lock key against a shared store.
///
/// All atomicity comes from the store. The coordinator keeps no state
/// between calls beyond the key it was configured with.
pub struct LockCoordinator<S, C> {
    store: S,
    clock: C,
    key: String,
}

impl<S: LockStore, C: Clock> LockCoordinator<S, C> {
    pub fn new(store: S, clock: C, config: &Config) -> Self {
        Self {
            store,
            clock,
            key: config.key.clone(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Expiry to claim for a lock taken now with the given timeout.
    pub fn compute_expiry(&self, timeout: Duration) -> Result<Expiry> {
        Expiry::compute(self.now(), timeout)
    }

    /// Atomically create the key with `expiry` if it does not exist.
    pub fn try_acquire(&mut self, expiry: Expiry) -> Result<AcquireOutcome> {
        if self.store.set_if_absent(&self.key, &expiry.encode())? {
            Ok(AcquireOutcome::Acquired)
        } else {
            Ok(AcquireOutcome::Contended)
        }
    }

    /// Read the stored expiry. `None` means the key is absent.
    pub fn read_expiry(&mut self) -> Result<Option<Expiry>> {
        match self.store.get(&self.key)? {
            Some(raw) => Expiry::decode(&self.key, &raw).map(Some),
            None => Ok(None),
        }
    }

    /// Overwrite the key with `expiry` and decide ownership from the value it
    /// replaced.
    ///
    /// The write happens before the check. When another process has already
    /// taken over the expired lock, the loser still republishes its own
    /// expiry. Both sides compute their expiry from the same formula within
    /// a short window, so the winner's claim is not shortened in practice.
    /// This is an approximation, not a fencing guarantee.
    pub fn reacquire_if_expired(&mut self, expiry: Expiry) -> Result<ReacquireOutcome> {
        let previous = self.store.get_and_set(&self.key, &expiry.encode())?;
        let now = self.now();

        let previous = match previous {
            Some(raw) => Expiry::decode(&self.key, &raw)?,
            // The holder released between our failed create and this write.
            None => return Ok(ReacquireOutcome::Acquired),
        };

        debug!(
            own_expiry = expiry.unix(),
            now = now.timestamp(),
            stored_expiry = previous.unix(),
            "comparing lock expiry"
        );

        if previous.has_passed(now) {
            Ok(ReacquireOutcome::Acquired)
        } else {
            Ok(ReacquireOutcome::Denied { holder: previous })
        }
    }

    /// Delete the key if the stored expiry is still in the future.
    ///
    /// An expired lock may already belong to someone else, so it is left
    /// alone.
    pub fn release(&mut self) -> Result<ReleaseOutcome> {
        let now = self.now();
        match self.read_expiry()? {
            Some(current) if current.is_after(now) => {
                info!(key = %self.key, "deleting lock");
                self.store.delete(&self.key)?;
                Ok(ReleaseOutcome::Released)
            }
            current => {
                debug!(
                    key = %self.key,
                    stored_expiry = current.map(|e| e.unix()),
                    now = now.timestamp(),
                    "lock no longer valid, not deleting"
                );
                Ok(ReleaseOutcome::NotOwned)
            }
        }
    }
}
