//! Lock value and protocol outcome types.

use crate::error::{LockRunError, Result};
use chrono::{DateTime, TimeDelta, Utc};
use std::cmp::Ordering;
use std::fmt;
use std::time::Duration;

/// Grace added on top of the lock timeout so a holder that is still within
/// its window is not pre-empted because of clock or network skew.
pub const EXPIRY_GRACE_SECS: i64 = 1;

/// The value stored under the lock key: the holder's claimed expiry, in
/// whole seconds since the Unix epoch.
///
/// There is no separate holder identity. Two holders that compute the same
/// second would be indistinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Expiry(i64);

impl Expiry {
    /// Expiry for a lock taken at `now` that should stay valid for `timeout`:
    /// `now + timeout + EXPIRY_GRACE_SECS`, truncated to whole seconds.
    pub fn compute(now: DateTime<Utc>, timeout: Duration) -> Result<Self> {
        let out_of_range =
            || LockRunError::Usage(format!("lock timeout {:?} is out of range", timeout));
        let delta = TimeDelta::from_std(timeout).map_err(|_| out_of_range())?;
        let instant = now
            .checked_add_signed(delta)
            .and_then(|t| t.checked_add_signed(TimeDelta::seconds(EXPIRY_GRACE_SECS)))
            .ok_or_else(out_of_range)?;
        Ok(Self(instant.timestamp()))
    }

    #[cfg(test)]
    pub fn from_unix(secs: i64) -> Self {
        Self(secs)
    }

    pub fn unix(&self) -> i64 {
        self.0
    }

    /// Parse a stored value. Anything but a decimal integer is malformed
    /// and reported as a store error, never as "unlocked".
    pub fn decode(key: &str, raw: &str) -> Result<Self> {
        raw.trim().parse::<i64>().map(Self).map_err(|_| {
            LockRunError::Store(format!("malformed expiry '{}' stored under '{}'", raw, key))
        })
    }

    pub fn encode(&self) -> String {
        self.0.to_string()
    }

    /// True if this expiry is strictly before `now`.
    pub fn has_passed(&self, now: DateTime<Utc>) -> bool {
        self.compare(now) == Ordering::Less
    }

    /// True if this expiry is strictly after `now`.
    pub fn is_after(&self, now: DateTime<Utc>) -> bool {
        self.compare(now) == Ordering::Greater
    }

    fn compare(&self, now: DateTime<Utc>) -> Ordering {
        (self.0, 0).cmp(&(now.timestamp(), now.timestamp_subsec_nanos()))
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::<Utc>::from_timestamp(self.0, 0) {
            Some(instant) => write!(f, "{} ({})", instant.to_rfc3339(), self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Result of the atomic create-if-absent attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireOutcome {
    /// The key did not exist and now holds our expiry.
    Acquired,
    /// The key already existed; its value must be inspected.
    Contended,
}

/// Result of overwriting a lock believed to be expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReacquireOutcome {
    /// The previous holder's expiry had passed; the lock is ours.
    Acquired,
    /// Another process got there first and holds the lock until `holder`.
    Denied { holder: Expiry },
}

/// Result of a release attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The lock was still valid and has been deleted.
    Released,
    /// The lock was missing or had already expired; nothing was deleted.
    NotOwned,
}
