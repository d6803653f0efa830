//! Lock protocol for redislockrun.
//!
//! The lock is a single key whose value is the holder's expiry in Unix
//! seconds. It is taken with an atomic create-if-absent. If the key exists
//! but its expiry has passed, the holder is presumed crashed and the lock is
//! taken over with an atomic get-and-set, keeping it only if the value it
//! replaced was indeed expired.
//!
//! # Release
//!
//! A holder deletes the key only while the stored expiry is still in the
//! future. Once it has passed, another process may legitimately own the key.
//!
//! # No renewal
//!
//! The lock is never refreshed while the guarded command runs. A command
//! that outlives the lock timeout can have its lock taken over while it is
//! still running.

mod clock;
mod coordinator;
mod guard;
mod types;


// Re-export public API
#[cfg(test)]
pub use clock::FixedClock;
pub use clock::{Clock, SystemClock};
pub use coordinator::LockCoordinator;
pub use guard::LockGuard;
pub use types::{AcquireOutcome, Expiry, ReacquireOutcome, ReleaseOutcome};
