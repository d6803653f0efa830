//! Guarded execution of one command under the lock.
//!
//! The runner takes the lock, runs the command only once ownership is
//! confirmed, and releases the lock afterwards on every path. A store error
//! before ownership is confirmed aborts the run without starting the command.

mod command;


pub use command::{CommandLine, RunRequest, execute};

use crate::error::{LockRunError, Result};
use crate::lock::{
    AcquireOutcome, Clock, Expiry, LockCoordinator, LockGuard, ReacquireOutcome, ReleaseOutcome,
};
use crate::store::LockStore;
use tracing::{debug, info, warn};

/// Run `request` under the coordinator's lock.
///
/// Returns `LockDenied` without running anything when another holder owns
/// an unexpired lock. Otherwise returns the command's own result; a failure
/// to release afterwards is logged and does not change it.
pub fn run<S: LockStore, C: Clock>(
    coordinator: &mut LockCoordinator<S, C>,
    request: &RunRequest,
) -> Result<()> {
    let expiry = coordinator.compute_expiry(request.lock_timeout)?;
    let guard = acquire(coordinator, expiry)?;

    info!(command = %request.command, expiry = %guard.expiry(), "running");
    let outcome = execute(&request.command);
    match &outcome {
        Ok(()) => info!(command = %request.command, "finished running"),
        Err(e) => debug!(error = %e, "command failed"),
    }

    match guard.release() {
        Ok(ReleaseOutcome::Released) => {}
        Ok(ReleaseOutcome::NotOwned) => warn!(
            timeout = %crate::config::format_duration(request.lock_timeout),
            "lock expired while the command was running; left it in place"
        ),
        Err(e) => warn!(error = %e, "failed to release lock"),
    }

    outcome
}

/// Take the lock with `expiry`, taking over an expired one if necessary.
pub fn acquire<'a, S: LockStore, C: Clock>(
    coordinator: &'a mut LockCoordinator<S, C>,
    expiry: Expiry,
) -> Result<LockGuard<'a, S, C>> {
    if coordinator.try_acquire(expiry)? == AcquireOutcome::Contended {
        let now = coordinator.now();
        match coordinator.read_expiry()? {
            Some(current) if !current.has_passed(now) => {
                info!(key = %coordinator.key(), expiry = %current, "locked");
                return Err(denied(coordinator.key(), current));
            }
            current => {
                info!(
                    key = %coordinator.key(),
                    stored_expiry = current.map(|e| e.unix()),
                    "lock is expired, trying to acquire lock"
                );
                if let ReacquireOutcome::Denied { holder } =
                    coordinator.reacquire_if_expired(expiry)?
                {
                    info!(
                        key = %coordinator.key(),
                        "failed: lock is already acquired by another process"
                    );
                    return Err(denied(coordinator.key(), holder));
                }
            }
        }
    }

    info!(key = %coordinator.key(), expiry = %expiry, "acquired lock");
    Ok(LockGuard::new(coordinator, expiry))
}

fn denied(key: &str, holder: Expiry) -> LockRunError {
    LockRunError::LockDenied {
        key: key.to_string(),
        expires_at: holder.to_string(),
    }
}
