//! redislockrun: run a command under a Redis-backed lock so that it never
//! runs on more than one host at a time.
//!
//! This is the main entry point for the `redislockrun` CLI. It parses
//! arguments, resolves configuration, connects to the lock store, and maps
//! the outcome of the guarded run to an exit code.

mod cli;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod lock;
mod logging;
pub mod runner;
pub mod store;

use cli::Cli;
use config::Config;
use error::{LockRunError, Result};
use lock::{LockCoordinator, SystemClock};
use runner::RunRequest;
use std::process::ExitCode;
use store::RedisStore;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    let quiet = cli.quiet;
    logging::init(cli.verbose, quiet);

    match run(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            match &err {
                // Overlapping schedules hit this routinely.
                LockRunError::LockDenied { .. } => {
                    if logging::denial_level(quiet) == tracing::Level::WARN {
                        tracing::warn!("{}", err);
                    } else {
                        tracing::info!("{}", err);
                    }
                }
                _ => eprintln!("Error: {}", err),
            }
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::resolve(cli.config_path(), cli.overrides()?)?;
    tracing::debug!(config = %config.summary(), "resolved configuration");

    // Reject a bad invocation before touching the store.
    let request = RunRequest::new(cli.command, config.lock_timeout)?;

    let store = RedisStore::connect(&config)?;
    let mut coordinator = LockCoordinator::new(store, SystemClock, &config);
    runner::run(&mut coordinator, &request)
}
