//! Log output for redislockrun.
//!
//! Logs go to stderr so they never mix with the guarded command's stdout.
//! `RUST_LOG` takes precedence; otherwise the level follows `-v` / `-q`.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Level selected by the verbosity flags.
pub fn level_for(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::WARN;
    }
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Level for the "lock is held elsewhere" report; stays visible under `-q`.
pub fn denial_level(quiet: bool) -> Level {
    if quiet { Level::WARN } else { Level::INFO }
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose, quiet).as_str()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
