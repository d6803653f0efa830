//! Configuration for redislockrun.
//!
//! A `Config` is assembled from defaults, an optional YAML file, and the
//! `REDISLOCKRUN_*` environment variables / command-line flags, in that
//! order of increasing precedence. It is passed explicitly to the store and
//! the lock coordinator; there is no process-wide config.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::{Config, ConfigOverrides};
pub use types::{format_duration, parse_duration};
