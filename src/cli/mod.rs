//! CLI argument parsing for redislockrun.
//!
//! Uses clap derive macros. Every lock/store flag can also be set through a
//! `REDISLOCKRUN_*` environment variable; flags win over the environment,
//! and both win over the config file. A variable that is set but empty
//! counts as unset.

use crate::config::{ConfigOverrides, parse_duration};
use crate::error::{LockRunError, Result};
use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Run a command only if no other host or process is running it.
///
/// The lock lives in Redis under a single key holding the holder's expiry
/// time. A holder that crashes leaves the key behind until it expires.
#[derive(Parser, Debug)]
#[command(name = "redislockrun")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// How long the lock stays valid once acquired (e.g. 30m, 1h30m, 90s).
    ///
    /// The command is not stopped when this elapses; size it above the
    /// command's longest expected runtime.
    #[arg(long, env = "REDISLOCKRUN_TIMEOUT")]
    pub timeout: Option<String>,

    /// Name of the lock key [default: lock].
    #[arg(long, env = "REDISLOCKRUN_KEY")]
    pub key: Option<String>,

    /// Redis address as host:port [default: 127.0.0.1:6379].
    #[arg(long, env = "REDISLOCKRUN_ADDR")]
    pub addr: Option<String>,

    /// Redis password.
    #[arg(long, env = "REDISLOCKRUN_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Redis database index [default: 0].
    #[arg(long, env = "REDISLOCKRUN_DB")]
    pub db: Option<String>,

    /// YAML config file providing defaults for the options above.
    #[arg(long, env = "REDISLOCKRUN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Command to run, followed by its arguments.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Config file to load, unless the path is empty.
    pub fn config_path(&self) -> Option<&Path> {
        self.config
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }

    /// Flag and environment values that override the config file.
    ///
    /// Empty values are dropped; malformed timeout or db values are usage
    /// errors.
    pub fn overrides(&self) -> Result<ConfigOverrides> {
        let lock_timeout = match non_empty(&self.timeout) {
            Some(raw) => Some(parse_timeout(&raw)?),
            None => None,
        };
        let db = match non_empty(&self.db) {
            Some(raw) => Some(raw.trim().parse::<i64>().map_err(|_| {
                LockRunError::Usage(format!("invalid db index '{}'", raw))
            })?),
            None => None,
        };

        Ok(ConfigOverrides {
            key: non_empty(&self.key),
            lock_timeout,
            addr: non_empty(&self.addr),
            password: non_empty(&self.password),
            db,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.clone().filter(|s| !s.is_empty())
}

fn parse_timeout(value: &str) -> Result<Duration> {
    parse_duration(value).ok_or_else(|| {
        LockRunError::Usage(format!(
            "invalid duration '{}' (expected e.g. 30m, 1h30m, 90s, 500ms)",
            value
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::exit_codes;
    use serial_test::serial;

    const ENV_VARS: [&str; 6] = [
        "REDISLOCKRUN_TIMEOUT",
        "REDISLOCKRUN_KEY",
        "REDISLOCKRUN_ADDR",
        "REDISLOCKRUN_PASSWORD",
        "REDISLOCKRUN_DB",
        "REDISLOCKRUN_CONFIG",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            // SAFETY: tests touching the environment are serialized.
            unsafe { std::env::remove_var(var) };
        }
    }

    #[test]
    #[serial]
    fn test_parse_command_and_args() {
        clear_env();
        let cli = Cli::try_parse_from(["redislockrun", "echo", "hi"]).unwrap();
        assert_eq!(cli.command, vec!["echo", "hi"]);
        assert_eq!(cli.timeout, None);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    #[serial]
    fn test_flags_before_command() {
        clear_env();
        let cli = Cli::try_parse_from([
            "redislockrun",
            "--timeout",
            "10m",
            "--key",
            "nightly",
            "--db",
            "3",
            "-vv",
            "rsync",
            "-a",
            "--delete",
            "src/",
            "dst/",
        ])
        .unwrap();

        let overrides = cli.overrides().unwrap();
        assert_eq!(overrides.lock_timeout, Some(Duration::from_secs(600)));
        assert_eq!(overrides.key.as_deref(), Some("nightly"));
        assert_eq!(overrides.db, Some(3));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.command, vec!["rsync", "-a", "--delete", "src/", "dst/"]);
    }

    #[test]
    #[serial]
    fn test_double_dash_separates_command() {
        clear_env();
        let cli = Cli::try_parse_from(["redislockrun", "--", "--weird-program", "x"]).unwrap();
        assert_eq!(cli.command, vec!["--weird-program", "x"]);
    }

    #[test]
    #[serial]
    fn test_no_command_parses_to_empty() {
        clear_env();
        let cli = Cli::try_parse_from(["redislockrun"]).unwrap();
        assert!(cli.command.is_empty());
    }

    #[test]
    #[serial]
    fn test_invalid_timeout_rejected() {
        clear_env();
        let cli = Cli::try_parse_from(["redislockrun", "--timeout", "soon", "true"]).unwrap();
        let err = cli.overrides().unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::USAGE_ERROR);
        assert!(err.to_string().contains("invalid duration 'soon'"));
    }

    #[test]
    #[serial]
    fn test_environment_variables_fill_overrides() {
        clear_env();
        // SAFETY: tests touching the environment are serialized.
        unsafe {
            std::env::set_var("REDISLOCKRUN_KEY", "from-env");
            std::env::set_var("REDISLOCKRUN_ADDR", "redis.internal:6380");
            std::env::set_var("REDISLOCKRUN_DB", "5");
            std::env::set_var("REDISLOCKRUN_TIMEOUT", "1h");
        }

        let cli = Cli::try_parse_from(["redislockrun", "--key", "from-flag", "true"]).unwrap();
        clear_env();

        let overrides = cli.overrides().unwrap();
        assert_eq!(overrides.key.as_deref(), Some("from-flag"));
        assert_eq!(overrides.addr.as_deref(), Some("redis.internal:6380"));
        assert_eq!(overrides.db, Some(5));
        assert_eq!(overrides.lock_timeout, Some(Duration::from_secs(3600)));
        assert_eq!(overrides.password, None);
    }

    #[test]
    #[serial]
    fn test_invalid_db_from_environment_rejected() {
        clear_env();
        // SAFETY: tests touching the environment are serialized.
        unsafe { std::env::set_var("REDISLOCKRUN_DB", "two") };

        let cli = Cli::try_parse_from(["redislockrun", "true"]).unwrap();
        clear_env();

        let err = cli.overrides().unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::USAGE_ERROR);
        assert!(err.to_string().contains("invalid db index 'two'"));
    }

    #[test]
    #[serial]
    fn test_empty_environment_variables_are_ignored() {
        clear_env();
        for var in ENV_VARS {
            // SAFETY: tests touching the environment are serialized.
            unsafe { std::env::set_var(var, "") };
        }

        let cli = Cli::try_parse_from(["redislockrun", "true"]).unwrap();
        clear_env();

        let config = Config::resolve(cli.config_path(), cli.overrides().unwrap()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_empty_flag_values_are_ignored() {
        clear_env();
        let cli = Cli::try_parse_from(["redislockrun", "--key", "", "--db", "", "true"]).unwrap();

        let config = Config::resolve(None, cli.overrides().unwrap()).unwrap();
        assert_eq!(config.key, "lock");
        assert_eq!(config.db, 0);
    }

    #[test]
    #[serial]
    fn test_verbose_conflicts_with_quiet() {
        clear_env();
        assert!(Cli::try_parse_from(["redislockrun", "-v", "-q", "true"]).is_err());
    }
}
