//! Configuration defaults and the duration format used by flags and YAML.
//!
//! Durations are written the way cron operators already write them for Go
//! tools: a sequence of `<integer><unit>` terms with units `h`, `m`, `s` and
//! `ms` (for example `30m`, `1h30m`, `90s`, `500ms`). A bare integer is a
//! number of seconds.

use std::time::Duration;

pub(crate) fn default_key() -> String {
    "lock".to_string()
}

pub(crate) fn default_addr() -> String {
    "127.0.0.1:6379".to_string()
}

pub(crate) fn default_lock_timeout() -> Duration {
    Duration::from_secs(30 * 60)
}

pub(crate) fn default_connect_timeout() -> Duration {
    Duration::from_secs(5)
}

/// Parse a duration such as `30m` or `1h30m`.
///
/// Returns `None` for empty input, unknown units, or overflow.
pub fn parse_duration(input: &str) -> Option<Duration> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(secs) = s.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }

    let mut total = Duration::ZERO;
    let mut rest = s;
    while !rest.is_empty() {
        let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        if digits == 0 {
            return None;
        }
        let value: u64 = rest[..digits].parse().ok()?;
        rest = &rest[digits..];

        let unit_len = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
        let term = match &rest[..unit_len] {
            "ms" => Duration::from_millis(value),
            "s" => Duration::from_secs(value),
            "m" => Duration::from_secs(value.checked_mul(60)?),
            "h" => Duration::from_secs(value.checked_mul(3600)?),
            _ => return None,
        };
        rest = &rest[unit_len..];
        total = total.checked_add(term)?;
    }

    Some(total)
}

/// Render a duration in the same format [`parse_duration`] accepts.
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis == 0 {
        return "0s".to_string();
    }

    let hours = millis / 3_600_000;
    let minutes = (millis / 60_000) % 60;
    let seconds = (millis / 1000) % 60;
    let ms = millis % 1000;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{}h", hours));
    }
    if minutes > 0 {
        out.push_str(&format!("{}m", minutes));
    }
    if seconds > 0 {
        out.push_str(&format!("{}s", seconds));
    }
    if ms > 0 {
        out.push_str(&format!("{}ms", ms));
    }
    out
}

/// Serde adapter storing a `Duration` as a duration string.
pub(crate) mod duration_string {
    use super::{format_duration, parse_duration};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_duration(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_duration(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid duration '{}'", raw)))
    }
}
