//! Configuration types for the bucket monitor.
//!
//! The persisted document is JSON. `check_interval`, `retry_delay` and
//! `smtp_port` accept either numbers or strings so hand-edited files like
//! `"check_interval": "300"` keep working.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// Monitor Configuration
// ============================================================================

/// Top-level monitor configuration, loaded once at start-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Bucket to list
    pub bucket_name: String,
    /// Sleep between successful cycles
    #[serde(with = "duration_secs")]
    pub check_interval: Duration,
    /// Snapshot written by the most recent listing
    pub current_file: PathBuf,
    /// Baseline snapshot from the previous cycle
    pub previous_file: PathBuf,
    /// Email delivery settings
    pub email: EmailConfig,
    /// Listing command; `{bucket}` is replaced in every argument
    pub list_command: Vec<String>,
    /// Sleep after a failed listing or cycle error
    #[serde(with = "duration_secs")]
    pub retry_delay: Duration,
}

/// SMTP settings for change notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub smtp_server: String,
    #[serde(deserialize_with = "deserialize_port")]
    pub smtp_port: u16,
    /// Sender address, also used as the SMTP username
    pub sender: String,
    pub password: String,
    /// All recipients share one `To` header
    pub recipients: Vec<String>,
    pub subject: String,
}

// ============================================================================
// Duration parsing
// ============================================================================

/// Parse a human-readable duration string into a [`Duration`].
///
/// A bare number is read as seconds. Supported suffixes: `ms`
/// (milliseconds), `s` (seconds), `m` (minutes), `h` (hours), `d` (days).
///
/// # Examples
///
/// ```
/// use bucketwatch::config::parse_duration;
/// use std::time::Duration;
///
/// assert_eq!(parse_duration("300").unwrap(), Duration::from_secs(300));
/// assert_eq!(parse_duration("5m").unwrap(), Duration::from_secs(300));
/// ```
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration".to_string());
    }

    if let Ok(secs) = s.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }

    let (num_str, unit) = if let Some(stripped) = s.strip_suffix("ms") {
        (stripped, "ms")
    } else if s.ends_with('s') || s.ends_with('m') || s.ends_with('h') || s.ends_with('d') {
        (&s[..s.len() - 1], &s[s.len() - 1..])
    } else {
        return Err(format!("invalid duration '{s}': expected format like 300, 30s, 5m, 1h"));
    };

    let value: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("invalid duration '{s}': expected format like 300, 30s, 5m, 1h"))?;

    let multiplier = match unit {
        "ms" => return Ok(Duration::from_millis(value)),
        "s" => 1,
        "m" => 60,
        "h" => 3600,
        "d" => 86_400,
        _ => return Err(format!("invalid duration unit in '{s}'")),
    };

    value
        .checked_mul(multiplier)
        .map(Duration::from_secs)
        .ok_or_else(|| format!("duration '{s}' is too large"))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    Text(String),
}

/// Serde adapter: durations are written as whole seconds and read from
/// either a number of seconds or a duration string.
mod duration_secs {
    use super::{parse_duration, NumberOrString};
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(secs) => Ok(Duration::from_secs(secs)),
            NumberOrString::Text(text) => parse_duration(&text).map_err(serde::de::Error::custom),
        }
    }
}

/// An empty string is the placeholder the bootstrap document historically
/// shipped with; it maps to the submission port.
fn deserialize_port<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(port) => u16::try_from(port)
            .map_err(|_| serde::de::Error::custom(format!("port {port} out of range"))),
        NumberOrString::Text(text) if text.trim().is_empty() => {
            Ok(super::defaults::DEFAULT_SMTP_PORT)
        }
        NumberOrString::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid port '{text}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_bare_seconds() {
        assert_eq!(parse_duration("300").unwrap(), Duration::from_secs(300));
    }

    #[test]
    fn test_parse_duration_suffixes() {
        assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_duration("5m").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_duration("2d").unwrap(), Duration::from_secs(172_800));
        assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
    }

    #[test]
    fn test_parse_duration_with_whitespace() {
        assert_eq!(parse_duration("  10s  ").unwrap(), Duration::from_secs(10));
    }

    #[test]
    fn test_parse_duration_invalid() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("abcs").is_err());
        assert!(parse_duration("10x").is_err());
        assert!(parse_duration("-5").is_err());
    }

    #[test]
    fn test_interval_accepts_string_or_number() {
        let from_string: MonitorConfig =
            serde_json::from_str(r#"{"check_interval": "300"}"#).unwrap();
        let from_number: MonitorConfig =
            serde_json::from_str(r#"{"check_interval": 300}"#).unwrap();
        let from_suffix: MonitorConfig =
            serde_json::from_str(r#"{"check_interval": "5m"}"#).unwrap();

        assert_eq!(from_string.check_interval, Duration::from_secs(300));
        assert_eq!(from_number.check_interval, Duration::from_secs(300));
        assert_eq!(from_suffix.check_interval, Duration::from_secs(300));
    }

    #[test]
    fn test_invalid_interval_is_a_parse_error() {
        let result: Result<MonitorConfig, _> =
            serde_json::from_str(r#"{"check_interval": "soon"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_port_accepts_string_number_or_placeholder() {
        let email: EmailConfig = serde_json::from_str(r#"{"smtp_port": "465"}"#).unwrap();
        assert_eq!(email.smtp_port, 465);

        let email: EmailConfig = serde_json::from_str(r#"{"smtp_port": 2525}"#).unwrap();
        assert_eq!(email.smtp_port, 2525);

        let email: EmailConfig = serde_json::from_str(r#"{"smtp_port": ""}"#).unwrap();
        assert_eq!(email.smtp_port, 587);

        assert!(serde_json::from_str::<EmailConfig>(r#"{"smtp_port": 70000}"#).is_err());
    }

    #[test]
    fn test_parse_duration_overflow_is_rejected() {
        assert!(parse_duration("213503982334602d").is_err());
        assert!(parse_duration("18446744073709551615h").is_err());
        assert_eq!(
            parse_duration("18446744073709551615s").unwrap(),
            Duration::from_secs(u64::MAX)
        );
    }

    #[test]
    fn test_overflowing_interval_string_is_malformed() {
        let result =
            serde_json::from_str::<MonitorConfig>(r#"{"check_interval": "213503982334602d"}"#);
        assert!(result.is_err());
    }
}
