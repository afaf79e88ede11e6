//! Timestamp rendering strategies
//!
//! Turns the instant captured for a log call into the time field of the
//! rendered line. The presets cover the common cases; any type implementing
//! [`TimeRenderer`] (closures included) can replace them.

use super::error::{LoggerError, Result};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Renders the time field of a log line
pub trait TimeRenderer: Send + Sync {
    fn render(&self, at: &DateTime<Utc>) -> Result<String>;
}

impl<F> TimeRenderer for F
where
    F: Fn(&DateTime<Utc>) -> Result<String> + Send + Sync,
{
    fn render(&self, at: &DateTime<Utc>) -> Result<String> {
        self(at)
    }
}

/// Timestamp presets
///
/// # Examples
///
/// ```
/// use chibilog::core::{TimeRenderer, TimestampFormat};
/// use chrono::Utc;
///
/// let rendered = TimestampFormat::Iso8601.render(&Utc::now()).unwrap();
/// assert!(rendered.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// RFC 3339 format: `2025-01-08T10:30:45.123+00:00`
    Rfc3339,

    /// Local wall-clock time: `1/8/2025, 11:30:45 AM`
    Local,

    /// HTTP-date style UTC time: `Wed, 08 Jan 2025 10:30:45 GMT`
    Utc,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format, rendered in UTC
    Custom(String),
}

impl TimestampFormat {
    /// Format `datetime`, failing on strftime patterns chrono cannot render
    pub fn format(&self, datetime: &DateTime<Utc>) -> Result<String> {
        match self {
            TimestampFormat::Iso8601 => Ok(datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()),
            TimestampFormat::Iso8601Micros => {
                Ok(datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string())
            }
            TimestampFormat::Rfc3339 => {
                Ok(datetime.to_rfc3339_opts(chrono::SecondsFormat::Millis, false))
            }
            TimestampFormat::Local => Ok(datetime
                .with_timezone(&Local)
                .format("%-m/%-d/%Y, %-I:%M:%S %p")
                .to_string()),
            TimestampFormat::Utc => Ok(datetime.format("%a, %d %b %Y %H:%M:%S GMT").to_string()),
            TimestampFormat::UnixMillis => Ok(datetime.timestamp_millis().to_string()),
            TimestampFormat::Custom(pattern) => {
                let mut out = String::new();
                write!(out, "{}", datetime.format(pattern)).map_err(|_| {
                    LoggerError::formatter("time", format!("invalid strftime pattern '{}'", pattern))
                })?;
                Ok(out)
            }
        }
    }

    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            TimestampFormat::Iso8601 => "ISO 8601 with milliseconds (2025-01-08T10:30:45.123Z)",
            TimestampFormat::Iso8601Micros => {
                "ISO 8601 with microseconds (2025-01-08T10:30:45.123456Z)"
            }
            TimestampFormat::Rfc3339 => "RFC 3339 with timezone (2025-01-08T10:30:45.123+00:00)",
            TimestampFormat::Local => "Local time (1/8/2025, 11:30:45 AM)",
            TimestampFormat::Utc => "UTC time (Wed, 08 Jan 2025 10:30:45 GMT)",
            TimestampFormat::UnixMillis => "Unix timestamp in milliseconds (1736332245123)",
            TimestampFormat::Custom(_) => "Custom strftime format",
        }
    }
}

impl TimeRenderer for TimestampFormat {
    fn render(&self, at: &DateTime<Utc>) -> Result<String> {
        self.format(at)
    }
}
