//! Log event structure

use super::log_level::LogLevel;
use super::tag::Tag;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One log call, alive only while that call is being dispatched.
///
/// `timestamp` is the single instant from which both the rendered time and
/// the target file name are derived.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEvent {
    pub level: LogLevel,
    pub message: String,
    pub tags: Vec<Tag>,
    pub timestamp: DateTime<Utc>,
    /// Console output skips decoration and shows `message` as is
    pub raw: bool,
}

impl LogEvent {
    pub fn new(level: LogLevel, message: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            level,
            message: message.into(),
            tags: Vec::new(),
            timestamp,
            raw: false,
        }
    }

    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }
}
