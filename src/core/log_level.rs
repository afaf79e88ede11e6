//! Log level definitions

use super::tag::Tag;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
}

impl LogLevel {
    /// Every level, lowest severity first
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// Tag attached to a call at this level when the caller supplies none.
    ///
    /// Info and Fatal stay untagged so plain narrative messages can sit
    /// next to tagged ones.
    pub fn default_tag(&self) -> Option<Tag> {
        match self {
            LogLevel::Trace => Some(Tag::Verbose),
            LogLevel::Debug => Some(Tag::Debug),
            LogLevel::Info => None,
            LogLevel::Warn => Some(Tag::Warn),
            LogLevel::Error => Some(Tag::Error),
            LogLevel::Fatal => None,
        }
    }

    /// Default tags as a list, ready to hand to the argument normalizer
    pub fn default_tags(&self) -> Vec<Tag> {
        self.default_tag().into_iter().collect()
    }

    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Trace => Cyan,
            LogLevel::Debug => Blue,
            LogLevel::Info => BrightGreen,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
            LogLevel::Fatal => White,
        }
    }

    pub fn background_code(&self) -> Option<colored::Color> {
        match self {
            LogLevel::Fatal => Some(colored::Color::Red),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" | "LOG" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "FATAL" => Ok(LogLevel::Fatal),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}
