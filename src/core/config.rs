//! Logger configuration
//!
//! [`LoggerConfig`] is the immutable, fully resolved configuration owned by a
//! [`Logger`](super::Logger). [`LoggerSettings`] is its serializable
//! counterpart: every field optional, readable from JSON, applied through
//! [`LoggerBuilder::from_settings`](super::LoggerBuilder::from_settings).

use super::error::{LoggerError, Result};
use super::file_name::FileNamer;
use super::formatter::{LogFormatter, StripPolicy};
use super::log_level::LogLevel;
use super::timestamp::{TimeRenderer, TimestampFormat};
use crate::appenders::RecordLayout;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const DEFAULT_LOG_DIR: &str = "./logs";

/// Resolved configuration of one logger
#[derive(Clone)]
pub struct LoggerConfig {
    pub(crate) log_dir: PathBuf,
    pub(crate) min_level: LogLevel,
    pub(crate) file_namer: Arc<dyn FileNamer>,
    pub(crate) formatter: Arc<dyn LogFormatter>,
    pub(crate) time_renderer: Arc<dyn TimeRenderer>,
    pub(crate) console_enabled: bool,
    pub(crate) strip_color_in_file: bool,
    pub(crate) strip_color_in_console: bool,
    pub(crate) record_layout: RecordLayout,
}

impl LoggerConfig {
    /// Absolute directory the log files live in
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn console_enabled(&self) -> bool {
        self.console_enabled
    }

    pub fn strip_color_in_file(&self) -> bool {
        self.strip_color_in_file
    }

    pub fn strip_color_in_console(&self) -> bool {
        self.strip_color_in_console
    }

    pub fn record_layout(&self) -> RecordLayout {
        self.record_layout
    }

    pub fn strip_policy(&self) -> StripPolicy {
        StripPolicy {
            file: self.strip_color_in_file,
            console: self.strip_color_in_console,
        }
    }

    /// Console gate: file output is never filtered
    pub fn should_print(&self, level: LogLevel) -> bool {
        self.console_enabled && level >= self.min_level
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("log_dir", &self.log_dir)
            .field("min_level", &self.min_level)
            .field("console_enabled", &self.console_enabled)
            .field("strip_color_in_file", &self.strip_color_in_file)
            .field("strip_color_in_console", &self.strip_color_in_console)
            .field("record_layout", &self.record_layout)
            .finish_non_exhaustive()
    }
}

/// Resolve `dir` against the current working directory if it is relative
pub fn absolute_dir(dir: &Path) -> Result<PathBuf> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    let cwd = std::env::current_dir()
        .map_err(|e| LoggerError::filesystem("resolving working directory for", dir, e))?;
    let joined = cwd.join(dir);
    // Drop `.` components so `./logs` resolves to `<cwd>/logs`
    Ok(joined
        .components()
        .filter(|component| !matches!(component, std::path::Component::CurDir))
        .collect())
}

/// Serializable construction options
///
/// ```
/// use chibilog::core::LoggerSettings;
///
/// let settings = LoggerSettings::from_json_str(
///     r#"{ "log_dir": "/tmp/app-logs", "min_level": "warn", "time_format": "Utc" }"#,
/// ).unwrap();
/// assert_eq!(settings.min_level, Some(chibilog::LogLevel::Warn));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerSettings {
    pub log_dir: Option<PathBuf>,
    pub min_level: Option<LogLevel>,
    pub custom_id: Option<String>,
    pub time_format: Option<TimestampFormat>,
    pub console: Option<bool>,
    pub strip_color_in_file: Option<bool>,
    pub strip_color_in_console: Option<bool>,
    pub record_layout: Option<RecordLayout>,
}

impl LoggerSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| LoggerError::filesystem("reading settings", path, e))?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.log_dir {
            if dir.as_os_str().is_empty() {
                return Err(LoggerError::config("log_dir", "must not be empty"));
            }
        }
        if let Some(TimestampFormat::Custom(pattern)) = &self.time_format {
            if pattern.is_empty() {
                return Err(LoggerError::config("time_format", "custom pattern must not be empty"));
            }
        }
        Ok(())
    }
}
