//! Core logger types and traits

pub mod arguments;
pub mod clock;
pub mod config;
pub mod error;
pub mod file_name;
pub mod formatter;
pub mod log_event;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod registry;
pub mod style;
pub mod tag;
pub mod timestamp;

pub use arguments::{LogArgs, LogOptions, NormalizedCall, DEFAULT_SEPARATOR};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{LoggerConfig, LoggerSettings, DEFAULT_LOG_DIR};
pub use error::{LoggerError, Result};
pub use file_name::{DailyFileNamer, FileNamer};
pub use formatter::{render_event, DefaultFormatter, LogFormatter, RenderedEvent, StripPolicy};
pub use log_event::LogEvent;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use registry::{generate_id, normalize_id, LoggerRegistry, DEFAULT_ID_LENGTH};
pub use style::{colorize_json, strip_ansi, style, StyleToken};
pub use tag::Tag;
pub use timestamp::{TimeRenderer, TimestampFormat};
