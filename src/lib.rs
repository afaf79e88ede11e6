//! # ChibiLog
//!
//! A leveled logging library that writes every call to a per-day log file and
//! mirrors it, decorated with colors, to the console.
//!
//! ## Features
//!
//! - **Two sinks, two policies**: the console is filtered by level, the file
//!   receives everything
//! - **Tags**: catalog tags with colors, plus free-form ones
//! - **Pluggable formatting**: line format, time rendering and file naming
//!   are all replaceable
//! - **Instance registry**: several loggers side by side, looked up by id
//!
//! ```no_run
//! use chibilog::prelude::*;
//!
//! let registry = LoggerRegistry::new();
//! let logger = registry.register(Logger::builder().min_level(LogLevel::Debug))?;
//!
//! chibilog::info!(logger, "listening on", 8080)?;
//! chibilog::warn!(logger, "cache", "miss"; tags = ["AUDIT"], sep = ": ")?;
//! # Ok::<(), chibilog::LoggerError>(())
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleChannel, ConsoleSink, FileAppender, RecordLayout};
    pub use crate::core::{
        Clock, LogArgs, LogEvent, LogFormatter, LogLevel, LogOptions, Logger, LoggerBuilder,
        LoggerError, LoggerMetrics, LoggerRegistry, LoggerSettings, Result, Tag, TimeRenderer,
        TimestampFormat,
    };
}

pub use appenders::{ConsoleChannel, ConsoleSink, FileAppender, MemoryConsole, RecordLayout, StdConsole};
pub use core::{
    colorize_json, strip_ansi, Clock, DefaultFormatter, FileNamer, LogArgs, LogEvent,
    LogFormatter, LogLevel, LogOptions, Logger, LoggerBuilder, LoggerConfig, LoggerError,
    LoggerMetrics, LoggerRegistry, LoggerSettings, Result, Tag, TimeRenderer, TimestampFormat,
};

