//! Main logger implementation

use super::{
    arguments::LogArgs,
    clock::{Clock, SystemClock},
    config::{absolute_dir, LoggerConfig, LoggerSettings, DEFAULT_LOG_DIR},
    error::Result,
    file_name::{DailyFileNamer, FileNamer},
    formatter::{render_event, DefaultFormatter, LogFormatter},
    log_event::LogEvent,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    registry::{generate_id, normalize_id, DEFAULT_ID_LENGTH},
    tag::Tag,
    timestamp::{TimeRenderer, TimestampFormat},
};
use crate::appenders::{ConsoleChannel, ConsoleSink, FileAppender, RecordLayout, StdConsole};
use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// A leveled logger writing every call to its log file and, above the
/// configured minimum level, to the console.
///
/// Each call captures one instant, formats the event, prints it if the
/// console gate allows, then appends it to the file derived from the same
/// instant. Nothing is buffered: when a method returns `Ok`, the record is in
/// the file.
///
/// # Example
///
/// ```no_run
/// use chibilog::prelude::*;
///
/// let logger = Logger::builder()
///     .log_dir("./logs")
///     .min_level(LogLevel::Debug)
///     .build()?;
///
/// logger.info("server started")?;
/// logger.warn(LogArgs::new().part("disk").part(91).with_options(LogOptions::new().tags(["AUDIT"])))?;
/// # Ok::<(), chibilog::LoggerError>(())
/// ```
pub struct Logger {
    id: String,
    config: LoggerConfig,
    console: Arc<dyn ConsoleSink>,
    clock: Arc<dyn Clock>,
    files: FileAppender,
    /// Metrics for observability (console writes, file appends, etc.)
    metrics: LoggerMetrics,
}

impl Logger {
    /// Logger with every default: `./logs`, Info, console on
    pub fn new() -> Result<Self> {
        LoggerBuilder::new().build()
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Path of the file a record captured at `at` is appended to
    pub fn log_file_at(&self, at: &DateTime<Utc>) -> Result<PathBuf> {
        Ok(self.config.log_dir.join(self.config.file_namer.file_name(at)?))
    }

    /// Generic entry point; applies the level's default tags
    pub fn logger(&self, level: LogLevel, args: impl Into<LogArgs>) -> Result<()> {
        self.dispatch(level, args.into(), &level.default_tags(), false)
    }

    #[inline]
    pub fn trace(&self, args: impl Into<LogArgs>) -> Result<()> {
        self.logger(LogLevel::Trace, args)
    }

    #[inline]
    pub fn debug(&self, args: impl Into<LogArgs>) -> Result<()> {
        self.logger(LogLevel::Debug, args)
    }

    #[inline]
    pub fn info(&self, args: impl Into<LogArgs>) -> Result<()> {
        self.logger(LogLevel::Info, args)
    }

    /// Alias of [`Logger::info`]
    #[inline]
    pub fn log(&self, args: impl Into<LogArgs>) -> Result<()> {
        self.logger(LogLevel::Info, args)
    }

    #[inline]
    pub fn warn(&self, args: impl Into<LogArgs>) -> Result<()> {
        self.logger(LogLevel::Warn, args)
    }

    #[inline]
    pub fn error(&self, args: impl Into<LogArgs>) -> Result<()> {
        self.logger(LogLevel::Error, args)
    }

    #[inline]
    pub fn fatal(&self, args: impl Into<LogArgs>) -> Result<()> {
        self.logger(LogLevel::Fatal, args)
    }

    /// Info-level call whose console output is the bare message.
    ///
    /// The file still receives the decorated line, tagged PRINT by default.
    pub fn print(&self, args: impl Into<LogArgs>) -> Result<()> {
        self.dispatch(LogLevel::Info, args.into(), &[Tag::Print], true)
    }

    fn dispatch(&self, level: LogLevel, args: LogArgs, default_tags: &[Tag], raw: bool) -> Result<()> {
        let call = args.normalize(default_tags);
        let event = LogEvent::new(level, call.message, self.clock.now())
            .with_tags(call.tags)
            .with_raw(raw);

        let result = self.emit(&event);
        if result.is_err() {
            self.metrics.record_failure();
        }
        result
    }

    /// Dispatch an already built event to both sinks.
    ///
    /// The file append is attempted even when the console write fails; the
    /// console error is then the one returned.
    pub fn emit(&self, event: &LogEvent) -> Result<()> {
        let time = self.config.time_renderer.render(&event.timestamp)?;
        let path = self.log_file_at(&event.timestamp)?;
        let rendered = render_event(
            event,
            &time,
            self.config.formatter.as_ref(),
            self.config.strip_policy(),
        )?;

        let printed = if self.config.should_print(event.level) {
            let written = self
                .console
                .write_line(ConsoleChannel::for_level(event.level), &rendered.console);
            if written.is_ok() {
                self.metrics.record_console_write();
            }
            written
        } else {
            self.metrics.record_suppressed();
            Ok(())
        };

        let appended = self.files.append(&path, &rendered.file);
        if appended.is_ok() {
            self.metrics.record_file_append();
        }

        printed.and(appended)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```no_run
/// use chibilog::prelude::*;
///
/// let logger = Logger::builder()
///     .log_dir("/var/log/my-app")
///     .min_level(LogLevel::Warn)
///     .time_format(TimestampFormat::Utc)
///     .strip_color_in_console(true)
///     .build()?;
/// # Ok::<(), chibilog::LoggerError>(())
/// ```
pub struct LoggerBuilder {
    log_dir: PathBuf,
    min_level: LogLevel,
    custom_id: Option<String>,
    file_namer: Arc<dyn FileNamer>,
    formatter: Arc<dyn LogFormatter>,
    time_renderer: Arc<dyn TimeRenderer>,
    console_enabled: bool,
    strip_color_in_file: bool,
    strip_color_in_console: bool,
    record_layout: RecordLayout,
    console: Arc<dyn ConsoleSink>,
    clock: Arc<dyn Clock>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            min_level: LogLevel::Info,
            custom_id: None,
            file_namer: Arc::new(DailyFileNamer),
            formatter: Arc::new(DefaultFormatter),
            time_renderer: Arc::new(TimestampFormat::Iso8601),
            console_enabled: true,
            strip_color_in_file: true,
            strip_color_in_console: false,
            record_layout: RecordLayout::LeadingNewline,
            console: Arc::new(StdConsole),
            clock: Arc::new(SystemClock),
        }
    }

    /// Builder preloaded with every option present in `settings`
    pub fn from_settings(settings: &LoggerSettings) -> Self {
        let mut builder = Self::new();
        if let Some(dir) = &settings.log_dir {
            builder = builder.log_dir(dir);
        }
        if let Some(level) = settings.min_level {
            builder = builder.min_level(level);
        }
        if let Some(id) = &settings.custom_id {
            builder = builder.custom_id(id.clone());
        }
        if let Some(format) = &settings.time_format {
            builder = builder.time_format(format.clone());
        }
        if let Some(console) = settings.console {
            builder = builder.console(console);
        }
        if let Some(strip) = settings.strip_color_in_file {
            builder = builder.strip_color_in_file(strip);
        }
        if let Some(strip) = settings.strip_color_in_console {
            builder = builder.strip_color_in_console(strip);
        }
        if let Some(layout) = settings.record_layout {
            builder = builder.record_layout(layout);
        }
        builder
    }

    /// Directory for log files; relative paths resolve against the working
    /// directory when the logger is built
    #[must_use = "builder methods return a new value"]
    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    /// Minimum level printed to the console. Files receive every level.
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Identifier to use instead of a generated one; trimmed and lower-cased.
    /// Blank ids fall back to generation.
    #[must_use = "builder methods return a new value"]
    pub fn custom_id(mut self, id: impl Into<String>) -> Self {
        self.custom_id = Some(id.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn file_namer<N: FileNamer + 'static>(mut self, namer: N) -> Self {
        self.file_namer = Arc::new(namer);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter<F: LogFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_format(mut self, format: TimestampFormat) -> Self {
        self.time_renderer = Arc::new(format);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_renderer<R: TimeRenderer + 'static>(mut self, renderer: R) -> Self {
        self.time_renderer = Arc::new(renderer);
        self
    }

    /// Enable or disable console output
    #[must_use = "builder methods return a new value"]
    pub fn console(mut self, enabled: bool) -> Self {
        self.console_enabled = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn strip_color_in_file(mut self, strip: bool) -> Self {
        self.strip_color_in_file = strip;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn strip_color_in_console(mut self, strip: bool) -> Self {
        self.strip_color_in_console = strip;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn record_layout(mut self, layout: RecordLayout) -> Self {
        self.record_layout = layout;
        self
    }

    /// Where console lines go; defaults to stdout/stderr
    #[must_use = "builder methods return a new value"]
    pub fn console_sink(mut self, sink: Arc<dyn ConsoleSink>) -> Self {
        self.console = sink;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The normalized custom id, if one was given and is not blank
    pub fn requested_id(&self) -> Option<String> {
        self.custom_id.as_deref().and_then(normalize_id)
    }

    /// Build a standalone Logger, generating an id if none was requested.
    ///
    /// Use [`LoggerRegistry::register`](super::LoggerRegistry::register) to
    /// get an id that is unique among registered loggers.
    pub fn build(self) -> Result<Logger> {
        let id = self
            .requested_id()
            .unwrap_or_else(|| generate_id(DEFAULT_ID_LENGTH));
        self.build_with_id(id)
    }

    pub(crate) fn build_with_id(self, id: String) -> Result<Logger> {
        let config = LoggerConfig {
            log_dir: absolute_dir(&self.log_dir)?,
            min_level: self.min_level,
            file_namer: self.file_namer,
            formatter: self.formatter,
            time_renderer: self.time_renderer,
            console_enabled: self.console_enabled,
            strip_color_in_file: self.strip_color_in_file,
            strip_color_in_console: self.strip_color_in_console,
            record_layout: self.record_layout,
        };

        Ok(Logger {
            id,
            files: FileAppender::new().with_layout(config.record_layout),
            config,
            console: self.console,
            clock: self.clock,
            metrics: LoggerMetrics::new(),
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::MemoryConsole;
    use crate::core::clock::FixedClock;
    use crate::core::error::LoggerError;
    use crate::core::style::strip_ansi;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::TempDir;

    fn fixed_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).single().unwrap()
    }

    fn test_logger(dir: &TempDir, console: Arc<MemoryConsole>) -> LoggerBuilder {
        Logger::builder()
            .log_dir(dir.path())
            .console_sink(console)
            .clock(Arc::new(FixedClock(fixed_instant())))
            .file_namer(|_: &DateTime<Utc>| -> Result<String> { Ok("test.log".to_string()) })
    }

    #[test]
    fn test_builder_defaults() {
        let logger = Logger::builder().build().unwrap();
        let config = logger.config();

        assert!(config.log_dir().is_absolute());
        assert!(config.log_dir().ends_with("logs"));
        assert_eq!(config.min_level(), LogLevel::Info);
        assert!(config.console_enabled());
        assert!(config.strip_color_in_file());
        assert!(!config.strip_color_in_console());
        assert_eq!(config.record_layout(), RecordLayout::LeadingNewline);
        assert_eq!(logger.id().len(), DEFAULT_ID_LENGTH);
    }

    #[test]
    fn test_custom_id_is_normalized() {
        let logger = Logger::builder().custom_id("  MainLog ").build().unwrap();
        assert_eq!(logger.id(), "mainlog");

        let logger = Logger::builder().custom_id("   ").build().unwrap();
        assert_eq!(logger.id().len(), DEFAULT_ID_LENGTH);
    }

    #[test]
    fn test_file_gets_every_level_console_only_above_minimum() {
        let dir = TempDir::new().unwrap();
        let console = Arc::new(MemoryConsole::new());
        let logger = test_logger(&dir, console.clone())
            .min_level(LogLevel::Warn)
            .build()
            .unwrap();

        logger.info("x").unwrap();
        logger.error("y").unwrap();

        let lines = console.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, ConsoleChannel::Error);
        assert!(strip_ansi(&lines[0].1).ends_with(" y"));

        let content = fs::read_to_string(dir.path().join("test.log")).unwrap();
        assert_eq!(
            content,
            "\n[2025-01-08T10:30:45.000Z] [INFO] x\n[2025-01-08T10:30:45.000Z] [ERROR] (ERROR) y"
        );
        assert_eq!(logger.metrics().console_writes(), 1);
        assert_eq!(logger.metrics().file_appends(), 2);
        assert_eq!(logger.metrics().suppressed_count(), 1);
    }

    #[test]
    fn test_default_tags_per_method() {
        let dir = TempDir::new().unwrap();
        let console = Arc::new(MemoryConsole::new());
        let logger = test_logger(&dir, console.clone())
            .min_level(LogLevel::Trace)
            .strip_color_in_console(true)
            .time_format(TimestampFormat::Custom("T".to_string()))
            .build()
            .unwrap();

        logger.trace("a").unwrap();
        logger.debug("b").unwrap();
        logger.info("c").unwrap();
        logger.log("d").unwrap();
        logger.warn("e").unwrap();
        logger.error("f").unwrap();
        logger.fatal("g").unwrap();

        let printed: Vec<String> = console.lines().into_iter().map(|(_, line)| line).collect();
        assert_eq!(
            printed,
            vec![
                "[T] [TRACE] (VERBOSE) a",
                "[T] [DEBUG] (DEBUG) b",
                "[T] [INFO] c",
                "[T] [INFO] d",
                "[T] [WARN] (WARN) e",
                "[T] [ERROR] (ERROR) f",
                "[T] [FATAL] g",
            ]
        );
    }

    #[test]
    fn test_print_is_raw_on_console_only() {
        let dir = TempDir::new().unwrap();
        let console = Arc::new(MemoryConsole::new());
        let logger = test_logger(&dir, console.clone()).build().unwrap();

        logger.print("plain text").unwrap();

        assert_eq!(
            console.lines(),
            vec![(ConsoleChannel::Info, "plain text".to_string())]
        );
        let content = fs::read_to_string(dir.path().join("test.log")).unwrap();
        assert_eq!(content, "\n[2025-01-08T10:30:45.000Z] [INFO] (PRINT) plain text");
    }

    #[test]
    fn test_console_disabled_still_writes_file() {
        let dir = TempDir::new().unwrap();
        let console = Arc::new(MemoryConsole::new());
        let logger = test_logger(&dir, console.clone())
            .console(false)
            .build()
            .unwrap();

        logger.fatal("down").unwrap();

        assert!(console.is_empty());
        assert!(dir.path().join("test.log").exists());
    }

    struct BrokenConsole;

    impl ConsoleSink for BrokenConsole {
        fn write_line(&self, _: ConsoleChannel, _: &str) -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed").into())
        }
    }

    #[test]
    fn test_console_failure_still_appends_file() {
        let dir = TempDir::new().unwrap();
        let logger = Logger::builder()
            .log_dir(dir.path())
            .console_sink(Arc::new(BrokenConsole))
            .clock(Arc::new(FixedClock(fixed_instant())))
            .file_namer(|_: &DateTime<Utc>| -> Result<String> { Ok("test.log".to_string()) })
            .build()
            .unwrap();

        let err = logger.error("audit record").unwrap_err();
        assert!(matches!(err, LoggerError::Io(_)));

        let content = fs::read_to_string(dir.path().join("test.log")).unwrap();
        assert_eq!(content, "\n[2025-01-08T10:30:45.000Z] [ERROR] (ERROR) audit record");
        assert_eq!(logger.metrics().console_writes(), 0);
        assert_eq!(logger.metrics().file_appends(), 1);
        assert_eq!(logger.metrics().failed_calls(), 1);
    }

    #[test]
    fn test_formatter_failure_propagates_and_skips_sinks() {
        let dir = TempDir::new().unwrap();
        let console = Arc::new(MemoryConsole::new());
        let logger = test_logger(&dir, console.clone())
            .formatter(|_: &str, _: LogLevel, _: &str, _: &[Tag]| -> Result<String> {
                Err(LoggerError::formatter("format", "broken"))
            })
            .build()
            .unwrap();

        let err = logger.info("x").unwrap_err();
        assert!(matches!(err, LoggerError::Formatter { .. }));
        assert!(console.is_empty());
        assert!(!dir.path().join("test.log").exists());
        assert_eq!(logger.metrics().failed_calls(), 1);
    }

    #[test]
    fn test_file_name_uses_event_instant() {
        let dir = TempDir::new().unwrap();
        let logger = Logger::builder()
            .log_dir(dir.path())
            .console(false)
            .clock(Arc::new(FixedClock(fixed_instant())))
            .file_namer(|at: &DateTime<Utc>| -> Result<String> {
                Ok(format!("{}.log", at.format("%Y%m%d%H%M%S")))
            })
            .build()
            .unwrap();

        logger.info("x").unwrap();

        assert!(dir.path().join("20250108103045.log").exists());
        assert_eq!(
            logger.log_file_at(&fixed_instant()).unwrap(),
            dir.path().join("20250108103045.log")
        );
    }

    #[test]
    fn test_from_settings() {
        let settings = LoggerSettings {
            min_level: Some(LogLevel::Error),
            custom_id: Some("Api".to_string()),
            console: Some(false),
            record_layout: Some(RecordLayout::TrailingNewline),
            ..LoggerSettings::default()
        };
        let logger = LoggerBuilder::from_settings(&settings).build().unwrap();

        assert_eq!(logger.id(), "api");
        assert_eq!(logger.config().min_level(), LogLevel::Error);
        assert!(!logger.config().console_enabled());
        assert_eq!(logger.config().record_layout(), RecordLayout::TrailingNewline);
    }
}
