//! Log line formatting
//!
//! A [`LogFormatter`] turns the rendered time, level, message and tags of an
//! event into one line. [`DefaultFormatter`] produces
//!
//! ```text
//! [2025-01-08T10:30:45.123Z] [WARN] (WARN, AUDIT) disk almost full
//! ```
//!
//! with every field styled for the terminal. Sinks that want plain text strip
//! the escape sequences afterwards, see [`strip_ansi`](super::style::strip_ansi).

use super::error::Result;
use super::log_event::LogEvent;
use super::log_level::LogLevel;
use super::style::{strip_ansi, style, StyleToken};
use super::tag::Tag;

pub trait LogFormatter: Send + Sync {
    fn format(&self, time: &str, level: LogLevel, message: &str, tags: &[Tag]) -> Result<String>;
}

impl<F> LogFormatter for F
where
    F: Fn(&str, LogLevel, &str, &[Tag]) -> Result<String> + Send + Sync,
{
    fn format(&self, time: &str, level: LogLevel, message: &str, tags: &[Tag]) -> Result<String> {
        self(time, level, message, tags)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormatter;

impl DefaultFormatter {
    fn tag_block(tags: &[Tag]) -> String {
        if tags.is_empty() {
            return String::new();
        }
        let names: Vec<String> = tags
            .iter()
            .map(|tag| style(&StyleToken::Tag(tag.clone()), &tag.as_str().to_uppercase()))
            .collect();
        format!(" ({})", names.join(", "))
    }
}

impl LogFormatter for DefaultFormatter {
    fn format(&self, time: &str, level: LogLevel, message: &str, tags: &[Tag]) -> Result<String> {
        Ok(format!(
            "[{}] [{}]{} {}",
            style(&StyleToken::Time, time),
            style(&StyleToken::Level(level), level.to_str()),
            Self::tag_block(tags),
            message
        ))
    }
}

/// The two projections of one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEvent {
    pub file: String,
    pub console: String,
}

/// Per-sink post-processing applied after formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripPolicy {
    pub file: bool,
    pub console: bool,
}

impl Default for StripPolicy {
    fn default() -> Self {
        Self {
            file: true,
            console: false,
        }
    }
}

/// Render `event` for both sinks.
///
/// The file always receives the decorated line. The console receives the
/// message untouched when the event is raw, the decorated line otherwise.
pub fn render_event(
    event: &LogEvent,
    time: &str,
    formatter: &dyn LogFormatter,
    strip: StripPolicy,
) -> Result<RenderedEvent> {
    let decorated = formatter.format(time, event.level, &event.message, &event.tags)?;

    let console = if event.raw {
        event.message.clone()
    } else {
        decorated.clone()
    };
    let console = if strip.console {
        strip_ansi(&console)
    } else {
        console
    };
    let file = if strip.file {
        strip_ansi(&decorated)
    } else {
        decorated
    };

    Ok(RenderedEvent { file, console })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LoggerError;
    use crate::core::style::has_ansi;
    use chrono::Utc;

    fn plain(line: &str) -> String {
        strip_ansi(line)
    }

    #[test]
    fn test_default_shape_without_tags() {
        let line = DefaultFormatter
            .format("T", LogLevel::Info, "hello", &[])
            .unwrap();
        assert_eq!(plain(&line), "[T] [INFO] hello");
    }

    #[test]
    fn test_default_shape_with_tags() {
        let tags = vec![Tag::Success, Tag::Audit, Tag::new("salut")];
        let line = DefaultFormatter
            .format("T", LogLevel::Warn, "hello", &tags)
            .unwrap();
        assert_eq!(plain(&line), "[T] [WARN] (SUCCESS, AUDIT, SALUT) hello");
    }

    #[test]
    fn test_custom_formatter_replaces_default() {
        let formatter = |time: &str, level: LogLevel, message: &str, tags: &[Tag]| -> Result<String> {
            Ok(format!("{}|{}|{}|{}", time, level, tags.len(), message))
        };
        let event = LogEvent::new(LogLevel::Error, "boom", Utc::now()).with_tags(vec![Tag::Error]);
        let rendered = render_event(&event, "now", &formatter, StripPolicy::default()).unwrap();
        assert_eq!(rendered.file, "now|ERROR|1|boom");
        assert_eq!(rendered.console, "now|ERROR|1|boom");
    }

    #[test]
    fn test_formatter_error_propagates() {
        let formatter = |_: &str, _: LogLevel, _: &str, _: &[Tag]| -> Result<String> {
            Err(LoggerError::formatter("format", "refused"))
        };
        let event = LogEvent::new(LogLevel::Info, "x", Utc::now());
        let err = render_event(&event, "now", &formatter, StripPolicy::default()).unwrap_err();
        assert!(matches!(err, LoggerError::Formatter { .. }));
    }

    #[test]
    fn test_raw_event_keeps_file_decorated() {
        let event = LogEvent::new(LogLevel::Info, "just text", Utc::now())
            .with_tags(vec![Tag::Print])
            .with_raw(true);
        let rendered =
            render_event(&event, "T", &DefaultFormatter, StripPolicy::default()).unwrap();
        assert_eq!(rendered.console, "just text");
        assert_eq!(rendered.file, "[T] [INFO] (PRINT) just text");
    }

    #[test]
    fn test_strip_policy_applies_per_sink() {
        colored::control::set_override(true);
        let event = LogEvent::new(LogLevel::Warn, "w", Utc::now());
        let keep_all = StripPolicy {
            file: false,
            console: false,
        };
        let strip_all = StripPolicy {
            file: true,
            console: true,
        };
        let kept = render_event(&event, "T", &DefaultFormatter, keep_all).unwrap();
        let stripped = render_event(&event, "T", &DefaultFormatter, strip_all).unwrap();
        assert!(has_ansi(&kept.file));
        assert!(has_ansi(&kept.console));
        assert!(!has_ansi(&stripped.file));
        assert!(!has_ansi(&stripped.console));
        assert_eq!(strip_ansi(&kept.file), stripped.file);
        assert_eq!(strip_ansi(&kept.console), stripped.console);
    }
}
