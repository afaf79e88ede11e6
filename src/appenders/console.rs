//! Console appender implementation

use crate::core::{LogLevel, Result};
use parking_lot::Mutex;
use std::io::Write;

/// The four console channels a line can be routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsoleChannel {
    Debug,
    Info,
    Warn,
    Error,
}

impl ConsoleChannel {
    pub fn for_level(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace | LogLevel::Debug => ConsoleChannel::Debug,
            LogLevel::Info => ConsoleChannel::Info,
            LogLevel::Warn => ConsoleChannel::Warn,
            LogLevel::Error | LogLevel::Fatal => ConsoleChannel::Error,
        }
    }

    /// Warn and Error go to stderr, the rest to stdout
    pub fn is_stderr(&self) -> bool {
        matches!(self, ConsoleChannel::Warn | ConsoleChannel::Error)
    }
}

/// Destination of console lines. The sink adds the trailing newline.
pub trait ConsoleSink: Send + Sync {
    fn write_line(&self, channel: ConsoleChannel, line: &str) -> Result<()>;
}

/// Writes to the process stdout/stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct StdConsole;

impl ConsoleSink for StdConsole {
    fn write_line(&self, channel: ConsoleChannel, line: &str) -> Result<()> {
        if channel.is_stderr() {
            let mut err = std::io::stderr().lock();
            writeln!(err, "{}", line)?;
        } else {
            let mut out = std::io::stdout().lock();
            writeln!(out, "{}", line)?;
            out.flush()?;
        }
        Ok(())
    }
}

/// Keeps every line in memory; handy for tests and for embedding
#[derive(Debug, Default)]
pub struct MemoryConsole {
    lines: Mutex<Vec<(ConsoleChannel, String)>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the captured lines, oldest first
    pub fn lines(&self) -> Vec<(ConsoleChannel, String)> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl ConsoleSink for MemoryConsole {
    fn write_line(&self, channel: ConsoleChannel, line: &str) -> Result<()> {
        self.lines.lock().push((channel, line.to_string()));
        Ok(())
    }
}
