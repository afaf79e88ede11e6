//! Logger metrics for observability
//!
//! Counts what each logger actually did with its calls: lines written to the
//! console, records appended to files, console lines held back by the level
//! filter, and calls that failed.

use std::sync::atomic::{AtomicU64, Ordering};

/// Per-logger counters
///
/// # Example
///
/// ```
/// use chibilog::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_file_append();
/// metrics.record_suppressed();
///
/// assert_eq!(metrics.file_appends(), 1);
/// assert_eq!(metrics.suppressed_count(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    console_writes: AtomicU64,
    file_appends: AtomicU64,
    /// Console lines skipped because console is off or the level is too low
    suppressed: AtomicU64,
    failed_calls: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            console_writes: AtomicU64::new(0),
            file_appends: AtomicU64::new(0),
            suppressed: AtomicU64::new(0),
            failed_calls: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn console_writes(&self) -> u64 {
        self.console_writes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn file_appends(&self) -> u64 {
        self.file_appends.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn suppressed_count(&self) -> u64 {
        self.suppressed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_calls(&self) -> u64 {
        self.failed_calls.load(Ordering::Relaxed)
    }

    /// Record a console write, returning the previous count
    #[inline]
    pub fn record_console_write(&self) -> u64 {
        self.console_writes.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_file_append(&self) -> u64 {
        self.file_appends.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_suppressed(&self) -> u64 {
        self.suppressed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failure(&self) -> u64 {
        self.failed_calls.fetch_add(1, Ordering::Relaxed)
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.console_writes.store(0, Ordering::Relaxed);
        self.file_appends.store(0, Ordering::Relaxed);
        self.suppressed.store(0, Ordering::Relaxed);
        self.failed_calls.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            console_writes: AtomicU64::new(self.console_writes()),
            file_appends: AtomicU64::new(self.file_appends()),
            suppressed: AtomicU64::new(self.suppressed_count()),
            failed_calls: AtomicU64::new(self.failed_calls()),
        }
    }
}
