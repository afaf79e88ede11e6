//! File appender implementation

use crate::core::{LoggerError, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Where the record separator goes.
///
/// `LeadingNewline` writes `"\n" + line` for every record, so every file
/// starts with an empty first line. It is the default to stay byte-compatible
/// with existing log files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordLayout {
    #[default]
    LeadingNewline,
    TrailingNewline,
}

impl RecordLayout {
    pub fn record(&self, content: &str) -> String {
        match self {
            RecordLayout::LeadingNewline => format!("\n{}", content),
            RecordLayout::TrailingNewline => format!("{}\n", content),
        }
    }
}

/// Appends rendered lines to log files.
///
/// Holds no open handle: each append opens the target, takes an exclusive
/// lock, writes the whole record and releases the lock, so several loggers or
/// threads may share one file without interleaving.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileAppender {
    layout: RecordLayout,
}

impl FileAppender {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_layout(mut self, layout: RecordLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn layout(&self) -> RecordLayout {
        self.layout
    }

    /// Append `content` as one record of `path`.
    ///
    /// A missing file is created empty first, along with every missing parent
    /// directory.
    pub fn append(&self, path: &Path, content: &str) -> Result<()> {
        if !path.exists() {
            Self::create_empty(path)?;
        }

        let mut file = OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(|e| LoggerError::filesystem("opening", path, e))?;

        FileExt::lock_exclusive(&file).map_err(|e| LoggerError::filesystem("locking", path, e))?;
        let written = file
            .write_all(self.layout.record(content).as_bytes())
            .map_err(|e| LoggerError::filesystem("appending to", path, e));
        let unlocked =
            FileExt::unlock(&file).map_err(|e| LoggerError::filesystem("unlocking", path, e));

        written.and(unlocked)
    }

    fn create_empty(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| LoggerError::filesystem("creating directory", parent, e))?;
        }
        // No truncation: another writer may have created it in the meantime
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|e| LoggerError::filesystem("creating", path, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use tempfile::tempdir;

    #[test]
    fn test_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("c").join("app.log");

        FileAppender::new().append(&path, "first").unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "\nfirst");
    }

    #[test]
    fn test_leading_newline_before_every_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        let appender = FileAppender::new();

        appender.append(&path, "one").unwrap();
        appender.append(&path, "two").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "\none\ntwo");
    }

    #[test]
    fn test_trailing_newline_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        let appender = FileAppender::new().with_layout(RecordLayout::TrailingNewline);

        appender.append(&path, "one").unwrap();
        appender.append(&path, "two").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_existing_content_is_preserved() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "older").unwrap();

        FileAppender::new().append(&path, "newer").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "older\nnewer");
    }

    #[test]
    fn test_parent_is_a_file_fails() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let err = FileAppender::new()
            .append(&blocker.join("app.log"), "x")
            .unwrap_err();
        assert!(matches!(err, LoggerError::Filesystem { .. }));
    }

    #[test]
    fn test_concurrent_appends_do_not_interleave() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shared.log");
        let line = "x".repeat(512);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let path = path.clone();
                let line = line.clone();
                thread::spawn(move || {
                    let appender = FileAppender::new();
                    for _ in 0..50 {
                        appender.append(&path, &line).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let content = fs::read_to_string(&path).unwrap();
        let records: Vec<&str> = content.split('\n').skip(1).collect();
        assert_eq!(records.len(), 400);
        assert!(records.iter().all(|record| *record == line));
    }
}
