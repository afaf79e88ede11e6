//! Error types for the logger system

use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A logger with the same identifier is already registered
    #[error("A logger with id '{id}' is already registered")]
    DuplicateIdentifier { id: String },

    /// Every identifier of the configured length is already taken
    #[error("No free logger id of length {length} is left")]
    IdentifierSpaceExhausted { length: usize },

    /// Directory creation, file creation or append failure
    #[error("Filesystem error while {operation} '{}': {source}", path.display())]
    Filesystem {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failure raised by a format, time or file name strategy
    #[error("Formatter error ({strategy}): {message}")]
    Formatter { strategy: String, message: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic IO error (console writes)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error while reading a settings document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LoggerError {
    /// Create a duplicate identifier error
    pub fn duplicate_id(id: impl Into<String>) -> Self {
        LoggerError::DuplicateIdentifier { id: id.into() }
    }

    pub fn ids_exhausted(length: usize) -> Self {
        LoggerError::IdentifierSpaceExhausted { length }
    }

    /// Create a filesystem error with the failing operation and path
    pub fn filesystem(
        operation: impl Into<String>,
        path: impl AsRef<Path>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::Filesystem {
            operation: operation.into(),
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a formatter error
    pub fn formatter(strategy: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Formatter {
            strategy: strategy.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Returns true for [`LoggerError::DuplicateIdentifier`]
    pub fn is_duplicate_id(&self) -> bool {
        matches!(self, LoggerError::DuplicateIdentifier { .. })
    }
}
