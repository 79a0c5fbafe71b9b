//! Error types for docload.
//!
//! A single `Error` enum covers every fallible operation in the library.
//! Only the two scanner-level variants (`DirectoryNotFound`, `NotADirectory`)
//! ever abort a run; everything that goes wrong with an individual file is
//! captured as a [`crate::ProcessOutcome`] and reported in the error list,
//! never raised to the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for all docload operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The scan root does not exist. Fatal: aborts the run before any file
    /// is processed.
    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// The scan root exists but is not a directory. Fatal.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parsing error: {message}")]
    Parsing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a Parsing error.
    pub fn parsing<S: Into<String>>(message: S) -> Self {
        Self::Parsing {
            message: message.into(),
            source: None,
        }
    }

    /// Create a Parsing error with source.
    pub fn parsing_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Parsing {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a Config error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a Config error with source.
    pub fn config_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether this error is an IO error with `PermissionDenied` kind.
    ///
    /// The pipeline maps these to a `permission_denied` skip instead of a
    /// failure, wherever in the validate/extract sequence they surface.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::PermissionDenied)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parsing {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Parsing {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
