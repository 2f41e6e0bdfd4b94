//! Shared error types for gapmap.
//!
//! Library code returns [`Result`] with the [`Error`] enum below. The command
//! layer and `main` work with `anyhow::Result` and add context on top.
//!
//! Note that several conditions are deliberately *not* errors:
//! - a school field that was not reported is a `None`, rendered as `N/A`
//! - a fifth compare-list add is an [`AddOutcome`](crate::compare::AddOutcome)
//! - a corrupt persisted compare list reads as empty

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for gapmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Dataset could not be decoded into school records
    #[error("Dataset error in {path}: {message}")]
    Dataset { path: PathBuf, message: String },

    /// The data store rejected or failed a query
    #[error("Query failed: {0}")]
    Query(String),

    /// Key-value store errors (compare list persistence)
    #[error("Store error: {0}")]
    Store(String),

    /// A requested school id does not exist in the data store
    #[error("School not found: {0}")]
    NotFound(String),

    /// Invalid user input (bracket keys, ids, numbers)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// HTTP transport errors from the remote store
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Create a file system error that keeps the underlying io error
    pub fn file_system_with_source(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    /// Create a dataset decoding error
    pub fn dataset(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Dataset {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_system_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::file_system_with_source("Failed to read file", "state.json", io);
        assert_eq!(err.to_string(), "File system error: Failed to read file");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_dataset_error_names_path() {
        let err = Error::dataset("schools.json", "expected an array");
        assert_eq!(
            err.to_string(),
            "Dataset error in schools.json: expected an array"
        );
    }
}
