//! Unified error types for toprank.
//!
//! Batch-level failures (missing identity columns, unusable volume
//! coverage) are surfaced as structured errors the caller can match on;
//! cell-level problems never reach this module; they degrade to missing
//! values inside the normalizer.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for toprank operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ScoreError {
    /// The batch is structurally unusable: a required identity or name
    /// column is entirely absent. No partial output is produced.
    #[error("Batch rejected: {0}")]
    Shape(String),

    /// The batch lacks a usable sales/GMV column pair (NO_VOLUME
    /// scenario). Carries presence detail so the caller can explain the
    /// skip to the user.
    #[error(
        "Batch rejected: {reason} (7-day pair populated: {has_7d}, 30-day pair populated: {has_30d})"
    )]
    Coverage {
        reason: String,
        has_7d: bool,
        has_30d: bool,
    },

    /// Configuration errors (invalid weight table, limits out of range)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Malformed caller input (bad batch-date string, invalid JSON table)
    #[error("Invalid input: {0}")]
    Input(String),

    /// IO errors with path context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenient Result type for toprank operations
pub type Result<T> = std::result::Result<T, ScoreError>;

impl ScoreError {
    /// Create a shape error for a missing required column
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::Shape(format!(
            "required column '{}' is absent from the input table",
            column.into()
        ))
    }

    /// Create a coverage error with pair-presence detail
    pub fn coverage(reason: impl Into<String>, has_7d: bool, has_30d: bool) -> Self {
        Self::Coverage {
            reason: reason.into(),
            has_7d,
            has_30d,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an input error
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input(message.into())
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// True for the rejection variants a caller is expected to recover
    /// from by fixing the input (shape and coverage errors).
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Shape(_) | Self::Coverage { .. })
    }
}

impl From<std::io::Error> for ScoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ScoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Input(format!("JSON deserialization: {err}"))
    }
}
