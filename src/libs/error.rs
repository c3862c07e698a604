//! Typed error taxonomy for the dwell core.
//!
//! Every failure the core can surface is one of the variants below, so
//! callers (and tests) can distinguish them without string matching.
//! Commands convert these into `anyhow::Error` at the CLI boundary; the
//! core never retries and never swallows a failure.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A referenced record does not exist in its collection.
    #[error("record not found: {0}")]
    NotFound(String),

    /// An invariant would be violated, e.g. starting a session while a
    /// different task is already focusing.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The operation is illegal for the task's current state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Out-of-range or malformed input that slipped past the UI layer.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A backup file whose version tag does not match the importer.
    #[error("backup version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: String, found: String },

    /// The underlying durable-storage operation failed.
    #[error("storage failure: {0}")]
    StorageFailure(String),
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::QueryReturnedNoRows => CoreError::NotFound("query returned no rows".to_string()),
            other => CoreError::StorageFailure(other.to_string()),
        }
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::StorageFailure(err.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::StorageFailure(err.to_string())
    }
}
