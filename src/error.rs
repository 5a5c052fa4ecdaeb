//! Error types for `complaint_store`.

use std::path::PathBuf;

/// Result type for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by the fallible (`try_*`) store operations.
///
/// The collaborator-facing methods on [`crate::store::RecordStore`] never return these;
/// they log the error and resolve it to an empty sequence or `false`.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// I/O error (permission denied, disk full, file held by another process).
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Requested path does not exist.
    #[error("missing path: {0}")]
    MissingPath(PathBuf),

    /// A stored line does not decode into a complaint record.
    #[error("corrupt record {line:?}: {reason}")]
    CorruptRecord {
        /// The raw line as read from the file.
        line: String,
        /// Short, human-readable description of what failed to parse.
        reason: String,
    },

    /// A complaint id that is not a positive decimal integer.
    #[error("invalid complaint id: {0:?}")]
    InvalidId(String),

    /// A status label or short code outside the status enum.
    #[error("invalid status: {0:?}")]
    InvalidStatus(String),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Operation not supported by this backend.
    #[error("operation not supported: {0}")]
    NotSupported(String),

    /// Lock acquisition failed.
    #[error("lock failed on {resource}: {reason}")]
    LockFailed {
        /// What we were trying to lock.
        resource: String,
        /// Human-readable reason (poisoned lock, OS error, etc.).
        reason: String,
    },

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),
}

impl StoreError {
    pub(crate) fn corrupt(line: &str, reason: impl Into<String>) -> Self {
        Self::CorruptRecord {
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}
