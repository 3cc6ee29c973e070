//! Unified error types for bucketwatch.
//!
//! Each stage of the monitor cycle has its own error kind so the loop can
//! pick a recovery policy per stage instead of catching everything at once.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for bucketwatch operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MonitorError {
    /// Errors from the external bucket listing
    #[error("Bucket listing failed: {0}")]
    List(#[from] ListError),

    /// Errors reading or rotating snapshot files
    #[error("Snapshot operation failed: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Errors delivering a change notification
    #[error("Notification failed: {0}")]
    Notify(#[from] NotifyError),
}

/// Errors raised by a [`BucketLister`](crate::lister::BucketLister).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ListError {
    #[error("listing command is empty")]
    EmptyCommand,

    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}")]
    ExitStatus { program: String, status: String },

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by the snapshot store.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SnapshotError {
    #[error("snapshot not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while building or delivering an email.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum NotifyError {
    #[error("no recipients configured")]
    NoRecipients,

    #[error("invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("failed to build message: {0}")]
    Message(String),

    #[error("SMTP transport error: {0}")]
    Transport(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for bucketwatch operations
pub type Result<T> = std::result::Result<T, MonitorError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl SnapshotError {
    /// Wrap an IO error with the path it occurred at
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl ListError {
    /// Wrap an IO error with the path it occurred at
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
