//! Error types for client storage

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read storage file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write storage file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage file {path} is corrupted: {reason}")]
    Corrupted { path: PathBuf, reason: String },
}

impl StorageError {
    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        matches!(self, StorageError::Read { .. } | StorageError::Write { .. })
    }

    /// Path of the storage file involved.
    pub fn path(&self) -> &PathBuf {
        match self {
            StorageError::Read { path, .. }
            | StorageError::Write { path, .. }
            | StorageError::Corrupted { path, .. } => path,
        }
    }
}

impl From<StorageError> for crate::Error {
    fn from(err: StorageError) -> Self {
        crate::Error::Storage(err)
    }
}
