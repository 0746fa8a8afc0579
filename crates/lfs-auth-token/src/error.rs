//! Error types for the token crate.

use lfs_auth_core::{ConfigError, ValidationError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the token store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file could not be opened.
    #[error("unable to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: sqlx::Error,
    },

    /// Creating the `tokens` table or its index failed.
    #[error("failed to create token schema: {0}")]
    Schema(#[source] sqlx::Error),

    /// Inserting a record failed.
    #[error("failed to append token record: {0}")]
    Append(#[source] sqlx::Error),

    /// Reading live records failed (including a missing schema).
    #[error("failed to scan token records: {0}")]
    Scan(#[source] sqlx::Error),

    /// Closing the connection failed.
    #[error("failed to close {}: {source}", path.display())]
    Close {
        path: PathBuf,
        #[source]
        source: sqlx::Error,
    },

    /// A stored row could not be turned back into a record.
    #[error("corrupt token record: {0}")]
    CorruptRecord(String),
}

/// Errors raised while issuing a token.
#[derive(Debug, Error)]
pub enum IssuanceError {
    /// Missing or malformed configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Malformed path or operation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The store could not be opened or written.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_failure_names_close_not_open() {
        let err = StoreError::Close {
            path: PathBuf::from("/var/lib/t.db"),
            source: sqlx::Error::PoolClosed,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("failed to close /var/lib/t.db"), "{msg}");
        assert!(!msg.contains("unable to open"));
    }
}
