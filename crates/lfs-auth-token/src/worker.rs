//! Per-worker validation context.

use crate::error::StoreError;
use crate::identity::Identity;
use crate::store::TokenStore;
use crate::validator::{TokenValidator, parse_authorization};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Owns one validator, and therefore one store connection, for the lifetime
/// of a worker. The connection is opened on first use and kept afterwards.
pub struct ValidatorWorker {
    database_path: PathBuf,
    validator: Option<TokenValidator>,
}

impl ValidatorWorker {
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            validator: None,
        }
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    /// Whether this worker has opened its connection yet.
    pub fn is_connected(&self) -> bool {
        self.validator.is_some()
    }

    /// Authenticate through this worker's own connection, opening it first
    /// if needed. A failed open leaves the worker unconnected.
    ///
    /// Requests without a well-formed token never open the connection.
    pub async fn authenticate(
        &mut self,
        authorization_header: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Option<Identity>, StoreError> {
        if authorization_header.and_then(parse_authorization).is_none() {
            return Ok(None);
        }

        let validator = match &mut self.validator {
            Some(validator) => validator,
            slot => {
                let store = TokenStore::open(&self.database_path).await?;
                slot.insert(TokenValidator::new(store))
            }
        };
        validator.authenticate(authorization_header, now).await
    }
}
