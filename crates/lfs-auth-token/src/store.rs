//! SQLite token store.
//!
//! Schema (shared with any other tool reading the same file):
//!
//! ```sql
//! CREATE TABLE tokens (user TEXT, token TEXT, created_at FLOAT, expires_at FLOAT);
//! CREATE INDEX tokens_by_user_and_expires_at ON tokens (user, expires_at);
//! ```
//!
//! Timestamps are Unix seconds as floating point.

use crate::error::StoreError;
use chrono::{DateTime, Duration, Utc};
use lfs_auth_core::{TokenRecord, TokenSecret};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection, FromRow};
use std::path::{Path, PathBuf};

const BUSY_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);

/// A single connection to the token database.
///
/// Every operation takes `&mut self`: a store is owned by exactly one worker
/// and is never shared.
pub struct TokenStore {
    conn: SqliteConnection,
    path: PathBuf,
}

#[derive(FromRow)]
struct TokenRow {
    user: String,
    token: String,
    created_at: f64,
    expires_at: f64,
}

impl TokenRow {
    fn into_record(self) -> Result<TokenRecord, StoreError> {
        Ok(TokenRecord {
            created_at: from_unix(self.created_at)?,
            expires_at: from_unix(self.expires_at)?,
            token: TokenSecret::from_stored(self.token),
            user: self.user,
        })
    }
}

impl TokenStore {
    /// Open the store for issuing, creating the file and schema if needed.
    pub async fn open_or_create(path: &Path) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .busy_timeout(BUSY_TIMEOUT);
        let mut store = Self::connect(path, options).await?;
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Open an existing store read-only for validation.
    ///
    /// Neither the file nor the schema is created; a missing schema surfaces
    /// as [`StoreError::Scan`] on the first scan.
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(false)
            .read_only(true)
            .busy_timeout(BUSY_TIMEOUT);
        Self::connect(path, options).await
    }

    async fn connect(path: &Path, options: SqliteConnectOptions) -> Result<Self, StoreError> {
        let conn = options.connect().await.map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened token store");
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// Create the table and index if absent. Idempotent.
    pub async fn ensure_schema(&mut self) -> Result<(), StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS tokens \
             (user TEXT, token TEXT, created_at FLOAT, expires_at FLOAT)",
        )
        .execute(&mut self.conn)
        .await
        .map_err(StoreError::Schema)?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS tokens_by_user_and_expires_at \
             ON tokens (user, expires_at)",
        )
        .execute(&mut self.conn)
        .await
        .map_err(StoreError::Schema)?;

        Ok(())
    }

    /// Insert one record as its own transaction.
    pub async fn append(&mut self, record: &TokenRecord) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO tokens (user, token, created_at, expires_at) VALUES (?, ?, ?, ?)")
            .bind(record.user.as_str())
            .bind(record.token.expose())
            .bind(to_unix(record.created_at))
            .bind(to_unix(record.expires_at))
            .execute(&mut self.conn)
            .await
            .map_err(StoreError::Append)?;
        Ok(())
    }

    /// All records, for every user, with `expires_at >= now - grace`.
    pub async fn scan_live(
        &mut self,
        now: DateTime<Utc>,
        grace: Duration,
    ) -> Result<Vec<TokenRecord>, StoreError> {
        let rows: Vec<TokenRow> = sqlx::query_as(
            "SELECT user, token, created_at, expires_at FROM tokens WHERE expires_at >= ?",
        )
        .bind(to_unix(now - grace))
        .fetch_all(&mut self.conn)
        .await
        .map_err(StoreError::Scan)?;

        rows.into_iter().map(TokenRow::into_record).collect()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Close the underlying connection.
    pub async fn close(self) -> Result<(), StoreError> {
        self.conn.close().await.map_err(|source| StoreError::Close {
            path: self.path,
            source,
        })
    }
}

fn to_unix(at: DateTime<Utc>) -> f64 {
    at.timestamp_micros() as f64 / 1_000_000.0
}

fn from_unix(secs: f64) -> Result<DateTime<Utc>, StoreError> {
    if !secs.is_finite() {
        return Err(StoreError::CorruptRecord(format!("non-finite timestamp {secs}")));
    }
    DateTime::from_timestamp_micros((secs * 1_000_000.0).round() as i64)
        .ok_or_else(|| StoreError::CorruptRecord(format!("timestamp {secs} out of range")))
}
