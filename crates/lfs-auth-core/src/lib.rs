//! # lfs-auth-core
//!
//! Shared model for git-lfs-authenticate.
//!
//! This crate provides:
//! - The bearer token secret and the persisted [`TokenRecord`]
//! - The [`AuthDescriptor`] printed by the issuer for the Git LFS client
//! - The `owner/repo` path and operation grammars accepted by the issuer
//! - Loading of the issuer's INI configuration
//!
//! ## Token Lifecycle
//!
//! | Step | Component | Store access |
//! |------|-----------|--------------|
//! | **Issue** | `git-lfs-authenticate` (forced SSH command) | append |
//! | **Validate** | HTTP request pipeline | scan live records |
//!
//! Tokens live for [`TOKEN_LIFETIME_SECS`] seconds. Validation tolerates
//! records that expired less than [`LIVE_GRACE_SECS`] ago.

pub mod config;
pub mod descriptor;
pub mod error;
pub mod request;
pub mod token;

pub use config::IssuerConfig;
pub use descriptor::{AuthDescriptor, AuthHeader};
pub use error::{ConfigError, ValidationError};
pub use request::{Operation, RepoPath, SystemUser};
pub use token::{TokenRecord, TokenSecret};

/// Authorization scheme used in the `Authorization` header.
pub const AUTH_SCHEME: &str = "Git-LFS-Token";

/// Fixed lifetime of every issued token (4 hours).
pub const TOKEN_LIFETIME_SECS: i64 = 4 * 60 * 60;

/// Tolerance applied when deciding whether a record is still live.
pub const LIVE_GRACE_SECS: i64 = 1;

/// Number of random bytes in a token secret.
pub const TOKEN_BYTES: usize = 40;

/// Length of a token secret rendered as hex.
pub const TOKEN_HEX_LEN: usize = TOKEN_BYTES * 2;

/// Token lifetime as a [`chrono::Duration`].
pub fn token_lifetime() -> chrono::Duration {
    chrono::Duration::seconds(TOKEN_LIFETIME_SECS)
}

/// Validation grace window as a [`chrono::Duration`].
pub fn live_grace() -> chrono::Duration {
    chrono::Duration::seconds(LIVE_GRACE_SECS)
}
