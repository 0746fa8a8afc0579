//! # lfs-auth-token
//!
//! Bearer token lifecycle for git-lfs-authenticate.
//!
//! This crate provides:
//! - A SQLite-backed [`TokenStore`] shared by the issuer and the validator
//! - [`TokenIssuer`], run once per SSH session to mint and persist a token
//! - [`TokenValidator`], run per HTTP request to resolve an [`Identity`]
//! - [`ValidatorWorker`], a per-worker context owning its own store handle
//!
//! ## Two Processes, One Store
//!
//! | Side | Opens store with | Operations |
//! |------|------------------|------------|
//! | Issuer | [`TokenStore::open_or_create`] | schema creation, `append` |
//! | Validator | [`TokenStore::open`] (read-only) | `scan_live` |
//!
//! Both sides must be configured with the same database file; nothing checks
//! this in-band.
//!
//! ## Authorization Model
//!
//! A matching token yields an identity holding [`Permission::all`], whatever
//! repository or operation the request targets. There is no revocation and
//! no pruning of expired rows.

pub mod error;
pub mod identity;
pub mod issuer;
pub mod store;
pub mod validator;
pub mod worker;

pub use error::{IssuanceError, StoreError};
pub use identity::{Identity, Permission, PermissionSet};
pub use issuer::{TokenIssuer, issue};
pub use store::TokenStore;
pub use validator::TokenValidator;
pub use worker::ValidatorWorker;
