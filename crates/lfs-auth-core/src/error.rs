//! Error types shared by the issuer and its configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("config file {} not found", path.display())]
    NotFound { path: PathBuf },

    /// The configuration file exists but could not be read or parsed.
    #[error("unable to read config file {}: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },

    /// A required section is absent.
    #[error("{} found, but [{section}] section missing", path.display())]
    MissingSection { path: PathBuf, section: String },

    /// A required key is absent from its section.
    #[error("key {key} not found in {}", path.display())]
    MissingKey { path: PathBuf, key: String },
}

/// Usage errors in the arguments handed to the issuer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No repository path was supplied.
    #[error("this command requires a path, even though git-lfs may not always supply one")]
    MissingPath,

    /// The path is not of the form `owner/repo`.
    #[error("path must be of the form foo/bar, got {0:?}")]
    MalformedPath(String),

    /// Only uploads are issued tokens.
    #[error("unsupported operation {0:?} (only \"upload\" is allowed)")]
    UnsupportedOperation(String),
}
