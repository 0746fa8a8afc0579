//! Issuer configuration.
//!
//! The issuer reads an INI file, `/etc/git-lfs-authenticate.ini` by default:
//!
//! ```ini
//! [git-lfs-authenticate]
//! webserver_url = https://lfs.example.com
//! database_path = /var/lib/git-lfs-authenticate/tokens.sqlite3
//! ```
//!
//! The validator side never reads this file; it must be pointed at the same
//! `database_path` through its own configuration.

use crate::error::ConfigError;
use ini::Ini;
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the issuer configuration.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/git-lfs-authenticate.ini";

/// Environment variable overriding [`DEFAULT_CONFIG_PATH`].
pub const CONFIG_ENV: &str = "GIT_LFS_AUTHENTICATE_CONFIG";

/// INI section holding the issuer settings.
pub const SECTION: &str = "git-lfs-authenticate";

/// Settings consumed by the issuer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuerConfig {
    /// Base URL of the LFS HTTP server; the repository path is appended verbatim.
    pub webserver_url: String,
    /// SQLite file shared with the validator.
    pub database_path: PathBuf,
}

impl IssuerConfig {
    /// Load from an INI file on disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_ini_str(&raw, path)
    }

    /// Parse INI text. `origin` is only used in error messages.
    pub fn from_ini_str(raw: &str, origin: &Path) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(raw).map_err(|e| ConfigError::Unreadable {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })?;

        let section = ini
            .section(Some(SECTION))
            .ok_or_else(|| ConfigError::MissingSection {
                path: origin.to_path_buf(),
                section: SECTION.to_string(),
            })?;

        // Option names are case-insensitive; the section name is not.
        let required = |key: &str| {
            section
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v.to_string())
                .ok_or_else(|| ConfigError::MissingKey {
                    path: origin.to_path_buf(),
                    key: key.to_string(),
                })
        };

        Ok(Self {
            webserver_url: required("webserver_url")?,
            database_path: PathBuf::from(required("database_path")?),
        })
    }
}
