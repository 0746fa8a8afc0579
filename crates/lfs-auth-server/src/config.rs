use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

/// Environment variable naming the server's TOML config file.
pub const CONFIG_ENV: &str = "GIT_LFS_AUTHENTICATE_SERVER_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address, e.g. "0.0.0.0:8080"
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Token database written by `git-lfs-authenticate`. Must be the same
    /// file as the issuer's `database_path`.
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Number of validation workers, each holding its own connection.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_database_path() -> PathBuf {
    PathBuf::from("/var/lib/git-lfs-authenticate/tokens.sqlite3")
}

fn default_workers() -> usize {
    4
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            database_path: default_database_path(),
            workers: default_workers(),
        }
    }
}

/// Load the config file, falling back to defaults when it does not exist.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let path = config_path();
    if !path.exists() {
        tracing::info!(path = %path.display(), "no server config file, using defaults");
        return Ok(AppConfig::default());
    }
    let raw = fs::read_to_string(&path)?;
    let cfg: AppConfig = toml::from_str(&raw)?;
    Ok(cfg)
}

fn config_path() -> PathBuf {
    if let Ok(p) = env::var(CONFIG_ENV) {
        return PathBuf::from(p);
    }
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.server.bind, "0.0.0.0:8080");
        assert_eq!(
            cfg.server.database_path,
            PathBuf::from("/var/lib/git-lfs-authenticate/tokens.sqlite3")
        );
        assert_eq!(cfg.server.workers, 4);
    }

    #[test]
    fn test_partial_override() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            database_path = "/srv/lfs/tokens.sqlite3"
            workers = 16
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.bind, "0.0.0.0:8080");
        assert_eq!(cfg.server.database_path, PathBuf::from("/srv/lfs/tokens.sqlite3"));
        assert_eq!(cfg.server.workers, 16);
    }
}
