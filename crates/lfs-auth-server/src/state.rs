use crate::{config::AppConfig, pool::ValidatorPool};

/// Shared application state.
pub struct AppState {
    pub cfg: AppConfig,
    /// Validation workers, one store connection each.
    pub validators: ValidatorPool,
}

impl AppState {
    /// Must be called from within a tokio runtime (spawns the workers).
    pub fn init(cfg: &AppConfig) -> Self {
        let validators = ValidatorPool::spawn(&cfg.server.database_path, cfg.server.workers);
        Self {
            cfg: cfg.clone(),
            validators,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;

    #[tokio::test]
    async fn test_init_keeps_config_and_sizes_pool() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig {
            server: ServerConfig {
                database_path: dir.path().join("t.db"),
                workers: 3,
                ..ServerConfig::default()
            },
        };

        let state = AppState::init(&cfg);
        assert_eq!(state.cfg.server.database_path, dir.path().join("t.db"));
        assert_eq!(state.cfg.server.bind, "0.0.0.0:8080");
        assert_eq!(state.validators.size(), 3);
    }
}
