//! Token issuance.
//!
//! Runs once per SSH session as the forced command
//! `git-lfs-authenticate <owner/repo> upload`.

use crate::error::IssuanceError;
use crate::store::TokenStore;
use chrono::{DateTime, Utc};
use lfs_auth_core::{
    AuthDescriptor, IssuerConfig, Operation, RepoPath, SystemUser, TokenRecord, ValidationError,
};

/// Mints tokens into a store it was handed at construction.
pub struct TokenIssuer {
    store: TokenStore,
    webserver_url: String,
}

impl TokenIssuer {
    pub fn new(store: TokenStore, webserver_url: impl Into<String>) -> Self {
        Self {
            store,
            webserver_url: webserver_url.into(),
        }
    }

    /// Issue a token for `user` to push to `path`.
    pub async fn issue(
        &mut self,
        path: Option<&str>,
        operation: &str,
        user: &SystemUser,
    ) -> Result<AuthDescriptor, IssuanceError> {
        self.issue_at(path, operation, user, Utc::now()).await
    }

    /// Issue a token as if the current time were `now`.
    pub async fn issue_at(
        &mut self,
        path: Option<&str>,
        operation: &str,
        user: &SystemUser,
        now: DateTime<Utc>,
    ) -> Result<AuthDescriptor, IssuanceError> {
        let (path, operation) = validate(path, operation)?;

        let record = TokenRecord::mint(user.name.as_str(), now);
        self.store.append(&record).await?;

        tracing::debug!(
            user = %record.user,
            path = %path,
            operation = operation.as_str(),
            expires_at = %record.expires_at,
            database = %self.store.path().display(),
            "issued LFS token"
        );

        Ok(AuthDescriptor::for_record(&self.webserver_url, &path, &record))
    }

    /// Give back the store, e.g. to close it.
    pub fn into_store(self) -> TokenStore {
        self.store
    }
}

/// One-shot issuance: validate the request, open (and if needed create) the
/// store named by `config`, append one record and describe it.
///
/// The request is validated before the store is touched.
pub async fn issue(
    path: Option<&str>,
    operation: &str,
    current_user: &SystemUser,
    config: &IssuerConfig,
) -> Result<AuthDescriptor, IssuanceError> {
    let (repo, _) = validate(path, operation)?;

    // Not shown to git-lfs clients, but visible when running
    // `ssh $host git-lfs-authenticate` by hand.
    tracing::info!(
        "Hello from git-lfs-authenticate on {}",
        gethostname::gethostname().to_string_lossy()
    );

    let store = TokenStore::open_or_create(&config.database_path).await?;
    let mut issuer = TokenIssuer::new(store, config.webserver_url.as_str());
    let descriptor = issuer
        .issue(Some(repo.as_str()), operation, current_user)
        .await?;
    issuer.into_store().close().await?;

    Ok(descriptor)
}

fn validate(path: Option<&str>, operation: &str) -> Result<(RepoPath, Operation), ValidationError> {
    let path = RepoPath::parse(path)?;
    let operation = operation.parse::<Operation>()?;
    Ok((path, operation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use chrono::Duration;
    use tempfile::tempdir;

    fn config(dir: &std::path::Path) -> IssuerConfig {
        IssuerConfig {
            webserver_url: "http://h".to_string(),
            database_path: dir.join("t.db"),
        }
    }

    #[tokio::test]
    async fn test_issue_end_to_end() {
        let dir = tempdir().unwrap();
        let cfg = config(dir.path());
        let alice = SystemUser::new("alice");

        let descriptor = issue(Some("org/repo"), "upload", &alice, &cfg).await.unwrap();
        assert_eq!(descriptor.href, "http://h/org/repo");
        assert_eq!(descriptor.expires_in, 14_400);

        let token = descriptor
            .header
            .authorization
            .strip_prefix("Git-LFS-Token ")
            .unwrap();
        assert_eq!(token.len(), 80);
        assert!(token.bytes().all(|b| b.is_ascii_hexdigit()));

        let mut store = TokenStore::open(&cfg.database_path).await.unwrap();
        let live = store.scan_live(Utc::now(), Duration::seconds(1)).await.unwrap();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].user, "alice");
        assert!(live[0].token.ct_eq(token));
        assert_eq!(live[0].expires_at, descriptor.expires_at);
        assert_eq!(live[0].expires_at - live[0].created_at, Duration::seconds(14_400));
    }

    #[tokio::test]
    async fn test_rejects_bad_paths_without_touching_store() {
        let dir = tempdir().unwrap();
        let cfg = config(dir.path());
        let alice = SystemUser::new("alice");

        for path in [None, Some(""), Some("repo"), Some("a/b/c"), Some("/repo"), Some("org/")] {
            let err = issue(path, "upload", &alice, &cfg).await.unwrap_err();
            assert!(
                matches!(err, IssuanceError::Validation(_)),
                "{path:?} gave {err:?}"
            );
        }
        assert!(!cfg.database_path.exists());
    }

    #[tokio::test]
    async fn test_rejects_download() {
        let dir = tempdir().unwrap();
        let cfg = config(dir.path());

        let err = issue(Some("org/repo"), "download", &SystemUser::new("alice"), &cfg)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            IssuanceError::Validation(ValidationError::UnsupportedOperation(_))
        ));
    }

    #[tokio::test]
    async fn test_unopenable_store_is_storage_error() {
        let dir = tempdir().unwrap();
        let cfg = IssuerConfig {
            webserver_url: "http://h".to_string(),
            database_path: dir.path().join("missing-dir").join("t.db"),
        };

        let err = issue(Some("org/repo"), "upload", &SystemUser::new("alice"), &cfg)
            .await
            .unwrap_err();
        assert!(matches!(err, IssuanceError::Storage(StoreError::Open { .. })));
    }

    #[tokio::test]
    async fn test_issuer_with_injected_store() {
        let dir = tempdir().unwrap();
        let store = TokenStore::open_or_create(&dir.path().join("t.db")).await.unwrap();
        let mut issuer = TokenIssuer::new(store, "https://lfs.example.com");

        let now = Utc::now();
        let first = issuer
            .issue_at(Some("org/repo"), "upload", &SystemUser::new("alice"), now)
            .await
            .unwrap();
        let second = issuer
            .issue_at(Some("org/other"), "upload", &SystemUser::new("alice"), now)
            .await
            .unwrap();

        assert_eq!(second.href, "https://lfs.example.com/org/other");
        assert_ne!(first.header.authorization, second.header.authorization);

        let mut store = issuer.into_store();
        let live = store.scan_live(now, Duration::seconds(1)).await.unwrap();
        assert_eq!(live.len(), 2);
    }
}
