//! Token validation.
//!
//! Runs per HTTP request. A missing or malformed `Authorization` header and
//! an unknown or expired token are all the same expected outcome: `Ok(None)`,
//! leaving the host pipeline to treat the caller as anonymous. Only store
//! failures are errors.

use crate::error::StoreError;
use crate::identity::{Identity, Permission};
use crate::store::TokenStore;
use chrono::{DateTime, Utc};
use lfs_auth_core::live_grace;
use regex::Regex;
use std::sync::LazyLock;

// `Git-LFS-Token` then exactly 80 hex characters, surrounding whitespace allowed.
static TOKEN_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A\s*Git-LFS-Token\s+([0-9a-fA-F]{80})\s*\z").expect("static regex")
});

/// Extract the presented token from an `Authorization` header value.
pub fn parse_authorization(header: &str) -> Option<&str> {
    TOKEN_HEADER
        .captures(header)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Resolves presented tokens against the store it was handed.
pub struct TokenValidator {
    store: TokenStore,
}

impl TokenValidator {
    pub fn new(store: TokenStore) -> Self {
        Self { store }
    }

    /// Resolve the identity behind `authorization_header` at `now`.
    ///
    /// Every live record for every user is compared in constant time; the
    /// first match wins and is granted all permissions.
    pub async fn authenticate(
        &mut self,
        authorization_header: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Option<Identity>, StoreError> {
        let Some(supplied) = authorization_header.and_then(parse_authorization) else {
            return Ok(None);
        };

        let live = self.store.scan_live(now, live_grace()).await?;
        for record in live {
            if record.token.ct_eq(supplied) {
                tracing::info!(
                    user = %record.user,
                    created_at = %record.created_at,
                    expires_at = %record.expires_at,
                    "accepting LFS token"
                );
                return Ok(Some(Identity::authenticated(record.user, Permission::all())));
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> String {
        "0123456789abcdef".repeat(5)
    }

    #[test]
    fn test_parse_well_formed() {
        let t = token();
        assert_eq!(parse_authorization(&format!("Git-LFS-Token {t}")), Some(t.as_str()));
        assert_eq!(
            parse_authorization(&format!("  Git-LFS-Token \t{t}  \n")),
            Some(t.as_str())
        );

        let upper = t.to_uppercase();
        assert_eq!(
            parse_authorization(&format!("Git-LFS-Token {upper}")),
            Some(upper.as_str())
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let t = token();
        let cases = [
            String::new(),
            t.clone(),
            format!("Bearer {t}"),
            format!("git-lfs-token {t}"),
            format!("Git-LFS-Token{t}"),
            format!("Git-LFS-Token {}", &t[..79]),
            format!("Git-LFS-Token {t}0"),
            format!("Git-LFS-Token {}g", &t[..79]),
            format!("Git-LFS-Token {t} extra"),
            format!("Git-LFS-Token {}", "Z".repeat(80)),
        ];
        for header in cases {
            assert_eq!(parse_authorization(&header), None, "{header:?}");
        }
    }
}
