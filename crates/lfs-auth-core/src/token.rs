//! Token secrets and persisted token records.

use crate::{TOKEN_BYTES, token_lifetime};
use chrono::{DateTime, SubsecRound, Utc};
use rand::RngCore;
use std::fmt;
use subtle::ConstantTimeEq;

/// An opaque bearer secret, rendered as lowercase hex.
///
/// The secret never appears in `Debug` output, and equality is only offered
/// through [`TokenSecret::ct_eq`].
#[derive(Clone)]
pub struct TokenSecret(String);

impl TokenSecret {
    /// Generate a fresh secret from the thread-local CSPRNG.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let mut bytes = [0u8; TOKEN_BYTES];
        rng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Wrap a secret read back from the store.
    pub fn from_stored(value: String) -> Self {
        Self(value)
    }

    /// The secret as presented on the wire.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Constant-time comparison against a presented token.
    ///
    /// The running time depends only on the lengths of the inputs, never on
    /// the position of the first differing byte.
    pub fn ct_eq(&self, presented: &str) -> bool {
        self.0.as_bytes().ct_eq(presented.as_bytes()).into()
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenSecret(<redacted>)")
    }
}

/// One row of the `tokens` relation. Immutable once written.
#[derive(Debug, Clone)]
pub struct TokenRecord {
    /// Operating-system account the token was issued to.
    pub user: String,
    pub token: TokenSecret,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl TokenRecord {
    /// Mint a record for `user` at `now`, expiring after the fixed lifetime.
    ///
    /// `now` is truncated to microseconds so the timestamps survive the
    /// store's floating-point representation unchanged.
    pub fn mint(user: impl Into<String>, now: DateTime<Utc>) -> Self {
        let created_at = now.trunc_subsecs(6);
        Self {
            user: user.into(),
            token: TokenSecret::generate(),
            created_at,
            expires_at: created_at + token_lifetime(),
        }
    }

    /// Whole seconds of lifetime remaining at `now`, never negative.
    pub fn expires_in(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}
