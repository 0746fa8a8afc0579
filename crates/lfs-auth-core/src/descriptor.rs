//! The authorization descriptor printed by the issuer.
//!
//! This is the JSON document `git-lfs` expects back from
//! `git-lfs-authenticate`:
//!
//! ```json
//! { "href": "http://host/org/repo",
//!   "header": { "Authorization": "Git-LFS-Token 3f9c..." },
//!   "expires_at": "2024-03-01T16:00:00Z",
//!   "expires_in": 14400 }
//! ```

use crate::request::RepoPath;
use crate::token::TokenRecord;
use crate::AUTH_SCHEME;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Machine-readable result of a successful issuance.
#[derive(Debug, Clone, Serialize)]
pub struct AuthDescriptor {
    pub href: String,
    pub header: AuthHeader,
    #[serde(serialize_with = "serialize_expires_at")]
    pub expires_at: DateTime<Utc>,
    pub expires_in: i64,
}

/// Headers the client replays on its HTTP requests.
#[derive(Debug, Clone, Serialize)]
pub struct AuthHeader {
    #[serde(rename = "Authorization")]
    pub authorization: String,
}

impl AuthDescriptor {
    /// Describe `record` for a client pushing to `path` on `webserver_url`.
    pub fn for_record(webserver_url: &str, path: &RepoPath, record: &TokenRecord) -> Self {
        Self {
            href: format!("{}/{}", webserver_url, path),
            header: AuthHeader {
                authorization: format!("{} {}", AUTH_SCHEME, record.token.expose()),
            },
            expires_at: record.expires_at,
            expires_in: record.expires_in(record.created_at),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn serialize_expires_at<S: Serializer>(at: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&at.format("%Y-%m-%dT%H:%M:%SZ").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::Value;

    #[test]
    fn test_descriptor_json_shape() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let record = TokenRecord::mint("alice", now);
        let path = RepoPath::parse(Some("org/repo")).unwrap();

        let descriptor = AuthDescriptor::for_record("http://h", &path, &record);
        let json: Value = serde_json::from_str(&descriptor.to_json().unwrap()).unwrap();

        assert_eq!(json["href"], "http://h/org/repo");
        assert_eq!(
            json["header"]["Authorization"],
            format!("Git-LFS-Token {}", record.token.expose())
        );
        assert_eq!(json["expires_at"], "2024-03-01T16:00:00Z");
        assert_eq!(json["expires_in"], 14_400);
        assert_eq!(json.as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_expires_at_drops_fraction() {
        let now = Utc.timestamp_opt(1_709_294_400, 987_654_000).unwrap();
        let record = TokenRecord::mint("alice", now);
        let path = RepoPath::parse(Some("org/repo")).unwrap();

        let descriptor = AuthDescriptor::for_record("http://h", &path, &record);
        let json: Value = serde_json::from_str(&descriptor.to_json().unwrap()).unwrap();
        assert_eq!(json["expires_at"], "2024-03-01T16:00:00Z");
    }
}
