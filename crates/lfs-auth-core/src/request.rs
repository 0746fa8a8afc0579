//! Arguments of an issuance request.

use crate::error::ValidationError;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

// Exactly two non-empty, slash-free segments.
static REPO_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A[^/]+/[^/]+\z").expect("static regex"));

/// A repository path of the form `owner/repo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoPath(String);

impl RepoPath {
    /// Validate an optional path argument.
    pub fn parse(path: Option<&str>) -> Result<Self, ValidationError> {
        match path {
            None | Some("") => Err(ValidationError::MissingPath),
            Some(p) if REPO_PATH.is_match(p) => Ok(Self(p.to_string())),
            Some(p) => Err(ValidationError::MalformedPath(p.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The LFS operation a token is requested for.
///
/// Only uploads are issued tokens; downloads go through the anonymous path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Upload,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Upload => "upload",
        }
    }
}

impl FromStr for Operation {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upload" => Ok(Operation::Upload),
            other => Err(ValidationError::UnsupportedOperation(other.to_string())),
        }
    }
}

/// The operating-system account the issuer runs as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemUser {
    pub name: String,
}

impl SystemUser {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_owner_repo() {
        for path in [
            "org/repo",
            "a/b",
            "my-org/lfs.test",
            "o w n/r e p o",
            "ünï/cödé",
            // Segments are anything but a slash, newlines included.
            "org/repo\n",
            "org\nx/repo",
        ] {
            let parsed = RepoPath::parse(Some(path)).unwrap();
            assert_eq!(parsed.as_str(), path);
        }
    }

    #[test]
    fn test_missing_path() {
        assert_eq!(RepoPath::parse(None), Err(ValidationError::MissingPath));
        assert_eq!(RepoPath::parse(Some("")), Err(ValidationError::MissingPath));
    }

    #[test]
    fn test_rejects_other_shapes() {
        for path in [
            "repo",
            "/repo",
            "org/",
            "/",
            "org/repo/",
            "org/repo/extra",
            "//",
            "org//repo",
            "/org/repo",
        ] {
            assert_eq!(
                RepoPath::parse(Some(path)),
                Err(ValidationError::MalformedPath(path.to_string())),
                "{path:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_operation_parse() {
        assert_eq!("upload".parse::<Operation>(), Ok(Operation::Upload));
        assert_eq!(
            "download".parse::<Operation>(),
            Err(ValidationError::UnsupportedOperation("download".into()))
        );
        assert!("Upload".parse::<Operation>().is_err());
        assert_eq!(Operation::Upload.as_str(), "upload");
    }
}
