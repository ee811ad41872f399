use std::fmt;

use thiserror::Error;

/// Which remote object already carries the tag name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    Tag,
    Release,
}

impl fmt::Display for CollisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionKind::Tag => write!(f, "tag"),
            CollisionKind::Release => write!(f, "release"),
        }
    }
}

/// Unified error type for gh-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("A {kind} named '{tag}' already exists")]
    Collision { tag: String, kind: CollisionKind },

    #[error("GITHUB_TOKEN is not set; a token is required to talk to the GitHub API")]
    MissingToken,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Changelog error: {0}")]
    Changelog(String),

    #[error("Asset error: {0}")]
    Asset(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("GitHub API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in gh-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    pub fn collision(tag: impl Into<String>, kind: CollisionKind) -> Self {
        ReleaseError::Collision {
            tag: tag.into(),
            kind,
        }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a changelog error with context
    pub fn changelog(msg: impl Into<String>) -> Self {
        ReleaseError::Changelog(msg.into())
    }

    /// Create an asset error with context
    pub fn asset(msg: impl Into<String>) -> Self {
        ReleaseError::Asset(msg.into())
    }

    /// Create a repository error with context
    pub fn repository(msg: impl Into<String>) -> Self {
        ReleaseError::Repository(msg.into())
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        ReleaseError::Api {
            status,
            message: message.into(),
        }
    }

    /// True for the tag/release precondition failure raised by `create`
    pub fn is_collision(&self) -> bool {
        matches!(self, ReleaseError::Collision { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_display() {
        let err = ReleaseError::collision("v1.0.0", CollisionKind::Tag);
        assert_eq!(err.to_string(), "A tag named 'v1.0.0' already exists");

        let err = ReleaseError::collision("v1.0.0", CollisionKind::Release);
        assert_eq!(err.to_string(), "A release named 'v1.0.0' already exists");
    }

    #[test]
    fn test_is_collision() {
        assert!(ReleaseError::collision("v1", CollisionKind::Tag).is_collision());
        assert!(!ReleaseError::MissingToken.is_collision());
        assert!(!ReleaseError::config("x").is_collision());
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_api_error_display() {
        let err = ReleaseError::api(422, "Validation Failed");
        assert_eq!(err.to_string(), "GitHub API returned 422: Validation Failed");
    }

    #[test]
    fn test_missing_token_mentions_variable() {
        assert!(ReleaseError::MissingToken
            .to_string()
            .contains("GITHUB_TOKEN"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ReleaseError::config("x"), "Configuration error"),
            (ReleaseError::changelog("x"), "Changelog error"),
            (ReleaseError::asset("x"), "Asset error"),
            (ReleaseError::repository("x"), "Repository error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
