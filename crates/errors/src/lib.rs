#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for the pyndex admin tooling
//!
//! This crate provides fine-grained error types organized by domain.
//! All error types implement Clone where possible for easier handling.

use std::borrow::Cow;

use thiserror::Error;

pub mod config;
pub mod index;
pub mod network;
pub mod ops;
pub mod storage;
pub mod version;

// Re-export all error types at the root
pub use config::ConfigError;
pub use index::IndexError;
pub use network::NetworkError;
pub use ops::OpsError;
pub use storage::StorageError;
pub use version::VersionError;

/// Generic error type for cross-crate boundaries
#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Error {
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[error("index error: {0}")]
    Index(#[from] IndexError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("version error: {0}")]
    Version(#[from] VersionError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("ops error: {0}")]
    Ops(#[from] OpsError),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("I/O error: {message}")]
    Io {
        #[cfg_attr(feature = "serde", serde(skip, default = "io_kind_other"))]
        kind: std::io::ErrorKind,
        message: String,
        path: Option<std::path::PathBuf>,
    },
}

#[cfg(feature = "serde")]
fn io_kind_other() -> std::io::ErrorKind {
    std::io::ErrorKind::Other
}

impl Error {
    /// Create an internal error with a message
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Create an Io error with an associated path
    pub fn io_with_path(err: &std::io::Error, path: impl Into<std::path::PathBuf>) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
            path: Some(path.into()),
        }
    }

    /// True when the error is the finder's no-matching-distribution case.
    ///
    /// The add command translates exactly this failure into a command
    /// error; everything else propagates untouched.
    #[must_use]
    pub fn is_distribution_not_found(&self) -> bool {
        matches!(
            self,
            Error::Index(IndexError::DistributionNotFound { .. })
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
            path: None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON error: {err}"))
    }
}

/// Result type alias for pyndex operations
pub type Result<T> = std::result::Result<T, Error>;

/// Minimal interface for rendering user-facing error information without
/// requiring heavyweight envelopes.
pub trait UserFacingError {
    /// Short message suitable for CLI output.
    fn user_message(&self) -> Cow<'_, str>;

    /// Optional remediation hint.
    fn user_hint(&self) -> Option<&'static str> {
        None
    }

    /// Whether retrying the same operation is likely to succeed.
    fn is_retryable(&self) -> bool {
        false
    }
}

impl UserFacingError for Error {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Error::Io { message, .. } => Cow::Owned(message.clone()),
            _ => Cow::Owned(self.to_string()),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Error::Index(IndexError::DistributionNotFound { .. }) => {
                Some("Check the package name and version against the index.")
            }
            Error::Config(_) => Some("Check your pyndex configuration file."),
            Error::Storage(StorageError::DistributionExists { .. }) => {
                Some("This exact distribution is already in the index.")
            }
            _ => None,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Network(
                NetworkError::Timeout { .. }
                    | NetworkError::ConnectionRefused(_)
                    | NetworkError::RateLimited { .. }
            ) | Error::Io { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distribution_not_found_is_detected() {
        let err: Error = IndexError::DistributionNotFound {
            requirement: "requests==2.0.0".to_string(),
        }
        .into();
        assert!(err.is_distribution_not_found());
        assert!(err.to_string().contains("requests==2.0.0"));

        let other: Error = NetworkError::DownloadFailed("boom".to_string()).into();
        assert!(!other.is_distribution_not_found());
    }

    #[test]
    fn retryable_classification() {
        let err: Error = NetworkError::Timeout {
            url: "https://pypi.org/simple/".to_string(),
        }
        .into();
        assert!(err.is_retryable());

        let err: Error = StorageError::DistributionExists {
            filename: "a-1.0.tar.gz".to_string(),
        }
        .into();
        assert!(!err.is_retryable());
    }
}
