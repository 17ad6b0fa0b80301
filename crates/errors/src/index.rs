//! Package index lookup error types

use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IndexError {
    #[error("no distribution found matching {requirement}")]
    DistributionNotFound { requirement: String },

    #[error("invalid project page for {project}: {reason}")]
    InvalidPage { project: String, reason: String },

    #[error("insecure index URL refused: {url} (set index.allow_insecure to permit)")]
    InsecureUrl { url: String },

    #[error("unsupported URL scheme: {scheme}")]
    UnsupportedScheme { scheme: String },

    #[error("expected exactly one downloaded file, found {count}")]
    DownloadCountMismatch { count: usize },
}
