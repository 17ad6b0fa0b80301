//! Storage-related error types

use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StorageError {
    #[error("distribution already stored: {filename}")]
    DistributionExists { filename: String },

    #[error("path not found: {path}")]
    PathNotFound { path: String },

    #[error("invalid artifact {path}: {reason}")]
    InvalidArtifact { path: String, reason: String },

    #[error("metadata error: {message}")]
    MetadataError { message: String },

    #[error("I/O error: {message}")]
    IoError { message: String },
}
