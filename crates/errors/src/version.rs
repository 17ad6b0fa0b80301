//! Version and requirement parsing error types

use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VersionError {
    #[error("invalid version: {input}")]
    InvalidVersion { input: String },

    #[error("invalid requirement: {input}")]
    InvalidRequirement { input: String },

    #[error("unsupported version constraint {operator} in {input} (only == pins are supported)")]
    UnsupportedConstraint { operator: String, input: String },

    #[error("unrecognized distribution filename: {filename}")]
    UnrecognizedFilename { filename: String },
}
