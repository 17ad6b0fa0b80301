//! Operation orchestration error types

use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OpsError {
    #[error("operation failed: {message}")]
    OperationFailed { message: String },

    #[error("no packages specified")]
    NoPackagesSpecified,

    #[error("no owner specified (pass --owner or set general.default_owner)")]
    NoOwnerSpecified,

    #[error("context creation failed: {message}")]
    ContextCreationFailed { message: String },
}
