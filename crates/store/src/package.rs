//! Stored package records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Metadata persisted next to each stored distribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub name: String,
    pub version: String,
    pub filename: String,
    pub sha256: String,
    pub size: u64,
    pub owner: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Result of a successful ingest
#[derive(Debug, Clone)]
pub struct StoredPackage {
    /// Final artifact location inside the store
    pub path: PathBuf,
    pub metadata: PackageMetadata,
}
