#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Index storage for pyndex
//!
//! Persists downloaded distributions into the local index tree:
//! `<root>/packages/<normalized-name>/<filename>` plus a JSON metadata
//! record alongside each artifact. Files are published with a
//! temp-file-then-rename sequence so a reader never observes a partial
//! artifact.

mod package;

pub use package::{PackageMetadata, StoredPackage};

use chrono::Utc;
use pyndex_errors::{Error, StorageError};
use pyndex_types::DistFilename;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncReadExt;
use tracing::info;
use uuid::Uuid;

/// Filesystem-backed package store
#[derive(Debug, Clone)]
pub struct PackageStore {
    packages_path: PathBuf,
}

impl PackageStore {
    /// Create a store rooted at `root` (artifacts live under
    /// `root/packages`)
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            packages_path: root.join("packages"),
        }
    }

    /// Directory holding one project's distributions
    #[must_use]
    pub fn project_dir(&self, normalized_name: &str) -> PathBuf {
        self.packages_path.join(normalized_name)
    }

    /// Final location an artifact with this filename would occupy
    ///
    /// # Errors
    ///
    /// Returns an error if the filename is not a recognizable
    /// distribution.
    pub fn artifact_path(&self, filename: &str) -> Result<PathBuf, Error> {
        let dist = DistFilename::parse(filename)?;
        Ok(self.project_dir(&dist.name).join(filename))
    }

    /// True when a distribution with this filename is already stored
    pub async fn contains(&self, filename: &str) -> bool {
        match self.artifact_path(filename) {
            Ok(path) => fs::metadata(&path).await.is_ok(),
            Err(_) => false,
        }
    }

    /// Ingest a downloaded artifact under an owner identity
    ///
    /// The artifact filename must parse as a distribution; its sha256 is
    /// computed here and recorded in the metadata sidecar. Ingesting a
    /// filename that is already stored is refused.
    ///
    /// # Errors
    ///
    /// Returns `DistributionExists` for duplicates, `InvalidArtifact`
    /// when the file is missing or unparseable, and I/O errors
    /// otherwise.
    pub async fn ingest(&self, artifact: &Path, owner: &str) -> Result<StoredPackage, Error> {
        let filename = artifact
            .file_name()
            .and_then(|f| f.to_str())
            .ok_or_else(|| StorageError::InvalidArtifact {
                path: artifact.display().to_string(),
                reason: "no usable filename".to_string(),
            })?;
        let dist = DistFilename::parse(filename)?;

        let size = fs::metadata(artifact)
            .await
            .map_err(|e| StorageError::InvalidArtifact {
                path: artifact.display().to_string(),
                reason: e.to_string(),
            })?
            .len();

        let dest = self.project_dir(&dist.name).join(filename);
        if fs::metadata(&dest).await.is_ok() {
            return Err(StorageError::DistributionExists {
                filename: filename.to_string(),
            }
            .into());
        }

        let sha256 = hash_file(artifact).await?;

        let parent = dest.parent().ok_or_else(|| StorageError::IoError {
            message: "failed to get parent directory".to_string(),
        })?;
        fs::create_dir_all(parent).await?;

        let metadata = PackageMetadata {
            name: dist.name.clone(),
            version: dist.version.as_str().to_string(),
            filename: filename.to_string(),
            sha256,
            size,
            owner: owner.to_string(),
            uploaded_at: Utc::now(),
        };

        // Sidecar goes first so a published artifact always has its
        // record; on failure below the sidecar is removed again
        self.write_metadata(&dest, &metadata).await?;

        // Copy to a unique temp name, then rename into place
        let temp_path = parent.join(format!("{}.tmp", Uuid::new_v4()));
        if let Err(e) = fs::copy(artifact, &temp_path).await {
            let _ = fs::remove_file(&temp_path).await;
            let _ = fs::remove_file(metadata_path(&dest)).await;
            return Err(StorageError::IoError {
                message: format!("failed to copy artifact to store: {e}"),
            }
            .into());
        }
        if let Err(e) = fs::rename(&temp_path, &dest).await {
            let _ = fs::remove_file(&temp_path).await;
            let _ = fs::remove_file(metadata_path(&dest)).await;
            return Err(StorageError::IoError {
                message: format!("failed to publish artifact: {e}"),
            }
            .into());
        }

        info!(
            name = %metadata.name,
            version = %metadata.version,
            owner = %metadata.owner,
            "stored distribution"
        );

        Ok(StoredPackage {
            path: dest,
            metadata,
        })
    }

    /// Read the metadata record for a stored filename
    ///
    /// # Errors
    ///
    /// Returns `PathNotFound` when no record exists, or a metadata error
    /// if the record cannot be decoded.
    pub async fn metadata_for(&self, filename: &str) -> Result<PackageMetadata, Error> {
        let sidecar = metadata_path(&self.artifact_path(filename)?);
        let content = fs::read_to_string(&sidecar)
            .await
            .map_err(|_| StorageError::PathNotFound {
                path: sidecar.display().to_string(),
            })?;
        serde_json::from_str(&content).map_err(|e| {
            StorageError::MetadataError {
                message: e.to_string(),
            }
            .into()
        })
    }

    async fn write_metadata(&self, dest: &Path, metadata: &PackageMetadata) -> Result<(), Error> {
        let sidecar = metadata_path(dest);
        let json = serde_json::to_string_pretty(metadata)?;

        let temp_path = sidecar.with_extension(format!("{}.tmp", Uuid::new_v4()));
        fs::write(&temp_path, &json).await?;
        if let Err(e) = fs::rename(&temp_path, &sidecar).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::MetadataError {
                message: format!("failed to publish metadata: {e}"),
            }
            .into());
        }
        Ok(())
    }
}

fn metadata_path(artifact: &Path) -> PathBuf {
    let mut name = artifact.file_name().unwrap_or_default().to_os_string();
    name.push(".json");
    artifact.with_file_name(name)
}

async fn hash_file(path: &Path) -> Result<String, Error> {
    let mut file = fs::File::open(path)
        .await
        .map_err(|e| Error::io_with_path(&e, path))?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; 64 * 1024];

    loop {
        let n = file.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn write_artifact(dir: &Path, filename: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(filename);
        fs::write(&path, content).await.unwrap();
        path
    }

    #[tokio::test]
    async fn ingests_and_records_metadata() {
        let temp = TempDir::new().unwrap();
        let store = PackageStore::new(temp.path());

        let artifact =
            write_artifact(temp.path(), "Demo_Pkg-1.0.0.tar.gz", b"archive").await;
        let stored = store.ingest(&artifact, "admin").await.unwrap();

        assert_eq!(stored.metadata.name, "demo-pkg");
        assert_eq!(stored.metadata.version, "1.0.0");
        assert_eq!(stored.metadata.owner, "admin");
        assert_eq!(stored.metadata.size, 7);
        assert!(stored.path.exists());
        assert!(stored
            .path
            .starts_with(temp.path().join("packages").join("demo-pkg")));

        // Round-trip through the sidecar
        let metadata = store.metadata_for("Demo_Pkg-1.0.0.tar.gz").await.unwrap();
        assert_eq!(metadata.sha256, stored.metadata.sha256);
        assert_eq!(metadata.owner, "admin");

        assert!(store.contains("Demo_Pkg-1.0.0.tar.gz").await);
    }

    #[tokio::test]
    async fn refuses_duplicate_distribution() {
        let temp = TempDir::new().unwrap();
        let store = PackageStore::new(temp.path());

        let artifact = write_artifact(temp.path(), "demo-1.0.0.tar.gz", b"archive").await;
        store.ingest(&artifact, "admin").await.unwrap();

        let err = store.ingest(&artifact, "admin").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Storage(StorageError::DistributionExists { .. })
        ));
    }

    #[tokio::test]
    async fn rejects_unrecognizable_filenames() {
        let temp = TempDir::new().unwrap();
        let store = PackageStore::new(temp.path());

        let artifact = write_artifact(temp.path(), "notes.txt", b"text").await;
        assert!(store.ingest(&artifact, "admin").await.is_err());
    }

    #[tokio::test]
    async fn missing_metadata_is_path_not_found() {
        let temp = TempDir::new().unwrap();
        let store = PackageStore::new(temp.path());

        let err = store.metadata_for("ghost-1.0.tar.gz").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Storage(StorageError::PathNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn failed_metadata_write_does_not_publish_artifact() {
        let temp = TempDir::new().unwrap();
        let store = PackageStore::new(temp.path());
        let artifact = write_artifact(temp.path(), "demo-1.0.0.tar.gz", b"archive").await;

        // Block the sidecar path with a directory so the record cannot
        // be written
        let project_dir = store.project_dir("demo");
        fs::create_dir_all(project_dir.join("demo-1.0.0.tar.gz.json"))
            .await
            .unwrap();

        assert!(store.ingest(&artifact, "admin").await.is_err());
        assert!(!store.contains("demo-1.0.0.tar.gz").await);
    }

    #[tokio::test]
    async fn no_temp_debris_after_ingest() {
        let temp = TempDir::new().unwrap();
        let store = PackageStore::new(temp.path());

        let artifact = write_artifact(temp.path(), "demo-1.0.0.tar.gz", b"archive").await;
        store.ingest(&artifact, "admin").await.unwrap();

        let project_dir = store.project_dir("demo");
        let leftovers: Vec<_> = std::fs::read_dir(&project_dir)
            .unwrap()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
