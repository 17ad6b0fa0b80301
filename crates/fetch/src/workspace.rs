//! Scoped temporary workspace for one fetch invocation
//!
//! The workspace owns a uniquely named temporary directory with three
//! subdirectories (build, source, download). The whole tree is removed
//! when the workspace is dropped, on every exit path.

use pyndex_errors::Error;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Ephemeral directory tree for a single fetch
#[derive(Debug)]
pub struct Workspace {
    root: TempDir,
    build_dir: PathBuf,
    source_dir: PathBuf,
    download_dir: PathBuf,
}

impl Workspace {
    /// Create a fresh workspace with build/source/download subdirectories
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory or a subdirectory
    /// cannot be created.
    pub fn create() -> Result<Self, Error> {
        let root = tempfile::Builder::new()
            .prefix("pyndex.")
            .suffix(".tmp")
            .tempdir()
            .map_err(|e| Error::io_with_path(&e, std::env::temp_dir()))?;

        let build_dir = root.path().join("build");
        let source_dir = root.path().join("source");
        let download_dir = root.path().join("download");

        for dir in [&build_dir, &source_dir, &download_dir] {
            std::fs::create_dir(dir).map_err(|e| Error::io_with_path(&e, dir))?;
        }

        Ok(Self {
            root,
            build_dir,
            source_dir,
            download_dir,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    #[must_use]
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    #[must_use]
    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }
}
