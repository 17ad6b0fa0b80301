#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Standalone package fetch for pyndex
//!
//! Resolves one requirement against the configured index and downloads
//! the selected distribution into a scoped workspace. Nothing here is
//! transitive: the requirement is fetched alone, and whatever is in the
//! local store is ignored.

mod workspace;

pub use workspace::Workspace;

use pyndex_errors::{Error, IndexError};
use pyndex_finder::{Candidate, PackageFinder};
use pyndex_net::NetClient;
use pyndex_types::Requirement;
use std::path::PathBuf;
use tracing::info;

/// A downloaded distribution inside a workspace
#[derive(Debug)]
pub struct FetchedDist {
    /// Path to the artifact under the workspace download directory
    pub path: PathBuf,
    /// Candidate the finder selected
    pub candidate: Candidate,
    /// Size of the downloaded file in bytes
    pub size: u64,
    /// Hex-encoded sha256 of the downloaded file
    pub sha256: String,
}

/// Fetch one requirement into the workspace download directory
///
/// The index-published sha256 is verified during download when present.
/// After the download, the download directory must contain exactly one
/// file; zero or more than one is an error rather than a silent pick.
///
/// # Errors
///
/// Returns `DistributionNotFound` when the requirement matches nothing
/// on the index, `DownloadCountMismatch` when the download directory
/// does not hold exactly one file, and network or I/O errors otherwise.
pub async fn fetch_requirement(
    client: &NetClient,
    finder: &PackageFinder,
    requirement: &Requirement,
    workspace: &Workspace,
) -> Result<FetchedDist, Error> {
    let candidate = finder.find_requirement(client, requirement).await?;

    info!(
        requirement = %requirement,
        filename = %candidate.dist.filename,
        "fetching distribution"
    );

    let dest = workspace.download_dir().join(&candidate.dist.filename);
    let result = pyndex_net::download_file(
        client,
        &candidate.url,
        &dest,
        candidate.sha256.as_deref(),
    )
    .await?;

    let count = count_files(workspace.download_dir()).await?;
    if count != 1 {
        return Err(IndexError::DownloadCountMismatch { count }.into());
    }

    Ok(FetchedDist {
        path: dest,
        candidate,
        size: result.size,
        sha256: result.sha256,
    })
}

async fn count_files(dir: &std::path::Path) -> Result<usize, Error> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut count = 0;
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            count += 1;
        }
    }
    Ok(count)
}
