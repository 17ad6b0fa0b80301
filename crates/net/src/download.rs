//! File download with streaming hash computation and verification

use futures::StreamExt;
use pyndex_errors::{Error, NetworkError};
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use url::Url;

use crate::NetClient;

/// Download operation handle
pub struct Download {
    url: Url,
}

/// Result of a download operation
#[derive(Debug)]
pub struct DownloadResult {
    pub url: String,
    pub size: u64,
    /// Hex-encoded sha256 of the downloaded body
    pub sha256: String,
}

impl Download {
    /// Create a new download
    ///
    /// # Errors
    ///
    /// Returns an error if the provided URL is invalid or cannot be parsed.
    pub fn new(url: &str) -> Result<Self, Error> {
        let url = Url::parse(url).map_err(|e| NetworkError::InvalidUrl(e.to_string()))?;
        Ok(Self { url })
    }

    /// Execute the download
    ///
    /// Streams the body to `dest` with a `.part` suffix, hashing while
    /// writing, then renames into place. When `expected_sha256` is given
    /// and does not match, the partial file is removed and a checksum
    /// error is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the server returns an
    /// error status, the file cannot be written, or hash verification
    /// fails.
    pub async fn execute(
        self,
        client: &NetClient,
        dest: &Path,
        expected_sha256: Option<&str>,
    ) -> Result<DownloadResult, Error> {
        let url_str = self.url.to_string();

        let response = client.get(url_str.as_str()).await?;

        if !response.status().is_success() {
            return Err(NetworkError::HttpError {
                status: response.status().as_u16(),
                message: response.status().to_string(),
            }
            .into());
        }

        debug!(url = %url_str, dest = %dest.display(), "downloading");

        // Create parent directory if needed
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let temp_path = dest.with_extension("part");
        let mut file = File::create(&temp_path).await?;

        let mut stream = response.bytes_stream();
        let mut downloaded = 0u64;
        let mut hasher = Sha256::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| NetworkError::DownloadFailed(e.to_string()))?;
            hasher.update(&chunk);
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;
        }

        // Ensure all data is written
        file.flush().await?;
        drop(file);

        let sha256 = hex::encode(hasher.finalize());

        if let Some(expected) = expected_sha256 {
            if !sha256.eq_ignore_ascii_case(expected) {
                let _ = tokio::fs::remove_file(&temp_path).await;
                return Err(NetworkError::ChecksumMismatch {
                    expected: expected.to_string(),
                    actual: sha256,
                }
                .into());
            }
        }

        tokio::fs::rename(&temp_path, dest).await?;

        Ok(DownloadResult {
            url: url_str,
            size: downloaded,
            sha256,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn downloads_and_hashes() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/pkg/demo-1.0.tar.gz");
                then.status(200).body(b"archive bytes");
            })
            .await;

        let temp = tempfile::tempdir().unwrap();
        let dest = temp.path().join("demo-1.0.tar.gz");

        let client = NetClient::with_defaults().unwrap();
        let download = Download::new(&server.url("/pkg/demo-1.0.tar.gz")).unwrap();
        let result = download.execute(&client, &dest, None).await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.size, 13);
        assert_eq!(std::fs::read(&dest).unwrap(), b"archive bytes");
        // No stray .part file
        assert!(!dest.with_extension("part").exists());
    }

    #[tokio::test]
    async fn checksum_mismatch_removes_partial_file() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/pkg/demo-1.0.tar.gz");
                then.status(200).body(b"archive bytes");
            })
            .await;

        let temp = tempfile::tempdir().unwrap();
        let dest = temp.path().join("demo-1.0.tar.gz");

        let client = NetClient::with_defaults().unwrap();
        let download = Download::new(&server.url("/pkg/demo-1.0.tar.gz")).unwrap();
        let err = download
            .execute(&client, &dest, Some("deadbeef"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Network(NetworkError::ChecksumMismatch { .. })
        ));
        assert!(!dest.exists());
        assert!(!dest.with_extension("part").exists());
    }

    #[tokio::test]
    async fn http_error_status_is_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/gone");
                then.status(404);
            })
            .await;

        let client = NetClient::with_defaults().unwrap();
        let temp = tempfile::tempdir().unwrap();
        let download = Download::new(&server.url("/gone")).unwrap();
        let err = download
            .execute(&client, &temp.path().join("out"), None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Network(NetworkError::HttpError { status: 404, .. })
        ));
    }
}
