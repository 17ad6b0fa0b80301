#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Network operations for pyndex
//!
//! This crate handles all HTTP operations: project page fetches against
//! the simple index and distribution downloads, with timeouts and retry
//! logic.

mod client;
mod download;

pub use client::{NetClient, NetConfig};
pub use download::{Download, DownloadResult};

use pyndex_errors::{Error, NetworkError};
use std::path::Path;
use tracing::debug;
use url::Url;

/// Download a file, verifying an optional sha256 digest
///
/// # Errors
///
/// Returns an error if the URL is invalid, the download fails, the
/// digest does not match, or there are I/O errors while writing.
pub async fn download_file(
    client: &NetClient,
    url: &str,
    dest: &Path,
    expected_sha256: Option<&str>,
) -> Result<DownloadResult, Error> {
    let download = Download::new(url)?;
    download.execute(client, dest, expected_sha256).await
}

/// Fetch text content from a URL
///
/// # Errors
///
/// Returns an error if the HTTP request fails, the server returns an
/// error status, or the response body cannot be decoded as text.
pub async fn fetch_text(client: &NetClient, url: &str) -> Result<String, Error> {
    debug!("fetching text from {url}");

    let response = client.get(url).await?;

    if !response.status().is_success() {
        return Err(NetworkError::HttpError {
            status: response.status().as_u16(),
            message: response.status().to_string(),
        }
        .into());
    }

    response
        .text()
        .await
        .map_err(|e| NetworkError::DownloadFailed(e.to_string()).into())
}

/// Parse and validate a URL
///
/// # Errors
///
/// Returns an error if the URL string is malformed or invalid according to RFC 3986.
pub fn parse_url(url: &str) -> Result<Url, Error> {
    Url::parse(url).map_err(|e| NetworkError::InvalidUrl(e.to_string()).into())
}
