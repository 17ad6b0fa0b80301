#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Package finder for pyndex
//!
//! Queries one configured simple index (PEP 691 JSON API), parses
//! project pages, and selects the best candidate distribution for a
//! requirement. Dependency resolution is deliberately absent: one
//! requirement maps to one candidate, never to its dependencies.

mod models;

pub use models::{ProjectFile, ProjectPage, Yanked};

use pyndex_errors::{Error, IndexError, NetworkError};
use pyndex_net::NetClient;
use pyndex_types::{normalize_name, DistFilename, DistKind, Requirement};
use tracing::debug;
use url::Url;

/// Accept header for the simple index JSON API
pub const SIMPLE_JSON_ACCEPT: &str = "application/vnd.pypi.simple.v1+json";

/// A selectable distribution from a project page
#[derive(Debug, Clone)]
pub struct Candidate {
    pub dist: DistFilename,
    /// Absolute download URL
    pub url: String,
    /// Index-published sha256 digest, when present
    pub sha256: Option<String>,
    pub yanked: bool,
}

/// Finder over one fixed simple index
#[derive(Debug, Clone)]
pub struct PackageFinder {
    index_url: Url,
}

impl PackageFinder {
    /// Create a finder for an index base URL
    ///
    /// Plain-http URLs are refused unless `allow_insecure` is set;
    /// non-http(s) schemes are always refused.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed, uses an unsupported
    /// scheme, or is insecure without permission.
    pub fn new(index_url: &str, allow_insecure: bool) -> Result<Self, Error> {
        let mut url =
            Url::parse(index_url).map_err(|e| NetworkError::InvalidUrl(e.to_string()))?;

        match url.scheme() {
            "https" => {}
            "http" => {
                if !allow_insecure {
                    return Err(IndexError::InsecureUrl {
                        url: index_url.to_string(),
                    }
                    .into());
                }
            }
            scheme => {
                return Err(IndexError::UnsupportedScheme {
                    scheme: scheme.to_string(),
                }
                .into());
            }
        }

        // Project pages are resolved relative to the base, which must
        // therefore end in a slash.
        if !url.path().ends_with('/') {
            url.set_path(&format!("{}/", url.path()));
        }

        Ok(Self { index_url: url })
    }

    /// Base URL of the configured index
    #[must_use]
    pub fn index_url(&self) -> &Url {
        &self.index_url
    }

    /// Project page URL for a package name
    ///
    /// # Errors
    ///
    /// Returns an error if the normalized name does not form a valid URL.
    pub fn project_url(&self, name: &str) -> Result<Url, Error> {
        let normalized = normalize_name(name);
        self.index_url
            .join(&format!("{normalized}/"))
            .map_err(|e| NetworkError::InvalidUrl(e.to_string()).into())
    }

    /// Fetch the project page and return its candidates, newest first
    ///
    /// Files whose names cannot be parsed are skipped. A 404 from the
    /// index means the project does not exist.
    ///
    /// # Errors
    ///
    /// Returns `DistributionNotFound` for a missing project,
    /// `InvalidPage` for an undecodable body, and network errors
    /// otherwise.
    pub async fn find_candidates(
        &self,
        client: &NetClient,
        name: &str,
    ) -> Result<Vec<Candidate>, Error> {
        let page_url = self.project_url(name)?;
        debug!(url = %page_url, "querying index");

        let response = client
            .get_with_accept(page_url.as_str(), SIMPLE_JSON_ACCEPT)
            .await?;

        if response.status().as_u16() == 404 {
            return Err(IndexError::DistributionNotFound {
                requirement: name.to_string(),
            }
            .into());
        }
        if !response.status().is_success() {
            return Err(NetworkError::HttpError {
                status: response.status().as_u16(),
                message: response.status().to_string(),
            }
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| NetworkError::DownloadFailed(e.to_string()))?;

        let page: ProjectPage =
            serde_json::from_str(&body).map_err(|e| IndexError::InvalidPage {
                project: name.to_string(),
                reason: e.to_string(),
            })?;

        let mut candidates = Vec::with_capacity(page.files.len());
        for file in page.files {
            let Ok(dist) = DistFilename::parse(&file.filename) else {
                debug!(filename = %file.filename, "skipping unparseable filename");
                continue;
            };

            // Relative file URLs resolve against the project page
            let url = match page_url.join(&file.url) {
                Ok(abs) => abs.to_string(),
                Err(e) => {
                    return Err(IndexError::InvalidPage {
                        project: name.to_string(),
                        reason: format!("bad file URL {}: {e}", file.url),
                    }
                    .into());
                }
            };

            candidates.push(Candidate {
                sha256: file.sha256().map(str::to_string),
                yanked: file.yanked.is_yanked(),
                url,
                dist,
            });
        }

        // Newest first; sdists before wheels at equal version so the
        // stored artifact is the source archive when one exists.
        candidates.sort_by(|a, b| {
            b.dist
                .version
                .cmp(&a.dist.version)
                .then_with(|| kind_rank(a.dist.kind).cmp(&kind_rank(b.dist.kind)))
                .then_with(|| a.dist.filename.cmp(&b.dist.filename))
        });

        Ok(candidates)
    }

    /// Best candidate satisfying a requirement
    ///
    /// Yanked files are skipped, except that an exact pin may fall back
    /// to a yanked file when nothing else matches.
    ///
    /// # Errors
    ///
    /// Returns `DistributionNotFound` carrying the requirement text when
    /// no candidate matches.
    pub async fn find_requirement(
        &self,
        client: &NetClient,
        requirement: &Requirement,
    ) -> Result<Candidate, Error> {
        let candidates = self
            .find_candidates(client, &requirement.name)
            .await
            .map_err(|e| match e {
                Error::Index(IndexError::DistributionNotFound { .. }) => {
                    IndexError::DistributionNotFound {
                        requirement: requirement.to_string(),
                    }
                    .into()
                }
                other => other,
            })?;

        let matching: Vec<&Candidate> = candidates
            .iter()
            .filter(|c| requirement.matches(&c.dist.version))
            .collect();

        let selected = matching
            .iter()
            .find(|c| !c.yanked)
            .or_else(|| {
                // An explicit pin is honored even for yanked files
                if requirement.pin.is_some() {
                    matching.first()
                } else {
                    None
                }
            })
            .copied();

        selected.cloned().ok_or_else(|| {
            IndexError::DistributionNotFound {
                requirement: requirement.to_string(),
            }
            .into()
        })
    }
}

fn kind_rank(kind: DistKind) -> u8 {
    match kind {
        DistKind::Sdist => 0,
        DistKind::Wheel => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn page_body() -> String {
        r#"{
            "meta": {"api-version": "1.0"},
            "name": "demo",
            "files": [
                {
                    "filename": "demo-1.0.0.tar.gz",
                    "url": "https://files.example/demo-1.0.0.tar.gz",
                    "hashes": {"sha256": "aaa"}
                },
                {
                    "filename": "demo-2.0.0.tar.gz",
                    "url": "https://files.example/demo-2.0.0.tar.gz",
                    "hashes": {"sha256": "bbb"}
                },
                {
                    "filename": "demo-2.0.0-py3-none-any.whl",
                    "url": "https://files.example/demo-2.0.0-py3-none-any.whl",
                    "hashes": {"sha256": "ccc"}
                },
                {
                    "filename": "demo-3.0.0.tar.gz",
                    "url": "https://files.example/demo-3.0.0.tar.gz",
                    "hashes": {"sha256": "ddd"},
                    "yanked": true
                },
                {
                    "filename": "not-a-dist.txt",
                    "url": "https://files.example/not-a-dist.txt"
                }
            ]
        }"#
        .to_string()
    }

    #[test]
    fn refuses_insecure_and_odd_schemes() {
        assert!(PackageFinder::new("https://pypi.org/simple/", false).is_ok());
        assert!(matches!(
            PackageFinder::new("http://pypi.org/simple/", false),
            Err(Error::Index(IndexError::InsecureUrl { .. }))
        ));
        assert!(PackageFinder::new("http://pypi.org/simple/", true).is_ok());
        assert!(matches!(
            PackageFinder::new("ftp://pypi.org/simple/", true),
            Err(Error::Index(IndexError::UnsupportedScheme { .. }))
        ));
    }

    #[test]
    fn project_urls_are_normalized() {
        let finder = PackageFinder::new("https://pypi.org/simple", false).unwrap();
        let url = finder.project_url("Zope.Interface").unwrap();
        assert_eq!(url.as_str(), "https://pypi.org/simple/zope-interface/");
    }

    #[tokio::test]
    async fn finds_newest_unyanked_candidate() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/simple/demo/")
                    .header("accept", SIMPLE_JSON_ACCEPT);
                then.status(200)
                    .header("content-type", SIMPLE_JSON_ACCEPT)
                    .body(page_body());
            })
            .await;

        let finder = PackageFinder::new(&server.url("/simple/"), true).unwrap();
        let client = NetClient::with_defaults().unwrap();

        let req = Requirement::parse("demo").unwrap();
        let candidate = finder.find_requirement(&client, &req).await.unwrap();

        // 3.0.0 is yanked, so the newest selectable version is 2.0.0,
        // and the sdist wins over the wheel.
        assert_eq!(candidate.dist.filename, "demo-2.0.0.tar.gz");
        assert_eq!(candidate.sha256.as_deref(), Some("bbb"));
    }

    #[tokio::test]
    async fn exact_pin_selects_that_version() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/simple/demo/");
                then.status(200).body(page_body());
            })
            .await;

        let finder = PackageFinder::new(&server.url("/simple/"), true).unwrap();
        let client = NetClient::with_defaults().unwrap();

        let req = Requirement::parse("demo==1.0.0").unwrap();
        let candidate = finder.find_requirement(&client, &req).await.unwrap();
        assert_eq!(candidate.dist.filename, "demo-1.0.0.tar.gz");

        // A pin on the yanked version still resolves
        let req = Requirement::parse("demo==3.0.0").unwrap();
        let candidate = finder.find_requirement(&client, &req).await.unwrap();
        assert_eq!(candidate.dist.filename, "demo-3.0.0.tar.gz");
    }

    #[tokio::test]
    async fn missing_project_is_distribution_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/simple/nonexistent-package-xyz/");
                then.status(404);
            })
            .await;

        let finder = PackageFinder::new(&server.url("/simple/"), true).unwrap();
        let client = NetClient::with_defaults().unwrap();

        let req = Requirement::parse("nonexistent-package-xyz==0.0.1").unwrap();
        let err = finder.find_requirement(&client, &req).await.unwrap_err();

        assert!(err.is_distribution_not_found());
        assert!(err.to_string().contains("nonexistent-package-xyz==0.0.1"));
    }

    #[tokio::test]
    async fn unmatched_pin_is_distribution_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/simple/demo/");
                then.status(200).body(page_body());
            })
            .await;

        let finder = PackageFinder::new(&server.url("/simple/"), true).unwrap();
        let client = NetClient::with_defaults().unwrap();

        let req = Requirement::parse("demo==9.9.9").unwrap();
        let err = finder.find_requirement(&client, &req).await.unwrap_err();
        assert!(err.is_distribution_not_found());
    }

    #[tokio::test]
    async fn html_page_is_invalid() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/simple/demo/");
                then.status(200).body("<html><a href=\"x\">x</a></html>");
            })
            .await;

        let finder = PackageFinder::new(&server.url("/simple/"), true).unwrap();
        let client = NetClient::with_defaults().unwrap();

        let err = finder
            .find_candidates(&client, "demo")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Index(IndexError::InvalidPage { .. })));
    }
}
