//! Simple-index project page models (PEP 691 JSON API)

use serde::Deserialize;
use std::collections::HashMap;

/// A project page as served by the simple index JSON API
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectPage {
    pub name: String,
    #[serde(default)]
    pub files: Vec<ProjectFile>,
}

/// One downloadable file on a project page
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectFile {
    pub filename: String,
    pub url: String,
    #[serde(default)]
    pub hashes: HashMap<String, String>,
    #[serde(default)]
    pub yanked: Yanked,
}

impl ProjectFile {
    /// Index-published sha256 digest, when present
    #[must_use]
    pub fn sha256(&self) -> Option<&str> {
        self.hashes.get("sha256").map(String::as_str)
    }
}

/// Yanked marker: `false`, `true`, or a reason string (PEP 592)
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Yanked {
    Flag(bool),
    Reason(String),
}

impl Default for Yanked {
    fn default() -> Self {
        Yanked::Flag(false)
    }
}

impl Yanked {
    #[must_use]
    pub fn is_yanked(&self) -> bool {
        matches!(self, Yanked::Flag(true) | Yanked::Reason(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_project_page() {
        let json = r#"{
            "meta": {"api-version": "1.0"},
            "name": "requests",
            "files": [
                {
                    "filename": "requests-2.0.0.tar.gz",
                    "url": "https://files.example/requests-2.0.0.tar.gz",
                    "hashes": {"sha256": "abc123"}
                },
                {
                    "filename": "requests-2.0.1.tar.gz",
                    "url": "../../pkg/requests-2.0.1.tar.gz",
                    "hashes": {},
                    "yanked": "broken metadata"
                }
            ]
        }"#;

        let page: ProjectPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.name, "requests");
        assert_eq!(page.files.len(), 2);
        assert_eq!(page.files[0].sha256(), Some("abc123"));
        assert!(!page.files[0].yanked.is_yanked());
        assert!(page.files[1].yanked.is_yanked());
        assert_eq!(page.files[1].sha256(), None);
    }
}
