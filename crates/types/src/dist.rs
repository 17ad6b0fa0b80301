//! Distribution filename parsing
//!
//! Index project pages and the storage layer both need to recover the
//! package name and version from a distribution filename, for sdists
//! (`name-1.2.3.tar.gz`) and wheels (`name-1.2.3-py3-none-any.whl`).

use crate::{normalize_name, Version};
use pyndex_errors::VersionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Distribution archive kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistKind {
    Sdist,
    Wheel,
}

impl fmt::Display for DistKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistKind::Sdist => write!(f, "sdist"),
            DistKind::Wheel => write!(f, "wheel"),
        }
    }
}

/// A distribution filename broken into its parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistFilename {
    pub filename: String,
    pub name: String,
    pub version: Version,
    pub kind: DistKind,
}

const SDIST_EXTENSIONS: &[&str] = &[".tar.gz", ".tgz", ".tar.bz2", ".tar.xz", ".zip"];

impl DistFilename {
    /// Parse a distribution filename
    ///
    /// # Errors
    ///
    /// Returns `VersionError::UnrecognizedFilename` if the extension is
    /// unknown or the stem cannot be split into a name and a version.
    pub fn parse(filename: &str) -> Result<Self, VersionError> {
        let unrecognized = || VersionError::UnrecognizedFilename {
            filename: filename.to_string(),
        };

        if let Some(stem) = filename.strip_suffix(".whl") {
            // name-version-[build-]pytag-abitag-platform
            let parts: Vec<&str> = stem.split('-').collect();
            if parts.len() < 5 {
                return Err(unrecognized());
            }
            let version = Version::parse(parts[1]).map_err(|_| unrecognized())?;
            return Ok(Self {
                filename: filename.to_string(),
                name: normalize_name(parts[0]),
                version,
                kind: DistKind::Wheel,
            });
        }

        let stem = SDIST_EXTENSIONS
            .iter()
            .find_map(|ext| filename.strip_suffix(ext))
            .ok_or_else(unrecognized)?;

        // Split at the last '-' that starts a version-looking tail. Project
        // names may themselves contain '-', so scan from the right.
        let mut split_pos = None;
        for (pos, _) in stem.match_indices('-') {
            let tail = &stem[pos + 1..];
            if tail.chars().next().is_some_and(|c| c.is_ascii_digit()) {
                split_pos = Some(pos);
            }
        }
        let pos = split_pos.ok_or_else(unrecognized)?;

        let version = Version::parse(&stem[pos + 1..]).map_err(|_| unrecognized())?;
        let name = &stem[..pos];
        if name.is_empty() {
            return Err(unrecognized());
        }

        Ok(Self {
            filename: filename.to_string(),
            name: normalize_name(name),
            version,
            kind: DistKind::Sdist,
        })
    }
}
