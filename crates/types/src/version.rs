//! Lenient package version parsing and ordering
//!
//! Index versions are PEP 440-ish, not semver. This module implements the
//! subset the finder needs: a dotted numeric release, an optional
//! dev/pre/post tag, and a total order that pads releases with zeros so
//! `2.0` and `2.0.0` compare equal.

use pyndex_errors::VersionError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Release tag ordering: dev < alpha < beta < rc < final < post
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
enum ReleaseTag {
    Dev(u64),
    Alpha(u64),
    Beta(u64),
    Rc(u64),
    Final,
    Post(u64),
}

/// A parsed package version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Version {
    release: Vec<u64>,
    tag: ReleaseTag,
    raw: String,
}

impl Version {
    /// Parse a version string such as `2.0.0`, `1.0a1`, or `1.4.post2`
    ///
    /// # Errors
    ///
    /// Returns `VersionError::InvalidVersion` if the string does not start
    /// with a dotted numeric release or carries an unrecognized tag.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let raw = input.trim().to_string();
        let lower = raw.to_lowercase();
        let lower = lower.strip_prefix('v').unwrap_or(&lower);

        let invalid = || VersionError::InvalidVersion {
            input: input.to_string(),
        };

        // Leading dotted numeric release
        let release_len = lower
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(lower.len());
        let release_str = lower[..release_len].trim_end_matches('.');
        if release_str.is_empty() {
            return Err(invalid());
        }

        let mut release = Vec::new();
        for part in release_str.split('.') {
            release.push(part.parse::<u64>().map_err(|_| invalid())?);
        }

        let tag = Self::parse_tag(lower[release_len..].trim_start_matches(['.', '-', '_']))
            .ok_or_else(invalid)?;

        Ok(Self { release, tag, raw })
    }

    fn parse_tag(rest: &str) -> Option<ReleaseTag> {
        if rest.is_empty() {
            return Some(ReleaseTag::Final);
        }

        let prefixes: [(&str, fn(u64) -> ReleaseTag); 10] = [
            ("dev", ReleaseTag::Dev),
            ("alpha", ReleaseTag::Alpha),
            ("beta", ReleaseTag::Beta),
            ("rc", ReleaseTag::Rc),
            ("preview", ReleaseTag::Rc),
            ("pre", ReleaseTag::Rc),
            ("post", ReleaseTag::Post),
            ("rev", ReleaseTag::Post),
            ("a", ReleaseTag::Alpha),
            ("b", ReleaseTag::Beta),
        ];

        for (prefix, make) in prefixes {
            if let Some(num) = rest.strip_prefix(prefix) {
                let num = num.trim_start_matches(['.', '-', '_']);
                let n = if num.is_empty() {
                    0
                } else {
                    num.parse::<u64>().ok()?
                };
                return Some(make(n));
            }
        }

        None
    }

    /// Release segment at `idx`, zero-padded past the end
    fn segment(&self, idx: usize) -> u64 {
        self.release.get(idx).copied().unwrap_or(0)
    }

    /// The version string as supplied by the index
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.release.len().max(other.release.len());
        for idx in 0..len {
            match self.segment(idx).cmp(&other.segment(idx)) {
                Ordering::Equal => {}
                other => return other,
            }
        }
        self.tag.cmp(&other.tag)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl std::str::FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn parses_plain_releases() {
        assert_eq!(v("2.0.0").as_str(), "2.0.0");
        assert_eq!(v("1").as_str(), "1");
        assert_eq!(v("v1.2").as_str(), "v1.2");
    }

    #[test]
    fn rejects_garbage() {
        assert!(Version::parse("").is_err());
        assert!(Version::parse("abc").is_err());
        assert!(Version::parse("1.0.whatever").is_err());
    }

    #[test]
    fn zero_padding_makes_equal() {
        assert_eq!(v("2.0"), v("2.0.0"));
        assert_ne!(v("2.0"), v("2.0.1"));
    }

    #[test]
    fn ordering_across_releases() {
        assert!(v("2.0.0") > v("1.9.9"));
        assert!(v("1.10") > v("1.9"));
        assert!(v("0.9") < v("0.10.1"));
    }

    #[test]
    fn tag_ordering() {
        assert!(v("1.0.dev1") < v("1.0a1"));
        assert!(v("1.0a1") < v("1.0b1"));
        assert!(v("1.0b2") < v("1.0rc1"));
        assert!(v("1.0rc1") < v("1.0"));
        assert!(v("1.0") < v("1.0.post1"));
        assert!(v("1.0rc1") < v("1.0rc2"));
    }
}
