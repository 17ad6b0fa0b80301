//! Package names and requirements

use crate::Version;
use pyndex_errors::VersionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalize a project name per the simple-index rules (PEP 503):
/// lowercase, with runs of `-`, `_`, and `.` collapsed to a single `-`.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_sep = false;
    for c in name.chars() {
        if matches!(c, '-' | '_' | '.') {
            if !last_was_sep {
                out.push('-');
            }
            last_was_sep = true;
        } else {
            out.push(c.to_ascii_lowercase());
            last_was_sep = false;
        }
    }
    out
}

/// A single requirement as supplied on the command line: a package name
/// with an optional exact version pin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub name: String,
    pub pin: Option<Version>,
}

impl Requirement {
    /// Parse a requirement string (e.g. `requests` or `requests==2.0.0`)
    ///
    /// Only exact `==` pins are supported; any other constraint operator
    /// is rejected.
    ///
    /// # Errors
    ///
    /// Returns `VersionError::InvalidRequirement` for an empty or
    /// malformed name, `UnsupportedConstraint` for non-`==` operators,
    /// and `InvalidVersion` if the pinned version does not parse.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let s = input.trim();

        // Find the first constraint operator
        let operators = ["==", ">=", "<=", "!=", "~=", ">", "<"];
        let mut split: Option<(usize, &str)> = None;

        for op in &operators {
            if let Some(pos) = s.find(op) {
                match split {
                    None => split = Some((pos, op)),
                    Some((sp, _)) if pos < sp => split = Some((pos, op)),
                    Some(_) => {}
                }
            }
        }

        let (name, pin) = match split {
            Some((pos, "==")) => {
                let version = Version::parse(s[pos + 2..].trim())?;
                (s[..pos].trim(), Some(version))
            }
            Some((_, op)) => {
                return Err(VersionError::UnsupportedConstraint {
                    operator: (*op).to_string(),
                    input: input.to_string(),
                });
            }
            None => (s, None),
        };

        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(VersionError::InvalidRequirement {
                input: input.to_string(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            pin,
        })
    }

    /// Normalized project name for index lookups
    #[must_use]
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }

    /// True when `version` satisfies this requirement
    #[must_use]
    pub fn matches(&self, version: &Version) -> bool {
        match &self.pin {
            Some(pin) => pin == version,
            None => true,
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pin {
            Some(pin) => write!(f, "{}=={pin}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl std::str::FromStr for Requirement {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
