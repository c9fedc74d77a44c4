use crate::error::{Result, VersionError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A released version of the managed binary.
///
/// Release tags carry a `v` prefix (`v3.14.0`); the canonical form used for
/// directory names, the index and output does not.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version(semver::Version);

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(semver::Version::new(major, minor, patch))
    }

    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let bare = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);
        semver::Version::parse(bare)
            .map(Self)
            .map_err(|source| VersionError::Invalid {
                input: input.to_string(),
                source,
            })
    }

    /// The release tag, e.g. `v3.14.0`.
    pub fn tag(&self) -> String { format!("v{}", self.0) }

    pub fn major(&self) -> u64 { self.0.major }

    pub fn minor(&self) -> u64 { self.0.minor }

    pub fn patch(&self) -> u64 { self.0.patch }

    pub fn is_prerelease(&self) -> bool { !self.0.pre.is_empty() }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

impl From<semver::Version> for Version {
    fn from(v: semver::Version) -> Self { Self(v) }
}

impl TryFrom<String> for Version {
    type Error = VersionError;

    fn try_from(s: String) -> Result<Self> { Self::parse(&s) }
}

impl From<Version> for String {
    fn from(v: Version) -> Self { v.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_and_without_prefix() {
        let plain = Version::parse("3.14.0").unwrap();
        let tagged = Version::parse("v3.14.0").unwrap();
        assert_eq!(plain, tagged);
        assert_eq!(tagged.to_string(), "3.14.0");
        assert_eq!(tagged.tag(), "v3.14.0");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(Version::parse("  v3.9.4\n").unwrap(), Version::new(3, 9, 4));
    }

    #[test]
    fn test_prerelease() {
        let rc = Version::parse("v3.15.0-rc.1").unwrap();
        assert!(rc.is_prerelease());
        assert!(rc < Version::new(3, 15, 0));
        assert!(!Version::new(3, 15, 0).is_prerelease());
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["", "v", "3.14", "latest", "v3.14.0.1", "vv3.1.0"] {
            assert!(Version::parse(input).is_err(), "{input} should not parse");
        }
    }

    #[test]
    fn test_ordering_is_semantic() {
        let mut versions: Vec<Version> = ["3.9.0", "3.10.0", "2.17.0", "3.10.1"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        versions.sort();
        let sorted: Vec<String> = versions.iter().map(ToString::to_string).collect();
        assert_eq!(sorted, ["2.17.0", "3.9.0", "3.10.0", "3.10.1"]);
    }

    #[test]
    fn test_serde_as_string() {
        let v = Version::new(3, 14, 0);
        assert_eq!(serde_json::to_string(&v).unwrap(), "\"3.14.0\"");
        let back: Version = serde_json::from_str("\"v3.14.0\"").unwrap();
        assert_eq!(back, v);
        assert!(serde_json::from_str::<Version>("\"nope\"").is_err());
    }
}
