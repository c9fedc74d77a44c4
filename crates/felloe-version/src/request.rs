use crate::error::{Result, VersionError};
use crate::{Partial, Version};
use std::fmt;
use std::str::FromStr;

/// What a user asked for, before it is resolved to a concrete [`Version`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRequest {
    Exact(Version),
    Partial(Partial),
    Latest,
    /// Whatever the nearest pin file or the active version says.
    ProjectPinned,
}

impl VersionRequest {
    /// Parses `latest`, a full version or a version prefix.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("latest") {
            return Ok(Self::Latest);
        }
        if let Ok(version) = Version::parse(trimmed) {
            return Ok(Self::Exact(version));
        }
        Partial::parse(trimmed)
            .map(Self::Partial)
            .map_err(|_| VersionError::Request(s.to_string()))
    }
}

impl FromStr for VersionRequest {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl From<Version> for VersionRequest {
    fn from(v: Version) -> Self { Self::Exact(v) }
}

impl fmt::Display for VersionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(v) => v.fmt(f),
            Self::Partial(p) => p.fmt(f),
            Self::Latest => f.write_str("latest"),
            Self::ProjectPinned => f.write_str("pinned"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kinds() {
        assert_eq!(VersionRequest::parse("latest").unwrap(), VersionRequest::Latest);
        assert_eq!(VersionRequest::parse("LATEST").unwrap(), VersionRequest::Latest);
        assert_eq!(
            VersionRequest::parse("v3.14.0").unwrap(),
            VersionRequest::Exact(Version::new(3, 14, 0))
        );
        assert!(matches!(
            VersionRequest::parse("3.14").unwrap(),
            VersionRequest::Partial(Partial { major: 3, minor: Some(14) })
        ));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            VersionRequest::parse("stable"),
            Err(VersionError::Request(_))
        ));
    }
}
