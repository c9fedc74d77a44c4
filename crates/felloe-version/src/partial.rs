//! Version prefixes such as `3` or `3.14`.

use crate::Version;
use crate::error::{Result, VersionError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

static PARTIAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[vV]?(?<major>[0-9]+)(?:\.(?<minor>[0-9]+))?(?:\.[xX*])?$")
        .expect("partial version pattern is valid")
});

/// A version prefix. Matches every [`Version`] sharing its components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Partial {
    pub major: u64,
    pub minor: Option<u64>,
}

impl Partial {
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let caps = PARTIAL_REGEX
            .captures(trimmed)
            .ok_or_else(|| VersionError::Partial(s.to_string()))?;

        let major = caps["major"]
            .parse()
            .map_err(|_| VersionError::Partial(s.to_string()))?;
        let minor = match caps.name("minor") {
            Some(m) => Some(
                m.as_str()
                    .parse()
                    .map_err(|_| VersionError::Partial(s.to_string()))?,
            ),
            None => None,
        };

        Ok(Partial { major, minor })
    }

    pub fn matches(&self, version: &Version) -> bool {
        self.major == version.major() && self.minor.is_none_or(|m| m == version.minor())
    }
}

impl FromStr for Partial {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self> { Partial::parse(s) }
}

impl fmt::Display for Partial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major)?;
        if let Some(minor) = self.minor {
            write!(f, ".{minor}")?;
        }
        Ok(())
    }
}
