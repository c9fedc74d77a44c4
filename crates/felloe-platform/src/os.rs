//! Operating system detection.

use crate::error::{Error, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Linux,
    MacOS,
    Windows,
}

impl Os {
    pub fn current() -> Result<Self> { Self::from_rust(std::env::consts::OS) }

    /// Maps a `std::env::consts::OS` value.
    pub fn from_rust(os: &str) -> Result<Self> {
        match os {
            "linux" => Ok(Self::Linux),
            "macos" => Ok(Self::MacOS),
            "windows" => Ok(Self::Windows),
            other => Err(Error::UnknownOS(other.to_string())),
        }
    }

    /// Name used in Go-style release artifacts (`linux`, `darwin`, `windows`).
    pub fn go_name(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::MacOS => "darwin",
            Self::Windows => "windows",
        }
    }

    /// `name` with the platform's executable suffix.
    pub fn exe_name(self, name: &str) -> String {
        match self {
            Self::Windows => format!("{name}.exe"),
            _ => name.to_string(),
        }
    }

    /// Extension of release archives published for this OS.
    pub fn archive_ext(self) -> &'static str {
        match self {
            Self::Windows => "zip",
            _ => "tar.gz",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.go_name()) }
}
