//! CPU architecture detection.

use crate::error::{Error, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X86,
    X86_64,
    Arm,
    Arm64,
    Ppc64le,
    S390x,
}

impl Arch {
    pub fn current() -> Result<Self> { Self::from_rust(std::env::consts::ARCH) }

    /// Maps a `std::env::consts::ARCH` value.
    pub fn from_rust(arch: &str) -> Result<Self> {
        match arch {
            "x86" => Ok(Self::X86),
            "x86_64" => Ok(Self::X86_64),
            "arm" => Ok(Self::Arm),
            "aarch64" => Ok(Self::Arm64),
            "powerpc64" if cfg!(target_endian = "little") => Ok(Self::Ppc64le),
            "s390x" => Ok(Self::S390x),
            other => Err(Error::UnknownArch(other.to_string())),
        }
    }

    /// Name used in Go-style release artifacts (`amd64`, `arm64`, ...).
    pub fn go_name(self) -> &'static str {
        match self {
            Self::X86 => "386",
            Self::X86_64 => "amd64",
            Self::Arm => "arm",
            Self::Arm64 => "arm64",
            Self::Ppc64le => "ppc64le",
            Self::S390x => "s390x",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.go_name()) }
}
