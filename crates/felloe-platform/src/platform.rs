use crate::arch::Arch;
use crate::error::Result;
use crate::os::Os;
use std::fmt;

/// An OS and architecture pair, rendered `{os}-{arch}` the way Go release
/// artifacts name their targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub os:   Os,
    pub arch: Arch,
}

impl Platform {
    pub fn new(os: Os, arch: Arch) -> Self { Self { os, arch } }

    pub fn current() -> Result<Self> {
        Ok(Self {
            os:   Os::current()?,
            arch: Arch::current()?,
        })
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os.go_name(), self.arch.go_name())
    }
}
