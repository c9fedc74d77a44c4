use std::path::{Path, PathBuf};

use felloe_version::Version;

use crate::error::{Error, Result};

#[cfg(windows)]
pub const HELM_BINARY: &str = "helm.exe";
#[cfg(not(windows))]
pub const HELM_BINARY: &str = "helm";

/// Server-side companion shipped in helm 2 archives.
#[cfg(windows)]
pub const TILLER_BINARY: &str = "tiller.exe";
#[cfg(not(windows))]
pub const TILLER_BINARY: &str = "tiller";

pub const ROOT_ENV: &str = "FELLOE_ROOT";

/// Where everything felloe owns lives on disk.
///
/// ```text
/// <root>/
/// ├── config.toml
/// ├── index.json
/// ├── index.lock
/// ├── current -> versions/3.14.0
/// ├── bin/helm -> ../current/helm
/// ├── bin/tiller -> ../current/tiller   (helm 2 only)
/// ├── versions/3.14.0/helm
/// └── tmp/
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

    /// `explicit` (from `--root`), then `FELLOE_ROOT`, then `<user data dir>/felloe`.
    pub fn discover(explicit: Option<PathBuf>) -> Result<Self> {
        if let Some(root) = explicit {
            return Ok(Self::new(root));
        }
        if let Some(root) = std::env::var_os(ROOT_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::new(root));
        }
        felloe_platform::dir::user_data()
            .map(|dir| Self::new(dir.join("felloe")))
            .ok_or(Error::Platform(felloe_platform::Error::NoDataDir))
    }

    pub fn root(&self) -> &Path { &self.root }

    pub fn config_path(&self) -> PathBuf { self.root.join("config.toml") }

    pub fn index_path(&self) -> PathBuf { self.root.join("index.json") }

    pub fn current_link(&self) -> PathBuf { self.root.join("current") }

    pub fn bin_dir(&self) -> PathBuf { self.root.join("bin") }

    /// The stable `helm` entry point that belongs on `PATH`.
    pub fn shim_path(&self) -> PathBuf { self.bin_dir().join(HELM_BINARY) }

    pub fn tiller_shim_path(&self) -> PathBuf { self.bin_dir().join(TILLER_BINARY) }

    pub fn versions_dir(&self) -> PathBuf { self.root.join("versions") }

    pub fn version_dir(&self, version: &Version) -> PathBuf { self.versions_dir().join(version.to_string()) }

    pub fn binary_path(&self, version: &Version) -> PathBuf { self.version_dir(version).join(HELM_BINARY) }

    pub fn tiller_path(&self, version: &Version) -> PathBuf { self.version_dir(version).join(TILLER_BINARY) }

    pub fn tmp_dir(&self) -> PathBuf { self.root.join("tmp") }

    pub fn ensure(&self) -> Result<()> {
        for dir in [self.root.clone(), self.versions_dir(), self.bin_dir(), self.tmp_dir()] {
            std::fs::create_dir_all(&dir)
                .map_err(|e| Error::io(format!("failed to create {}", dir.display()), e))?;
        }
        Ok(())
    }
}
