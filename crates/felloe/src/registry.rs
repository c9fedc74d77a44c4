//! The set of installed helm versions, persisted in `<root>/index.json`.

use chrono::{DateTime, Utc};
use felloe_fs::Transaction;
use felloe_version::Version;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::activation;
use crate::error::{Error, Result};
use crate::layout::Layout;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledVersion {
    pub version:      Version,
    /// The helm binary.
    pub path:         PathBuf,
    pub installed_at: DateTime<Utc>,
    /// Hex SHA-256 of the archive the version was extracted from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256:       Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Index {
    #[serde(default)]
    versions: Vec<InstalledVersion>,
}

impl Index {
    fn decode(bytes: Option<Vec<u8>>, path: &Path) -> Result<Self> {
        let Some(bytes) = bytes else {
            return Ok(Self::default());
        };
        let mut index: Self = serde_json::from_slice(&bytes).map_err(|source| Error::CorruptIndex {
            path: path.to_path_buf(),
            source,
        })?;
        index.sort();
        Ok(index)
    }

    fn sort(&mut self) {
        self.versions.sort_by(|a, b| b.version.cmp(&a.version));
        self.versions.dedup_by(|a, b| a.version == b.version);
    }

    fn position(&self, version: &Version) -> Option<usize> {
        self.versions.iter().position(|v| &v.version == version)
    }
}

/// Installed versions, newest first.
///
/// Reads use the snapshot taken at [`Registry::open`] (or the last mutation).
/// Mutations re-read the index under `<root>/index.lock`, apply the change and
/// atomically replace the file before the lock is released.
pub struct Registry {
    layout: Layout,
    index:  Index,
}

impl Registry {
    pub fn open(layout: &Layout) -> Result<Self> {
        let path = layout.index_path();
        let index = Index::decode(felloe_fs::atomic_read(&path)?, &path)?;
        tracing::debug!(path = %path.display(), installed = index.versions.len(), "registry opened");
        Ok(Self {
            layout: layout.clone(),
            index,
        })
    }

    pub fn layout(&self) -> &Layout { &self.layout }

    pub fn list(&self) -> Vec<InstalledVersion> { self.index.versions.clone() }

    pub fn versions(&self) -> impl Iterator<Item = &Version> { self.index.versions.iter().map(|v| &v.version) }

    pub fn is_empty(&self) -> bool { self.index.versions.is_empty() }

    pub fn exists(&self, version: &Version) -> bool { self.index.position(version).is_some() }

    pub fn get(&self, version: &Version) -> Option<&InstalledVersion> {
        self.index.position(version).map(|i| &self.index.versions[i])
    }

    /// Inserts `installed`, replacing any record for the same version.
    pub fn record_install(&mut self, installed: InstalledVersion) -> Result<()> {
        let version = installed.version.clone();
        self.mutate(|index| {
            match index.position(&installed.version) {
                Some(i) => index.versions[i] = installed,
                None => index.versions.push(installed),
            }
            Ok(())
        })?;
        tracing::info!(%version, "recorded install");
        Ok(())
    }

    /// Forgets `version` and deletes its directory.
    ///
    /// Fails with [`Error::NotInstalled`] or [`Error::InUse`] without touching
    /// the index or the disk. A broken `current` link names no active version,
    /// so it never blocks a removal. The directory is deleted before the lock
    /// is released.
    pub fn remove(&mut self, version: &Version) -> Result<InstalledVersion> {
        let layout = self.layout.clone();
        let removed = self.mutate(|index| {
            let i = index
                .position(version)
                .ok_or_else(|| Error::NotInstalled(version.clone()))?;
            match activation::read_current(&layout) {
                Ok(Some(active)) if active == *version => return Err(Error::InUse(version.clone())),
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "ignoring broken active link"),
            }

            let dir = layout.version_dir(version);
            match std::fs::remove_dir_all(&dir) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::warn!(dir = %dir.display(), "version directory already gone");
                }
                Err(e) => return Err(Error::io(format!("failed to delete {}", dir.display()), e)),
            }
            Ok(index.versions.remove(i))
        })?;
        tracing::info!(%version, "removed");
        Ok(removed)
    }

    /// Runs `f` over the index as it is on disk while holding the index lock.
    pub(crate) fn locked<T>(&self, f: impl FnOnce(&[InstalledVersion]) -> Result<T>) -> Result<T> {
        let tx = self.lock()?;
        let index = Index::decode(tx.read()?, tx.path())?;
        f(&index.versions)
    }

    fn lock(&self) -> Result<Transaction> {
        let root = self.layout.root();
        std::fs::create_dir_all(root).map_err(|e| Error::io(format!("failed to create {}", root.display()), e))?;
        Ok(Transaction::open_locked(self.layout.index_path())?)
    }

    fn mutate<T>(&mut self, apply: impl FnOnce(&mut Index) -> Result<T>) -> Result<T> {
        let tx = self.lock()?;
        let mut index = Index::decode(tx.read()?, tx.path())?;
        let out = apply(&mut index)?;
        index.sort();

        let bytes = serde_json::to_vec_pretty(&index).map_err(|source| Error::CorruptIndex {
            path: tx.path().to_path_buf(),
            source,
        })?;
        tx.write(&bytes)?;
        self.index = index;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(layout: &Layout, version: Version) -> InstalledVersion {
        InstalledVersion {
            path: layout.binary_path(&version),
            version,
            installed_at: Utc::now(),
            sha256: None,
        }
    }

    #[test]
    fn missing_index_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let registry = Registry::open(&Layout::new(dir.path())).unwrap();
        assert!(registry.is_empty());
        assert!(registry.list().is_empty());
    }

    #[test]
    fn corrupt_index_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let layout = Layout::new(dir.path());
        std::fs::write(layout.index_path(), "{ not json").unwrap();
        assert!(matches!(Registry::open(&layout), Err(Error::CorruptIndex { .. })));
    }

    #[test]
    fn list_is_sorted_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let layout = Layout::new(dir.path());
        let mut registry = Registry::open(&layout).unwrap();
        for v in [Version::new(3, 12, 0), Version::new(3, 14, 1), Version::new(3, 9, 4)] {
            registry.record_install(record(&layout, v)).unwrap();
        }
        let listed: Vec<String> = registry.versions().map(ToString::to_string).collect();
        assert_eq!(listed, ["3.14.1", "3.12.0", "3.9.4"]);
    }

    #[test]
    fn record_install_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let layout = Layout::new(dir.path());
        let mut registry = Registry::open(&layout).unwrap();
        let v = Version::new(3, 14, 0);
        registry.record_install(record(&layout, v.clone())).unwrap();
        let mut again = record(&layout, v.clone());
        again.sha256 = Some("ab".repeat(32));
        registry.record_install(again).unwrap();

        assert_eq!(registry.list().len(), 1);
        assert_eq!(registry.get(&v).unwrap().sha256.as_deref(), Some("ab".repeat(32).as_str()));
    }

    #[test]
    fn mutations_persist() {
        let dir = tempfile::tempdir().unwrap();
        let layout = Layout::new(dir.path());
        let v = Version::new(3, 13, 3);
        Registry::open(&layout).unwrap().record_install(record(&layout, v.clone())).unwrap();

        let reopened = Registry::open(&layout).unwrap();
        assert!(reopened.exists(&v));
    }

    #[test]
    fn remove_unknown_is_not_installed() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = Registry::open(&Layout::new(dir.path())).unwrap();
        let err = registry.remove(&Version::new(1, 0, 0)).unwrap_err();
        assert!(matches!(err, Error::NotInstalled(_)));
    }

    #[test]
    fn mutation_sees_other_writers() {
        let dir = tempfile::tempdir().unwrap();
        let layout = Layout::new(dir.path());
        let mut first = Registry::open(&layout).unwrap();
        let mut second = Registry::open(&layout).unwrap();

        first.record_install(record(&layout, Version::new(3, 1, 0))).unwrap();
        second.record_install(record(&layout, Version::new(3, 2, 0))).unwrap();

        assert_eq!(second.list().len(), 2);
        assert_eq!(Registry::open(&layout).unwrap().list().len(), 2);
    }
}
