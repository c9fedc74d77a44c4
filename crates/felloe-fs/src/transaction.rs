use crate::primitives::rw::{Options, atomic_read, atomic_write};
use crate::{Error, Result};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Exclusive read-modify-write access to a small data file.
///
/// The lock is taken on a sibling `.lock` file rather than the data file
/// itself, because [`Transaction::write`] replaces the data file by rename
/// and a lock on the old inode would not exclude the next writer.
pub struct Transaction {
    lock:      File,
    lock_path: PathBuf,
    path:      PathBuf,
}

impl Transaction {
    /// Blocks until the lock for `path` is held.
    pub fn open_locked(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let lock_path = path.with_extension("lock");
        let err = |source| Error::Lock {
            path: lock_path.clone(),
            source,
        };

        let lock = File::options()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(err)?;
        fs4::fs_std::FileExt::lock_exclusive(&lock).map_err(err)?;
        tracing::trace!(lock = %lock_path.display(), "lock acquired");

        Ok(Self {
            lock,
            lock_path,
            path,
        })
    }

    pub fn path(&self) -> &Path { &self.path }

    /// Current contents, `None` if the file does not exist yet.
    pub fn read(&self) -> Result<Option<Vec<u8>>> { atomic_read(&self.path) }

    pub fn write(&self, data: &[u8]) -> Result<()> {
        atomic_write(&self.path, data, Options::new().sync(true))
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        let _ = fs4::fs_std::FileExt::unlock(&self.lock);
        tracing::trace!(lock = %self.lock_path.display(), "lock released");
    }
}
