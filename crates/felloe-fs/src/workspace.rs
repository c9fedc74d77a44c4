use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// A staging directory that becomes `destination` on [`Workspace::commit`].
///
/// Dropping an uncommitted workspace removes the staging directory, so an
/// early return anywhere between creation and commit leaves nothing behind.
pub struct Workspace {
    staging_path:     PathBuf,
    destination_path: PathBuf,
    committed:        bool,
}

impl Workspace {
    pub fn new(staging_dir: impl AsRef<Path>, destination: impl AsRef<Path>) -> Result<Self> {
        let staging_path = staging_dir.as_ref().to_path_buf();
        let destination_path = destination.as_ref().to_path_buf();

        std::fs::create_dir_all(&staging_path).map_err(|source| Error::Write {
            path: staging_path.clone(),
            source,
        })?;

        Ok(Self {
            staging_path,
            destination_path,
            committed: false,
        })
    }

    pub fn path(&self) -> &Path { &self.staging_path }

    pub fn commit(mut self) -> Result<PathBuf> {
        crate::primitives::replace_dir(&self.staging_path, &self.destination_path)?;
        self.committed = true;
        tracing::debug!(dest = %self.destination_path.display(), "workspace committed");
        Ok(self.destination_path.clone())
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if !self.committed {
            let _ = std::fs::remove_dir_all(&self.staging_path);
        }
    }
}
