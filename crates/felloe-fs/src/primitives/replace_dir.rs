use crate::{Error, Result};
use std::path::Path;

/// Moves `src` to `dest`. Both must live on the same filesystem. An existing
/// `dest` directory is replaced.
pub fn replace_dir(src: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<()> {
    let src = src.as_ref();
    let dest = dest.as_ref();
    let err = |source| Error::ReplaceDir {
        from: src.to_path_buf(),
        to: dest.to_path_buf(),
        source,
    };

    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent).map_err(err)?;
    }
    if dest.is_dir() {
        tracing::debug!(dest = %dest.display(), "replacing existing directory");
        std::fs::remove_dir_all(dest).map_err(err)?;
    }

    #[cfg(windows)]
    {
        // Freshly extracted files can stay locked by scanners for a moment.
        let mut attempt = 0u32;
        loop {
            match std::fs::rename(src, dest) {
                Ok(()) => return Ok(()),
                Err(e) if attempt < 5 => {
                    tracing::debug!(error = %e, attempt, "rename failed, retrying");
                    std::thread::sleep(std::time::Duration::from_millis(100) * (attempt + 1));
                    attempt += 1;
                }
                Err(e) => return Err(err(e)),
            }
        }
    }

    #[cfg(not(windows))]
    {
        std::fs::rename(src, dest).map_err(err)
    }
}
