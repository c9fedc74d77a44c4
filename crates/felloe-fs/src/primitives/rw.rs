use crate::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Default)]
pub struct Options {
    pub mode: Option<u32>,
    pub sync: bool,
}

impl Options {
    pub fn new() -> Self { Self::default() }

    /// Unix permission bits applied to the file before it is moved into place.
    /// Ignored on other platforms.
    pub fn mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }
}

/// Sibling path used to stage a write to `path`. Unique per call so that
/// concurrent writers never share a temporary file.
pub(crate) fn temp_sibling(path: &Path) -> Result<PathBuf> {
    let parent = path.parent().ok_or_else(|| Error::NoParent {
        path: path.to_path_buf(),
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(parent.join(format!(".{name}.{}.tmp", uuid::Uuid::new_v4().simple())))
}

/// Writes `content` to `path` so that readers observe either the old file or
/// the complete new one.
pub fn atomic_write(path: impl AsRef<Path>, content: &[u8], options: Options) -> Result<()> {
    let path = path.as_ref();
    let tmp_path = temp_sibling(path)?;

    let write = |tmp: &Path| -> std::io::Result<()> {
        let mut file = fs::File::create(tmp)?;
        file.write_all(content)?;
        if options.sync {
            file.sync_all()?;
        }
        #[cfg(unix)]
        if let Some(mode) = options.mode {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(tmp, fs::Permissions::from_mode(mode))?;
        }
        Ok(())
    };

    if let Err(source) = write(&tmp_path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(Error::Write {
            path: tmp_path,
            source,
        });
    }

    fs::rename(&tmp_path, path).map_err(|source| {
        let _ = fs::remove_file(&tmp_path);
        Error::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Reads `path`, mapping a missing file to `None`.
pub fn atomic_read(path: impl AsRef<Path>) -> Result<Option<Vec<u8>>> {
    let path = path.as_ref();
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(Error::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
