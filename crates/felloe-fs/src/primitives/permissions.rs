#[cfg(unix)]
use crate::Error;
use crate::Result;
use std::path::Path;

/// Adds execute bits for everyone who can read the file. No-op off unix.
pub fn make_executable(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let err = |source| Error::Write {
            path: path.to_path_buf(),
            source,
        };
        let mut perms = std::fs::metadata(path).map_err(err)?.permissions();
        let mode = perms.mode();
        perms.set_mode(mode | ((mode & 0o444) >> 2));
        std::fs::set_permissions(path, perms).map_err(err)?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}
