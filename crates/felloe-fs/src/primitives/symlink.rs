use crate::primitives::rw::temp_sibling;
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Points `link` at `target`, replacing whatever link was there.
///
/// The new link is created at a unique sibling path and renamed over `link`,
/// so on one filesystem a reader sees either the previous target or the new
/// one. `target` is stored verbatim and may be relative to `link`'s parent.
pub fn atomic_symlink(target: impl AsRef<Path>, link: impl AsRef<Path>) -> Result<()> {
    let target = target.as_ref();
    let link = link.as_ref();
    let tmp_link = temp_sibling(link)?;

    let err = |source| Error::Symlink {
        link: link.to_path_buf(),
        target: target.to_path_buf(),
        source,
    };

    create_link(target, &tmp_link).map_err(err)?;

    if let Err(source) = rename_link(&tmp_link, link) {
        let _ = remove_link(&tmp_link);
        return Err(err(source));
    }
    Ok(())
}

/// Reads a link target, mapping a missing link to `None`.
pub fn read_link(link: impl AsRef<Path>) -> Result<Option<PathBuf>> {
    let link = link.as_ref();
    match fs::read_link(link) {
        Ok(target) => Ok(Some(target)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(Error::Read {
            path: link.to_path_buf(),
            source,
        }),
    }
}

#[cfg(unix)]
fn create_link(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_link(target: &Path, link: &Path) -> std::io::Result<()> {
    let resolved = link.parent().map(|p| p.join(target)).unwrap_or_else(|| target.to_path_buf());
    if resolved.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}

#[cfg(unix)]
fn rename_link(from: &Path, to: &Path) -> std::io::Result<()> { fs::rename(from, to) }

// Directory links cannot be renamed over on Windows, so the swap there is
// remove-then-rename and briefly leaves no link.
#[cfg(windows)]
fn rename_link(from: &Path, to: &Path) -> std::io::Result<()> {
    if fs::symlink_metadata(to).is_ok() {
        remove_link(to)?;
    }
    fs::rename(from, to)
}

fn remove_link(link: &Path) -> std::io::Result<()> {
    match fs::remove_file(link) {
        Ok(()) => Ok(()),
        #[cfg(windows)]
        Err(_) => fs::remove_dir(link),
        #[cfg(not(windows))]
        Err(e) => Err(e),
    }
}
