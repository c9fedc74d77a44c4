use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};
use crate::options::ExtractOptions;

/// Maps an archive entry path to a path relative to the destination.
///
/// Returns `Ok(None)` when component stripping consumes the whole path; the
/// caller decides whether that is acceptable for the entry kind. Absolute
/// paths and `..` components that climb out of the destination are rejected.
pub fn sanitize_entry(entry: &Path, options: &ExtractOptions) -> Result<Option<PathBuf>> {
    let normalized = normalize(entry).ok_or_else(|| Error::ZipSlip {
        entry: entry.to_path_buf(),
    })?;
    let stripped: PathBuf = normalized
        .components()
        .skip(options.strip_components)
        .collect();
    if stripped.as_os_str().is_empty() {
        return Ok(None);
    }
    Ok(Some(stripped))
}

/// Validates a symlink target stored in an archive. `link` is the sanitized,
/// destination-relative location of the link itself.
pub fn sanitize_symlink_target(target: &Path, link: &Path) -> Result<PathBuf> {
    let escape = || Error::SymlinkEscape {
        link:   link.to_path_buf(),
        target: target.to_path_buf(),
    };
    if target.has_root() {
        return Err(escape());
    }
    let resolved = link.parent().unwrap_or(Path::new("")).join(target);
    normalize(&resolved).ok_or_else(escape)?;
    Ok(target.to_path_buf())
}

/// Lexically resolves `.` and `..`. `None` if the path is absolute or climbs
/// above its starting point.
fn normalize(path: &Path) -> Option<PathBuf> {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => result.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !result.pop() {
                    return None;
                }
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(result)
}
