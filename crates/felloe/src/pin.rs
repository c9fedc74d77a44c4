//! Project pin files: a `.helm-version` naming the helm a directory tree wants.

use std::path::{Path, PathBuf};

use felloe_fs::WriteOptions;
use felloe_version::{VersionError, VersionRequest};

use crate::error::{Error, Result};

/// Nearest `file_name` in `start` or any of its ancestors.
pub fn find(start: &Path, file_name: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(file_name))
        .find(|candidate| candidate.is_file())
}

/// The request stored in a pin file. Blank lines and `#` comments are skipped;
/// the first remaining line is the version.
pub fn read(path: &Path) -> Result<VersionRequest> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("failed to read {}", path.display()), e))?;
    parse(&contents).map_err(|source| Error::InvalidPin {
        path: path.to_path_buf(),
        source,
    })
}

fn parse(contents: &str) -> felloe_version::Result<VersionRequest> {
    let line = contents
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .unwrap_or_default();
    VersionRequest::parse(line)
}

/// Writes `request` to `dir/file_name`, replacing any previous pin.
pub fn write(dir: &Path, file_name: &str, request: &VersionRequest) -> Result<PathBuf> {
    if matches!(request, VersionRequest::ProjectPinned) {
        return Err(VersionError::Request(request.to_string()).into());
    }
    let path = dir.join(file_name);
    felloe_fs::atomic_write(&path, format!("{request}\n").as_bytes(), WriteOptions::default())?;
    tracing::info!(path = %path.display(), %request, "pinned");
    Ok(path)
}
