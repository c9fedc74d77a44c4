use std::io::Read;
use std::path::Path;

use tar::EntryType;

use super::{create_dir, write_file};
use crate::error::{Error, Result};
use crate::format::ArchiveFormat;
use crate::options::ExtractOptions;
use crate::report::{ArchiveReport, Entry, EntryKind};
use crate::sanitize::{sanitize_entry, sanitize_symlink_target};

pub(super) fn extract<R: Read>(
    reader: R,
    format: ArchiveFormat,
    destination: &Path,
    options: &ExtractOptions,
) -> Result<ArchiveReport> {
    let mut archive = tar::Archive::new(reader);
    let mut report = ArchiveReport::new(format);

    for entry in archive.entries()? {
        let mut entry = entry?;
        let original = entry.path()?.into_owned();
        let entry_type = entry.header().entry_type();

        let Some(relative) = sanitize_entry(&original, options)? else {
            if entry_type.is_dir() {
                continue;
            }
            return Err(Error::NoComponentsRemaining {
                original,
                count: options.strip_components,
            });
        };
        let target = destination.join(&relative);

        match entry_type {
            EntryType::Directory => {
                create_dir(&target)?;
                report.push(Entry {
                    path: relative,
                    size: 0,
                    mode: entry.header().mode().ok(),
                    kind: EntryKind::Directory,
                });
            }
            EntryType::Regular | EntryType::Continuous => {
                let mode = entry.header().mode().ok();
                let size = write_file(&mut entry, &target, mode)?;
                report.push(Entry {
                    path: relative,
                    size,
                    mode,
                    kind: EntryKind::File,
                });
            }
            EntryType::Symlink => {
                let link_target = entry
                    .link_name()?
                    .ok_or_else(|| Error::SymlinkEscape {
                        link:   relative.clone(),
                        target: Default::default(),
                    })?
                    .into_owned();
                let link_target = sanitize_symlink_target(&link_target, &relative)?;
                create_symlink(&link_target, &target)?;
                report.push(Entry {
                    path: relative,
                    size: 0,
                    mode: None,
                    kind: EntryKind::Symlink {
                        target: link_target,
                    },
                });
            }
            other => {
                tracing::debug!(entry = %original.display(), kind = ?other, "skipping entry");
            }
        }
    }

    Ok(report)
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> Result<()> {
    let err = |source| Error::ExtractionFailed {
        path: link.to_path_buf(),
        source,
    };
    if let Some(parent) = link.parent() {
        create_dir(parent)?;
    }
    std::os::unix::fs::symlink(target, link).map_err(err)
}

#[cfg(not(unix))]
fn create_symlink(target: &Path, link: &Path) -> Result<()> {
    tracing::warn!(link = %link.display(), target = %target.display(), "symlinks in archives are not extracted on this platform");
    Ok(())
}
