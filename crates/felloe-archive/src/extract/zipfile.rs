use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use super::{create_dir, write_file};
use crate::error::{Error, Result};
use crate::format::ArchiveFormat;
use crate::options::ExtractOptions;
use crate::report::{ArchiveReport, Entry, EntryKind};
use crate::sanitize::sanitize_entry;

pub(super) fn extract<R: Read + Seek>(
    reader: R,
    destination: &Path,
    options: &ExtractOptions,
) -> Result<ArchiveReport> {
    let mut archive = zip::ZipArchive::new(reader)?;
    let mut report = ArchiveReport::new(ArchiveFormat::Zip);

    for index in 0..archive.len() {
        let mut file = archive.by_index(index)?;
        let original = PathBuf::from(file.name());
        let enclosed = file.enclosed_name().ok_or_else(|| Error::ZipSlip {
            entry: original.clone(),
        })?;
        let is_dir = file.is_dir();

        let Some(relative) = sanitize_entry(&enclosed, options)? else {
            if is_dir {
                continue;
            }
            return Err(Error::NoComponentsRemaining {
                original,
                count: options.strip_components,
            });
        };
        let target = destination.join(&relative);
        let mode = file.unix_mode();

        if is_dir {
            create_dir(&target)?;
            report.push(Entry {
                path: relative,
                size: 0,
                mode,
                kind: EntryKind::Directory,
            });
        } else {
            let size = write_file(&mut file, &target, mode)?;
            report.push(Entry {
                path: relative,
                size,
                mode,
                kind: EntryKind::File,
            });
        }
    }

    Ok(report)
}
