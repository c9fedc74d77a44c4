mod tarball;
mod zipfile;

use std::fs::{self, File};
use std::io::{self, Read, Seek};
use std::path::Path;

use crate::error::{Error, Result};
use crate::format::{ArchiveFormat, detect_from_reader};
use crate::options::ExtractOptions;
use crate::report::ArchiveReport;

/// Extracts an archive into `destination`, detecting the format from its
/// magic bytes. `destination` is created if missing.
pub fn extract<R: Read + Seek>(
    mut reader: R,
    destination: &Path,
    options: &ExtractOptions,
) -> Result<ArchiveReport> {
    let format = detect_from_reader(&mut reader)?.ok_or(Error::UnsupportedFormat)?;
    extract_as(reader, format, destination, options)
}

pub fn extract_as<R: Read + Seek>(
    reader: R,
    format: ArchiveFormat,
    destination: &Path,
    options: &ExtractOptions,
) -> Result<ArchiveReport> {
    create_dir(destination)?;
    tracing::debug!(?format, dest = %destination.display(), "extracting archive");
    match format {
        ArchiveFormat::TarGz => {
            let decoder = flate2::read::GzDecoder::new(reader);
            tarball::extract(decoder, format, destination, options)
        }
        ArchiveFormat::Tar => tarball::extract(reader, format, destination, options),
        ArchiveFormat::Zip => zipfile::extract(reader, destination, options),
    }
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| Error::ExtractionFailed {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes one regular file, creating parents. Returns the bytes written.
fn write_file(reader: &mut dyn Read, path: &Path, mode: Option<u32>) -> Result<u64> {
    let err = |source| Error::ExtractionFailed {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        create_dir(parent)?;
    }
    let mut out = File::create(path).map_err(err)?;
    let written = io::copy(reader, &mut out).map_err(err)?;

    #[cfg(unix)]
    if let Some(mode) = mode {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode((mode & 0o777) | 0o600)).map_err(err)?;
    }
    #[cfg(not(unix))]
    let _ = mode;

    Ok(written)
}
