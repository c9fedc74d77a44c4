use std::io::{self, Read, Seek};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    TarGz,
    Tar,
}

impl ArchiveFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::TarGz => "tar.gz",
            Self::Tar => "tar",
        }
    }
}

/// Identifies an archive by its leading magic bytes.
pub fn detect_format(data: &[u8]) -> Option<ArchiveFormat> {
    match data {
        [0x50, 0x4B, 0x03, 0x04, ..] => Some(ArchiveFormat::Zip),
        [0x1F, 0x8B, ..] => Some(ArchiveFormat::TarGz),
        _ if is_tar_header(data) => Some(ArchiveFormat::Tar),
        _ => None,
    }
}

fn is_tar_header(data: &[u8]) -> bool { data.len() >= 263 && data[257..262] == *b"ustar" }

/// Peeks at the header and rewinds, leaving the reader at the start.
pub fn detect_from_reader<R: Read + Seek>(reader: &mut R) -> io::Result<Option<ArchiveFormat>> {
    let mut header = [0u8; 512];
    let mut filled = 0;
    while filled < header.len() {
        match reader.read(&mut header[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    reader.rewind()?;
    Ok(detect_format(&header[..filled]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn detect_zip() {
        assert_eq!(detect_format(&[0x50, 0x4B, 0x03, 0x04, 0x14]), Some(ArchiveFormat::Zip));
    }

    #[test]
    fn detect_gzip() {
        assert_eq!(detect_format(&[0x1F, 0x8B, 0x08, 0x00]), Some(ArchiveFormat::TarGz));
    }

    #[test]
    fn detect_plain_tar() {
        let mut header = [0u8; 512];
        header[257..263].copy_from_slice(b"ustar\0");
        assert_eq!(detect_format(&header), Some(ArchiveFormat::Tar));
    }

    #[test]
    fn detect_unknown_and_short() {
        assert_eq!(detect_format(b"<html>"), None);
        assert_eq!(detect_format(&[]), None);
    }

    #[test]
    fn detect_from_reader_rewinds() {
        let mut cursor = Cursor::new(vec![0x1F, 0x8B, 0x08]);
        assert_eq!(detect_from_reader(&mut cursor).unwrap(), Some(ArchiveFormat::TarGz));
        assert_eq!(cursor.position(), 0);
    }
}
