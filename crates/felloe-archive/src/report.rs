use std::path::{Path, PathBuf};

use crate::format::ArchiveFormat;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Symlink { target: PathBuf },
}

/// One entry written to the destination. `path` is destination-relative.
#[derive(Clone, Debug)]
pub struct Entry {
    pub path: PathBuf,
    pub size: u64,
    pub mode: Option<u32>,
    pub kind: EntryKind,
}

impl Entry {
    pub fn is_executable(&self) -> bool { self.mode.is_some_and(|m| m & 0o111 != 0) }
}

#[derive(Clone, Debug)]
pub struct ArchiveReport {
    pub format:      ArchiveFormat,
    pub total_bytes: u64,
    pub entries:     Vec<Entry>,
}

impl ArchiveReport {
    pub(crate) fn new(format: ArchiveFormat) -> Self {
        Self {
            format,
            total_bytes: 0,
            entries: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, entry: Entry) {
        self.total_bytes += entry.size;
        self.entries.push(entry);
    }

    pub fn entry(&self, path: impl AsRef<Path>) -> Option<&Entry> {
        let path = path.as_ref();
        self.entries.iter().find(|e| e.path == path)
    }

    pub fn files(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.kind == EntryKind::File)
    }
}
