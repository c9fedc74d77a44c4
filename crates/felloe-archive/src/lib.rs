//! Extraction of downloaded release archives.
//!
//! Every entry path is sanitized before anything touches the disk: absolute
//! paths and `..` traversal out of the destination are rejected, and leading
//! components can be stripped the way `tar --strip-components` does.

mod error;
mod extract;
mod format;
mod options;
mod report;
mod sanitize;

pub use error::{Error, Result};
pub use extract::{extract, extract_as};
pub use format::{ArchiveFormat, detect_format, detect_from_reader};
pub use options::ExtractOptions;
pub use report::{ArchiveReport, Entry, EntryKind};
pub use sanitize::{sanitize_entry, sanitize_symlink_target};
