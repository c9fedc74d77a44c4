//! Filesystem primitives for managing tool installations.
//!
//! Everything here either completes or leaves the previous state intact:
//! files are written to a sibling and renamed, links are swapped by rename,
//! directories are built in a staging [`Workspace`] and moved into place.

mod error;
mod primitives;
mod transaction;
mod workspace;

pub use error::{Error, Result};
pub use primitives::{
    WriteOptions, atomic_read, atomic_symlink, atomic_write, make_executable, read_link,
    replace_dir,
};
pub use transaction::Transaction;
pub use workspace::Workspace;
