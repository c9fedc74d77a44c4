use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unrecognised archive format")]
    UnsupportedFormat,

    #[error("archive entry '{entry}' escapes the destination directory")]
    ZipSlip { entry: PathBuf },

    #[error("symlink '{link}' points outside the destination directory: '{target}'")]
    SymlinkEscape { link: PathBuf, target: PathBuf },

    #[error("stripping {count} leading component(s) leaves nothing of '{original}'")]
    NoComponentsRemaining { original: PathBuf, count: usize },

    #[error("failed to extract '{path}'")]
    ExtractionFailed {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("corrupt zip archive")]
    Zip(#[from] zip::result::ZipError),

    #[error("failed to read archive")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
