use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported architecture: {0}")]
    UnknownArch(String),

    #[error("unsupported operating system: {0}")]
    UnknownOS(String),

    #[error("unknown shell: {0}")]
    UnknownShell(String),

    #[error("could not determine the user data directory")]
    NoDataDir,

    #[error("PATH entry contains a path separator: {0}")]
    InvalidPathEntry(String),
}
