use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to write {path}")]
    Write {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}")]
    Read {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to link {link} -> {target}")]
    Symlink {
        link:   PathBuf,
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to move {from} to {to}")]
    ReplaceDir {
        from:   PathBuf,
        to:     PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to lock {path}")]
    Lock {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} has no parent directory")]
    NoParent { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, Error>;
