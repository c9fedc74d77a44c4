use std::path::PathBuf;

use felloe_fetch::FetchError;
use felloe_version::{Version, VersionError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("helm {0} is not installed")]
    NotInstalled(Version),

    #[error("no helm release matches {0}")]
    VersionNotFound(String),

    #[error("no helm version selected: no {pin_file} in {cwd} or its parents, and no active version")]
    NoVersionSelected { pin_file: String, cwd: PathBuf },

    #[error("checksum mismatch for {file}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        file:     String,
        expected: String,
        actual:   String,
    },

    #[error("failed to fetch {url} after {attempts} attempts")]
    FetchFailed {
        url:      String,
        attempts: u32,
        #[source]
        source:   FetchError,
    },

    #[error("helm {0} is the active version; pass --force to remove it anyway")]
    InUse(Version),

    #[error("{archive} does not contain {binary}")]
    MissingBinary { archive: String, binary: String },

    #[error("active version link {path} is broken: {reason}")]
    BrokenActiveLink { path: PathBuf, reason: String },

    #[error("version index {path} is corrupt")]
    CorruptIndex {
        path:   PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid pin file {path}")]
    InvalidPin {
        path:   PathBuf,
        #[source]
        source: VersionError,
    },

    #[error("invalid configuration")]
    Config(#[source] Box<figment::Error>),

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source:  std::io::Error,
    },

    #[error(transparent)]
    Fetch(FetchError),

    #[error(transparent)]
    Fs(#[from] felloe_fs::Error),

    #[error(transparent)]
    Archive(#[from] felloe_archive::Error),

    #[error(transparent)]
    Verify(#[from] felloe_verify::VerifyError),

    #[error(transparent)]
    Version(#[from] VersionError),

    #[error(transparent)]
    Platform(#[from] felloe_platform::Error),
}

impl Error {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

impl From<FetchError> for Error {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::RetriesExhausted {
                url,
                attempts,
                source,
            } => Self::FetchFailed {
                url,
                attempts,
                source: *source,
            },
            FetchError::ChecksumMismatch {
                url,
                expected,
                actual,
            } => Self::ChecksumMismatch {
                file: url.rsplit('/').next().unwrap_or(&url).to_string(),
                expected,
                actual,
            },
            other => Self::Fetch(other),
        }
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self { Self::Config(Box::new(err)) }
}
