use thiserror::Error;

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("invalid version {input:?}")]
    Invalid {
        input:  String,
        #[source]
        source: semver::Error,
    },

    #[error("invalid partial version {0:?}")]
    Partial(String),

    #[error("invalid version request {0:?}: expected `latest`, a version like 3.14.0, or a prefix like 3.14")]
    Request(String),
}

pub type Result<T> = std::result::Result<T, VersionError>;
