#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("checksum mismatch: expected {expected}, got {actual}")]
    Mismatch { expected: String, actual: String },

    #[error("invalid sha256 digest {0:?}")]
    InvalidDigest(String),

    #[error("no checksum for {file} in checksum file")]
    NotListed { file: String },

    #[error("checksum file is empty")]
    Empty,
}

pub type Result<T> = std::result::Result<T, VerifyError>;
