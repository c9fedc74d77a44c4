//! Error types for felloe-fetch.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("network error fetching {url}: {message}")]
    Network { url: String, message: String },

    #[error("gave up on {url} after {attempts} attempts")]
    RetriesExhausted {
        url:      String,
        attempts: u32,
        #[source]
        source:   Box<FetchError>,
    },

    #[error("checksum mismatch for {url}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        url:      String,
        expected: String,
        actual:   String,
    },

    #[error("unexpected response from {url}: {message}")]
    InvalidResponse { url: String, message: String },

    #[error("failed to write {path}")]
    Io {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FetchError {
    /// Transport failures, server errors and rate limiting are worth another
    /// attempt. Client errors and integrity failures are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool { matches!(self, Self::Status { status: 404, .. }) }

    pub(crate) fn network(url: &str, err: &(dyn std::error::Error + 'static)) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::Network {
            url: url.to_string(),
            message,
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
