use std::fmt;
use std::sync::Arc;

use felloe_verify::Sha256Digest;

/// Phases of a download. Retries return to `Connecting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    #[default]
    Connecting,
    Downloading,
    Verifying,
    Completed,
}

impl fmt::Display for FetchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Connecting => "connecting",
            Self::Downloading => "downloading",
            Self::Verifying => "verifying",
            Self::Completed => "completed",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub phase:            FetchPhase,
    pub bytes_downloaded: u64,
    pub total_bytes:      Option<u64>,
    /// 0 for the first attempt.
    pub retry_count:      u32,
}

impl Progress {
    pub fn percentage(&self) -> Option<f64> {
        self.total_bytes
            .filter(|total| *total > 0)
            .map(|total| self.bytes_downloaded as f64 / total as f64 * 100.0)
    }
}

pub type ProgressCallback = Arc<dyn Fn(&Progress) + Send + Sync>;

/// Per-download settings.
#[derive(Clone, Default)]
pub struct FetchOptions {
    /// Fail with [`crate::FetchError::ChecksumMismatch`] unless the body hashes
    /// to this digest.
    pub checksum:    Option<Sha256Digest>,
    /// Invoked on phase changes and after every chunk written.
    pub on_progress: Option<ProgressCallback>,
}

impl fmt::Debug for FetchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchOptions")
            .field("checksum", &self.checksum)
            .field("on_progress", &self.on_progress.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

impl FetchOptions {
    pub fn checksum(mut self, digest: Sha256Digest) -> Self {
        self.checksum = Some(digest);
        self
    }

    pub fn on_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_progress = Some(callback);
        self
    }

    pub(crate) fn report(&self, progress: Progress) {
        if let Some(callback) = &self.on_progress {
            callback(&progress);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        let mut progress = Progress {
            phase:            FetchPhase::Downloading,
            bytes_downloaded: 50,
            total_bytes:      Some(200),
            retry_count:      0,
        };
        assert_eq!(progress.percentage(), Some(25.0));
        progress.total_bytes = None;
        assert_eq!(progress.percentage(), None);
        progress.total_bytes = Some(0);
        assert_eq!(progress.percentage(), None);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(FetchPhase::Verifying.to_string(), "verifying");
    }
}
