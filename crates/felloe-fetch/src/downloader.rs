use std::future::Future;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use felloe_verify::{Hasher, Sha256Digest, Sha256Hasher};
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;

use crate::error::{FetchError, Result};
use crate::http::HttpClient;
use crate::options::{FetchOptions, FetchPhase, Progress};
use crate::retry::RetryPolicy;

/// A completed, verified download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub path:   PathBuf,
    pub digest: Sha256Digest,
    pub bytes:  u64,
}

/// Wraps an [`HttpClient`] with retries, hashing and progress reporting.
pub struct Downloader<C> {
    client: C,
    policy: RetryPolicy,
}

impl<C: HttpClient> Downloader<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn client(&self) -> &C { &self.client }

    /// Fetches a small body into memory.
    pub async fn get(&self, url: &str) -> Result<Bytes> {
        self.with_retry(url, |_| self.client.get(url)).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.get(url).await?;
        serde_json::from_slice(&body).map_err(|e| FetchError::InvalidResponse {
            url:     url.to_string(),
            message: e.to_string(),
        })
    }

    /// Streams `url` into `dest`, hashing on the way.
    ///
    /// Each attempt truncates `dest` and starts over. On any failure,
    /// including a checksum mismatch, `dest` is removed before returning.
    pub async fn download(&self, url: &str, dest: &Path, options: &FetchOptions) -> Result<Download> {
        let result = self
            .with_retry(url, |retry_count| self.download_once(url, dest, options, retry_count))
            .await;

        if result.is_err() {
            match tokio::fs::remove_file(dest).await {
                Ok(()) => tracing::debug!(path = %dest.display(), "removed partial download"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => tracing::warn!(path = %dest.display(), error = %e, "could not remove partial download"),
            }
        }
        result
    }

    async fn download_once(
        &self,
        url: &str,
        dest: &Path,
        options: &FetchOptions,
        retry_count: u32,
    ) -> Result<Download> {
        let mut progress = Progress {
            phase: FetchPhase::Connecting,
            bytes_downloaded: 0,
            total_bytes: None,
            retry_count,
        };
        options.report(progress);

        let body = self.client.stream(url).await?;
        progress.total_bytes = body.content_length;
        progress.phase = FetchPhase::Downloading;
        options.report(progress);

        let io_err = |source| FetchError::Io {
            path: dest.to_path_buf(),
            source,
        };
        let mut file = tokio::fs::File::create(dest).await.map_err(io_err)?;
        let mut hasher = Sha256Hasher::new();
        let mut chunks = body.chunks;

        while let Some(chunk) = chunks.next().await {
            let chunk = chunk?;
            hasher.update(&chunk);
            file.write_all(&chunk).await.map_err(io_err)?;
            progress.bytes_downloaded += chunk.len() as u64;
            options.report(progress);
        }
        file.flush().await.map_err(io_err)?;
        file.sync_all().await.map_err(io_err)?;
        drop(file);

        progress.phase = FetchPhase::Verifying;
        options.report(progress);
        let digest = hasher.finalize();
        if let Some(expected) = &options.checksum {
            if *expected != digest {
                return Err(FetchError::ChecksumMismatch {
                    url:      url.to_string(),
                    expected: expected.to_string(),
                    actual:   digest.to_string(),
                });
            }
            tracing::debug!(url, %digest, "checksum verified");
        }

        progress.phase = FetchPhase::Completed;
        options.report(progress);
        Ok(Download {
            path: dest.to_path_buf(),
            digest,
            bytes: progress.bytes_downloaded,
        })
    }

    async fn with_retry<T, F, Fut>(&self, url: &str, mut attempt: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut retry_count = 0;
        loop {
            match attempt(retry_count).await {
                Ok(value) => return Ok(value),
                Err(err) if !err.is_retryable() => return Err(err),
                Err(err) if retry_count >= self.policy.max_retries => {
                    return Err(FetchError::RetriesExhausted {
                        url:      url.to_string(),
                        attempts: retry_count + 1,
                        source:   Box::new(err),
                    });
                }
                Err(err) => {
                    let delay = self.policy.delay(retry_count);
                    tracing::warn!(url, error = %err, ?delay, "request failed, retrying");
                    tokio::time::sleep(delay).await;
                    retry_count += 1;
                }
            }
        }
    }
}
