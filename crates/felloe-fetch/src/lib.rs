//! Downloads for release artifacts.
//!
//! [`Downloader`] streams a URL to disk while hashing it, retries transient
//! failures with exponential backoff and reports progress through a callback.
//! [`ReleaseIndex`] turns the GitHub releases API into typed [`Release`]s.
//!
//! The network sits behind the [`HttpClient`] trait so everything above it can
//! be exercised without one.

mod downloader;
mod error;
mod http;
mod options;
mod release;
mod retry;

#[cfg(feature = "test-util")]
pub mod mock;

pub use downloader::{Download, Downloader};
pub use error::{FetchError, Result};
pub use http::{Body, BoxStream, HttpClient, ReqwestClient};
pub use options::{FetchOptions, FetchPhase, Progress, ProgressCallback};
pub use release::{DEFAULT_RELEASES_API, Release, ReleaseIndex};
pub use retry::{RetryPolicy, retry_delay};
