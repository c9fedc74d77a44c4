use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use bytes::Bytes;
use futures_util::{Stream, StreamExt};

use crate::error::{FetchError, Result};

pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// A response body that has not been read yet.
pub struct Body {
    /// `Content-Length`, when the server sent one.
    pub content_length: Option<u64>,
    pub chunks:         BoxStream<'static, Result<Bytes>>,
}

/// Asynchronous HTTP client abstraction.
///
/// Implementations follow redirects themselves and map any non-2xx response
/// to [`FetchError::Status`] so callers can classify it.
///
/// # Implementations
///
/// - [`ReqwestClient`] for real network access
/// - `MockClient` (feature `test-util`) for tests
pub trait HttpClient: Send + Sync {
    /// Fetches a whole (small) response body.
    fn get(&self, url: &str) -> impl Future<Output = Result<Bytes>> + Send;

    /// Opens a response body for streaming.
    fn stream(&self, url: &str) -> impl Future<Output = Result<Body>> + Send;
}

impl<C: HttpClient> HttpClient for &C {
    fn get(&self, url: &str) -> impl Future<Output = Result<Bytes>> + Send { (**self).get(url) }

    fn stream(&self, url: &str) -> impl Future<Output = Result<Body>> + Send { (**self).stream(url) }
}

/// Production client backed by `reqwest`.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("felloe/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| FetchError::network("<client>", &e))?;
        Ok(Self { client })
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response> {
        tracing::debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::network(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url:    url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<Bytes> {
        let response = self.send(url).await?;
        response.bytes().await.map_err(|e| FetchError::network(url, &e))
    }

    async fn stream(&self, url: &str) -> Result<Body> {
        let response = self.send(url).await?;
        let content_length = response.content_length();
        let owned_url = url.to_string();
        let chunks = response
            .bytes_stream()
            .map(move |chunk| chunk.map_err(|e| FetchError::network(&owned_url, &e)));
        Ok(Body {
            content_length,
            chunks: Box::pin(chunks),
        })
    }
}
