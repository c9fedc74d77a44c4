//! In-memory [`HttpClient`] serving canned responses.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bytes::Bytes;
use futures_util::stream;

use crate::error::{FetchError, Result};
use crate::http::{Body, HttpClient};

const CHUNK: usize = 4096;

#[derive(Debug, Clone)]
pub enum MockResponse {
    Body(Bytes),
    Status(u16),
    /// Fails before any byte is received.
    Disconnect,
    /// Sends these bytes, then drops the connection.
    Truncated(Bytes),
}

impl MockResponse {
    pub fn body(data: impl Into<Bytes>) -> Self { Self::Body(data.into()) }
}

#[derive(Default)]
struct State {
    routes: HashMap<String, VecDeque<MockResponse>>,
    hits:   HashMap<String, usize>,
}

/// Responses are queued per URL; the last one repeats. Unknown URLs are 404.
#[derive(Clone, Default)]
pub struct MockClient {
    state: Arc<Mutex<State>>,
}

impl MockClient {
    pub fn new() -> Self { Self::default() }

    pub fn route(self, url: impl Into<String>, response: MockResponse) -> Self {
        self.lock().routes.entry(url.into()).or_default().push_back(response);
        self
    }

    pub fn hits(&self, url: &str) -> usize { self.lock().hits.get(url).copied().unwrap_or(0) }

    fn lock(&self) -> MutexGuard<'_, State> { self.state.lock().unwrap_or_else(PoisonError::into_inner) }

    fn next(&self, url: &str) -> MockResponse {
        let mut state = self.lock();
        *state.hits.entry(url.to_string()).or_default() += 1;
        match state.routes.get_mut(url) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or(MockResponse::Status(404)),
            Some(queue) => queue.front().cloned().unwrap_or(MockResponse::Status(404)),
            None => MockResponse::Status(404),
        }
    }
}

fn disconnected(url: &str) -> FetchError {
    FetchError::Network {
        url:     url.to_string(),
        message: "connection reset by peer".to_string(),
    }
}

impl HttpClient for MockClient {
    async fn get(&self, url: &str) -> Result<Bytes> {
        match self.next(url) {
            MockResponse::Body(data) => Ok(data),
            MockResponse::Status(status) => Err(FetchError::Status {
                url: url.to_string(),
                status,
            }),
            MockResponse::Disconnect | MockResponse::Truncated(_) => Err(disconnected(url)),
        }
    }

    async fn stream(&self, url: &str) -> Result<Body> {
        let (data, truncated) = match self.next(url) {
            MockResponse::Body(data) => (data, false),
            MockResponse::Truncated(data) => (data, true),
            MockResponse::Status(status) => {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status,
                });
            }
            MockResponse::Disconnect => return Err(disconnected(url)),
        };

        let content_length = Some(data.len() as u64);
        let mut chunks: Vec<Result<Bytes>> = data
            .chunks(CHUNK)
            .map(|c| Ok(Bytes::copy_from_slice(c)))
            .collect();
        if truncated {
            chunks.push(Err(disconnected(url)));
        }
        Ok(Body {
            content_length,
            chunks: Box::pin(stream::iter(chunks)),
        })
    }
}
