//! Request client for the remote product collection.
//!
//! Wraps a [`Transport`] with:
//! - response validation (non-2xx → [`ApiError::Status`])
//! - a read cache for GET responses
//! - single-flight de-duplication of identical concurrent requests
//! - bounded retry with exponential backoff
//!
//! The client never evicts cached reads on its own after a write; callers
//! use [`RequestClient::invalidate_cache`] for that.

pub mod cache;
pub mod error;
pub mod flight;
pub mod retry;
pub mod transport;

use std::sync::Arc;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::clock::ClockSource;
use crate::config::Config;

pub use cache::{cache_key, CacheEntry, ResponseCache};
pub use error::{ApiError, ClientBuildError, TransportError};
pub use flight::SingleFlight;
pub use retry::RetryPolicy;
pub use transport::{HttpTransport, Method, RawRequest, RawResponse, Transport};

/// Successful response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub data: T,
    /// When the payload was received from the server (ms). For cache hits
    /// this is the original receive time.
    pub timestamp: u64,
    pub status: ResponseStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    /// Fresh from the network.
    Success,
    /// Served from the read cache.
    Cached,
}

impl<T> ApiResponse<T> {
    pub fn is_cached(&self) -> bool {
        self.status == ResponseStatus::Cached
    }

    fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            data: f(self.data),
            timestamp: self.timestamp,
            status: self.status,
        }
    }
}

type Outcome = Result<ApiResponse<Value>, ApiError>;

pub struct RequestClient<T: Transport = HttpTransport> {
    transport: T,
    cache: Mutex<ResponseCache>,
    flights: SingleFlight<Outcome>,
    retry: RetryPolicy,
    clock: Arc<dyn ClockSource>,
}

impl RequestClient<HttpTransport> {
    /// Builds a reqwest-backed client from configuration.
    pub fn from_config(
        config: &Config,
        clock: Arc<dyn ClockSource>,
    ) -> Result<Self, ClientBuildError> {
        let transport = HttpTransport::new(&config.remote)?;
        Ok(Self::new(
            transport,
            RetryPolicy::from(&config.retry),
            config.cache.ttl_ms(),
            clock,
        ))
    }
}

impl<T: Transport> RequestClient<T> {
    pub fn new(
        transport: T,
        retry: RetryPolicy,
        cache_ttl_ms: u64,
        clock: Arc<dyn ClockSource>,
    ) -> Self {
        Self {
            transport,
            cache: Mutex::new(ResponseCache::new(cache_ttl_ms)),
            flights: SingleFlight::new(),
            retry,
            clock,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        operation: &str,
    ) -> Result<ApiResponse<R>, ApiError> {
        let response = self.request(Method::Get, path, None, operation).await?;
        decode(response, operation).inspect_err(|_| {
            // A payload of the wrong shape is not a successful read.
            if self.cache.lock().remove(&cache_key(Method::Get, path, None)) {
                tracing::debug!(operation, path, "evicted undecodable cached response");
            }
        })
    }

    pub async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        operation: &str,
    ) -> Result<ApiResponse<R>, ApiError> {
        let body = encode(body, operation)?;
        let response = self.request(Method::Post, path, Some(body), operation).await?;
        decode(response, operation)
    }

    pub async fn patch<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        operation: &str,
    ) -> Result<ApiResponse<R>, ApiError> {
        let body = encode(body, operation)?;
        let response = self.request(Method::Patch, path, Some(body), operation).await?;
        decode(response, operation)
    }

    /// Expects an empty (no-content) success body; any payload is ignored.
    pub async fn delete(&self, path: &str, operation: &str) -> Result<ApiResponse<()>, ApiError> {
        let response = self.request(Method::Delete, path, None, operation).await?;
        Ok(response.map(|_| ()))
    }

    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }

    /// Drops cached reads whose key contains `pattern` (e.g. `"/products"`).
    pub fn invalidate_cache(&self, pattern: &str) -> usize {
        let removed = self.cache.lock().invalidate(pattern);
        tracing::debug!(pattern, removed, "invalidated cached responses");
        removed
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.lock().len()
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        operation: &str,
    ) -> Outcome {
        let key = cache_key(method, path, body.as_deref());

        if method == Method::Get {
            let cached = self.cache.lock().get(&key, self.clock.now());
            if let Some(entry) = cached {
                tracing::debug!(operation, path, "cache hit");
                return Ok(ApiResponse {
                    data: entry.data,
                    timestamp: entry.timestamp,
                    status: ResponseStatus::Cached,
                });
            }
        }

        let request = RawRequest {
            method,
            path: path.to_string(),
            body,
        };

        self.flights
            .run(&key, || async {
                let response = self
                    .retry
                    .run(operation, || self.attempt(&request, operation))
                    .await?;
                if method == Method::Get {
                    self.cache
                        .lock()
                        .insert(key.clone(), response.data.clone(), response.timestamp);
                }
                Ok(response)
            })
            .await
    }

    async fn attempt(&self, request: &RawRequest, operation: &str) -> Outcome {
        tracing::debug!(operation, method = %request.method, path = %request.path, "sending request");

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| ApiError::Transport {
                operation: operation.to_string(),
                message: e.to_string(),
            })?;

        if !response.is_success() {
            return Err(ApiError::Status {
                operation: operation.to_string(),
                status: response.status,
                message: error_message(&response),
            });
        }

        let data = if response.body.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(&response.body).map_err(|e| ApiError::Decode {
                operation: operation.to_string(),
                message: e.to_string(),
            })?
        };

        Ok(ApiResponse {
            data,
            timestamp: self.clock.now(),
            status: ResponseStatus::Success,
        })
    }
}

/// Prefers a `message` field from a JSON error body, then the status text.
fn error_message(response: &RawResponse) -> String {
    serde_json::from_slice::<Value>(&response.body)
        .ok()
        .and_then(|body| {
            body.get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| response.status_text.clone())
}

fn encode<B: Serialize + ?Sized>(body: &B, operation: &str) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Encode {
        operation: operation.to_string(),
        message: e.to_string(),
    })
}

fn decode<R: DeserializeOwned>(
    response: ApiResponse<Value>,
    operation: &str,
) -> Result<ApiResponse<R>, ApiError> {
    let ApiResponse {
        data,
        timestamp,
        status,
    } = response;
    let data = serde_json::from_value(data).map_err(|e| ApiError::Decode {
        operation: operation.to_string(),
        message: e.to_string(),
    })?;
    Ok(ApiResponse {
        data,
        timestamp,
        status,
    })
}
