//! Bounded retry with exponential backoff.

use std::future::Future;
use std::time::Duration;

use crate::config::RetryConfig;

use super::error::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubles for each one after.
    pub base_delay: Duration,
    /// When set, non-retryable failures surface immediately.
    pub respect_retryable: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            respect_retryable: false,
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(config.base_delay_ms),
            respect_retryable: config.respect_retryable,
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `retry` (0-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(retry))
    }

    fn should_retry(&self, retry: u32, err: &ApiError) -> bool {
        if retry >= self.max_retries {
            return false;
        }
        !self.respect_retryable || err.is_retryable()
    }

    /// Runs `attempt` until it succeeds or the budget is spent, returning
    /// the last failure in the latter case.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut attempt: F) -> Result<T, ApiError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let mut retry = 0;
        loop {
            match attempt().await {
                Ok(value) => return Ok(value),
                Err(err) if self.should_retry(retry, &err) => {
                    let delay = self.delay_for(retry);
                    tracing::warn!(
                        operation,
                        attempt = retry + 1,
                        delay_ms = delay.as_millis() as u64,
                        retryable = err.is_retryable(),
                        error = %err,
                        "request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    retry += 1;
                }
                Err(err) => {
                    tracing::error!(operation, attempts = retry + 1, error = %err, "request failed");
                    return Err(err);
                }
            }
        }
    }
}
