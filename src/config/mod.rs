//! Configuration: remote endpoint, cache lifetime and retry policy.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{CacheConfig, Config, RemoteConfig, RetryConfig};
