//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use catalog_sync::catalog::{NewProductData, Product, ProductsState};
use catalog_sync::client::{HttpTransport, RequestClient, RetryPolicy};
use catalog_sync::clock::{ClockSource, ManualClock};
use catalog_sync::config::{CacheConfig, Config, RemoteConfig, RetryConfig};
use catalog_sync::coordinator::{Coordinator, StoreHandle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub const TTL_MS: u64 = 5 * 60 * 1000;

/// Config pointing at `base_url` with millisecond-scale backoff.
pub fn test_config(base_url: &str) -> Config {
    Config {
        remote: RemoteConfig {
            base_url: base_url.to_string(),
            connect_timeout_seconds: 1,
            request_timeout_seconds: 5,
        },
        cache: CacheConfig::default(),
        retry: RetryConfig {
            max_retries: 3,
            base_delay_ms: 5,
            respect_retryable: false,
        },
    }
}

pub fn make_client(base_url: &str, clock: &ManualClock) -> RequestClient<HttpTransport> {
    let config = test_config(base_url);
    let transport = HttpTransport::new(&config.remote).expect("Failed to build transport");
    RequestClient::new(
        transport,
        RetryPolicy::from(&config.retry),
        config.cache.ttl_ms(),
        Arc::new(clock.clone()),
    )
}

/// Coordinator over the real HTTP transport, driven by a manual clock.
pub fn make_coordinator(base_url: &str, clock: &ManualClock) -> Coordinator<HttpTransport> {
    let client = make_client(base_url, clock);
    let clock: Arc<dyn ClockSource> = Arc::new(clock.clone());
    Coordinator::new(
        Arc::new(client),
        StoreHandle::new(ProductsState::with_cache_ttl(TTL_MS)),
        clock,
    )
}

/// Create a temporary config file with the given TOML content.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

pub fn product(id: &str, description: &str, price: f64, stock: u32) -> Product {
    Product {
        id: id.to_string(),
        description: description.to_string(),
        price,
        stock,
        categories: vec!["tools".to_string()],
        last_modified: None,
    }
}

pub fn widget_data() -> NewProductData {
    NewProductData {
        description: "Widget".to_string(),
        price: 9.99,
        stock: 3,
        categories: vec!["tools".to_string()],
    }
}

pub fn products_json(products: &[Product]) -> String {
    serde_json::to_string(products).expect("products serialize")
}
