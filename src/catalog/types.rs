//! Domain records exchanged with the remote collection.

use serde::{Deserialize, Deserializer, Serialize};

use crate::client::ApiError;

/// Catalog entry as returned by the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Assigned by the remote store, immutable afterwards.
    pub id: String,
    pub description: String,
    #[serde(deserialize_with = "non_negative_price")]
    pub price: f64,
    pub stock: u32,
    /// Free-text labels. Duplicates allowed, order kept for display.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Timestamp (ms) of the last successful write, when the server reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<u64>,
}

/// Prices held in the store are finite and non-negative.
fn non_negative_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let price = f64::deserialize(deserializer)?;
    if !price.is_finite() || price < 0.0 {
        return Err(serde::de::Error::custom(format!(
            "price must be a non-negative number, got {}",
            price
        )));
    }
    Ok(price)
}

/// Payload for creating a product. The server assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProductData {
    pub description: String,
    pub price: f64,
    pub stock: u32,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Partial modification. `None` means "leave unchanged" and is not sent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

impl UpdateProductData {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.categories.is_none()
    }
}

/// Status of one kind of operation (or of one operation on one id).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadingState {
    pub is_loading: bool,
    pub error: Option<String>,
    /// Incremented on each failure, reset to 0 on start and on success.
    pub retry_count: u32,
    pub last_attempt: Option<u64>,
}

impl LoadingState {
    /// Fresh in-flight state for a new attempt.
    pub fn started(at: u64) -> Self {
        Self {
            is_loading: true,
            error: None,
            retry_count: 0,
            last_attempt: Some(at),
        }
    }

    /// Settles this state as failed with `message`.
    pub fn failed(self, message: &str) -> Self {
        Self {
            is_loading: false,
            error: Some(message.to_string()),
            retry_count: self.retry_count + 1,
            last_attempt: self.last_attempt,
        }
    }
}

/// Error code for responses that contradict the identities held in the store.
pub const DATA_INTEGRITY_CODE: &str = "DATA_INTEGRITY";

/// Most recent failure, as shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorState {
    pub message: String,
    pub code: Option<String>,
    pub retryable: bool,
    pub timestamp: u64,
}

impl ErrorState {
    /// Normalizes a request failure, keeping its classification.
    pub fn from_api_error(err: &ApiError, at: u64) -> Self {
        Self {
            message: err.to_string(),
            code: Some(err.code()),
            retryable: err.is_retryable(),
            timestamp: at,
        }
    }


    pub(crate) fn integrity(message: String, at: u64) -> Self {
        Self {
            message,
            code: Some(DATA_INTEGRITY_CODE.to_string()),
            retryable: false,
            timestamp: at,
        }
    }

    pub fn is_integrity_fault(&self) -> bool {
        self.code.as_deref() == Some(DATA_INTEGRITY_CODE)
    }
}
