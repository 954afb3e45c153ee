//! Error types for the request client.
//!
//! Provides structured failure classification: transport faults, HTTP
//! status faults and payload decoding faults, each with a retryable flag.

use thiserror::Error;

/// Final failure of a logical request.
///
/// `Clone` so every caller sharing an in-flight request gets the same error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Request never reached the server or the connection broke.
    #[error("Failed to {operation}: {message}")]
    Transport { operation: String, message: String },

    /// Server answered with a non-2xx status.
    #[error("Failed to {operation}: {status} {message}")]
    Status {
        operation: String,
        status: u16,
        message: String,
    },

    /// Response body did not match the expected shape.
    #[error("Failed to {operation}: invalid response body: {message}")]
    Decode { operation: String, message: String },

    /// Request body could not be serialized.
    #[error("Failed to {operation}: invalid request body: {message}")]
    Encode { operation: String, message: String },
}

impl ApiError {
    /// Server errors and transport faults are worth retrying; client
    /// errors and malformed payloads are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport { .. } => true,
            ApiError::Status { status, .. } => *status >= 500,
            ApiError::Decode { .. } | ApiError::Encode { .. } => false,
        }
    }

    /// Machine-readable code: the HTTP status, or a fault name.
    pub fn code(&self) -> String {
        match self {
            ApiError::Transport { .. } => "TRANSPORT_ERROR".to_string(),
            ApiError::Status { status, .. } => status.to_string(),
            ApiError::Decode { .. } => "DECODE_ERROR".to_string(),
            ApiError::Encode { .. } => "ENCODE_ERROR".to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn operation(&self) -> &str {
        match self {
            ApiError::Transport { operation, .. }
            | ApiError::Status { operation, .. }
            | ApiError::Decode { operation, .. }
            | ApiError::Encode { operation, .. } => operation,
        }
    }
}

/// Raised by a [`Transport`](super::Transport) when no response was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError(err.to_string())
    }
}

/// The HTTP client could not be constructed.
#[derive(Debug, Error)]
#[error("Failed to build HTTP client: {0}")]
pub struct ClientBuildError(#[from] pub reqwest::Error);
