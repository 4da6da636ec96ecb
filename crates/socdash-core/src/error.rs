//! Failure taxonomy for a single backend call.
//!
//! Every variant is recoverable: the runtime converts each of them into a
//! fallback response instead of surfacing it to the caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a live request did not produce a payload.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ApiError {
    /// The backend answered with a status outside 200..=299.
    #[error("HTTP error! status: {status} {status_text}")]
    HttpStatus { status: u16, status_text: String },

    /// The body could not be parsed as JSON.
    #[error("Malformed response body: {message}")]
    MalformedResponse { message: String },

    /// The request could not be sent or the response could not be received.
    #[error("Network error: {message}")]
    Network { message: String },
}

impl ApiError {
    /// Build an `HttpStatus` error.
    pub fn http_status(status: u16, status_text: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            status_text: status_text.into(),
        }
    }

    /// Build a `MalformedResponse` error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Build a `Network` error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Short machine-friendly name of the variant, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::HttpStatus { .. } => "http_status",
            ApiError::MalformedResponse { .. } => "malformed_response",
            ApiError::Network { .. } => "network",
        }
    }
}
