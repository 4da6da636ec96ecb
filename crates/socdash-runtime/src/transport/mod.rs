//! Transport abstraction for backend requests.
//!
//! The client owns status checking and JSON parsing; a transport only moves
//! bytes. That keeps the failure taxonomy identical across implementations
//! and lets tests swap in scripted transports.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::time::Duration;

use socdash_core::{ApiError, Method, RequestMode};

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::ReqwestTransport;

/// A fully-resolved outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,

    /// Absolute request target
    pub url: String,

    pub headers: BTreeMap<String, String>,

    pub mode: RequestMode,

    pub body: Option<JsonValue>,

    /// Per-request timeout, `None` for unbounded
    pub timeout: Option<Duration>,
}

/// Raw response as received from the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,

    /// Reason phrase, e.g. "Not Found"
    pub status_text: String,

    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, status_text: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    /// A 200 response carrying `value` serialized as JSON.
    pub fn json(value: &JsonValue) -> Self {
        Self::new(200, "OK", value.to_string())
    }

    /// Whether the status is in 200..=299.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport abstraction allows swapping HTTP backends.
///
/// Implementations report send/receive failures as [`ApiError::Network`].
/// Non-2xx statuses are NOT errors at this layer.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and return the raw response.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;

    /// Transport name for diagnostics.
    fn name(&self) -> &str;
}
