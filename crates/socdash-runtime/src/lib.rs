//! # socdash-runtime
//!
//! Resilient fetch client for the socdash security-operations dashboard.
//!
//! A call issues a request to the backend and returns the parsed JSON body.
//! When the request fails for any reason (network error, non-2xx status,
//! malformed body) the client returns a pre-authored fallback payload
//! instead, chosen by matching the endpoint path against an ordered
//! [`FallbackTable`](socdash_core::FallbackTable).
//!
//! ## Guarantees
//!
//! 1. **Never fails**: `call` always returns an [`ApiResponse`](socdash_core::ApiResponse)
//! 2. **Tagged**: live and substituted payloads are distinguishable
//! 3. **Injectable**: transport, fallback table and observer are all supplied
//!    at construction
//!
//! No retries, caching or request de-duplication are performed.
//!
//! ## Example
//!
//! ```rust,ignore
//! use socdash_core::EndpointPath;
//! use socdash_runtime::ResilientClient;
//!
//! let client = ResilientClient::builder().build()?;
//! let path = EndpointPath::new("/dashboard/stats")?;
//!
//! let response = client.call(&path, None).await;
//! if response.is_fallback() {
//!     eprintln!("backend unavailable, showing cached demo data");
//! }
//! render(response.payload());
//! ```

pub mod accounting;
pub mod client;
pub mod observer;
pub mod transport;

pub use accounting::{CallCounter, CallUsage};
pub use client::{ResilientClient, ResilientClientBuilder};
pub use observer::{
    CallEvent, CallObserver, NoopObserver, RecordedEvent, RecordingObserver, TracingObserver,
};
pub use transport::{HttpRequest, HttpResponse, Transport};

#[cfg(feature = "http")]
pub use transport::ReqwestTransport;

use socdash_core::ConfigError;
use thiserror::Error;

/// Errors from building a client. Calls themselves never fail.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid client configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to initialise transport: {0}")]
    Transport(String),

    #[error("No transport configured and the 'http' feature is disabled")]
    NoTransport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_messages() {
        let err = ClientError::Config(ConfigError::ValidationError("bad url".to_string()));
        assert!(err.to_string().contains("bad url"));
        assert!(ClientError::NoTransport.to_string().contains("'http'"));
    }
}
