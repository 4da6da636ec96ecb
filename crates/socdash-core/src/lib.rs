//! # socdash-core
//!
//! Deterministic building blocks of the socdash data-access layer.
//!
//! This crate holds everything about a backend call that does not need I/O:
//! - [`EndpointPath`] and request target construction
//! - [`RequestConfig`] defaults and per-call [`RequestOptions`] merging
//! - the [`ApiError`] failure taxonomy
//! - the ordered [`FallbackTable`] and its built-in security-ops payloads
//! - the tagged [`ApiResponse`] outcome
//! - [`ClientConfig`] loading and validation
//!
//! Network access lives in `socdash-runtime`.
//!
//! ## Example
//!
//! ```rust
//! use socdash_core::{ApiError, EndpointPath, FallbackTable};
//!
//! let table = FallbackTable::security_ops();
//! let path = EndpointPath::new("/agents").unwrap();
//! let substitution = table.substitute(&path, &ApiError::network("connection refused"));
//!
//! assert_eq!(substitution.rule.map(|r| r.area.as_str()), Some("agents"));
//! ```

pub mod config;
pub mod error;
pub mod fallback;
pub mod path;
pub mod request;
pub mod response;

// Re-export main types at crate root
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use fallback::{FallbackRule, FallbackTable, Substitution};
pub use path::{EndpointPath, PathError};
pub use request::{Method, RequestConfig, RequestMode, RequestOptions};
pub use response::{ApiResponse, Origin};
