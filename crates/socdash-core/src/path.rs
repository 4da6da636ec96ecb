//! Logical endpoint paths.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors from endpoint path construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Endpoint path must not be empty")]
    Empty,
}

/// A non-empty path identifying a backend resource, relative to the base prefix.
///
/// The path is kept verbatim: no slash normalisation, no percent-encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EndpointPath(String);

impl EndpointPath {
    /// Create a path, rejecting the empty string.
    pub fn new(path: impl Into<String>) -> Result<Self, PathError> {
        let path = path.into();
        if path.is_empty() {
            return Err(PathError::Empty);
        }
        Ok(Self(path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `pattern` occurs anywhere in the path.
    pub fn contains(&self, pattern: &str) -> bool {
        self.0.contains(pattern)
    }

    /// Full request target: `backend_url + base_prefix + path`.
    pub fn target(&self, backend_url: &str, base_prefix: &str) -> String {
        let mut target = String::with_capacity(backend_url.len() + base_prefix.len() + self.0.len());
        target.push_str(backend_url);
        target.push_str(base_prefix);
        target.push_str(&self.0);
        target
    }
}

impl fmt::Display for EndpointPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EndpointPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EndpointPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for EndpointPath {
    type Error = PathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EndpointPath> for String {
    fn from(path: EndpointPath) -> Self {
        path.0
    }
}

impl std::str::FromStr for EndpointPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
