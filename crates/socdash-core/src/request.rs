//! Request configuration and per-call overrides.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cross-origin mode of the request.
///
/// Native transports do not enforce CORS; the mode travels with the request
/// so that transports bridging to a browser can honour it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestMode {
    #[default]
    Cors,
    SameOrigin,
    NoCors,
}

/// Fully-resolved configuration for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestConfig {
    pub method: Method,

    /// Header name to value. Ordered so requests are reproducible.
    pub headers: BTreeMap<String, String>,

    pub mode: RequestMode,

    /// Optional JSON body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<JsonValue>,
}

impl Default for RequestConfig {
    fn default() -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());

        Self {
            method: Method::Get,
            headers,
            mode: RequestMode::Cors,
            body: None,
        }
    }
}

impl RequestConfig {
    /// Apply per-call overrides.
    ///
    /// The merge is shallow: each field present in `options` replaces the
    /// whole field here. A supplied header map replaces the default headers
    /// rather than being combined with them.
    pub fn merged(&self, options: &RequestOptions) -> RequestConfig {
        RequestConfig {
            method: options.method.unwrap_or(self.method),
            headers: options
                .headers
                .clone()
                .unwrap_or_else(|| self.headers.clone()),
            mode: options.mode.unwrap_or(self.mode),
            body: options.body.clone().or_else(|| self.body.clone()),
        }
    }

    /// Add extra headers on top of the current ones (later wins).
    pub fn with_extra_headers<'a>(
        mut self,
        extra: impl IntoIterator<Item = (&'a String, &'a String)>,
    ) -> Self {
        for (name, value) in extra {
            self.headers.insert(name.clone(), value.clone());
        }
        self
    }
}

/// Optional per-call overrides merged over [`RequestConfig`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestOptions {
    #[serde(default)]
    pub method: Option<Method>,

    #[serde(default)]
    pub headers: Option<BTreeMap<String, String>>,

    #[serde(default)]
    pub mode: Option<RequestMode>,

    #[serde(default)]
    pub body: Option<JsonValue>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Replace the header map for this call.
    pub fn headers<K, V>(mut self, headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.headers = Some(
            headers
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    pub fn mode(mut self, mode: RequestMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn body(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RequestConfig::default();
        assert_eq!(config.method, Method::Get);
        assert_eq!(config.mode, RequestMode::Cors);
        assert_eq!(config.headers["Content-Type"], "application/json");
        assert_eq!(config.headers["Accept"], "application/json");
        assert!(config.body.is_none());
    }

    #[test]
    fn test_empty_options_keep_defaults() {
        let defaults = RequestConfig::default();
        assert_eq!(defaults.merged(&RequestOptions::new()), defaults);
    }

    #[test]
    fn test_merge_is_shallow_per_field() {
        let defaults = RequestConfig::default();
        let options = RequestOptions::new()
            .method(Method::Post)
            .headers([("X-Trace", "abc")]);

        let merged = defaults.merged(&options);
        assert_eq!(merged.method, Method::Post);
        assert_eq!(merged.mode, RequestMode::Cors);

        // Header map replaced wholesale
        assert_eq!(merged.headers.len(), 1);
        assert_eq!(merged.headers["X-Trace"], "abc");
        assert!(!merged.headers.contains_key("Accept"));
    }

    #[test]
    fn test_extra_headers_override() {
        let mut extra = BTreeMap::new();
        extra.insert("Accept".to_string(), "application/vnd.soc+json".to_string());
        extra.insert("X-Client".to_string(), "socdash".to_string());

        let config = RequestConfig::default().with_extra_headers(&extra);
        assert_eq!(config.headers["Accept"], "application/vnd.soc+json");
        assert_eq!(config.headers["X-Client"], "socdash");
        assert_eq!(config.headers["Content-Type"], "application/json");
    }

    #[test]
    fn test_method_serde_uppercase() {
        let json = serde_json::to_string(&Method::Delete).unwrap();
        assert_eq!(json, "\"DELETE\"");
        let mode: RequestMode = serde_json::from_str("\"same-origin\"").unwrap();
        assert_eq!(mode, RequestMode::SameOrigin);
    }
}
