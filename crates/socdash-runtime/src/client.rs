//! Resilient fetch client.
//!
//! Every call resolves to an [`ApiResponse`]. Transport failures, non-2xx
//! statuses and unparseable bodies are caught here and replaced by a payload
//! from the injected [`FallbackTable`].
//!
//! # Execution Flow
//! 1. Build the target: `backend_url + base_prefix + path`
//! 2. Merge per-call options over the default request configuration
//! 3. Send through the transport
//! 4. Reject statuses outside 200..=299
//! 5. Parse the body as JSON, returned unchanged on success
//! 6. On any failure in 3-5, substitute the first matching fallback

use serde_json::Value as JsonValue;
use std::sync::Arc;

use socdash_core::{
    ApiError, ApiResponse, ClientConfig, EndpointPath, FallbackTable, RequestConfig,
    RequestOptions,
};

use crate::accounting::{CallCounter, CallUsage};
use crate::observer::{CallEvent, CallObserver, TracingObserver};
use crate::transport::{HttpRequest, Transport};
use crate::ClientError;

/// Client that never surfaces call failures to its caller.
///
/// Holds no per-call mutable state besides atomic counters, so one instance
/// can serve any number of concurrent calls.
pub struct ResilientClient {
    transport: Arc<dyn Transport>,
    fallbacks: Arc<FallbackTable>,
    observer: Arc<dyn CallObserver>,
    config: ClientConfig,
    defaults: RequestConfig,
    usage: CallCounter,
}

impl std::fmt::Debug for ResilientClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResilientClient")
            .field("transport", &self.transport.name())
            .field("fallback_rules", &self.fallbacks.len())
            .field("config", &self.config)
            .finish()
    }
}

impl ResilientClient {
    pub fn builder() -> ResilientClientBuilder {
        ResilientClientBuilder::new()
    }

    /// Fetch `path`, falling back to static data on any failure.
    pub async fn call(&self, path: &EndpointPath, options: Option<&RequestOptions>) -> ApiResponse {
        let url = self.target(path);
        let request_config = match options {
            Some(options) => self.defaults.merged(options),
            None => self.defaults.clone(),
        };

        self.observer.observe(&CallEvent::Request {
            url: url.clone(),
            method: request_config.method,
        });

        match self.fetch(url.clone(), request_config).await {
            Ok((status, payload)) => {
                self.observer.observe(&CallEvent::Success { url, status });
                self.usage.record_live();
                ApiResponse::Live { status, payload }
            }
            Err(error) => {
                let substitution = self.fallbacks.substitute(path, &error);
                let area = substitution.rule.map(|rule| rule.area.clone());

                self.observer.observe(&CallEvent::Failure {
                    url,
                    error: error.clone(),
                    area: area.clone(),
                });
                self.usage.record_fallback(area.as_deref());

                ApiResponse::Fallback {
                    payload: substitution.payload,
                    reason: error,
                    area,
                }
            }
        }
    }

    /// Fetch several paths concurrently. Results keep the input order.
    pub async fn call_many<'a, I>(&self, paths: I) -> Vec<ApiResponse>
    where
        I: IntoIterator<Item = &'a EndpointPath>,
    {
        futures::future::join_all(paths.into_iter().map(|path| self.call(path, None))).await
    }

    /// The live part of a call. Every error here is recoverable.
    async fn fetch(
        &self,
        url: String,
        request_config: RequestConfig,
    ) -> Result<(u16, JsonValue), ApiError> {
        let request = HttpRequest {
            method: request_config.method,
            url,
            headers: request_config.headers,
            mode: request_config.mode,
            body: request_config.body,
            timeout: self.config.timeout,
        };

        let response = self.transport.send(request).await?;

        if !response.is_success() {
            return Err(ApiError::http_status(response.status, response.status_text));
        }

        let payload = serde_json::from_slice(&response.body)
            .map_err(|e| ApiError::malformed(e.to_string()))?;

        Ok((response.status, payload))
    }

    /// Full request target for `path`.
    pub fn target(&self, path: &EndpointPath) -> String {
        path.target(&self.config.backend_url, &self.config.base_prefix)
    }

    pub fn fallbacks(&self) -> &FallbackTable {
        &self.fallbacks
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Live/fallback counts so far.
    pub fn usage(&self) -> CallUsage {
        self.usage.snapshot()
    }

    pub fn reset_usage(&self) {
        self.usage.reset();
    }
}

/// Builder for [`ResilientClient`].
pub struct ResilientClientBuilder {
    transport: Option<Arc<dyn Transport>>,
    fallbacks: Option<Arc<FallbackTable>>,
    observer: Option<Arc<dyn CallObserver>>,
    config: ClientConfig,
}

impl ResilientClientBuilder {
    pub fn new() -> Self {
        Self {
            transport: None,
            fallbacks: None,
            observer: None,
            config: ClientConfig::default(),
        }
    }

    /// Set the transport. Required unless the `http` feature is enabled.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Set the fallback table. Defaults to [`FallbackTable::security_ops`].
    pub fn fallbacks(mut self, fallbacks: Arc<FallbackTable>) -> Self {
        self.fallbacks = Some(fallbacks);
        self
    }

    /// Set the observer. Defaults to [`TracingObserver`].
    pub fn observer(mut self, observer: Arc<dyn CallObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ResilientClient, ClientError> {
        self.config.validate()?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => default_transport()?,
        };

        let defaults = self.config.request_defaults();

        tracing::debug!(
            transport = transport.name(),
            backend_url = %self.config.backend_url,
            base_prefix = %self.config.base_prefix,
            "Building resilient client"
        );

        Ok(ResilientClient {
            transport,
            fallbacks: self.fallbacks.unwrap_or_else(FallbackTable::security_ops),
            observer: self
                .observer
                .unwrap_or_else(|| Arc::new(TracingObserver)),
            config: self.config,
            defaults,
            usage: CallCounter::new(),
        })
    }
}

impl Default for ResilientClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "http")]
fn default_transport() -> Result<Arc<dyn Transport>, ClientError> {
    Ok(Arc::new(crate::transport::ReqwestTransport::new()?))
}

#[cfg(not(feature = "http"))]
fn default_transport() -> Result<Arc<dyn Transport>, ClientError> {
    Err(ClientError::NoTransport)
}
