//! `reqwest`-backed transport.

use async_trait::async_trait;

use socdash_core::{ApiError, Method};

use super::{HttpRequest, HttpResponse, Transport};
use crate::ClientError;

/// HTTP transport over a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a default client.
    ///
    /// No client-wide timeout is set; per-request timeouts come from
    /// [`HttpRequest::timeout`].
    pub fn new() -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an existing client (custom TLS, proxies, connection limits).
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

/// Reason phrase for `status`, or the bare code when it has none (e.g. 599).
fn status_text(status: reqwest::StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            // Content-Type already travels in the header map
            builder = builder.body(body.to_string());
        }

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::network(format!("request timed out: {e}"))
            } else {
                ApiError::network(e.to_string())
            }
        })?;

        let status = response.status();
        let status_text = status_text(status);

        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text,
            body: body.to_vec(),
        })
    }

    fn name(&self) -> &str {
        "reqwest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RecordingObserver, ResilientClient};
    use serde_json::json;
    use socdash_core::{ClientConfig, EndpointPath, FallbackTable};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serve a single canned HTTP/1.1 response and report the raw request.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let _ = tx.send(String::from_utf8_lossy(&buf).to_string());

            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        (format!("http://{addr}"), rx)
    }

    fn client_for(backend_url: String, observer: Arc<RecordingObserver>) -> ResilientClient {
        client_with_config(
            ClientConfig {
                backend_url,
                ..Default::default()
            },
            observer,
        )
    }

    fn client_with_config(config: ClientConfig, observer: Arc<RecordingObserver>) -> ResilientClient {
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        ResilientClient::builder()
            .config(config)
            .transport(Arc::new(ReqwestTransport::from_client(http)))
            .observer(observer)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_live_round_trip_over_loopback() {
        let (url, request_rx) = serve_once("200 OK", r#"{"agents":[{"id":"live-1"}],"total":1}"#).await;
        let client = client_for(url, Arc::new(RecordingObserver::new()));

        let path = EndpointPath::new("/agents").unwrap();
        let response = client.call(&path, None).await;

        assert!(!response.is_fallback());
        assert_eq!(response.payload()["agents"][0]["id"], "live-1");

        let raw = request_rx.await.unwrap().to_lowercase();
        assert!(raw.starts_with("get /api/agents http/1.1"));
        assert!(raw.contains("accept: application/json"));
        assert!(raw.contains("content-type: application/json"));
        assert!(!raw.contains("authorization"));
    }

    #[tokio::test]
    async fn test_server_error_over_loopback_uses_fallback() {
        let (url, _request_rx) = serve_once("503 Service Unavailable", "{}").await;
        let observer = Arc::new(RecordingObserver::new());
        let client = client_for(url, observer.clone());

        let path = EndpointPath::new("/agents").unwrap();
        let response = client.call(&path, None).await;

        assert!(response.is_fallback());
        assert_eq!(
            response.reason(),
            Some(&ApiError::http_status(503, "Service Unavailable"))
        );
        assert_eq!(
            response.payload(),
            &FallbackTable::security_ops().rules()[1].payload
        );
        assert_eq!(observer.failures().len(), 1);
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Grab a free port, then close the listener so nothing is there
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(format!("http://{addr}"), Arc::new(RecordingObserver::new()));
        let path = EndpointPath::new("/reports").unwrap();
        let response = client.call(&path, None).await;

        assert!(matches!(response.reason(), Some(ApiError::Network { .. })));
        assert_eq!(response.payload()["fallback"], json!(true));
    }

    #[tokio::test]
    async fn test_silent_server_times_out_to_fallback() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Accept and read the request, then never answer
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut chunk = [0u8; 1024];
            let _ = socket.read(&mut chunk).await;
            tokio::time::sleep(Duration::from_secs(30)).await;
            drop(socket);
        });

        let observer = Arc::new(RecordingObserver::new());
        let config = ClientConfig {
            backend_url: format!("http://{addr}"),
            timeout: Some(Duration::from_millis(200)),
            ..Default::default()
        };
        let client = client_with_config(config, observer.clone());

        let path = EndpointPath::new("/agents").unwrap();
        let response = tokio::time::timeout(Duration::from_secs(5), client.call(&path, None))
            .await
            .expect("request timeout was not applied");

        match response.reason() {
            Some(ApiError::Network { message }) => {
                assert!(message.contains("timed out"), "unexpected message: {message}")
            }
            other => panic!("Expected network error, got {other:?}"),
        }
        assert_eq!(response.payload(), &socdash_core::fallback::payloads::agents());
        assert_eq!(observer.failures().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_status_keeps_code_as_text() {
        let (url, _request_rx) = serve_once("599 Whatever", "{}").await;
        let client = client_for(url, Arc::new(RecordingObserver::new()));

        let path = EndpointPath::new("/alerts").unwrap();
        let response = client.call(&path, None).await;

        assert_eq!(response.reason(), Some(&ApiError::http_status(599, "599")));
    }

    #[test]
    fn test_status_text() {
        assert_eq!(status_text(reqwest::StatusCode::NOT_FOUND), "Not Found");
        let odd = reqwest::StatusCode::from_u16(599).unwrap();
        assert_eq!(status_text(odd), "599");
    }
}
