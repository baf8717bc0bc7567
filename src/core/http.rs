//! HTTP transport seam shared by every request the client makes.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, warn};

use super::error::LlmError;

/// A JSON POST request, fully assembled and ready to dispatch.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

/// The capability the client consumes to reach the network.
///
/// Implementations own connection management, TLS and proxies. They must be
/// safe to share across concurrent calls.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, LlmError>;

    /// Short label used in logs and diagnostics.
    fn name(&self) -> &'static str {
        "custom"
    }
}

/// Default transport backed by a [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(user_agent: &str) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                LlmError::ProviderConfiguration(format!("Failed to build reqwest client: {e}"))
            })?;

        Ok(Self { client })
    }
}

impl From<reqwest::Client> for ReqwestTransport {
    fn from(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[tracing::instrument(
        name = "http_post_json",
        skip(self, request),
        fields(url = %request.url),
        err
    )]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, LlmError> {
        let mut req_builder = self.client.post(&request.url).body(request.body);

        for (name, value) in &request.headers {
            req_builder = req_builder.header(name, value);
        }

        let res = req_builder.send().await.map_err(|e| {
            warn!(error = %e, "HTTP request failed");
            LlmError::Network {
                message: "Failed to complete request".to_string(),
                source: Box::new(e),
            }
        })?;

        let status = res.status().as_u16();
        let body = res.bytes().await.map_err(|e| LlmError::Network {
            message: "Failed to read response body".to_string(),
            source: Box::new(e),
        })?;

        debug!(status, bytes = body.len(), "HTTP response received");
        Ok(HttpResponse { status, body })
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

pub type Inspector = Arc<dyn Fn(&serde_json::Value) + Send + Sync>;

/// Hooks that observe raw JSON traffic, for debugging.
#[derive(Clone, Default)]
pub struct InspectorConfig {
    /// Called with the serialized request body before dispatch.
    pub request_inspector: Option<Inspector>,
    /// Called with the response body, including error bodies.
    pub response_inspector: Option<Inspector>,
}

impl InspectorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request_inspector<F>(mut self, inspector: F) -> Self
    where
        F: Fn(&serde_json::Value) + Send + Sync + 'static,
    {
        self.request_inspector = Some(Arc::new(inspector));
        self
    }

    pub fn with_response_inspector<F>(mut self, inspector: F) -> Self
    where
        F: Fn(&serde_json::Value) + Send + Sync + 'static,
    {
        self.response_inspector = Some(Arc::new(inspector));
        self
    }

    /// The body is only decoded when a request hook is installed.
    pub(crate) fn inspect_request(&self, body: &[u8]) {
        if let Some(ref inspector) = self.request_inspector
            && let Ok(value) = serde_json::from_slice::<serde_json::Value>(body)
        {
            inspector(&value);
        }
    }

    /// Non-JSON bodies are wrapped so the hook always sees an object.
    pub(crate) fn inspect_response(&self, status: u16, body: &[u8]) {
        if let Some(ref inspector) = self.response_inspector {
            let value = serde_json::from_slice(body).unwrap_or_else(|_| {
                serde_json::json!({
                    "error": String::from_utf8_lossy(body),
                    "status_code": status
                })
            });
            inspector(&value);
        }
    }
}

impl fmt::Debug for InspectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InspectorConfig")
            .field("request_inspector", &self.request_inspector.is_some())
            .field("response_inspector", &self.response_inspector.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_header_lookup_ignores_case() {
        let request = HttpRequest {
            url: "http://localhost/api".to_string(),
            headers: vec![("X-Title".to_string(), "demo".to_string())],
            body: Bytes::new(),
        };

        assert_eq!(request.header("x-title"), Some("demo"));
        assert_eq!(request.header("HTTP-Referer"), None);
    }

    #[test]
    fn test_response_inspector_wraps_non_json_bodies() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let config = InspectorConfig::new()
            .with_response_inspector(move |value| sink.lock().unwrap().push(value.clone()));

        config.inspect_response(200, br#"{"choices": []}"#);
        config.inspect_response(502, b"bad gateway");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen[0]["choices"].is_array());
        assert_eq!(seen[1]["error"], "bad gateway");
        assert_eq!(seen[1]["status_code"], 502);
    }

    #[test]
    fn test_request_inspector_sees_decoded_body() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let config = InspectorConfig::new()
            .with_request_inspector(move |value| sink.lock().unwrap().push(value.clone()));

        config.inspect_request(br#"{"prompt":"p","temperature":0.7}"#);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0]["prompt"], "p");
        assert_eq!(seen[0]["temperature"], 0.7);
    }

    #[test]
    fn test_reqwest_transport_reports_its_name() {
        let transport = ReqwestTransport::from(reqwest::Client::new());
        assert_eq!(transport.name(), "reqwest");
    }
}
