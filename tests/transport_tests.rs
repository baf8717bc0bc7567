use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use openrouter_completions::{
    CompletionsRequest, HttpRequest, HttpResponse, HttpTransport, LlmError, OpenRouterClient,
    OpenRouterConfig, ValidationError,
};
use serde_json::Value;

/// Answers every completions call with a fixed body and records what it saw.
struct CountingTransport {
    calls: AtomicUsize,
    last_request: Mutex<Option<HttpRequest>>,
    status: u16,
    body: &'static str,
}

impl CountingTransport {
    fn answering(body: &'static str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
            status: 200,
            body,
        })
    }

    fn failing(status: u16, body: &'static str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
            status,
            body,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_request(&self) -> HttpRequest {
        self.last_request
            .lock()
            .unwrap()
            .clone()
            .expect("transport was called")
    }
}

#[async_trait]
impl HttpTransport for CountingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);
        Ok(HttpResponse {
            status: self.status,
            body: Bytes::from_static(self.body.as_bytes()),
        })
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

fn client_with(transport: Arc<CountingTransport>, config: OpenRouterConfig) -> OpenRouterClient {
    OpenRouterClient::new(
        "valid-api-key",
        config
            .with_base_url("http://mock.local")
            .with_transport(transport),
    )
    .expect("client should build")
}

#[tokio::test]
async fn valid_request_is_dispatched_once() {
    let transport = CountingTransport::answering(r#"{"choices":[{"text":"2"}]}"#);
    let client = client_with(transport.clone(), OpenRouterConfig::new());
    assert_eq!(client.transport_name(), "counting");

    let response = client
        .completions(&CompletionsRequest::new(
            "Answer without explanation. What is 1 + 1 =",
        ))
        .await
        .expect("completion");

    assert_eq!(response.choices[0].text, "2");
    assert_eq!(transport.calls(), 1);

    let request = transport.last_request();
    assert_eq!(request.url, "http://mock.local/api/v1/chat/completions");
    assert_eq!(request.header("Authorization"), Some("Bearer valid-api-key"));
    assert_eq!(request.header("Content-Type"), Some("application/json"));
    assert_eq!(request.header("HTTP-Referer"), None);
    assert_eq!(request.header("X-Title"), None);

    let body: Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "prompt": "Answer without explanation. What is 1 + 1 =" })
    );
}

#[tokio::test]
async fn sampling_floats_keep_their_written_precision() {
    let transport = CountingTransport::answering(r#"{"choices":[{"text":"2"}]}"#);
    let client = client_with(transport.clone(), OpenRouterConfig::new());

    client
        .completions(
            &CompletionsRequest::new("p")
                .with_temperature(0.7)
                .with_top_p(0.1),
        )
        .await
        .expect("completion");

    let request = transport.last_request();
    let body = std::str::from_utf8(&request.body).unwrap();
    assert_eq!(body, r#"{"prompt":"p","temperature":0.7,"top_p":0.1}"#);
}

#[tokio::test]
async fn validation_failures_never_reach_the_transport() {
    let transport = CountingTransport::answering(r#"{"choices":[{"text":"2"}]}"#);
    let client = client_with(transport.clone(), OpenRouterConfig::new());

    let cases = [
        (CompletionsRequest::default(), ValidationError::PromptRequired),
        (
            CompletionsRequest::new("hi").with_max_tokens(0),
            ValidationError::MaxTokenOutOfRange,
        ),
        (
            CompletionsRequest::new("hi").with_temperature(2.5),
            ValidationError::TemperatureOutOfRange,
        ),
        (
            CompletionsRequest::new("hi").with_top_k(-3),
            ValidationError::TopKOutOfRange,
        ),
    ];

    for (request, expected) in cases {
        let err = client.completions(&request).await.expect_err("invalid");
        assert_eq!(err.validation(), Some(expected));
    }

    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn attribution_headers_are_forwarded() {
    let transport = CountingTransport::answering(r#"{"choices":[]}"#);
    let client = client_with(
        transport.clone(),
        OpenRouterConfig::new()
            .with_app_url("https://example.com")
            .with_app_name("Example"),
    );

    client
        .completions(&CompletionsRequest::new("ping"))
        .await
        .expect("completion");

    let request = transport.last_request();
    assert_eq!(request.header("HTTP-Referer"), Some("https://example.com"));
    assert_eq!(request.header("X-Title"), Some("Example"));
}

#[tokio::test]
async fn error_status_from_transport_is_surfaced() {
    let transport = CountingTransport::failing(
        401,
        r#"{"error":{"code":401,"message":"No auth credentials found"}}"#,
    );
    let client = client_with(transport.clone(), OpenRouterConfig::new());

    let err = client
        .completions(&CompletionsRequest::new("ping"))
        .await
        .expect_err("unauthorized");

    assert_eq!(transport.calls(), 1);
    assert_eq!(
        err.api_kind(),
        Some(openrouter_completions::ApiErrorKind::Unauthorized)
    );
    assert!(err.to_string().contains("No auth credentials found"));
}

#[test]
fn empty_api_key_returns_no_client() {
    let transport = CountingTransport::answering("{}");
    let result = OpenRouterClient::new("", OpenRouterConfig::new().with_transport(transport));
    assert!(matches!(result, Err(LlmError::ApiKeyRequired)));
}
