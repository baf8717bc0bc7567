//! OpenRouter client for the prompt-style completions endpoint.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, warn};

use crate::completions::{CompletionsRequest, CompletionsResponse};
use crate::core::{
    HttpRequest, HttpTransport, InspectorConfig, LlmError, ReqwestTransport, RequestContext,
    api_error,
};
use crate::provider::constants::openrouter;

/// Construction-time options for [`OpenRouterClient`].
///
/// Unset fields fall back to defaults when the client is built.
#[derive(Clone, Default)]
pub struct OpenRouterConfig {
    /// Defaults to `https://openrouter.ai`.
    pub base_url: Option<String>,
    /// Sent as `HTTP-Referer`, for including the app on openrouter.ai rankings.
    pub app_url: Option<String>,
    /// Sent as `X-Title`. Shows in rankings on openrouter.ai.
    pub app_name: Option<String>,
    /// Defaults to 30 seconds.
    pub timeout: Option<Duration>,
    /// Defaults to a [`ReqwestTransport`].
    pub transport: Option<Arc<dyn HttpTransport>>,
    pub user_agent: Option<String>,
    pub inspector: Option<InspectorConfig>,
}

impl OpenRouterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_app_url(mut self, app_url: impl Into<String>) -> Self {
        self.app_url = Some(app_url.into());
        self
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_inspector(mut self, inspector: InspectorConfig) -> Self {
        self.inspector = Some(inspector);
        self
    }
}

impl fmt::Debug for OpenRouterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenRouterConfig")
            .field("base_url", &self.base_url)
            .field("app_url", &self.app_url)
            .field("app_name", &self.app_name)
            .field("timeout", &self.timeout)
            .field("transport", &self.transport.as_ref().map(|t| t.name()))
            .field("user_agent", &self.user_agent)
            .field("inspector", &self.inspector)
            .finish()
    }
}

/// Client for `POST {base_url}/api/v1/chat/completions`.
///
/// Holds only immutable configuration; clone it or share it behind a
/// reference to issue concurrent calls.
#[derive(Clone)]
pub struct OpenRouterClient {
    api_key: String,
    base_url: String,
    app_url: Option<String>,
    app_name: Option<String>,
    timeout: Duration,
    user_agent: String,
    transport: Arc<dyn HttpTransport>,
    inspector: InspectorConfig,
}

impl OpenRouterClient {
    /// Build a client. Fails with [`LlmError::ApiKeyRequired`] on an empty key.
    pub fn new(api_key: impl Into<String>, config: OpenRouterConfig) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(LlmError::ApiKeyRequired);
        }

        let user_agent = config
            .user_agent
            .unwrap_or_else(|| format!("openrouter-completions/{}", env!("CARGO_PKG_VERSION")));

        let transport = match config.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&user_agent)?),
        };

        let base_url = config
            .base_url
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| openrouter::API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            api_key,
            base_url,
            app_url: config.app_url.filter(|url| !url.is_empty()),
            app_name: config.app_name.filter(|name| !name.is_empty()),
            timeout: config
                .timeout
                .unwrap_or(Duration::from_secs(openrouter::DEFAULT_TIMEOUT_SECS)),
            user_agent,
            transport,
            inspector: config.inspector.unwrap_or_default(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn app_url(&self) -> Option<&str> {
        self.app_url.as_deref()
    }

    pub fn app_name(&self) -> Option<&str> {
        self.app_name.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    fn completions_url(&self) -> String {
        format!("{}{}", self.base_url, openrouter::COMPLETIONS_ENDPOINT)
    }

    fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            (
                "Authorization".to_string(),
                format!("Bearer {}", self.api_key),
            ),
            ("User-Agent".to_string(), self.user_agent.clone()),
        ];

        if let Some(referer) = &self.app_url {
            headers.push(("HTTP-Referer".to_string(), referer.clone()));
        }

        if let Some(title) = &self.app_name {
            headers.push(("X-Title".to_string(), title.clone()));
        }

        headers
    }

    /// Run a completion with only the client timeout as deadline.
    pub async fn completions(
        &self,
        request: &CompletionsRequest,
    ) -> Result<CompletionsResponse, LlmError> {
        self.completions_with_context(request, &RequestContext::default())
            .await
    }

    /// Validate, send and decode a single completion request.
    ///
    /// Validation failures return before the transport is touched. Exactly one
    /// HTTP call is made otherwise; nothing is retried.
    #[tracing::instrument(
        name = "completions",
        skip(self, request, ctx),
        fields(
            base_url = %self.base_url,
            model = request.model.as_deref().unwrap_or("default")
        ),
        err
    )]
    pub async fn completions_with_context(
        &self,
        request: &CompletionsRequest,
        ctx: &RequestContext,
    ) -> Result<CompletionsResponse, LlmError> {
        request.validate()?;

        // Straight to bytes: going through `Value` would widen f32 fields to f64.
        let body = serde_json::to_vec(request).map_err(|e| LlmError::Parse {
            message: "Failed to serialize request".to_string(),
            source: Box::new(e),
        })?;
        self.inspector.inspect_request(&body);

        let http_request = HttpRequest {
            url: self.completions_url(),
            headers: self.headers(),
            body: Bytes::from(body),
        };

        let response = ctx
            .run(self.timeout, self.transport.send(http_request))
            .await?;

        self.inspector
            .inspect_response(response.status, &response.body);

        if response.status != 200 {
            warn!(status = response.status, "API returned error status");
            return Err(api_error(response.status, &response.body));
        }

        let completion: CompletionsResponse =
            serde_json::from_slice(&response.body).map_err(|e| LlmError::Parse {
                message: "Failed to parse API response".to_string(),
                source: Box::new(e),
            })?;

        debug!(
            choices = completion.choices.len(),
            model = %completion.model,
            "Completion received"
        );
        Ok(completion)
    }
}

impl fmt::Debug for OpenRouterClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenRouterClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("app_url", &self.app_url)
            .field("app_name", &self.app_name)
            .field("timeout", &self.timeout)
            .field("transport", &self.transport.name())
            .finish()
    }
}
