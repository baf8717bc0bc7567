use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Local request validation failures, raised before any network activity.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("prompt is required")]
    PromptRequired,

    #[error("response format or seed parameter is only available for OpenAI models")]
    ParameterRestrictedToProvider,

    #[error("max tokens should be between 1 and context length")]
    MaxTokenOutOfRange,

    #[error("temperature should be between 0.0 and 2.0")]
    TemperatureOutOfRange,

    #[error("top p should be between 0.0 and 1.0")]
    TopPOutOfRange,

    #[error("top k should be between 0 and infinity")]
    TopKOutOfRange,

    #[error("frequency penalty should be between -2 and 2")]
    FrequencyPenaltyOutOfRange,

    #[error("presence penalty should be between -2 and 2")]
    PresencePenaltyOutOfRange,

    #[error("repetition penalty should be between 0.0 and 2.0")]
    RepetitionPenaltyOutOfRange,
}

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("api key is required")]
    ApiKeyRequired,

    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    #[error("API error (status {status_code}): {message}")]
    Api {
        status_code: u16,
        /// Semantic meaning of `status_code`, when OpenRouter documents it.
        kind: Option<ApiErrorKind>,
        message: String,
        metadata: Option<HashMap<String, serde_json::Value>>,
    },

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("Request was cancelled")]
    Cancelled,

    #[error("Provider configuration error: {0}")]
    ProviderConfiguration(String),
}

impl LlmError {
    /// The API error kind, if this is a catalogued remote failure.
    pub fn api_kind(&self) -> Option<ApiErrorKind> {
        match self {
            LlmError::Api { kind, .. } => *kind,
            _ => None,
        }
    }

    /// The validation failure, if the request was rejected locally.
    pub fn validation(&self) -> Option<ValidationError> {
        match self {
            LlmError::Validation(err) => Some(*err),
            _ => None,
        }
    }
}

/// Error status codes documented by OpenRouter.
///
/// See <https://openrouter.ai/docs#errors>.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// Invalid or missing parameters, CORS
    BadRequest,
    /// Invalid credentials
    Unauthorized,
    /// The account or API key has insufficient credits
    PaymentRequired,
    /// The chosen model requires moderation and the input was flagged
    Forbidden,
    /// The request timed out
    Timeout,
    /// The rate limit was exceeded
    RateLimit,
    /// The chosen model is down or returned an invalid response
    BadGateway,
    /// No available model provider meets the routing requirements
    ServiceUnavailable,
}

impl ApiErrorKind {
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            400 => Some(ApiErrorKind::BadRequest),
            401 => Some(ApiErrorKind::Unauthorized),
            402 => Some(ApiErrorKind::PaymentRequired),
            403 => Some(ApiErrorKind::Forbidden),
            408 => Some(ApiErrorKind::Timeout),
            429 => Some(ApiErrorKind::RateLimit),
            502 => Some(ApiErrorKind::BadGateway),
            503 => Some(ApiErrorKind::ServiceUnavailable),
            _ => None,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiErrorKind::BadRequest => 400,
            ApiErrorKind::Unauthorized => 401,
            ApiErrorKind::PaymentRequired => 402,
            ApiErrorKind::Forbidden => 403,
            ApiErrorKind::Timeout => 408,
            ApiErrorKind::RateLimit => 429,
            ApiErrorKind::BadGateway => 502,
            ApiErrorKind::ServiceUnavailable => 503,
        }
    }
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiErrorKind::BadRequest => write!(f, "Bad Request"),
            ApiErrorKind::Unauthorized => write!(f, "Unauthorized"),
            ApiErrorKind::PaymentRequired => write!(f, "Payment Required"),
            ApiErrorKind::Forbidden => write!(f, "Forbidden"),
            ApiErrorKind::Timeout => write!(f, "Request Timeout"),
            ApiErrorKind::RateLimit => write!(f, "Rate Limit Exceeded"),
            ApiErrorKind::BadGateway => write!(f, "Bad Gateway"),
            ApiErrorKind::ServiceUnavailable => write!(f, "Service Unavailable"),
        }
    }
}

/// Error payload OpenRouter returns alongside a non-200 status.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

/// The error object is usually wrapped in `{"error": {...}}`, but bare bodies occur too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Wrapped { error: ErrorResponse },
    Bare(ErrorResponse),
}

impl ErrorResponse {
    pub fn from_body(body: &[u8]) -> Option<Self> {
        match serde_json::from_slice::<ErrorBody>(body).ok()? {
            ErrorBody::Wrapped { error } => Some(error),
            ErrorBody::Bare(error) => Some(error),
        }
    }
}

/// Classify a non-200 response into an [`LlmError::Api`].
pub(crate) fn api_error(status: u16, body: &[u8]) -> LlmError {
    let (message, metadata) = match ErrorResponse::from_body(body) {
        Some(err) if !err.message.is_empty() => (err.message, err.metadata),
        _ => {
            let text = String::from_utf8_lossy(body).trim().to_string();
            if text.is_empty() {
                (format!("Http Status Code: {status}"), None)
            } else {
                (text, None)
            }
        }
    };

    LlmError::Api {
        status_code: status,
        kind: ApiErrorKind::from_status(status),
        message,
        metadata,
    }
}
