//! # openrouter-completions
//!
//! A typed client for OpenRouter's prompt-style completions endpoint.
//! Requests are validated against the service's documented parameter ranges
//! before anything goes over the wire.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use openrouter_completions::{CompletionsRequest, OpenRouterClient, OpenRouterConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OpenRouterClient::new(
//!         std::env::var("OPENROUTER_API_KEY")?,
//!         OpenRouterConfig::new().with_app_name("My App"),
//!     )?;
//!
//!     let request = CompletionsRequest::new("Answer without explanation. What is 1 + 1 =")
//!         .with_model("openai/gpt-4o-mini")
//!         .with_max_tokens(8);
//!
//!     let response = client.completions(&request).await?;
//!     println!("{}", response.first_text().unwrap_or_default());
//!     Ok(())
//! }
//! ```
//!
//! ## Cancellation
//!
//! [`RequestContext`] carries a per-call deadline and an optional
//! [`CancellationToken`]; pass it to
//! [`OpenRouterClient::completions_with_context`].

pub mod completions;
pub mod core;
pub mod provider;

pub use completions::{
    Choice, CompletionsRequest, CompletionsResponse, ResponseFormat, ResponseFormatType, Usage,
};
pub use crate::core::{
    ApiErrorKind, ErrorResponse, HttpRequest, HttpResponse, HttpTransport, InspectorConfig,
    LlmError, ReqwestTransport, RequestContext, ValidationError,
};
pub use provider::{API_KEY_ENV_VAR, OpenRouterClient, OpenRouterConfig};
pub use tokio_util::sync::CancellationToken;
