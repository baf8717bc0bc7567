//! Bound a completion with a deadline and cancel another one from a second task.
//!
//! Run with: cargo run --example cancellation
use std::time::Duration;

use dotenv::dotenv;
use openrouter_completions::{
    API_KEY_ENV_VAR, CancellationToken, CompletionsRequest, LlmError, OpenRouterClient,
    OpenRouterConfig, RequestContext,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = OpenRouterClient::new(std::env::var(API_KEY_ENV_VAR)?, OpenRouterConfig::new())?;
    let request = CompletionsRequest::new("Write a long poem about the sea.").with_max_tokens(512);

    // A deadline far shorter than a long generation needs.
    let ctx = RequestContext::new().with_timeout(Duration::from_millis(300));
    match client.completions_with_context(&request, &ctx).await {
        Err(LlmError::Timeout { timeout }) => println!("Timed out after {timeout:?}"),
        Ok(res) => println!("Finished early: {}", res.first_text().unwrap_or_default()),
        Err(e) => println!("Error: {e}"),
    }

    let token = CancellationToken::new();
    let ctx = RequestContext::new().with_cancellation(token.clone());
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        token.cancel();
    });

    match client.completions_with_context(&request, &ctx).await {
        Err(LlmError::Cancelled) => println!("Cancelled by caller"),
        Ok(res) => println!("Finished early: {}", res.first_text().unwrap_or_default()),
        Err(e) => println!("Error: {e}"),
    }

    Ok(())
}
