//! Send a single prompt to OpenRouter and print the first choice.
//!
//! Run with: RUST_LOG=openrouter_completions=debug cargo run --example completions
use dotenv::dotenv;
use openrouter_completions::{
    API_KEY_ENV_VAR, CompletionsRequest, InspectorConfig, OpenRouterClient, OpenRouterConfig,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var(API_KEY_ENV_VAR)?;

    let inspector = InspectorConfig::new().with_request_inspector(|req| {
        println!("━━━ REQUEST ━━━");
        println!("{}", serde_json::to_string_pretty(req).unwrap_or_default());
    });

    let client = OpenRouterClient::new(
        api_key,
        OpenRouterConfig::new()
            .with_app_url("https://example.com")
            .with_app_name("openrouter-completions demo")
            .with_inspector(inspector),
    )?;

    let request = CompletionsRequest::new("Answer without explanation. What is 1 + 1 =")
        .with_model("openai/gpt-4o-mini")
        .with_max_tokens(8)
        .with_temperature(0.0);

    let response = client.completions(&request).await?;

    println!("━━━ RESPONSE ━━━");
    println!("model: {}", response.model);
    for (i, choice) in response.choices.iter().enumerate() {
        println!(
            "[{i}] {} (finish_reason: {})",
            choice.text.trim(),
            choice.finish_reason.as_deref().unwrap_or("n/a")
        );
    }

    Ok(())
}
