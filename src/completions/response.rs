use serde::{Deserialize, Serialize};

/// A single generated continuation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// Non-streaming response to a prompt request.
///
/// OpenRouter can answer in several shapes (streaming, chat, prompt, error).
/// Only the prompt shape is modelled here since streaming and chat messages
/// are not supported by this client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionsResponse {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub choices: Vec<Choice>,

    /// Unix timestamp, in seconds.
    #[serde(default)]
    pub created: i64,

    /// The model that actually served the request.
    #[serde(default)]
    pub model: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl CompletionsResponse {
    pub fn first_text(&self) -> Option<&str> {
        self.choices.first().map(|choice| choice.text.as_str())
    }
}
