use serde::{Deserialize, Serialize};

use crate::core::ValidationError;
use crate::provider::constants::openrouter::OPENAI_MODEL_PREFIX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormatType {
    JsonObject,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub r#type: ResponseFormatType,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            r#type: ResponseFormatType::JsonObject,
        }
    }

    pub fn text() -> Self {
        Self {
            r#type: ResponseFormatType::Text,
        }
    }
}

/// A prompt-style completion request.
///
/// Every field except `prompt` is optional and left out of the JSON body when
/// unset, so the service applies its own defaults.
/// See <https://openrouter.ai/docs#request>.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionsRequest {
    pub prompt: String,

    /// Falls back to the account's default model when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// OpenAI models only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,

    /// OpenAI models only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,

    /// 1 to context length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<i32>,

    /// 0.0 to 2.0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// 0.0 to 1.0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    /// 0 or above. Not available for OpenAI models.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<i32>,

    /// -2.0 to 2.0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,

    /// -2.0 to 2.0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,

    /// 0.0 to 2.0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repetition_penalty: Option<f32>,

    /// Prompt transforms, e.g. `middle-out`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transforms: Option<Vec<String>>,

    /// Models to fall back to, in order, if the primary one fails.
    #[serde(rename = "models", skip_serializing_if = "Option::is_none")]
    pub fallback_models: Option<Vec<String>>,
}

impl CompletionsRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_stop(mut self, stop: Vec<String>) -> Self {
        self.stop = Some(stop);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: i32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_top_k(mut self, top_k: i32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn with_frequency_penalty(mut self, penalty: f32) -> Self {
        self.frequency_penalty = Some(penalty);
        self
    }

    pub fn with_presence_penalty(mut self, penalty: f32) -> Self {
        self.presence_penalty = Some(penalty);
        self
    }

    pub fn with_repetition_penalty(mut self, penalty: f32) -> Self {
        self.repetition_penalty = Some(penalty);
        self
    }

    pub fn with_transforms(mut self, transforms: Vec<String>) -> Self {
        self.transforms = Some(transforms);
        self
    }

    pub fn with_fallback_models(mut self, models: Vec<String>) -> Self {
        self.fallback_models = Some(models);
        self
    }

    /// Check the request against the service's documented parameter ranges.
    ///
    /// Checks run in a fixed order and the first violation is returned.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.prompt.is_empty() {
            return Err(ValidationError::PromptRequired);
        }

        // Only trips when both parameters are present together.
        if self.response_format.is_some()
            && self.seed.is_some()
            && let Some(model) = &self.model
            && !model.starts_with(OPENAI_MODEL_PREFIX)
        {
            return Err(ValidationError::ParameterRestrictedToProvider);
        }

        if self.max_tokens.is_some_and(|max| max < 1) {
            return Err(ValidationError::MaxTokenOutOfRange);
        }

        check_range(self.temperature, 0.0, 2.0, ValidationError::TemperatureOutOfRange)?;
        check_range(self.top_p, 0.0, 1.0, ValidationError::TopPOutOfRange)?;

        if self.top_k.is_some_and(|k| k < 0) {
            return Err(ValidationError::TopKOutOfRange);
        }

        check_range(
            self.frequency_penalty,
            -2.0,
            2.0,
            ValidationError::FrequencyPenaltyOutOfRange,
        )?;
        check_range(
            self.presence_penalty,
            -2.0,
            2.0,
            ValidationError::PresencePenaltyOutOfRange,
        )?;
        check_range(
            self.repetition_penalty,
            0.0,
            2.0,
            ValidationError::RepetitionPenaltyOutOfRange,
        )?;

        Ok(())
    }
}

/// Inclusive bounds; NaN is out of range.
fn check_range(
    value: Option<f32>,
    min: f32,
    max: f32,
    err: ValidationError,
) -> Result<(), ValidationError> {
    match value {
        Some(v) if !(min..=max).contains(&v) => Err(err),
        _ => Ok(()),
    }
}
