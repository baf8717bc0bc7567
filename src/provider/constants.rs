pub mod openrouter {
    pub const API_BASE: &str = "https://openrouter.ai";
    pub const COMPLETIONS_ENDPOINT: &str = "/api/v1/chat/completions";
    pub const API_KEY_ENV_VAR: &str = "OPENROUTER_API_KEY";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// Model identifiers served by OpenAI start with this.
    pub const OPENAI_MODEL_PREFIX: &str = "openai";
}
