//! LLM gateway configuration from TOML (`[llm]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    /// OpenAI-compatible API root (default: OpenRouter)
    pub base_url: String,
    /// Model identifier sent with every completion (default: "openai/gpt-4o")
    pub model: String,
    /// Bearer API key. Usually supplied via `OPENROUTER_API_KEY`.
    pub api_key: Option<String>,
    /// Sampling temperature for all pipeline steps (default: 0.7)
    pub temperature: f32,
    /// HTTP client timeout per request in seconds (default: 60)
    pub request_timeout_secs: u64,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://openrouter.ai/api/v1".to_string(),
            model: "openai/gpt-4o".to_string(),
            api_key: None,
            temperature: 0.7,
            request_timeout_secs: 60,
        }
    }
}
