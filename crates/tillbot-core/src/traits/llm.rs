//! LLM trait and related types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TillResult;
use crate::types::Message;

/// Response from LLM generation.
#[derive(Debug, Clone, Default)]
pub struct LlmResponse {
    /// Generated text content.
    pub content: Option<String>,
    /// Token usage statistics.
    pub usage: Option<TokenUsage>,
}

impl LlmResponse {
    /// Get the content or an empty string.
    pub fn content_or_empty(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}

/// Token usage statistics.
#[derive(Debug, Clone, Default)]
pub struct TokenUsage {
    /// Tokens in the prompt.
    pub prompt_tokens: u32,
    /// Tokens in the completion.
    pub completion_tokens: u32,
    /// Total tokens.
    pub total_tokens: u32,
}

/// Configuration options for LLM generation.
#[derive(Debug, Clone, Default)]
pub struct GenerationOptions {
    /// Sampling temperature (0.0 - 2.0).
    pub temperature: Option<f32>,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// Response format.
    pub response_format: Option<ResponseFormat>,
}

/// Response format for LLM output.
#[derive(Debug, Clone)]
pub enum ResponseFormat {
    /// Plain text response.
    Text,
    /// JSON constrained to a specific schema.
    JsonSchema(serde_json::Value),
}

/// An inline binary payload for multimodal requests.
///
/// `data` is the base64 payload of the file with any data-URL prefix
/// already stripped by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineData {
    /// Media type of the payload (e.g. "application/pdf", "image/png").
    pub mime_type: String,
    /// Base64-encoded file bytes.
    pub data: String,
}

impl InlineData {
    /// Create a new inline payload.
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }
}

/// Core LLM trait - all model providers implement this.
///
/// Providers receive the system instruction as a leading `System` message
/// and map it into whatever dedicated field their wire format uses.
#[async_trait]
pub trait Llm: Send + Sync {
    /// Generate a response for an ordered conversation.
    async fn generate(
        &self,
        messages: &[Message],
        options: Option<GenerationOptions>,
    ) -> TillResult<LlmResponse>;

    /// Generate a response for a single-turn multimodal request combining
    /// an instruction prompt with an inline file payload.
    async fn generate_with_media(
        &self,
        prompt: &str,
        media: &InlineData,
        options: Option<GenerationOptions>,
    ) -> TillResult<LlmResponse>;

    /// Get the model name.
    fn model_name(&self) -> &str;

    /// Check if this model accepts inline file/image payloads.
    fn supports_vision(&self) -> bool {
        false
    }
}

/// LLM configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model name/identifier.
    pub model: String,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key (if not using environment variable).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL for API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_tokens() -> u32 {
    2000
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: String::new(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_config_defaults() {
        let config = LlmConfig::default();
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.max_tokens, 2000);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_llm_config_serde_defaults() {
        let config: LlmConfig = serde_json::from_str(r#"{"model":"gemini-2.5-flash"}"#).unwrap();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.temperature, 0.2);
    }

    #[test]
    fn test_response_content_or_empty() {
        let response = LlmResponse::default();
        assert_eq!(response.content_or_empty(), "");
    }
}
