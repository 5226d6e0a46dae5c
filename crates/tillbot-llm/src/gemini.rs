//! Google Gemini LLM provider implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use tillbot_core::error::{TillError, TillResult};
use tillbot_core::traits::{
    GenerationOptions, InlineData, Llm, LlmConfig, LlmResponse, ResponseFormat, TokenUsage,
};
use tillbot_core::types::{Message, MessageRole};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Gemini LLM provider.
pub struct GeminiLlm {
    client: Client,
    config: LlmConfig,
    base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<GeminiInlineData>,
}

impl GeminiPart {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    fn inline_data(mime_type: &str, data: &str) -> Self {
        Self {
            text: None,
            inline_data: Some(GeminiInlineData {
                mime_type: mime_type.to_string(),
                data: data.to_string(),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    usage_metadata: Option<GeminiUsage>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

impl GeminiLlm {
    /// Create a new Gemini LLM provider.
    pub fn new(config: LlmConfig) -> TillResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .ok_or_else(|| {
                TillError::Configuration("Gemini API key not found. Set GEMINI_API_KEY environment variable or provide api_key in config.".to_string())
            })?;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            api_key
                .parse()
                .map_err(|_| TillError::Configuration("Invalid API key format".to_string()))?,
        );
        headers.insert(
            "content-type",
            "application/json"
                .parse()
                .map_err(|_| TillError::Configuration("Invalid content type".to_string()))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| {
                TillError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| GEMINI_API_URL.to_string());

        let mut config = config;
        if config.model.is_empty() {
            config.model = DEFAULT_MODEL.to_string();
        }

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    fn generation_config(&self, options: &GenerationOptions) -> GeminiGenerationConfig {
        let (response_mime_type, response_schema) = match &options.response_format {
            Some(ResponseFormat::JsonSchema(schema)) => {
                (Some("application/json".to_string()), Some(schema.clone()))
            }
            _ => (None, None),
        };

        GeminiGenerationConfig {
            temperature: Some(options.temperature.unwrap_or(self.config.temperature)),
            max_output_tokens: Some(options.max_tokens.unwrap_or(self.config.max_tokens)),
            response_mime_type,
            response_schema,
        }
    }

    fn build_chat_request(&self, messages: &[Message], options: &GenerationOptions) -> GeminiRequest {
        // The system instruction travels in its own field, not in contents
        let system_instruction = messages
            .iter()
            .find(|m| matches!(m.role, MessageRole::System))
            .map(|m| GeminiContent {
                role: None,
                parts: vec![GeminiPart::text(&m.content)],
            });

        let contents: Vec<GeminiContent> = messages
            .iter()
            .filter(|m| !matches!(m.role, MessageRole::System))
            .map(|m| GeminiContent {
                role: Some(
                    match m.role {
                        MessageRole::Model => "model",
                        _ => "user",
                    }
                    .to_string(),
                ),
                parts: vec![GeminiPart::text(&m.content)],
            })
            .collect();

        GeminiRequest {
            system_instruction,
            contents,
            generation_config: self.generation_config(options),
        }
    }

    async fn dispatch(&self, request: &GeminiRequest) -> TillResult<LlmResponse> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.config.model
        );

        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| TillError::llm(format!("Gemini API request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TillError::llm(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            let error: Result<GeminiError, _> = serde_json::from_str(&body);
            let message = error
                .map(|e| e.error.message)
                .unwrap_or_else(|_| body.clone());
            tracing::warn!(status = %status, "Gemini API error: {}", message);
            return Err(TillError::from_http_status(status.as_u16(), &message));
        }

        let response: GeminiResponse = serde_json::from_str(&body)
            .map_err(|e| TillError::llm(format!("Failed to parse response: {}", e)))?;

        let content = response.candidates.first().and_then(|c| {
            c.content.as_ref().map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
        });
        // An empty candidate list or textless candidate is "no content",
        // not a transport failure.
        let content = content.filter(|text| !text.is_empty());

        let usage = response.usage_metadata.map(|u| TokenUsage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });

        Ok(LlmResponse { content, usage })
    }
}

#[async_trait]
impl Llm for GeminiLlm {
    async fn generate(
        &self,
        messages: &[Message],
        options: Option<GenerationOptions>,
    ) -> TillResult<LlmResponse> {
        let options = options.unwrap_or_default();
        let request = self.build_chat_request(messages, &options);
        self.dispatch(&request).await
    }

    async fn generate_with_media(
        &self,
        prompt: &str,
        media: &InlineData,
        options: Option<GenerationOptions>,
    ) -> TillResult<LlmResponse> {
        let options = options.unwrap_or_default();

        let request = GeminiRequest {
            system_instruction: None,
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![
                    GeminiPart::text(prompt),
                    GeminiPart::inline_data(&media.mime_type, &media.data),
                ],
            }],
            generation_config: self.generation_config(&options),
        };

        self.dispatch(&request).await
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }

    fn supports_vision(&self) -> bool {
        true
    }
}
