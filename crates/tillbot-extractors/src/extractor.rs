//! Schema-constrained document extraction over an LLM provider.

use std::sync::Arc;

use tillbot_core::knowledge::EXTRACTION_PROMPT;
use tillbot_core::traits::{GenerationOptions, InlineData, Llm, ResponseFormat};
use tillbot_core::types::KnowledgeItem;

use crate::error::{ExtractError, ExtractResult};
use crate::parse::parse_knowledge_items;
use crate::schema::knowledge_item_schema;

/// Configuration for document extraction.
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Sampling temperature. Very low: favor literal extraction over
    /// paraphrase or invention.
    pub temperature: f32,
    /// Maximum tokens for the extracted list.
    pub max_tokens: u32,
    /// Instruction prompt sent alongside the document payload.
    pub prompt: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            max_tokens: 4000,
            prompt: EXTRACTION_PROMPT.to_string(),
        }
    }
}

/// Extracts support Q&A pairs from an uploaded document.
///
/// Each call is a single stateless request/response cycle with two terminal
/// outcomes: success with a (possibly empty) list, or failure. An empty
/// list means the document held nothing extractable; it is not an error.
pub struct DocumentExtractor {
    llm: Arc<dyn Llm>,
    config: ExtractionConfig,
}

impl DocumentExtractor {
    /// Create a new extractor over the given provider.
    pub fn new(llm: Arc<dyn Llm>) -> Self {
        Self::with_config(llm, ExtractionConfig::default())
    }

    /// Create an extractor with custom configuration.
    pub fn with_config(llm: Arc<dyn Llm>, config: ExtractionConfig) -> Self {
        Self { llm, config }
    }

    /// Media types this extractor accepts.
    pub fn supported_types(&self) -> &[&str] {
        &["text/plain", "application/pdf"]
    }

    /// Check whether the given media type is accepted.
    pub fn supports(&self, mime_type: &str) -> bool {
        self.supported_types().contains(&mime_type) || mime_type.starts_with("image/")
    }

    /// Extract knowledge items from a base64-encoded file payload.
    ///
    /// `file_base64` must have any data-URL prefix already stripped;
    /// `mime_type` identifies the file's media type.
    pub async fn extract(
        &self,
        file_base64: &str,
        mime_type: &str,
    ) -> ExtractResult<Vec<KnowledgeItem>> {
        if !self.supports(mime_type) {
            return Err(ExtractError::UnsupportedType(mime_type.to_string()));
        }

        let media = InlineData::new(mime_type, file_base64);
        let options = GenerationOptions {
            temperature: Some(self.config.temperature),
            max_tokens: Some(self.config.max_tokens),
            response_format: Some(ResponseFormat::JsonSchema(knowledge_item_schema())),
        };

        let response = self
            .llm
            .generate_with_media(&self.config.prompt, &media, Some(options))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, mime_type, "knowledge extraction request failed");
                ExtractError::failed(format!("Provider request failed: {}", e))
            })?;

        // No text at all means "nothing extractable", a valid terminal
        // state distinct from failure.
        let text = match response.content {
            Some(text) => text,
            None => return Ok(vec![]),
        };

        parse_knowledge_items(&text).map_err(|e| {
            if let ExtractError::ExtractionFailed { detail } = &e {
                tracing::error!(
                    detail = %detail,
                    mime_type,
                    "knowledge extraction produced unusable JSON"
                );
            }
            e
        })
    }
}
