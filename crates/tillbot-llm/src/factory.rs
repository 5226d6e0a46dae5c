//! Factory for creating LLM providers.

use std::sync::Arc;

use tillbot_core::config::LlmProvider;
use tillbot_core::error::TillResult;
use tillbot_core::traits::{Llm, LlmConfig};

use crate::gemini::GeminiLlm;

/// Factory for creating LLM providers.
pub struct LlmFactory;

impl LlmFactory {
    /// Create an LLM provider from the given configuration.
    pub fn create(provider: LlmProvider, config: LlmConfig) -> TillResult<Arc<dyn Llm>> {
        match provider {
            LlmProvider::Gemini => {
                let llm = GeminiLlm::new(config)?;
                Ok(Arc::new(llm))
            }
        }
    }

    /// Create a Gemini LLM provider with default configuration.
    pub fn gemini() -> TillResult<Arc<dyn Llm>> {
        Self::create(LlmProvider::Gemini, LlmConfig::default())
    }

    /// Create a Gemini LLM provider with a specific model.
    pub fn gemini_with_model(model: impl Into<String>) -> TillResult<Arc<dyn Llm>> {
        let config = LlmConfig {
            model: model.into(),
            ..Default::default()
        };
        Self::create(LlmProvider::Gemini, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_creates_gemini() {
        let config = LlmConfig {
            model: "gemini-2.5-flash".to_string(),
            api_key: Some("test-key".to_string()),
            ..Default::default()
        };
        let llm = LlmFactory::create(LlmProvider::Gemini, config).unwrap();
        assert_eq!(llm.model_name(), "gemini-2.5-flash");
    }
}
