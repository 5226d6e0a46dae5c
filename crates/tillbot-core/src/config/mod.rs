//! Configuration for tillbot.

use serde::{Deserialize, Serialize};

use crate::traits::LlmConfig;

/// LLM provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    Gemini,
}

/// Provider configuration with type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmProviderConfig {
    /// Provider type.
    pub provider: LlmProvider,
    /// Provider-specific configuration.
    #[serde(flatten)]
    pub config: LlmConfig,
}

impl Default for LlmProviderConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::Gemini,
            config: LlmConfig {
                model: "gemini-2.5-flash".to_string(),
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_provider_config() {
        let config = LlmProviderConfig::default();
        assert_eq!(config.provider, LlmProvider::Gemini);
        assert_eq!(config.config.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_provider_config_flattened_serde() {
        let config: LlmProviderConfig =
            serde_json::from_str(r#"{"provider":"gemini","model":"gemini-2.5-pro"}"#).unwrap();
        assert_eq!(config.provider, LlmProvider::Gemini);
        assert_eq!(config.config.model, "gemini-2.5-pro");
    }
}
