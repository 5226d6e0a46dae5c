//! tillbot-llm - LLM provider implementations for tillbot.
//!
//! This crate provides model-provider implementations of the `Llm` trait
//! from `tillbot-core`.
//!
//! # Supported Providers
//!
//! - **Gemini** - Google's generative-language API (text + inline media)
//!
//! # Example
//!
//! ```ignore
//! use tillbot_llm::LlmFactory;
//!
//! // Create a Gemini LLM (API key from GEMINI_API_KEY)
//! let llm = LlmFactory::gemini()?;
//!
//! // Or with a specific model
//! let llm = LlmFactory::gemini_with_model("gemini-2.5-pro")?;
//! ```

mod factory;
mod gemini;

pub use factory::LlmFactory;
pub use gemini::GeminiLlm;

// Re-export core types for convenience
pub use tillbot_core::config::LlmProvider;
pub use tillbot_core::traits::{GenerationOptions, Llm, LlmConfig, LlmResponse, ResponseFormat};
