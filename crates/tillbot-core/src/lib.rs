//! tillbot-core - Core library for tillbot.
//!
//! This crate provides the core types, the `Llm` provider trait, and the
//! knowledge-grounded support chat pipeline. The model provider is an
//! injected capability: construct one (see `tillbot-llm`) and pass it into
//! the pipeline components.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tillbot_core::{Message, SupportChat};
//!
//! let chat = SupportChat::new(llm);
//! let history = vec![Message::user("收银机无法开机怎么办？")];
//! let reply = chat.converse(&history, &[]).await;
//! ```

pub mod chat;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use chat::{ChatConfig, SupportChat};
pub use config::{LlmProvider, LlmProviderConfig};
pub use error::{ErrorCode, TillError, TillResult};
pub use traits::{
    GenerationOptions, InlineData, Llm, LlmConfig, LlmResponse, ResponseFormat, TokenUsage,
};
pub use types::{KnowledgeItem, Message, MessageRole};
