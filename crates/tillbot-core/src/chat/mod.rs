//! Support chat pipeline (prompt composer).
//!
//! Composes the effective knowledge base into a system instruction and
//! dispatches the conversation to the injected LLM provider. The entry
//! point is fail-soft: every failure collapses to a fixed user-facing
//! string, because the chat reply slot must always render something.

use std::sync::Arc;

use crate::error::{TillError, TillResult};
use crate::knowledge::{
    compose_knowledge_base, render_system_instruction, BASE_KNOWLEDGE, BUSY_FALLBACK,
    NO_ANSWER_FALLBACK, SYSTEM_PROMPT_TEMPLATE,
};
use crate::traits::{GenerationOptions, Llm, ResponseFormat};
use crate::types::{KnowledgeItem, Message, MessageRole};

/// Configuration for the support chat pipeline.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Sampling temperature. Low by default: this is a knowledge-grounded
    /// support assistant, not a creative one.
    pub temperature: f32,
    /// Maximum tokens to generate per reply.
    pub max_tokens: u32,
    /// System prompt template with a `{{KNOWLEDGE_BASE}}` placeholder.
    pub system_template: String,
    /// Fixed base knowledge document.
    pub base_knowledge: String,
    /// Reply used when the provider returns no text.
    pub no_answer_fallback: String,
    /// Reply used when the provider call fails.
    pub busy_fallback: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            max_tokens: 2000,
            system_template: SYSTEM_PROMPT_TEMPLATE.to_string(),
            base_knowledge: BASE_KNOWLEDGE.to_string(),
            no_answer_fallback: NO_ANSWER_FALLBACK.to_string(),
            busy_fallback: BUSY_FALLBACK.to_string(),
        }
    }
}

/// The support chat assistant.
///
/// Stateless between invocations: the caller owns the transcript and the
/// accumulated extra knowledge and passes both in on every call. Each call
/// issues exactly one provider request; nothing is cached or retried.
pub struct SupportChat {
    llm: Arc<dyn Llm>,
    config: ChatConfig,
}

impl SupportChat {
    /// Create a new support chat over the given provider.
    pub fn new(llm: Arc<dyn Llm>) -> Self {
        Self::with_config(llm, ChatConfig::default())
    }

    /// Create a support chat with custom configuration.
    pub fn with_config(llm: Arc<dyn Llm>, config: ChatConfig) -> Self {
        Self { llm, config }
    }

    /// Answer the last user turn of `history`, grounded in the base
    /// knowledge document plus `extra_knowledge`.
    ///
    /// Never returns an error: provider failures and precondition
    /// violations are logged and collapse to the busy fallback, and an
    /// empty provider reply collapses to the no-answer fallback.
    pub async fn converse(&self, history: &[Message], extra_knowledge: &[KnowledgeItem]) -> String {
        match self.try_converse(history, extra_knowledge).await {
            Ok(Some(text)) => text,
            Ok(None) => self.config.no_answer_fallback.clone(),
            Err(e) => {
                tracing::error!(error = %e, code = e.code().as_str(), "chat request failed");
                self.config.busy_fallback.clone()
            }
        }
    }

    /// Build the system instruction for the given extra knowledge.
    /// Recomputed on every request; the composed string is never stored.
    fn system_instruction(&self, extra_knowledge: &[KnowledgeItem]) -> String {
        let knowledge_base = compose_knowledge_base(&self.config.base_knowledge, extra_knowledge);
        render_system_instruction(&self.config.system_template, &knowledge_base)
    }

    async fn try_converse(
        &self,
        history: &[Message],
        extra_knowledge: &[KnowledgeItem],
    ) -> TillResult<Option<String>> {
        let last = history
            .last()
            .ok_or_else(|| TillError::validation("history must contain at least one turn"))?;
        if last.role != MessageRole::User {
            return Err(TillError::validation(
                "the last turn of history must be a user message",
            ));
        }
        if history.iter().any(|m| m.role == MessageRole::System) {
            return Err(TillError::validation(
                "history must not contain system messages",
            ));
        }

        let system = Message::system(self.system_instruction(extra_knowledge));

        // Prior turns replay as session context; the trailing user turn is
        // the active message. On the wire both travel as one ordered list.
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(system);
        messages.extend_from_slice(history);

        let options = GenerationOptions {
            temperature: Some(self.config.temperature),
            max_tokens: Some(self.config.max_tokens),
            response_format: Some(ResponseFormat::Text),
        };

        let response = self.llm.generate(&messages, Some(options)).await?;

        match response.content {
            Some(text) if !text.trim().is_empty() => Ok(Some(text)),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::ADDED_KNOWLEDGE_HEADER;
    use crate::traits::{InlineData, LlmResponse};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    // Mock implementations for testing

    struct MockLlm {
        reply: Option<String>,
        fail: bool,
        calls: AtomicUsize,
        seen_messages: Mutex<Vec<Vec<Message>>>,
    }

    impl MockLlm {
        fn replying(text: &str) -> Self {
            Self {
                reply: Some(text.to_string()),
                fail: false,
                calls: AtomicUsize::new(0),
                seen_messages: Mutex::new(Vec::new()),
            }
        }

        fn empty() -> Self {
            Self {
                reply: None,
                fail: false,
                calls: AtomicUsize::new(0),
                seen_messages: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                fail: true,
                calls: AtomicUsize::new(0),
                seen_messages: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl Llm for MockLlm {
        async fn generate(
            &self,
            messages: &[Message],
            _options: Option<GenerationOptions>,
        ) -> TillResult<LlmResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen_messages.lock().unwrap().push(messages.to_vec());
            if self.fail {
                return Err(TillError::llm("provider unavailable"));
            }
            Ok(LlmResponse {
                content: self.reply.clone(),
                usage: None,
            })
        }

        async fn generate_with_media(
            &self,
            _prompt: &str,
            _media: &InlineData,
            _options: Option<GenerationOptions>,
        ) -> TillResult<LlmResponse> {
            unimplemented!()
        }

        fn model_name(&self) -> &str {
            "mock"
        }
    }

    fn history_ending_in_user() -> Vec<Message> {
        vec![
            Message::user("收银机无法开机"),
            Message::model("请检查电源线。"),
            Message::user("电源灯不亮怎么办？"),
        ]
    }

    #[tokio::test]
    async fn test_converse_returns_provider_reply() {
        let llm = Arc::new(MockLlm::replying("请更换电源适配器。"));
        let chat = SupportChat::new(llm);
        let reply = chat.converse(&history_ending_in_user(), &[]).await;
        assert_eq!(reply, "请更换电源适配器。");
    }

    #[tokio::test]
    async fn test_converse_never_raises_on_provider_failure() {
        let llm = Arc::new(MockLlm::failing());
        let chat = SupportChat::new(llm);
        let reply = chat.converse(&history_ending_in_user(), &[]).await;
        assert_eq!(reply, BUSY_FALLBACK);
    }

    #[tokio::test]
    async fn test_converse_empty_reply_uses_no_answer_fallback() {
        let llm = Arc::new(MockLlm::empty());
        let chat = SupportChat::new(llm);
        let reply = chat.converse(&history_ending_in_user(), &[]).await;
        assert_eq!(reply, NO_ANSWER_FALLBACK);
    }

    #[tokio::test]
    async fn test_converse_empty_history_falls_back() {
        let llm = Arc::new(MockLlm::replying("should not be reached"));
        let chat = SupportChat::new(llm.clone());
        let reply = chat.converse(&[], &[]).await;
        assert_eq!(reply, BUSY_FALLBACK);
        assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_converse_trailing_model_turn_falls_back() {
        let llm = Arc::new(MockLlm::replying("should not be reached"));
        let chat = SupportChat::new(llm.clone());
        let history = vec![Message::user("问题"), Message::model("回答")];
        let reply = chat.converse(&history, &[]).await;
        assert_eq!(reply, BUSY_FALLBACK);
        assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_converse_no_caching_between_identical_calls() {
        let llm = Arc::new(MockLlm::replying("回答"));
        let chat = SupportChat::new(llm.clone());
        let history = history_ending_in_user();
        let extra = vec![KnowledgeItem::new("Q", "A")];

        chat.converse(&history, &extra).await;
        chat.converse(&history, &extra).await;

        assert_eq!(llm.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_system_instruction_carries_added_knowledge() {
        let llm = Arc::new(MockLlm::replying("回答"));
        let chat = SupportChat::new(llm.clone());
        let extra = vec![KnowledgeItem::new("新问题", "新答案")];

        chat.converse(&history_ending_in_user(), &extra).await;

        let seen = llm.seen_messages.lock().unwrap();
        let system = &seen[0][0];
        assert_eq!(system.role, MessageRole::System);
        assert!(system.content.contains(ADDED_KNOWLEDGE_HEADER));
        assert!(system.content.contains("1000. **新问题**"));
    }

    #[tokio::test]
    async fn test_system_instruction_omits_header_without_extra_knowledge() {
        let llm = Arc::new(MockLlm::replying("回答"));
        let chat = SupportChat::new(llm.clone());

        chat.converse(&history_ending_in_user(), &[]).await;

        let seen = llm.seen_messages.lock().unwrap();
        let system = &seen[0][0];
        assert!(!system.content.contains(ADDED_KNOWLEDGE_HEADER));
    }

    #[tokio::test]
    async fn test_history_passed_through_in_order_after_system() {
        let llm = Arc::new(MockLlm::replying("回答"));
        let chat = SupportChat::new(llm.clone());
        let history = history_ending_in_user();

        chat.converse(&history, &[]).await;

        let seen = llm.seen_messages.lock().unwrap();
        let sent = &seen[0];
        assert_eq!(sent.len(), history.len() + 1);
        assert_eq!(&sent[1..], history.as_slice());
    }
}
