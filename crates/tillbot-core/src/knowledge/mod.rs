//! Knowledge-base composition.
//!
//! Merges the fixed base document with caller-supplied knowledge items and
//! substitutes the result into the system prompt template. The composed
//! string is transient: recomputed on every request, never cached.

mod prompts;

pub use prompts::{
    BASE_KNOWLEDGE, BUSY_FALLBACK, EXTRACTION_PROMPT, KNOWLEDGE_BASE_PLACEHOLDER,
    NO_ANSWER_FALLBACK, SYSTEM_PROMPT_TEMPLATE,
};

use crate::types::KnowledgeItem;

/// Section header introducing caller-added knowledge entries.
pub const ADDED_KNOWLEDGE_HEADER: &str = "**补充知识库 (Added Knowledge):**";

/// Numbering offset for added entries, visually separating them from the
/// built-in numbering of the base document.
pub const ADDED_KNOWLEDGE_OFFSET: usize = 1000;

/// Compose the effective knowledge base: the base document, plus a labeled
/// section rendering each extra item as an enumerated entry in input order.
/// An empty `extra` list yields the base document unchanged (no header).
pub fn compose_knowledge_base(base: &str, extra: &[KnowledgeItem]) -> String {
    let mut composed = base.to_string();

    if !extra.is_empty() {
        composed.push_str("\n\n");
        composed.push_str(ADDED_KNOWLEDGE_HEADER);
        composed.push('\n');
        for (index, item) in extra.iter().enumerate() {
            composed.push_str(&format!(
                "{}. **{}**\n   * {}\n",
                ADDED_KNOWLEDGE_OFFSET + index,
                item.question,
                item.answer
            ));
        }
    }

    composed
}

/// Render the system instruction by substituting the composed knowledge
/// base into the template.
pub fn render_system_instruction(template: &str, knowledge_base: &str) -> String {
    template.replace(KNOWLEDGE_BASE_PLACEHOLDER, knowledge_base)
}
