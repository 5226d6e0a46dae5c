//! Knowledge item type shared by the chat and extraction pipelines.

use serde::{Deserialize, Serialize};

/// A single question/answer entry in the knowledge base.
///
/// No identity or uniqueness is enforced; duplicates are permitted. The
/// pipeline only reads supplied items and never mutates the caller's list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeItem {
    pub question: String,
    pub answer: String,
}

impl KnowledgeItem {
    /// Create a new knowledge item.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}
