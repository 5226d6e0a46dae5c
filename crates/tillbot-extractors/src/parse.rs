//! Parsing of model output into typed knowledge items.
//!
//! The provider's schema enforcement is best-effort, so the parse step is
//! treated as a fallible boundary: field presence and types are validated
//! by the typed deserialization, never trusted.

use regex::Regex;

use tillbot_core::types::KnowledgeItem;

use crate::error::{ExtractError, ExtractResult};

/// Remove a surrounding ```[language] ... ``` fence, if present.
pub fn strip_code_fences(content: &str) -> &str {
    let content = content.trim();
    let re = Regex::new(r"^```[a-zA-Z0-9]*\n?([\s\S]*?)\n?```$").unwrap();
    re.captures(content)
        .and_then(|c| c.get(1).map(|m| m.as_str().trim()))
        .unwrap_or(content)
}

/// Parse model output into a list of knowledge items.
///
/// Empty text is a valid "nothing extractable" result. Anything that is
/// not a JSON array of `{question, answer}` string objects is a failure —
/// no partially parsed result is ever returned.
pub fn parse_knowledge_items(text: &str) -> ExtractResult<Vec<KnowledgeItem>> {
    let cleaned = strip_code_fences(text);
    if cleaned.is_empty() {
        return Ok(vec![]);
    }

    serde_json::from_str::<Vec<KnowledgeItem>>(cleaned)
        .map_err(|e| ExtractError::failed(format!("Failed to parse knowledge JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_array_is_empty_list() {
        let items = parse_knowledge_items("[]").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_single_item() {
        let items = parse_knowledge_items(r#"[{"question":"Q1","answer":"A1"}]"#).unwrap();
        assert_eq!(items, vec![KnowledgeItem::new("Q1", "A1")]);
    }

    #[test]
    fn test_preserves_input_order() {
        let items = parse_knowledge_items(
            r#"[{"question":"Q1","answer":"A1"},{"question":"Q2","answer":"A2"}]"#,
        )
        .unwrap();
        assert_eq!(items[0].question, "Q1");
        assert_eq!(items[1].question, "Q2");
    }

    #[test]
    fn test_malformed_json_fails() {
        let result = parse_knowledge_items(r#"[{"question":"Q1""#);
        assert!(matches!(
            result,
            Err(ExtractError::ExtractionFailed { .. })
        ));
    }

    #[test]
    fn test_missing_field_fails() {
        let result = parse_knowledge_items(r#"[{"question":"Q1"}]"#);
        assert!(matches!(
            result,
            Err(ExtractError::ExtractionFailed { .. })
        ));
    }

    #[test]
    fn test_non_array_fails() {
        let result = parse_knowledge_items(r#"{"question":"Q1","answer":"A1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_field_type_fails() {
        let result = parse_knowledge_items(r#"[{"question":"Q1","answer":42}]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_strips_json_code_fence() {
        let fenced = "```json\n[{\"question\":\"Q\",\"answer\":\"A\"}]\n```";
        let items = parse_knowledge_items(fenced).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_strip_code_fences_passthrough() {
        assert_eq!(strip_code_fences("  plain text  "), "plain text");
    }

    #[test]
    fn test_blank_text_is_empty_list() {
        assert!(parse_knowledge_items("   ").unwrap().is_empty());
    }
}
