//! Response schema for schema-constrained knowledge extraction.

use serde_json::{json, Value};

/// Schema constraining the model to a JSON array of question/answer
/// objects, in the generative-language API's schema dialect.
pub fn knowledge_item_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "question": {
                    "type": "STRING",
                    "description": "The technical question extracted from the document."
                },
                "answer": {
                    "type": "STRING",
                    "description": "The answer to the question."
                }
            },
            "required": ["question", "answer"]
        }
    })
}
