//! tillbot-extractors - Knowledge extraction from uploaded documents.
//!
//! Turns an uploaded file (plain text, PDF, or image) into structured
//! support Q&A pairs via a single schema-constrained model request.
//!
//! # Example
//!
//! ```ignore
//! use tillbot_extractors::DocumentExtractor;
//!
//! let extractor = DocumentExtractor::new(llm);
//! let items = extractor.extract(&file_base64, "application/pdf").await?;
//! // items is empty when the document held nothing extractable;
//! // extraction failure is a distinct Err.
//! ```

mod error;
mod extractor;
mod parse;
mod schema;

pub use error::{ExtractError, ExtractResult, EXTRACTION_FAILED_MESSAGE};
pub use extractor::{DocumentExtractor, ExtractionConfig};
pub use parse::{parse_knowledge_items, strip_code_fences};
pub use schema::knowledge_item_schema;
