//! Extraction error types.

use thiserror::Error;

/// Fixed user-facing message for a failed extraction.
pub const EXTRACTION_FAILED_MESSAGE: &str = "解析文档失败，请重试。";

/// Errors that can occur during knowledge extraction.
///
/// Extraction fails loud, unlike the chat pipeline: the upload UI must be
/// able to distinguish "nothing extractable" (an empty `Ok` list) from
/// "extraction broke". All internal causes (provider failure, malformed
/// JSON, schema violation) collapse into `ExtractionFailed`; the detail is
/// for operator logs, the Display is the fixed user-facing message.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Extraction failed (provider error or unusable model output).
    #[error("解析文档失败，请重试。")]
    ExtractionFailed {
        /// Internal cause, not shown to users.
        detail: String,
    },

    /// Media type is not accepted by the extractor.
    #[error("Unsupported content type: {0}")]
    UnsupportedType(String),
}

impl ExtractError {
    /// Create an extraction failure with an internal detail.
    pub fn failed(detail: impl Into<String>) -> Self {
        Self::ExtractionFailed {
            detail: detail.into(),
        }
    }
}

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_failed_displays_fixed_message() {
        let err = ExtractError::failed("connection reset");
        assert_eq!(err.to_string(), EXTRACTION_FAILED_MESSAGE);
    }

    #[test]
    fn test_unsupported_type_names_the_mime() {
        let err = ExtractError::UnsupportedType("audio/mpeg".to_string());
        assert!(err.to_string().contains("audio/mpeg"));
    }
}
