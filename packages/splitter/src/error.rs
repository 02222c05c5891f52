//! Error types for the splitter.
//!
//! Only genuine failures are errors. Skipping a record (missing source field,
//! empty document, nothing matched) is a regular [`FilterOutcome`] and never
//! surfaces here.
//!
//! [`FilterOutcome`]: crate::types::FilterOutcome

use thiserror::Error;

/// Main error type for the splitter library.
#[derive(Debug, Error)]
pub enum SplitterError {
    /// Configuration is structurally valid but unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml_ng::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Source field does not hold valid base64.
    #[error("Base64 decoding failed: {0}")]
    Base64(#[from] base64::DecodeError),

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A line of the record stream is not a JSON object.
    #[error("Invalid record on line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },
}

/// Result type alias for splitter operations.
pub type Result<T> = std::result::Result<T, SplitterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SplitterError::InvalidConfig("source must not be empty".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: source must not be empty"
        );
    }

    #[test]
    fn test_invalid_record_display() {
        let err = SplitterError::InvalidRecord {
            line: 3,
            reason: "expected a JSON object".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid record on line 3: expected a JSON object"
        );
    }
}
