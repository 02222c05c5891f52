//! Decoding of the embedded document held in the source field.

use std::sync::LazyLock;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use regex::Regex;
use serde_json::Value;

use crate::error::Result;
use crate::types::Record;

/// Standard alphabet, padding optional, stray trailing bits tolerated.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Whitespace between a closing and an opening angle bracket.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static WHITESPACE_BETWEEN_TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">\s+<").expect("valid regex"));

/// Result of reading the source field of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// The record has no source field.
    Missing,
    /// The source field holds more than one value.
    MultiValued(usize),
    /// The source field holds something other than text.
    Unsupported(&'static str),
    /// The document is empty after normalization.
    Empty,
    /// Normalized document text, ready for parsing.
    Document(String),
}

/// Read, decode and normalize the document held in `record[source]`.
///
/// # Errors
/// Returns `Base64` if the field value is not valid base64.
pub fn decode_source(record: &Record, source: &str) -> Result<Decoded> {
    let Some(value) = record.get(source) else {
        return Ok(Decoded::Missing);
    };

    let encoded = match value {
        Value::String(s) => s.as_str(),
        Value::Array(items) if items.len() > 1 => return Ok(Decoded::MultiValued(items.len())),
        Value::Array(items) => match items.first() {
            None => return Ok(Decoded::Empty),
            Some(Value::String(s)) => s.as_str(),
            Some(other) => return Ok(Decoded::Unsupported(json_type_name(other))),
        },
        other => return Ok(Decoded::Unsupported(json_type_name(other))),
    };

    let text = decode_base64(encoded)?;
    let normalized = normalize_whitespace(&text);
    let trimmed = normalized.trim();

    if trimmed.is_empty() {
        return Ok(Decoded::Empty);
    }

    Ok(Decoded::Document(trimmed.to_string()))
}

/// Decode base64 text to a string.
///
/// ASCII whitespace inside the payload is ignored. Invalid UTF-8 is replaced
/// lossily and a leading byte-order mark is dropped.
pub fn decode_base64(encoded: &str) -> Result<String> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = LENIENT_BASE64.decode(compact.as_bytes())?;

    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(
                error = %e.utf8_error(),
                "Decoded document is not valid UTF-8, replacing invalid sequences"
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };

    Ok(match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

/// Remove whitespace runs that sit strictly between two tags.
///
/// # Examples
/// ```
/// use report_splitter::decode::normalize_whitespace;
///
/// assert_eq!(
///     normalize_whitespace("<a>\n  <b> x </b>\n</a>"),
///     "<a><b> x </b></a>"
/// );
/// ```
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_BETWEEN_TAGS.replace_all(text, "><").into_owned()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
