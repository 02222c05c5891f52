//! Parsing of normalized document text into a navigable tree.

use roxmltree::{Document, ParsingOptions};

use crate::error::Result;

/// Parse normalized text into a document tree.
///
/// DTD declarations are accepted because Cobertura reports usually start
/// with `<!DOCTYPE coverage SYSTEM "...coverage-04.dtd">`. External entities
/// are never fetched.
///
/// # Errors
/// Returns `XmlParse` if the text is not well-formed XML. No partial tree is
/// returned.
///
/// # Examples
/// ```
/// use report_splitter::xml::parse_document;
///
/// let doc = parse_document("<testsuite name=\"S\"/>").unwrap();
/// assert_eq!(doc.root_element().attribute("name"), Some("S"));
///
/// assert!(parse_document("<coverage><broken").is_err());
/// ```
pub fn parse_document(text: &str) -> Result<Document<'_>> {
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    Ok(Document::parse_with_options(text, options)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SplitterError;

    #[test]
    fn test_parse_with_doctype() {
        let xml = r#"<?xml version="1.0"?><!DOCTYPE coverage SYSTEM "http://cobertura.sourceforge.net/xml/coverage-04.dtd"><coverage line-rate="0.5"/>"#;
        let doc = parse_document(xml).unwrap();
        assert_eq!(doc.root_element().attribute("line-rate"), Some("0.5"));
    }

    #[test]
    fn test_parse_failure() {
        let err = parse_document("<coverage><broken").unwrap_err();
        assert!(matches!(err, SplitterError::XmlParse(_)));
    }

    #[test]
    fn test_parse_rejects_mismatched_tags() {
        assert!(parse_document("<testsuite></testcase>").is_err());
    }
}
