//! Construction of derived records and failure tagging.

use serde_json::Value;

use crate::config::{MESSAGE_FIELD, TAGS_FIELD, TYPE_FIELD};
use crate::types::Record;

/// Builder for one derived record.
///
/// Starts from a copy of the pass-through fields and layers the
/// node-specific fields on top.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    fields: Record,
}

impl RecordBuilder {
    /// Start from a copy of the pass-through fields.
    #[must_use]
    pub fn from_base(base: &Record) -> Self {
        Self {
            fields: base.clone(),
        }
    }

    /// Set the record type.
    #[must_use]
    pub fn with_type(mut self, record_type: &str) -> Self {
        self.insert(TYPE_FIELD, Value::from(record_type));
        self
    }

    /// Set the serialized sub-tree the record was derived from.
    #[must_use]
    pub fn with_message(mut self, message: &str) -> Self {
        self.insert(MESSAGE_FIELD, Value::from(message));
        self
    }

    /// Set a field, replacing any earlier value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Set several fields in order.
    pub fn extend(&mut self, fields: impl IntoIterator<Item = (String, Value)>) {
        for (key, value) in fields {
            self.fields.insert(key, value);
        }
    }

    /// Look up a field set so far.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Finish the record.
    #[must_use]
    pub fn build(self) -> Record {
        self.fields
    }
}

/// Copy `record`, dropping the source field.
#[must_use]
pub fn pass_through_fields(record: &Record, source: &str) -> Record {
    record
        .iter()
        .filter(|(key, _)| key.as_str() != source)
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Return a copy of `record` with `tag` appended to its tags.
///
/// A missing or null `tags` field becomes a new list, a scalar is promoted to
/// a one-element list, and a tag already present is not added twice.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use report_splitter::record::with_tag;
/// use report_splitter::types::Record;
///
/// let mut record = Record::new();
/// record.insert("tags".to_string(), json!("ci"));
///
/// let tagged = with_tag(&record, "_xmlparsefailure");
/// assert_eq!(tagged["tags"], json!(["ci", "_xmlparsefailure"]));
/// ```
#[must_use]
pub fn with_tag(record: &Record, tag: &str) -> Record {
    let mut tagged = record.clone();

    let mut tags = match tagged.remove(TAGS_FIELD) {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => Vec::new(),
        Some(other) => vec![other],
    };
    if !tags.iter().any(|t| t.as_str() == Some(tag)) {
        tags.push(Value::from(tag));
    }

    tagged.insert(TAGS_FIELD.to_string(), Value::Array(tags));
    tagged
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test records are objects"),
        }
    }

    #[test]
    fn test_builder_layers_fields_over_base() {
        let base = record(json!({"host": "ci-1", "type": "raw"}));

        let mut builder = RecordBuilder::from_base(&base)
            .with_type("junit_testsuite")
            .with_message("<testsuite/>");
        builder.insert("testsuite_tests", 3);

        assert_eq!(
            Value::Object(builder.build()),
            json!({
                "host": "ci-1",
                "type": "junit_testsuite",
                "message": "<testsuite/>",
                "testsuite_tests": 3
            })
        );
    }

    #[test]
    fn test_builder_does_not_touch_base() {
        let base = record(json!({"host": "ci-1"}));
        let mut builder = RecordBuilder::from_base(&base);
        builder.insert("host", "overridden");

        assert_eq!(base["host"], json!("ci-1"));
        assert_eq!(builder.get("host"), Some(&json!("overridden")));
    }

    #[test]
    fn test_pass_through_fields_drops_source() {
        let input = record(json!({"report": "PGEvPg==", "host": "ci-1"}));
        let base = pass_through_fields(&input, "report");

        assert_eq!(Value::Object(base), json!({"host": "ci-1"}));
    }

    #[test]
    fn test_with_tag_creates_list() {
        let input = record(json!({"report": "x"}));
        let tagged = with_tag(&input, "_xmlparsefailure");

        assert_eq!(tagged["tags"], json!(["_xmlparsefailure"]));
        assert_eq!(tagged["report"], json!("x"));
    }

    #[test]
    fn test_with_tag_appends_once() {
        let input = record(json!({"tags": ["ci", "_xmlparsefailure"]}));
        let tagged = with_tag(&input, "_xmlparsefailure");

        assert_eq!(tagged["tags"], json!(["ci", "_xmlparsefailure"]));
    }
}
