//! Core data types shared by the filters and the record stream.

use serde_json::{Map, Value};

/// A pipeline record: field name to JSON value, in insertion order.
pub type Record = Map<String, Value>;

/// What the host pipeline should do with one input record.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    /// Nothing to do; the original record continues unchanged.
    PassThrough,

    /// The embedded document was malformed; forward this tagged copy of the
    /// original instead.
    Tagged(Record),

    /// Derived records in emission order. The original is superseded.
    Split(Vec<Record>),
}

impl FilterOutcome {
    /// Whether the original record is replaced by derived records.
    #[must_use]
    pub fn supersedes_original(&self) -> bool {
        matches!(self, Self::Split(_))
    }

    /// Flatten the outcome into the records the host should forward.
    #[must_use]
    pub fn into_records(self, original: Record) -> Vec<Record> {
        match self {
            Self::PassThrough => vec![original],
            Self::Tagged(record) => vec![record],
            Self::Split(records) => records,
        }
    }
}

/// Output of walking one parsed document.
#[derive(Debug, Clone, Default)]
pub struct SplitResult {
    /// Derived records in emission order.
    pub records: Vec<Record>,

    /// Number of top-level nodes that matched the schema.
    pub matched: usize,

    /// Whether the walk stopped early on a structural anomaly.
    pub aborted: bool,
}
