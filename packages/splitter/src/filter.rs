//! Report filters that tie decoding, parsing and splitting together.

use crate::config::{FilterConfig, PARSE_FAILURE_TAG};
use crate::decode::{decode_source, Decoded};
use crate::error::{Result, SplitterError};
use crate::record::{pass_through_fields, with_tag};
use crate::splitting::{
    create_coverage_hierarchy, create_junit_hierarchy, AnomalyPolicy, CoberturaStrategy,
    JunitStrategy, SplitEngine, SplitStrategy,
};
use crate::types::{FilterOutcome, Record};
use crate::xml::parse_document;

/// Filter that replaces a record carrying an encoded report with one record
/// per report node.
///
/// A filter holds no per-call state and can be shared across threads.
pub struct ReportFilter<S: SplitStrategy> {
    config: FilterConfig,
    engine: SplitEngine<S>,
}

/// Filter for Cobertura coverage reports.
pub type CoberturaFilter = ReportFilter<CoberturaStrategy>;

/// Filter for JUnit test reports.
pub type JunitFilter = ReportFilter<JunitStrategy>;

impl ReportFilter<CoberturaStrategy> {
    /// Create a Cobertura filter.
    ///
    /// # Examples
    /// ```
    /// use report_splitter::config::FilterConfig;
    /// use report_splitter::filter::ReportFilter;
    ///
    /// let filter = ReportFilter::cobertura(FilterConfig::new("report")).unwrap();
    /// assert_eq!(filter.config().source, "report");
    /// ```
    pub fn cobertura(config: FilterConfig) -> Result<Self> {
        Self::new(
            config,
            SplitEngine::new(create_coverage_hierarchy(), CoberturaStrategy),
        )
    }
}

impl ReportFilter<JunitStrategy> {
    /// Create a JUnit filter.
    pub fn junit(config: FilterConfig) -> Result<Self> {
        Self::new(
            config,
            SplitEngine::new(create_junit_hierarchy(), JunitStrategy),
        )
    }
}

impl<S: SplitStrategy> ReportFilter<S> {
    /// Create a filter around a configured engine.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the configuration does not name a source
    /// field.
    pub fn new(config: FilterConfig, engine: SplitEngine<S>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, engine })
    }

    /// Set the structural anomaly policy.
    #[must_use]
    pub fn with_policy(mut self, policy: AnomalyPolicy) -> Self {
        self.engine = self.engine.with_policy(policy);
        self
    }

    /// The filter configuration.
    #[must_use]
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Process one record.
    pub fn filter(&self, record: &Record) -> FilterOutcome {
        let source = self.config.source.as_str();
        let schema = self.engine.strategy().name();
        tracing::debug!(schema, source = %source, "Running report filter");

        let text = match decode_source(record, source) {
            Ok(Decoded::Document(text)) => text,
            Ok(Decoded::Missing) => {
                tracing::debug!(schema, source = %source, "Source field missing, passing through");
                return FilterOutcome::PassThrough;
            }
            Ok(Decoded::MultiValued(count)) => {
                tracing::warn!(
                    schema,
                    source = %source,
                    count,
                    "Report filter only works on fields of length 1"
                );
                return FilterOutcome::PassThrough;
            }
            Ok(Decoded::Unsupported(kind)) => {
                tracing::warn!(
                    schema,
                    source = %source,
                    kind,
                    "Source field does not hold text, passing through"
                );
                return FilterOutcome::PassThrough;
            }
            Ok(Decoded::Empty) => {
                tracing::debug!(schema, source = %source, "Empty document, passing through");
                return FilterOutcome::PassThrough;
            }
            Err(e) => return self.tag_failure(record, &e),
        };

        let doc = match parse_document(&text) {
            Ok(doc) => doc,
            Err(e) => return self.tag_failure(record, &e),
        };

        let base = pass_through_fields(record, source);
        let result = self.engine.split(&doc, &base);

        if result.records.is_empty() {
            tracing::debug!(
                schema,
                root = %doc.root_element().tag_name().name(),
                "No report nodes matched, passing through"
            );
            return FilterOutcome::PassThrough;
        }

        tracing::debug!(
            schema,
            records = result.records.len(),
            aborted = result.aborted,
            "Report split"
        );
        FilterOutcome::Split(result.records)
    }

    /// Process one record, handing every record to forward to `emit`.
    ///
    /// Returns `true` if the original record was superseded by derived
    /// records.
    pub fn filter_each(&self, record: &Record, mut emit: impl FnMut(Record)) -> bool {
        match self.filter(record) {
            FilterOutcome::PassThrough => false,
            FilterOutcome::Tagged(tagged) => {
                emit(tagged);
                false
            }
            FilterOutcome::Split(records) => {
                records.into_iter().for_each(&mut emit);
                true
            }
        }
    }

    fn tag_failure(&self, record: &Record, error: &SplitterError) -> FilterOutcome {
        tracing::warn!(
            schema = self.engine.strategy().name(),
            source = %self.config.source,
            error = %error,
            "Trouble parsing report XML"
        );
        FilterOutcome::Tagged(with_tag(record, PARSE_FAILURE_TAG))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde_json::{json, Value};

    fn record_with_report(xml: &str) -> Record {
        let mut record = Record::new();
        record.insert("host".to_string(), json!("ci-1"));
        record.insert("report".to_string(), json!(STANDARD.encode(xml)));
        record
    }

    fn cobertura() -> CoberturaFilter {
        ReportFilter::cobertura(FilterConfig::new("report")).unwrap()
    }

    fn junit() -> JunitFilter {
        ReportFilter::junit(FilterConfig::new("report")).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(ReportFilter::junit(FilterConfig::new("")).is_err());
    }

    #[test]
    fn test_missing_source_passes_through() {
        let mut record = Record::new();
        record.insert("host".to_string(), json!("ci-1"));
        assert_eq!(cobertura().filter(&record), FilterOutcome::PassThrough);
    }

    #[test]
    fn test_blank_document_passes_through() {
        let record = record_with_report("   ");
        assert_eq!(junit().filter(&record), FilterOutcome::PassThrough);
    }

    #[test]
    fn test_multi_valued_source_passes_through() {
        let mut record = Record::new();
        record.insert("report".to_string(), json!(["PGEvPg==", "PGIvPg=="]));
        assert_eq!(junit().filter(&record), FilterOutcome::PassThrough);
    }

    #[test]
    fn test_malformed_xml_is_tagged() {
        let record = record_with_report("<coverage><broken");
        let outcome = cobertura().filter(&record);

        let mut expected = record.clone();
        expected.insert("tags".to_string(), json!(["_xmlparsefailure"]));
        assert_eq!(outcome, FilterOutcome::Tagged(expected));
    }

    #[test]
    fn test_invalid_base64_is_tagged() {
        let mut record = Record::new();
        record.insert("report".to_string(), json!("%%%"));

        let FilterOutcome::Tagged(tagged) = junit().filter(&record) else {
            panic!("expected tagged outcome");
        };
        assert_eq!(tagged["tags"], json!(["_xmlparsefailure"]));
    }

    #[test]
    fn test_other_schema_passes_through() {
        let record = record_with_report(r#"<testsuite name="S"/>"#);
        assert_eq!(cobertura().filter(&record), FilterOutcome::PassThrough);
    }

    #[test]
    fn test_split_drops_source_field() {
        let record = record_with_report(r#"<testsuite name="S"><testcase name="t1"/></testsuite>"#);
        let FilterOutcome::Split(records) = junit().filter(&record) else {
            panic!("expected split outcome");
        };

        assert_eq!(records.len(), 2);
        for derived in &records {
            assert!(derived.get("report").is_none());
            assert_eq!(derived["host"], json!("ci-1"));
        }
    }

    #[test]
    fn test_filter_each_emits_in_order() {
        let record = record_with_report(r#"<testsuite name="S"><testcase name="t1"/><testcase name="t2"/></testsuite>"#);
        let mut names = Vec::new();

        let superseded = junit().filter_each(&record, |derived| {
            let name = derived
                .get("testcase_name")
                .or_else(|| derived.get("testsuite_name"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            names.push(name);
        });

        assert!(superseded);
        assert_eq!(names, vec!["t1", "t2", "S"]);
    }

    #[test]
    fn test_filter_each_pass_through_emits_nothing() {
        let mut emitted = 0;
        let superseded = junit().filter_each(&Record::new(), |_| emitted += 1);

        assert!(!superseded);
        assert_eq!(emitted, 0);
    }

    #[test]
    fn test_abort_policy_is_applied() {
        let xml = r#"<coverage><packages><package name="empty"/><package name="p2"><classes><class name="C"/></classes></package></packages></coverage>"#;
        let filter = cobertura().with_policy(AnomalyPolicy::AbortWalk);

        let FilterOutcome::Split(records) = filter.filter(&record_with_report(xml)) else {
            panic!("expected split outcome");
        };
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["type"], json!("cobertura_coverage"));
    }
}
