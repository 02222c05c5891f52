//! Report splitter - Split XML reports embedded in log records.
//!
//! A record carries a Cobertura coverage report or a JUnit test report as a
//! base64-encoded XML document in one of its fields. The filters in this
//! crate decode the document and replace the record by one flat record per
//! report node, linked to each other through generated identifiers.
//!
//! # Example
//!
//! ```
//! use base64::Engine;
//! use report_splitter::{FilterConfig, FilterOutcome, JunitFilter, Record};
//! use serde_json::json;
//!
//! let xml = r#"<testsuite name="S"><testcase name="t1"/></testsuite>"#;
//! let mut record = Record::new();
//! record.insert(
//!     "report".to_string(),
//!     json!(base64::engine::general_purpose::STANDARD.encode(xml)),
//! );
//!
//! let filter = JunitFilter::junit(FilterConfig::new("report")).unwrap();
//! let FilterOutcome::Split(records) = filter.filter(&record) else {
//!     panic!("expected derived records");
//! };
//! assert_eq!(records[0]["testcase_result"], json!("success"));
//! assert_eq!(records[1]["type"], json!("junit_testsuite"));
//! ```
//!
//! # Architecture
//!
//! The splitter is organized into several modules:
//!
//! - [`config`]: Filter configuration and field name constants
//! - [`types`]: Records and filter outcomes
//! - [`error`]: Error types and Result alias
//! - [`decode`]: Source field extraction and base64 decoding
//! - [`xml`]: XML parsing and node selection utilities
//! - [`record`]: Derived record construction
//! - [`splitting`]: Hierarchy-driven report splitting
//! - [`filter`]: Cobertura and JUnit filters
//! - [`stream`]: JSON-lines record streams
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod decode;
pub mod error;
pub mod filter;
pub mod record;
pub mod splitting;
pub mod stream;
pub mod types;
pub mod xml;

// Re-export commonly used items
pub use config::FilterConfig;
pub use error::{Result, SplitterError};
pub use filter::{CoberturaFilter, JunitFilter, ReportFilter};
pub use types::{FilterOutcome, Record};
