//! Schema strategies: the parts of a report format a mapping table cannot
//! express.

use roxmltree::{Document, Node};
use serde_json::Value;

use super::types::LevelSpec;
use crate::record::RecordBuilder;
use crate::xml::{
    element_children, find_children, get_attribute, get_tag_name, has_tag, select_path,
    text_content, NodeMatch,
};

/// Trait for report-format specific splitting behavior.
///
/// The generic [`SplitEngine`](super::SplitEngine) handles descent, mapped
/// fields and linkage; a strategy picks the top-level nodes and adds the
/// fields that depend on a node's shape.
pub trait SplitStrategy: Send + Sync {
    /// Short format name used in log output.
    fn name(&self) -> &'static str;

    /// Select the top-level nodes of the document.
    fn select_roots<'a, 'input>(&self, doc: &'a Document<'input>) -> NodeMatch<'a, 'input>;

    /// Add shape-dependent fields to a record under construction.
    ///
    /// Default implementation adds nothing.
    fn decorate(&self, _node: Node<'_, '_>, _spec: &LevelSpec, _record: &mut RecordBuilder) {}
}

/// Strategy for Cobertura coverage reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoberturaStrategy;

impl SplitStrategy for CoberturaStrategy {
    fn name(&self) -> &'static str {
        "cobertura"
    }

    fn select_roots<'a, 'input>(&self, doc: &'a Document<'input>) -> NodeMatch<'a, 'input> {
        let root = doc.root_element();
        NodeMatch::from_option(has_tag(root, "coverage").then_some(root))
    }

    /// Number the `<source>` paths of the coverage record.
    fn decorate(&self, node: Node<'_, '_>, spec: &LevelSpec, record: &mut RecordBuilder) {
        if spec.tag != "coverage" {
            return;
        }

        for (index, source) in select_path(node, "sources/source").into_iter().enumerate() {
            record.insert(
                spec.field_name(&format!("source{}", index + 1)),
                text_content(source),
            );
        }
    }
}

/// Strategy for JUnit test reports.
///
/// Handles both a single `<testsuite>` document and the aggregated
/// `<testsuites>` form.
#[derive(Debug, Clone, Copy, Default)]
pub struct JunitStrategy;

impl SplitStrategy for JunitStrategy {
    fn name(&self) -> &'static str {
        "junit"
    }

    fn select_roots<'a, 'input>(&self, doc: &'a Document<'input>) -> NodeMatch<'a, 'input> {
        let root = doc.root_element();
        match get_tag_name(root) {
            "testsuite" => NodeMatch::One(root),
            "testsuites" => NodeMatch::from_nodes(find_children(root, "testsuite").collect()),
            _ => NodeMatch::NoMatch,
        }
    }

    /// Classify the outcome of a test case by its child elements.
    ///
    /// No children means success. A single child (`<failure>`, `<error>`,
    /// `<skipped>`) names the result. Several children give `various` plus
    /// one numbered group of fields per child.
    fn decorate(&self, node: Node<'_, '_>, spec: &LevelSpec, record: &mut RecordBuilder) {
        if spec.tag != "testcase" {
            return;
        }

        let results: Vec<_> = element_children(node).collect();
        let result_field = spec.field_name("result");

        match results.as_slice() {
            [] => record.insert(result_field, "success"),
            [only] => {
                record.insert(result_field.clone(), get_tag_name(*only));
                record.extend(result_detail_fields(&result_field, *only));
            }
            many => {
                record.insert(result_field.clone(), "various");
                for (index, child) in many.iter().enumerate() {
                    let numbered = format!("{result_field}{}", index + 1);
                    record.insert(numbered.clone(), get_tag_name(*child));
                    record.extend(result_detail_fields(&numbered, *child));
                }
            }
        }
    }
}

fn result_detail_fields(prefix: &str, result: Node<'_, '_>) -> [(String, Value); 3] {
    let attribute = |name: &str| get_attribute(result, name).map_or(Value::Null, Value::from);
    [
        (format!("{prefix}_type"), attribute("type")),
        (format!("{prefix}_message"), attribute("message")),
        (format!("{prefix}_content"), Value::from(text_content(result))),
    ]
}
