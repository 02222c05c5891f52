//! Split engine that walks a parsed report using the hierarchy registry.

use roxmltree::{Document, Node};
use serde_json::Value;
use uuid::Uuid;

use super::registry::HierarchyRegistry;
use super::strategy::SplitStrategy;
use super::types::{AnomalyPolicy, ChildSelector, Descent, LevelSpec, SplitContext};
use crate::record::RecordBuilder;
use crate::types::{Record, SplitResult};
use crate::xml::{
    element_children, first_element_child, get_attribute, get_tag_name, select_path,
    subtree_text, NodeMatch,
};

/// Engine for splitting a report document into flat records.
///
/// Walks the XML tree according to the hierarchy specification and produces
/// one record per visited node. Every record is emitted after all records of
/// its subtree, so a parent always follows its children.
pub struct SplitEngine<S: SplitStrategy> {
    hierarchy: HierarchyRegistry,
    strategy: S,
    policy: AnomalyPolicy,
}

impl<S: SplitStrategy> SplitEngine<S> {
    /// Create a new split engine.
    #[must_use]
    pub fn new(hierarchy: HierarchyRegistry, strategy: S) -> Self {
        Self {
            hierarchy,
            strategy,
            policy: AnomalyPolicy::default(),
        }
    }

    /// Set the structural anomaly policy.
    #[must_use]
    pub fn with_policy(mut self, policy: AnomalyPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The structural anomaly policy in effect.
    #[must_use]
    pub fn policy(&self) -> AnomalyPolicy {
        self.policy
    }

    /// The schema strategy.
    #[must_use]
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Split a parsed document.
    ///
    /// `base` holds the pass-through fields copied into every record.
    pub fn split(&self, doc: &Document<'_>, base: &Record) -> SplitResult {
        let mut result = SplitResult::default();

        for root in self.strategy.select_roots(doc) {
            let tag = get_tag_name(root);
            let Some(spec) = self.hierarchy.get_spec(tag) else {
                tracing::warn!(
                    schema = self.strategy.name(),
                    tag = %tag,
                    "Root element not in splitting hierarchy, skipping"
                );
                continue;
            };

            result.matched += 1;
            let descent =
                self.split_node(root, spec, &SplitContext::new(), base, &mut result.records);
            if self.should_stop(descent) {
                result.aborted = true;
                break;
            }
        }

        result
    }

    /// Split one node and its subtree, appending records to `out`.
    fn split_node(
        &self,
        node: Node<'_, '_>,
        spec: &LevelSpec,
        context: &SplitContext,
        base: &Record,
        out: &mut Vec<Record>,
    ) -> Descent {
        if spec.skip_if_empty && element_children(node).next().is_none() {
            tracing::warn!(
                schema = self.strategy.name(),
                tag = %spec.tag,
                name = get_attribute(node, "name").unwrap_or_default(),
                "Empty element in report, skipping branch"
            );
            return Descent::Anomaly;
        }

        let mut builder = RecordBuilder::from_base(base)
            .with_type(&spec.record_type)
            .with_message(subtree_text(node));
        builder.extend(context.linkage.iter().cloned());

        let mut own_linkage = Vec::new();
        if spec.generates_guid {
            let guid = (spec.guid_field(), Value::from(Uuid::new_v4().to_string()));
            builder.insert(guid.0.clone(), guid.1.clone());
            own_linkage.push(guid);
        }

        for mapping in &spec.fields {
            builder.insert(spec.field_name(&mapping.name), mapping.extract(node));
        }
        self.strategy.decorate(node, spec, &mut builder);

        for name in &spec.linkage {
            let field = spec.field_name(name);
            let value = builder.get(&field).cloned().unwrap_or(Value::Null);
            own_linkage.push((field, value));
        }

        let mut descent = Descent::Continue;
        if let Some(child_spec) = self.hierarchy.child_spec(spec) {
            let child_context = context.with_linkage(own_linkage);
            for child in self.select_children(node, spec) {
                let child_descent = self.split_node(child, child_spec, &child_context, base, out);
                if self.should_stop(child_descent) {
                    descent = Descent::Abort;
                    break;
                }
            }
        }

        tracing::debug!(
            schema = self.strategy.name(),
            record_type = %spec.record_type,
            depth = context.depth,
            "Split record"
        );
        out.push(builder.build());

        descent
    }

    /// Locate the child-level nodes of `node`.
    fn select_children<'a, 'input>(
        &self,
        node: Node<'a, 'input>,
        spec: &LevelSpec,
    ) -> NodeMatch<'a, 'input> {
        match &spec.children {
            None => NodeMatch::NoMatch,
            Some(ChildSelector::Path(path)) => select_path(node, path),
            Some(ChildSelector::FirstGroup(tag)) => match first_element_child(node) {
                Some(group) => select_path(group, tag),
                None => NodeMatch::NoMatch,
            },
        }
    }

    fn should_stop(&self, descent: Descent) -> bool {
        match descent {
            Descent::Continue => false,
            Descent::Anomaly => self.policy == AnomalyPolicy::AbortWalk,
            Descent::Abort => true,
        }
    }
}
