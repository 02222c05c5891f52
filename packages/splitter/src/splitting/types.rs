//! Types for the report splitting system.

use roxmltree::Node;
use serde_json::Value;

use super::coerce::{parse_float, parse_integer};

/// How an extracted value is converted before it lands in a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Copied as a string; absent becomes `null`.
    Text,
    /// Leading integer prefix; absent or unparsable becomes `0`.
    Integer,
    /// Leading float prefix; absent or unparsable becomes `0.0`.
    Float,
    /// Float multiplied by 100 (`"0.85"` becomes `85.0`).
    Percent,
}

impl Coercion {
    /// Apply the coercion to a raw value.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use report_splitter::splitting::Coercion;
    ///
    /// assert_eq!(Coercion::Percent.apply(Some("0.85")), json!(85.0));
    /// assert_eq!(Coercion::Integer.apply(None), json!(0));
    /// assert_eq!(Coercion::Text.apply(None), json!(null));
    /// ```
    #[must_use]
    pub fn apply(self, raw: Option<&str>) -> Value {
        match self {
            Self::Text => raw.map_or(Value::Null, Value::from),
            Self::Integer => Value::from(raw.map_or(0, parse_integer)),
            Self::Float => Value::from(raw.map_or(0.0, parse_float)),
            Self::Percent => {
                let percent = raw.map_or(0.0, parse_float) * 100.0;
                Value::from(if percent.is_finite() { percent } else { 0.0 })
            }
        }
    }
}

/// Declarative mapping of one node value to one record field.
///
/// The record field is named `{prefix}_{name}` where the prefix comes from
/// the owning [`LevelSpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    /// Field name without level prefix.
    pub name: String,
    /// Attribute holding the raw value.
    pub attribute: String,
    /// Conversion applied to the raw value.
    pub coercion: Coercion,
}

impl FieldMapping {
    fn attribute(name: impl Into<String>, coercion: Coercion) -> Self {
        let name = name.into();
        Self {
            attribute: name.clone(),
            name,
            coercion,
        }
    }

    /// String attribute copied as is.
    #[must_use]
    pub fn text(name: impl Into<String>) -> Self {
        Self::attribute(name, Coercion::Text)
    }

    /// Integer attribute.
    #[must_use]
    pub fn integer(name: impl Into<String>) -> Self {
        Self::attribute(name, Coercion::Integer)
    }

    /// Float attribute.
    #[must_use]
    pub fn float(name: impl Into<String>) -> Self {
        Self::attribute(name, Coercion::Float)
    }

    /// Rate attribute in percentage form.
    #[must_use]
    pub fn percent(name: impl Into<String>) -> Self {
        Self::attribute(name, Coercion::Percent)
    }

    /// Read the raw value from a differently named attribute.
    #[must_use]
    pub fn from_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = attribute.into();
        self
    }

    /// Extract and coerce the value from a node.
    #[must_use]
    pub fn extract(&self, node: Node<'_, '_>) -> Value {
        self.coercion.apply(node.attribute(self.attribute.as_str()))
    }
}

/// How the child level of a node is located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildSelector {
    /// Slash-separated child steps; the last step names the child tag
    /// (e.g. `packages/package`).
    Path(String),
    /// Children with the given tag under the node's first element child
    /// (e.g. `class` under a package's `<classes>`).
    FirstGroup(String),
}

impl ChildSelector {
    /// Tag name of the selected children.
    #[must_use]
    pub fn child_tag(&self) -> &str {
        match self {
            Self::Path(path) => path.rsplit('/').next().unwrap_or(path),
            Self::FirstGroup(tag) => tag,
        }
    }
}

/// Declarative specification of one level in a report hierarchy.
#[derive(Debug, Clone)]
pub struct LevelSpec {
    /// XML tag name (without namespace).
    pub tag: String,

    /// Value of the `type` field on records of this level.
    pub record_type: String,

    /// Prefix for this level's field names (e.g. "package").
    pub prefix: String,

    /// Mapped fields, in output order.
    pub fields: Vec<FieldMapping>,

    /// How to find the next level down, if any.
    pub children: Option<ChildSelector>,

    /// Whether records of this level get a fresh `{prefix}_guid`.
    pub generates_guid: bool,

    /// Own mapped fields (unprefixed names) copied onto every descendant
    /// record, next to the guid.
    pub linkage: Vec<String>,

    /// Whether a node without element children is a structural anomaly.
    pub skip_if_empty: bool,
}

impl LevelSpec {
    /// Create a new level specification.
    #[must_use]
    pub fn new(
        tag: impl Into<String>,
        record_type: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            tag: tag.into(),
            record_type: record_type.into(),
            prefix: prefix.into(),
            fields: Vec::new(),
            children: None,
            generates_guid: false,
            linkage: Vec::new(),
            skip_if_empty: false,
        }
    }

    /// Set the mapped fields.
    #[must_use]
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = FieldMapping>) -> Self {
        self.fields = fields.into_iter().collect();
        self
    }

    /// Set the child selector.
    #[must_use]
    pub fn with_children(mut self, selector: ChildSelector) -> Self {
        self.children = Some(selector);
        self
    }

    /// Generate a unique identifier for every record of this level.
    #[must_use]
    pub fn with_guid(mut self, generates_guid: bool) -> Self {
        self.generates_guid = generates_guid;
        self
    }

    /// Set the fields copied down to descendants.
    #[must_use]
    pub fn with_linkage(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.linkage = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Treat nodes without element children as anomalies.
    #[must_use]
    pub fn with_skip_if_empty(mut self, skip: bool) -> Self {
        self.skip_if_empty = skip;
        self
    }

    /// Full record field name for an unprefixed name.
    #[must_use]
    pub fn field_name(&self, name: &str) -> String {
        format!("{}_{}", self.prefix, name)
    }

    /// Name of this level's identifier field.
    #[must_use]
    pub fn guid_field(&self) -> String {
        self.field_name("guid")
    }
}

/// Context for splitting operations.
///
/// Carries the ancestor linkage fields through the recursive walk.
#[derive(Debug, Clone, Default)]
pub struct SplitContext {
    /// Identifier and natural-key fields of every ancestor, outermost first.
    pub linkage: Vec<(String, Value)>,

    /// Current depth (0 = document root level).
    pub depth: usize,
}

impl SplitContext {
    /// Create an empty root context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a child context with additional linkage fields.
    #[must_use]
    pub fn with_linkage(&self, fields: impl IntoIterator<Item = (String, Value)>) -> Self {
        let mut new = self.clone();
        new.linkage.extend(fields);
        new.depth += 1;
        new
    }
}

/// Signal returned by the walker for one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descent {
    /// The node was processed.
    Continue,
    /// The node was structurally degenerate and emitted nothing.
    Anomaly,
    /// The walk must stop; no further siblings are processed.
    Abort,
}

/// What to do when a node turns out to be structurally degenerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnomalyPolicy {
    /// Skip only the degenerate node and keep processing its siblings.
    #[default]
    SkipBranch,
    /// Stop the whole remaining walk; already started ancestors still emit
    /// their own records.
    AbortWalk,
}
