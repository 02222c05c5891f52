//! Hierarchy registry for report splitting.

use std::collections::HashMap;

use super::types::LevelSpec;

/// Registry of level specifications, keyed by tag name.
#[derive(Debug, Clone)]
pub struct HierarchyRegistry {
    specs: HashMap<String, LevelSpec>,
}

impl HierarchyRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            specs: HashMap::new(),
        }
    }

    /// Register a level specification.
    pub fn register(&mut self, spec: LevelSpec) {
        self.specs.insert(spec.tag.clone(), spec);
    }

    /// Get the specification for a tag.
    #[must_use]
    pub fn get_spec(&self, tag: &str) -> Option<&LevelSpec> {
        self.specs.get(tag)
    }

    /// Get the specification of the level below `spec`, if any.
    #[must_use]
    pub fn child_spec(&self, spec: &LevelSpec) -> Option<&LevelSpec> {
        spec.children
            .as_ref()
            .and_then(|selector| self.get_spec(selector.child_tag()))
    }

    /// Number of registered levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether no levels are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for HierarchyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splitting::ChildSelector;

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = HierarchyRegistry::new();
        registry.register(LevelSpec::new("testsuite", "junit_testsuite", "testsuite"));

        let spec = registry.get_spec("testsuite").unwrap();
        assert_eq!(spec.record_type, "junit_testsuite");
        assert!(registry.get_spec("testcase").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_child_spec() {
        let mut registry = HierarchyRegistry::new();
        registry.register(
            LevelSpec::new("testsuite", "junit_testsuite", "testsuite")
                .with_children(ChildSelector::Path("testcase".to_string())),
        );
        registry.register(LevelSpec::new("testcase", "junit_testcase", "testcase"));

        let suite = registry.get_spec("testsuite").unwrap();
        let case = registry.child_spec(suite).unwrap();
        assert_eq!(case.tag, "testcase");
        assert!(registry.child_spec(case).is_none());
    }
}
