//! Mapping tables for the supported report formats.

use super::registry::HierarchyRegistry;
use super::types::{ChildSelector, FieldMapping, LevelSpec};

/// Create the hierarchy registry for Cobertura coverage reports.
///
/// ```text
/// coverage                     cobertura_coverage
/// ├── sources/source*          (coverage_sourceN fields)
/// └── packages/package*        cobertura_package    package_guid
///     └── classes/class*       cobertura_class      class_guid
///         └── methods/method*  cobertura_method
/// ```
#[must_use]
pub fn create_coverage_hierarchy() -> HierarchyRegistry {
    let mut registry = HierarchyRegistry::new();

    registry.register(
        LevelSpec::new("coverage", "cobertura_coverage", "coverage")
            .with_fields([
                FieldMapping::percent("line-rate"),
                FieldMapping::percent("branch-rate"),
                FieldMapping::integer("lines-covered"),
                FieldMapping::integer("lines-valid"),
                FieldMapping::integer("branches-covered"),
                FieldMapping::integer("branches-valid"),
                FieldMapping::float("complexity"),
                FieldMapping::text("version"),
                FieldMapping::text("timestamp"),
            ])
            .with_children(ChildSelector::Path("packages/package".to_string())),
    );

    registry.register(
        LevelSpec::new("package", "cobertura_package", "package")
            .with_fields([
                FieldMapping::text("name"),
                FieldMapping::percent("line-rate"),
                FieldMapping::percent("branch-rate"),
            ])
            .with_children(ChildSelector::FirstGroup("class".to_string()))
            .with_guid(true)
            .with_linkage(["name"])
            .with_skip_if_empty(true),
    );

    registry.register(
        LevelSpec::new("class", "cobertura_class", "class")
            .with_fields([
                FieldMapping::text("name"),
                FieldMapping::text("filename"),
                FieldMapping::percent("line-rate"),
                FieldMapping::percent("branch-rate"),
            ])
            .with_children(ChildSelector::FirstGroup("method".to_string()))
            .with_guid(true)
            .with_linkage(["name"]),
    );

    registry.register(
        LevelSpec::new("method", "cobertura_method", "method")
            .with_fields([FieldMapping::text("name"), FieldMapping::text("signature")]),
    );

    registry
}

/// Create the hierarchy registry for JUnit test reports.
///
/// ```text
/// testsuite        junit_testsuite   testsuite_guid
/// └── testcase*    junit_testcase    (result fields)
/// ```
#[must_use]
pub fn create_junit_hierarchy() -> HierarchyRegistry {
    let mut registry = HierarchyRegistry::new();

    registry.register(
        LevelSpec::new("testsuite", "junit_testsuite", "testsuite")
            .with_fields([
                FieldMapping::text("disabled"),
                FieldMapping::integer("errors"),
                FieldMapping::integer("failures"),
                FieldMapping::text("hostname"),
                FieldMapping::text("id"),
                FieldMapping::text("name"),
                FieldMapping::text("package"),
                FieldMapping::integer("skipped"),
                FieldMapping::integer("tests"),
                FieldMapping::float("time"),
                FieldMapping::text("timestamp"),
            ])
            .with_children(ChildSelector::Path("testcase".to_string()))
            .with_guid(true)
            .with_linkage(["name"]),
    );

    registry.register(
        LevelSpec::new("testcase", "junit_testcase", "testcase").with_fields([
            FieldMapping::text("name"),
            FieldMapping::text("assertions"),
            FieldMapping::float("duration").from_attribute("time"),
            FieldMapping::text("classname"),
            FieldMapping::text("status"),
        ]),
    );

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_coverage_hierarchy() {
        let registry = create_coverage_hierarchy();
        assert_eq!(registry.len(), 4);

        let coverage = registry.get_spec("coverage").unwrap();
        assert!(!coverage.generates_guid);
        assert_eq!(coverage.fields.len(), 9);

        let package = registry.child_spec(coverage).unwrap();
        assert_eq!(package.tag, "package");
        assert!(package.generates_guid);
        assert!(package.skip_if_empty);

        let class = registry.child_spec(package).unwrap();
        assert_eq!(class.tag, "class");
        assert_eq!(class.linkage, vec!["name"]);

        let method = registry.child_spec(class).unwrap();
        assert_eq!(method.record_type, "cobertura_method");
        assert!(registry.child_spec(method).is_none());
    }

    #[test]
    fn test_create_junit_hierarchy() {
        let registry = create_junit_hierarchy();
        assert_eq!(registry.len(), 2);

        let suite = registry.get_spec("testsuite").unwrap();
        assert!(suite.generates_guid);
        assert_eq!(suite.fields.len(), 11);

        let case = registry.child_spec(suite).unwrap();
        assert_eq!(case.record_type, "junit_testcase");
        assert!(!case.generates_guid);
        assert!(case.fields.iter().any(|f| f.name == "duration"));
    }
}
