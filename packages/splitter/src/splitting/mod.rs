//! Report splitting system.
//!
//! One generic engine walks a parsed report and emits a flat record per
//! visited node. What to visit and which fields to extract is declared per
//! report format in a [`HierarchyRegistry`]; the few format-specific rules
//! live in a [`SplitStrategy`].

mod coerce;
mod config;
mod engine;
mod registry;
mod strategy;
mod types;

pub use coerce::{parse_float, parse_integer};
pub use config::{create_coverage_hierarchy, create_junit_hierarchy};
pub use engine::SplitEngine;
pub use registry::HierarchyRegistry;
pub use strategy::{CoberturaStrategy, JunitStrategy, SplitStrategy};
pub use types::{
    AnomalyPolicy, ChildSelector, Coercion, Descent, FieldMapping, LevelSpec, SplitContext,
};
