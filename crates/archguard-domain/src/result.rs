use crate::dependency::DependencyDiagnostics;
use crate::model::TypeRecord;
use std::collections::{BTreeMap, BTreeSet};

/// Outcome of evaluating one rule, borrowing the evaluated records.
#[derive(Clone, Debug)]
pub struct TestResult<'a> {
    rule_id: String,
    selected: Vec<&'a TypeRecord>,
    failing: Vec<&'a TypeRecord>,
    dependencies: DependencyDiagnostics,
}

impl<'a> TestResult<'a> {
    pub(crate) fn new(
        rule_id: String,
        selected: Vec<&'a TypeRecord>,
        failing: Vec<&'a TypeRecord>,
        dependencies: DependencyDiagnostics,
    ) -> Self {
        Self {
            rule_id,
            selected,
            failing,
            dependencies,
        }
    }

    pub fn rule_id(&self) -> &str {
        &self.rule_id
    }

    pub fn is_successful(&self) -> bool {
        self.failing.is_empty()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Types that broke the rule, in evaluation order.
    pub fn failing_types(&self) -> &[&'a TypeRecord] {
        &self.failing
    }

    pub fn failing_type_names(&self) -> Vec<&'a str> {
        self.failing.iter().map(|t| t.full_name.as_str()).collect()
    }

    /// Matched dependency targets of the failing types.
    pub fn dependencies(&self) -> &DependencyDiagnostics {
        &self.dependencies
    }

    pub fn dependencies_of(&self, type_name: &str) -> Option<&BTreeSet<String>> {
        self.dependencies.get(type_name)
    }

    /// Detach the result from the catalog it was computed over.
    pub fn into_outcome(self) -> RuleOutcome {
        RuleOutcome {
            rule_id: self.rule_id,
            successful: self.failing.is_empty(),
            selected: self.selected.len(),
            failing: self.failing.iter().map(|t| t.full_name.clone()).collect(),
            dependencies: self.dependencies.into_inner(),
        }
    }
}

/// Owned summary of a [`TestResult`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleOutcome {
    pub rule_id: String,
    pub successful: bool,
    pub selected: usize,
    pub failing: Vec<String>,
    pub dependencies: BTreeMap<String, BTreeSet<String>>,
}
