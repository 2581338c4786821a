//! Public facade over the archguard engine.
//!
//! Re-exports the rule-building API and the report types so embedders depend on one crate.

#![forbid(unsafe_code)]

pub use archguard_domain::dependency::{DependencyDiagnostics, DependencyPolicy, search};
pub use archguard_domain::policy::{Allowlist, EffectiveConfig, FailOn, RulePolicy};
pub use archguard_domain::report::{DomainReport, RuleSummary, SeverityCounts};
pub use archguard_domain::{
    Condition, FunctionCall, FunctionSequence, NamespaceMatcher, NamespaceTrie, Operand,
    PatternMatcher, Polarity, PredicateKind, Rule, RuleBuilder, RuleError, RuleOutcome,
    SearchTree, Selection, SelectionMode, TestResult, TypeCatalog, TypeKind, TypeRecord,
    Visibility, evaluate,
};
pub use archguard_types::{ArchguardReport, Finding, Severity, Verdict};
