//! Pure architecture rule evaluation (no IO).
//!
//! Input: a type catalog constructed elsewhere, plus rules built from predicate calls.
//! Output: per-rule test results, or findings + verdict + summary data via [`evaluate`].

#![forbid(unsafe_code)]

pub mod dependency;
pub mod error;
pub mod fingerprint;
pub mod matcher;
pub mod model;
pub mod policy;
pub mod predicates;
pub mod report;
pub mod result;
pub mod rules;
pub mod sequence;

mod engine;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use dependency::{DependencyDiagnostics, DependencyPolicy, SearchOutcome, search};
pub use engine::evaluate;
pub use error::RuleError;
pub use matcher::{NamespaceMatcher, NamespaceTrie, PatternMatcher, SearchTree};
pub use model::{TypeCatalog, TypeKind, TypeRecord, Visibility};
pub use predicates::{Operand, Polarity, PredicateKind};
pub use result::{RuleOutcome, TestResult};
pub use rules::{Condition, Rule, RuleBuilder};
pub use sequence::{FunctionCall, FunctionSequence, Selection, SelectionMode};
