use crate::model::TypeRecord;
use crate::policy::{EffectiveConfig, FailOn, RulePolicy};
use crate::predicates::{Operand, PredicateKind};
use crate::rules::Rule;
use crate::sequence::FunctionCall;
use archguard_types::RepoPath;

pub fn record(full_name: &str) -> TypeRecord {
    TypeRecord::new(full_name)
}

pub fn type_with_refs(full_name: &str, refs: &[&str]) -> TypeRecord {
    let mut record = TypeRecord::new(full_name);
    record.references = refs.iter().map(|r| r.to_string()).collect();
    record
}

pub fn located(module: &str, full_name: &str, refs: &[&str]) -> TypeRecord {
    let mut record = type_with_refs(full_name, refs);
    record.module = RepoPath::new(module);
    record
}

pub fn names<'a>(types: &[&'a TypeRecord]) -> Vec<&'a str> {
    types.iter().map(|t| t.full_name.as_str()).collect()
}

pub fn call(kind: PredicateKind, operand: Operand) -> FunctionCall {
    FunctionCall::is(kind, operand).expect("valid call")
}

pub fn value(v: &str) -> Operand {
    Operand::Value(v.to_string())
}

pub fn values(vs: &[&str]) -> Operand {
    Operand::Values(vs.iter().map(|v| v.to_string()).collect())
}

/// `that resides_in_namespace(App.Domain) should_not have_dependency_on_any([App.Data])`.
pub fn domain_isolation_rule() -> Rule {
    Rule::builder("domain-isolated")
        .that(call(PredicateKind::ResidesInNamespace, value("App.Domain")))
        .should_not(call(PredicateKind::HaveDependencyOnAny, values(&["App.Data"])))
        .build()
        .expect("valid rule")
}

pub fn config_with_rules(rules: Vec<RulePolicy>) -> EffectiveConfig {
    EffectiveConfig {
        profile: "test".to_string(),
        fail_on: FailOn::Error,
        max_findings: 200,
        rules,
    }
}
