//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - namespace matching on whole segments
//! - polarity and selection complements
//! - repeatable rule evaluation and finding order

use crate::engine::{compare_findings, evaluate};
use crate::matcher::{NamespaceTrie, SearchTree};
use crate::model::{TypeCatalog, TypeRecord};
use crate::policy::RulePolicy;
use crate::predicates::{Operand, Polarity, Predicate, PredicateKind};
use crate::rules::Rule;
use crate::sequence::{FunctionCall, FunctionSequence, SelectionMode};
use crate::test_support::{config_with_rules, names};
use archguard_types::{Finding, Location, RepoPath, Severity, ids};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_segment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("App".to_string()),
        Just("Domain".to_string()),
        Just("Data".to_string()),
        Just("Web".to_string()),
        "[A-Z][a-z]{1,6}",
    ]
}

fn arb_namespace() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_segment(), 1..4).prop_map(|segments| segments.join("."))
}

/// Catalog of distinct type names, each referencing a handful of namespaces.
fn arb_records() -> impl Strategy<Value = Vec<TypeRecord>> {
    prop::collection::vec(
        (
            arb_namespace(),
            prop::collection::vec(arb_namespace(), 0..4),
        ),
        0..12,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (namespace, refs))| {
                let mut record = TypeRecord::new(format!("{namespace}.T{i}"));
                record.references = refs.into_iter().map(|r| format!("{r}.Target")).collect();
                record
            })
            .collect()
    })
}

fn arb_severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Info),
        Just(Severity::Warning),
        Just(Severity::Error),
    ]
}

fn arb_finding() -> impl Strategy<Value = Finding> {
    (
        arb_severity(),
        prop_oneof![Just("domain-isolated"), Just("web-layering")],
        prop::option::of((
            prop_oneof![Just("a.catalog.json"), Just("b.catalog.json")],
            "App\\.[A-Z][a-z]{1,5}",
        )),
    )
        .prop_map(|(severity, rule, location)| Finding {
            severity,
            check_id: rule.to_string(),
            code: ids::CODE_RULE_VIOLATION.to_string(),
            message: format!("violates {rule}"),
            location: location.map(|(path, symbol)| Location {
                path: RepoPath::new(path),
                symbol: Some(symbol),
            }),
            help: None,
            url: None,
            fingerprint: None,
            data: serde_json::Value::Null,
        })
}

fn namespace_call(ns: &str, polarity: Polarity) -> FunctionCall {
    FunctionCall::new(
        PredicateKind::ResidesInNamespace,
        Operand::Value(ns.to_string()),
        polarity,
    )
    .expect("valid call")
}

fn dependency_rule(target: &str) -> Rule {
    Rule::builder("no-target")
        .should_not(
            FunctionCall::is(
                PredicateKind::HaveDependencyOnAny,
                Operand::Values(vec![target.to_string()]),
            )
            .expect("valid call"),
        )
        .build()
        .expect("valid rule")
}

// ============================================================================
// Property tests: matching
// ============================================================================

proptest! {
    /// A registered pattern matches itself and its descendants, never a textual extension
    /// of its last segment.
    #[test]
    fn trie_matches_on_segment_boundaries(ns in arb_namespace(), tail in "[A-Za-z]{1,6}") {
        let trie = NamespaceTrie::new([ns.as_str()]);
        prop_assert!(trie.is_match(&ns));
        let child = format!("{ns}.{tail}");
        prop_assert!(trie.is_match(&child));
        let extended = format!("{ns}{tail}");
        prop_assert!(!trie.is_match(&extended));
    }

    /// IsNot keeps exactly what Is drops.
    #[test]
    fn polarity_partitions_the_input(records in arb_records(), ns in arb_namespace()) {
        let input: Vec<&TypeRecord> = records.iter().collect();
        let predicate = Predicate::compile(PredicateKind::ResidesInNamespace, Operand::Value(ns))
            .expect("valid predicate");
        let kept = names(&predicate.apply(input.clone(), Polarity::Is).types);
        let dropped = names(&predicate.apply(input.clone(), Polarity::IsNot).types);

        prop_assert_eq!(kept.len() + dropped.len(), input.len());
        for name in &kept {
            prop_assert!(!dropped.contains(name));
        }
    }

    /// Selected and NotSelected split the input by name, each in input order.
    #[test]
    fn not_selected_is_the_complement(
        records in arb_records(),
        first in arb_namespace(),
        second in arb_namespace(),
    ) {
        let input: Vec<&TypeRecord> = records.iter().collect();
        let sequence = FunctionSequence::of(namespace_call(&first, Polarity::Is))
            .or(namespace_call(&second, Polarity::IsNot));

        let selected = names(&sequence.execute(&input, SelectionMode::Selected).types);
        let rest = names(&sequence.execute(&input, SelectionMode::NotSelected).types);

        let mut merged: Vec<&str> = Vec::new();
        for record in &input {
            let name = record.full_name.as_str();
            prop_assert!(selected.contains(&name) != rest.contains(&name));
            merged.push(name);
        }
        prop_assert_eq!(selected.len() + rest.len(), merged.len());
    }
}

// ============================================================================
// Property tests: evaluation
// ============================================================================

proptest! {
    /// Evaluating the same rule twice gives identical failing names and diagnostics.
    #[test]
    fn rule_evaluation_is_repeatable(records in arb_records(), target in arb_namespace()) {
        let input: Vec<&TypeRecord> = records.iter().collect();
        let rule = dependency_rule(&target);
        let first = rule.evaluate(&input).into_outcome();
        let second = rule.evaluate(&input).into_outcome();
        prop_assert_eq!(first, second);
    }

    /// Diagnostics of a failing type hold only the registered target.
    #[test]
    fn diagnostics_hold_only_observed_targets(records in arb_records(), target in arb_namespace()) {
        let input: Vec<&TypeRecord> = records.iter().collect();
        let result = dependency_rule(&target).evaluate(&input);
        for name in result.failing_type_names() {
            let deps = result.dependencies_of(name).expect("failing type has diagnostics");
            prop_assert_eq!(deps.len(), 1);
            prop_assert!(deps.contains(&target));
        }
    }

    /// Engine output does not depend on the order findings were produced in.
    #[test]
    fn findings_ordering_is_deterministic(findings in prop::collection::vec(arb_finding(), 0..20)) {
        let mut forward = findings.clone();
        let mut backward = findings;
        backward.reverse();
        forward.sort_by(compare_findings);
        backward.sort_by(compare_findings);
        for (a, b) in forward.iter().zip(&backward) {
            prop_assert_eq!(compare_findings(a, b), std::cmp::Ordering::Equal);
        }
    }

    /// Report findings never exceed max_findings, while the total is preserved.
    #[test]
    fn engine_respects_max_findings(records in arb_records(), max in 0usize..5) {
        let mut cfg = config_with_rules(vec![RulePolicy::new(
            dependency_rule("App"),
            Severity::Error,
        )]);
        cfg.max_findings = max;
        let report = evaluate(&TypeCatalog::new(records), &cfg);
        prop_assert!(report.findings.len() <= max);
        prop_assert!(report.data.findings_total as usize >= report.findings.len());
    }
}
