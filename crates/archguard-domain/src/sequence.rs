//! Ordered predicate calls combined with AND (within a group) and OR (across groups).

use crate::dependency::DependencyDiagnostics;
use crate::error::RuleError;
use crate::model::TypeRecord;
use crate::predicates::{Operand, Polarity, Predicate, PredicateKind};
use std::collections::BTreeSet;

/// One predicate invocation: kind, compiled operand and polarity.
#[derive(Clone, Debug)]
pub struct FunctionCall {
    kind: PredicateKind,
    predicate: Predicate,
    polarity: Polarity,
}

impl FunctionCall {
    /// Validate `operand` against `kind` and compile it. Fails before any evaluation.
    pub fn new(
        kind: PredicateKind,
        operand: Operand,
        polarity: Polarity,
    ) -> Result<Self, RuleError> {
        Ok(Self {
            kind,
            predicate: Predicate::compile(kind, operand)?,
            polarity,
        })
    }

    /// Resolve a predicate by id, as written in configuration.
    pub fn from_id(id: &str, operand: Operand, polarity: Polarity) -> Result<Self, RuleError> {
        let kind = PredicateKind::from_id(id)
            .ok_or_else(|| RuleError::UnknownPredicate(id.to_string()))?;
        Self::new(kind, operand, polarity)
    }

    pub fn is(kind: PredicateKind, operand: Operand) -> Result<Self, RuleError> {
        Self::new(kind, operand, Polarity::Is)
    }

    pub fn is_not(kind: PredicateKind, operand: Operand) -> Result<Self, RuleError> {
        Self::new(kind, operand, Polarity::IsNot)
    }

    pub fn kind(&self) -> PredicateKind {
        self.kind
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }
}

/// Calls joined by AND.
#[derive(Clone, Debug, Default)]
pub struct FunctionGroup {
    calls: Vec<FunctionCall>,
}

impl FunctionGroup {
    pub fn calls(&self) -> &[FunctionCall] {
        &self.calls
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// Records matched by at least one group.
    #[default]
    Selected,
    /// Records matched by no group.
    NotSelected,
}

/// Result of executing a sequence: records in input order, with the dependency diagnostics
/// of those records only.
#[derive(Clone, Debug, Default)]
pub struct Selection<'a> {
    pub types: Vec<&'a TypeRecord>,
    pub dependencies: DependencyDiagnostics,
}

/// Groups joined by OR. AND binds tighter: `a.and(b).or(c)` is `(a AND b) OR c`.
#[derive(Clone, Debug, Default)]
pub struct FunctionSequence {
    groups: Vec<FunctionGroup>,
}

impl FunctionSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence with a single call.
    pub fn of(call: FunctionCall) -> Self {
        Self::new().or(call)
    }

    /// Append `call` to the last group, opening one if the sequence is empty.
    pub fn and(mut self, call: FunctionCall) -> Self {
        self.push_and(call);
        self
    }

    /// Open a new group starting with `call`.
    pub fn or(mut self, call: FunctionCall) -> Self {
        self.push_or(call);
        self
    }

    pub(crate) fn push_and(&mut self, call: FunctionCall) {
        match self.groups.last_mut() {
            Some(group) => group.calls.push(call),
            None => self.push_or(call),
        }
    }

    pub(crate) fn push_or(&mut self, call: FunctionCall) {
        self.groups.push(FunctionGroup { calls: vec![call] });
    }

    pub fn groups(&self) -> &[FunctionGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Evaluate every group over the full `input` and combine the groups' survivors.
    ///
    /// Set algebra is keyed by full name; the result is rebuilt from `input`, so its order
    /// follows the input order. Diagnostics gathered by the calls are kept for the returned
    /// records, in either mode.
    pub fn execute<'a>(&self, input: &[&'a TypeRecord], mode: SelectionMode) -> Selection<'a> {
        let mut accepted: BTreeSet<&'a str> = BTreeSet::new();
        let mut dependencies = DependencyDiagnostics::default();

        for group in &self.groups {
            let mut working: Vec<&'a TypeRecord> = input.to_vec();
            for call in &group.calls {
                let output = call.predicate.apply(working, call.polarity);
                working = output.types;
                if let Some(found) = output.dependencies {
                    dependencies.merge(found);
                }
            }
            accepted.extend(working.into_iter().map(|t| t.full_name.as_str()));
        }

        let keep = |t: &&'a TypeRecord| match mode {
            SelectionMode::Selected => accepted.contains(t.full_name.as_str()),
            SelectionMode::NotSelected => !accepted.contains(t.full_name.as_str()),
        };
        let types: Vec<&'a TypeRecord> = input.iter().copied().filter(keep).collect();
        let names: BTreeSet<&str> = types.iter().map(|t| t.full_name.as_str()).collect();
        Selection {
            dependencies: dependencies.restricted_to(&names),
            types,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{names, record};

    fn name_is(value: &str) -> FunctionCall {
        FunctionCall::is(PredicateKind::HaveName, Operand::Value(value.to_string()))
            .expect("call")
    }

    fn name_contains(value: &str) -> FunctionCall {
        FunctionCall::is(
            PredicateKind::HaveNameContaining,
            Operand::Value(value.to_string()),
        )
        .expect("call")
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let t1 = record("App.AlphaBeta");
        let t2 = record("App.Gamma");
        let t3 = record("App.Delta");
        let input = vec![&t1, &t2, &t3];

        let sequence = FunctionSequence::of(name_contains("Alpha"))
            .and(name_contains("Beta"))
            .or(name_is("Gamma"));
        let selection = sequence.execute(&input, SelectionMode::Selected);
        assert_eq!(names(&selection.types), vec!["App.AlphaBeta", "App.Gamma"]);
    }

    #[test]
    fn groups_start_from_the_full_input() {
        let a = record("App.A");
        let b = record("App.B");
        let input = vec![&a, &b];

        // The first group narrows to nothing; the second must still see both records.
        let sequence = FunctionSequence::of(name_is("A"))
            .and(name_is("B"))
            .or(name_is("B"));
        let selection = sequence.execute(&input, SelectionMode::Selected);
        assert_eq!(names(&selection.types), vec!["App.B"]);
    }

    #[test]
    fn not_selected_is_the_complement_by_name() {
        let a = record("App.A");
        let b = record("App.B");
        let c = record("App.C");
        let input = vec![&a, &b, &c];

        let sequence = FunctionSequence::of(name_is("B"));
        let selected = sequence.execute(&input, SelectionMode::Selected);
        let rest = sequence.execute(&input, SelectionMode::NotSelected);
        assert_eq!(names(&selected.types), vec!["App.B"]);
        assert_eq!(names(&rest.types), vec!["App.A", "App.C"]);
    }

    #[test]
    fn diagnostics_follow_the_returned_records() {
        let mut partial = record("App.Web.Home");
        partial.references = BTreeSet::from(["App.Data.Repository".to_string()]);
        let mut full = record("App.Web.Checkout");
        full.references = BTreeSet::from([
            "App.Domain.Order".to_string(),
            "App.Data.Repository".to_string(),
        ]);
        let input = vec![&partial, &full];

        // The call records diagnostics for both records.
        let sequence = FunctionSequence::of(
            FunctionCall::is(
                PredicateKind::HaveDependencyOnAll,
                Operand::Values(vec!["App.Domain".to_string(), "App.Data".to_string()]),
            )
            .expect("call"),
        );

        let selected = sequence.execute(&input, SelectionMode::Selected);
        assert_eq!(names(&selected.types), vec!["App.Web.Checkout"]);
        assert_eq!(selected.dependencies.len(), 1);
        assert!(selected.dependencies.get("App.Web.Home").is_none());

        let rest = sequence.execute(&input, SelectionMode::NotSelected);
        assert_eq!(names(&rest.types), vec!["App.Web.Home"]);
        assert_eq!(
            rest.dependencies.get("App.Web.Home"),
            Some(&BTreeSet::from(["App.Data".to_string()]))
        );
        assert!(rest.dependencies.get("App.Web.Checkout").is_none());
    }

    #[test]
    fn empty_sequence_selects_nothing() {
        let a = record("App.A");
        let selection = FunctionSequence::new().execute(&[&a], SelectionMode::Selected);
        assert!(selection.types.is_empty());
    }

    #[test]
    fn unknown_predicate_is_rejected() {
        let err = FunctionCall::from_id("have_colour", Operand::None, Polarity::Is)
            .expect_err("unknown id");
        assert!(matches!(err, RuleError::UnknownPredicate(id) if id == "have_colour"));
    }
}
