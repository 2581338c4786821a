use crate::error::RuleError;
use crate::model::TypeRecord;
use crate::result::TestResult;
use crate::sequence::{FunctionCall, FunctionSequence, Selection, SelectionMode};
use tracing::debug;

/// Whether the selected types must, or must not, satisfy the condition sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Condition {
    Should,
    ShouldNot,
}

/// An architecture rule: a selection ("types that ..."), a polarity and a condition
/// ("should ..." / "should not ...").
#[derive(Clone, Debug)]
pub struct Rule {
    id: String,
    selection: FunctionSequence,
    condition: Condition,
    assertion: FunctionSequence,
}

impl Rule {
    pub fn builder(id: impl Into<String>) -> RuleBuilder {
        RuleBuilder::new(id)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn condition(&self) -> Condition {
        self.condition
    }

    /// Records the rule applies to. A rule without selection applies to every record.
    pub fn select<'a>(&self, types: &[&'a TypeRecord]) -> Vec<&'a TypeRecord> {
        if self.selection.is_empty() {
            return types.to_vec();
        }
        self.selection.execute(types, SelectionMode::Selected).types
    }

    /// Check the rule against `types`.
    pub fn evaluate<'a>(&self, types: &[&'a TypeRecord]) -> TestResult<'a> {
        let selected = self.select(types);
        // Should fails what the assertion rejects; ShouldNot fails what it accepts.
        let mode = match self.condition {
            Condition::Should => SelectionMode::NotSelected,
            Condition::ShouldNot => SelectionMode::Selected,
        };
        let Selection {
            types: failing,
            dependencies,
        } = self.assertion.execute(&selected, mode);

        debug!(
            rule = %self.id,
            selected = selected.len(),
            failing = failing.len(),
            "rule evaluated"
        );

        TestResult::new(self.id.clone(), selected, failing, dependencies)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Selection,
    Condition,
}

/// Fluent builder mirroring the sentence form of a rule:
/// `that(a).and(b).or(c).should(d).and(e)`.
///
/// `and` extends the last group of the current phase, `or` opens a new group. Only the first
/// error is kept and returned by [`RuleBuilder::build`].
#[derive(Debug)]
pub struct RuleBuilder {
    id: String,
    selection: FunctionSequence,
    condition: Option<Condition>,
    assertion: FunctionSequence,
    phase: Phase,
    error: Option<RuleError>,
}

impl RuleBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            selection: FunctionSequence::new(),
            condition: None,
            assertion: FunctionSequence::new(),
            phase: Phase::Selection,
            error: None,
        }
    }

    /// Start (or extend) the selection with `call`.
    pub fn that(mut self, call: FunctionCall) -> Self {
        self.phase = Phase::Selection;
        self.selection.push_and(call);
        self
    }

    pub fn and(mut self, call: FunctionCall) -> Self {
        match self.phase {
            Phase::Selection => self.selection.push_and(call),
            Phase::Condition => self.assertion.push_and(call),
        }
        self
    }

    pub fn or(mut self, call: FunctionCall) -> Self {
        match self.phase {
            Phase::Selection => self.selection.push_or(call),
            Phase::Condition => self.assertion.push_or(call),
        }
        self
    }

    pub fn should(self, call: FunctionCall) -> Self {
        self.begin_condition(Condition::Should, call)
    }

    pub fn should_not(self, call: FunctionCall) -> Self {
        self.begin_condition(Condition::ShouldNot, call)
    }

    /// Replace the selection with a prebuilt sequence.
    pub fn selection(mut self, sequence: FunctionSequence) -> Self {
        self.selection = sequence;
        self
    }

    /// Set the condition from a prebuilt sequence.
    pub fn condition(mut self, condition: Condition, sequence: FunctionSequence) -> Self {
        if self.set_condition(condition) {
            self.assertion = sequence;
        }
        self
    }

    pub fn build(self) -> Result<Rule, RuleError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.id.trim().is_empty() {
            return Err(RuleError::EmptyRuleId);
        }
        let condition = match self.condition {
            Some(condition) if !self.assertion.is_empty() => condition,
            _ => return Err(RuleError::MissingCondition(self.id)),
        };
        Ok(Rule {
            id: self.id,
            selection: self.selection,
            condition,
            assertion: self.assertion,
        })
    }

    fn begin_condition(mut self, condition: Condition, call: FunctionCall) -> Self {
        if self.set_condition(condition) {
            self.phase = Phase::Condition;
            self.assertion.push_and(call);
        }
        self
    }

    fn set_condition(&mut self, condition: Condition) -> bool {
        if self.condition.is_some() {
            if self.error.is_none() {
                self.error = Some(RuleError::ConditionAlreadySet(self.id.clone()));
            }
            return false;
        }
        self.condition = Some(condition);
        true
    }
}
