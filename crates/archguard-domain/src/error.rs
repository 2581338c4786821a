use thiserror::Error;

/// Configuration errors raised while building predicate calls and rules.
///
/// Evaluation itself never fails; everything that can be wrong with a rule is reported here,
/// before any type is visited.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("unknown predicate '{0}'")]
    UnknownPredicate(String),

    #[error("predicate '{predicate}' expects {expected}")]
    OperandMismatch {
        predicate: &'static str,
        expected: &'static str,
    },

    #[error("predicate '{predicate}' requires a non-empty value")]
    EmptyValue { predicate: &'static str },

    #[error("predicate '{predicate}' requires at least one non-empty name")]
    EmptyDependencyList { predicate: &'static str },

    #[error("predicate '{predicate}' has an invalid pattern '{pattern}'")]
    InvalidPattern {
        predicate: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("rule '{0}' has no condition (add `should` or `should_not`)")]
    MissingCondition(String),

    #[error("rule '{0}' already has a condition; `should` and `should_not` are exclusive")]
    ConditionAlreadySet(String),

    #[error("rule id must not be empty")]
    EmptyRuleId,
}
