use super::{Polarity, PredicateOutput};
use crate::dependency::{DependencyPolicy, search};
use crate::matcher::NamespaceMatcher;
use crate::model::TypeRecord;
use tracing::trace;

/// Run a dependency search and keep the partition selected by `polarity`.
///
/// Diagnostics of both partitions are returned, so callers can explain failures whichever
/// side the failing types ended up on.
pub(super) fn apply<'a>(
    current: Vec<&'a TypeRecord>,
    policy: DependencyPolicy,
    matcher: &NamespaceMatcher,
    polarity: Polarity,
) -> PredicateOutput<'a> {
    let outcome = search(&current, policy, matcher);
    trace!(
        ?policy,
        positive = outcome.positive.types.len(),
        negative = outcome.negative.types.len(),
        "dependency search"
    );

    let (kept, mut dependencies, other) = match polarity {
        Polarity::Is => (
            outcome.positive.types,
            outcome.positive.dependencies,
            outcome.negative.dependencies,
        ),
        Polarity::IsNot => (
            outcome.negative.types,
            outcome.negative.dependencies,
            outcome.positive.dependencies,
        ),
    };
    dependencies.merge(other);

    PredicateOutput {
        types: kept,
        dependencies: Some(dependencies),
    }
}
