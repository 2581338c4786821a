//! Dependency search: classify types by what their references resolve to.

use crate::matcher::SearchTree;
use crate::model::TypeRecord;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DependencyPolicy {
    /// At least one reference is matched.
    HaveDependencyOnAny,
    /// Every registered pattern is matched by some reference.
    HaveDependencyOnAll,
    /// Every reference is matched, and at least one reference exists.
    OnlyHaveDependenciesOnAny,
    /// Every reference is matched, and every registered pattern is covered.
    OnlyHaveDependenciesOnAll,
    /// Every reference is matched; a type without references qualifies.
    OnlyHaveDependenciesOnAnyOrNone,
}

impl DependencyPolicy {
    fn restricts_to_matched(self) -> bool {
        matches!(
            self,
            DependencyPolicy::OnlyHaveDependenciesOnAny
                | DependencyPolicy::OnlyHaveDependenciesOnAll
                | DependencyPolicy::OnlyHaveDependenciesOnAnyOrNone
        )
    }

    fn is_satisfied(
        self,
        matched: &BTreeSet<String>,
        every_reference_matched: bool,
        pattern_count: usize,
    ) -> bool {
        let covers_any = !matched.is_empty();
        // A matcher without a pattern list has nothing to cover; "all" means "any" there.
        let covers_all = if pattern_count == 0 {
            covers_any
        } else {
            matched.len() >= pattern_count
        };

        if self.restricts_to_matched() && !every_reference_matched {
            return false;
        }
        match self {
            DependencyPolicy::HaveDependencyOnAny | DependencyPolicy::OnlyHaveDependenciesOnAny => {
                covers_any
            }
            DependencyPolicy::HaveDependencyOnAll | DependencyPolicy::OnlyHaveDependenciesOnAll => {
                covers_all
            }
            DependencyPolicy::OnlyHaveDependenciesOnAnyOrNone => true,
        }
    }
}

/// Per-type record of the dependency targets that matched, keyed by full type name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DependencyDiagnostics(BTreeMap<String, BTreeSet<String>>);

impl DependencyDiagnostics {
    /// Union `matched` into the entry for `type_name`. Empty sets are not recorded.
    pub fn record(&mut self, type_name: &str, matched: BTreeSet<String>) {
        if matched.is_empty() {
            return;
        }
        self.0.entry(type_name.to_string()).or_default().extend(matched);
    }

    pub fn merge(&mut self, other: DependencyDiagnostics) {
        for (type_name, matched) in other.0 {
            self.0.entry(type_name).or_default().extend(matched);
        }
    }

    /// Copy of the entries whose type name is in `names`.
    pub fn restricted_to(&self, names: &BTreeSet<&str>) -> DependencyDiagnostics {
        DependencyDiagnostics(
            self.0
                .iter()
                .filter(|(name, _)| names.contains(name.as_str()))
                .map(|(name, matched)| (name.clone(), matched.clone()))
                .collect(),
        )
    }

    pub fn get(&self, type_name: &str) -> Option<&BTreeSet<String>> {
        self.0.get(type_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, BTreeSet<String>> {
        self.0
    }
}

/// Types on one side of a search, with the dependencies observed for them.
#[derive(Clone, Debug, Default)]
pub struct Partition<'a> {
    pub types: Vec<&'a TypeRecord>,
    pub dependencies: DependencyDiagnostics,
}

#[derive(Clone, Debug, Default)]
pub struct SearchOutcome<'a> {
    /// Types satisfying the policy.
    pub positive: Partition<'a>,
    /// Types not satisfying the policy.
    pub negative: Partition<'a>,
}

/// Classify every type in `types` under `policy`, querying `tree` for each external reference.
///
/// The matcher is only read; one instance serves every type of the call. Input order is
/// preserved within each partition.
pub fn search<'a, S>(
    types: &[&'a TypeRecord],
    policy: DependencyPolicy,
    tree: &S,
) -> SearchOutcome<'a>
where
    S: SearchTree + ?Sized,
{
    let mut outcome = SearchOutcome::default();
    let pattern_count = tree.pattern_count();

    for &ty in types {
        let mut matched = BTreeSet::new();
        let mut every_reference_matched = true;
        for reference in ty.external_references() {
            let hits = tree.matches(reference);
            if hits.is_empty() {
                every_reference_matched = false;
            } else {
                matched.extend(hits);
            }
        }

        let side = if policy.is_satisfied(&matched, every_reference_matched, pattern_count) {
            &mut outcome.positive
        } else {
            &mut outcome.negative
        };
        side.types.push(ty);
        side.dependencies.record(&ty.full_name, matched);
    }

    outcome
}
