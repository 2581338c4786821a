//! Namespace matchers: answer "which of a fixed set of target patterns does this name match".
//!
//! Two interchangeable strategies sit behind [`SearchTree`]:
//! - [`NamespaceTrie`]: an explicit list of dot-separated patterns, matched on whole segments;
//! - [`PatternMatcher`]: a single regular expression over the full name.

mod pattern;
mod trie;

pub use pattern::PatternMatcher;
pub use trie::NamespaceTrie;

use std::collections::BTreeSet;

/// Capability shared by every namespace matcher.
pub trait SearchTree {
    /// Identifiers of every target matched by `full_name` (empty when none).
    fn matches(&self, full_name: &str) -> BTreeSet<String>;

    /// Number of distinct target patterns; 0 for matchers without a discrete pattern list.
    fn pattern_count(&self) -> usize;

    fn is_match(&self, full_name: &str) -> bool {
        !self.matches(full_name).is_empty()
    }
}

/// Owned matcher stored in compiled predicate operands.
#[derive(Clone, Debug)]
pub enum NamespaceMatcher {
    List(NamespaceTrie),
    Pattern(PatternMatcher),
}

impl SearchTree for NamespaceMatcher {
    fn matches(&self, full_name: &str) -> BTreeSet<String> {
        match self {
            NamespaceMatcher::List(trie) => trie.matches(full_name),
            NamespaceMatcher::Pattern(pattern) => pattern.matches(full_name),
        }
    }

    fn pattern_count(&self) -> usize {
        match self {
            NamespaceMatcher::List(trie) => trie.pattern_count(),
            NamespaceMatcher::Pattern(pattern) => pattern.pattern_count(),
        }
    }

    fn is_match(&self, full_name: &str) -> bool {
        match self {
            NamespaceMatcher::List(trie) => trie.is_match(full_name),
            NamespaceMatcher::Pattern(pattern) => pattern.is_match(full_name),
        }
    }
}

impl From<NamespaceTrie> for NamespaceMatcher {
    fn from(value: NamespaceTrie) -> Self {
        NamespaceMatcher::List(value)
    }
}

impl From<PatternMatcher> for NamespaceMatcher {
    fn from(value: PatternMatcher) -> Self {
        NamespaceMatcher::Pattern(value)
    }
}
