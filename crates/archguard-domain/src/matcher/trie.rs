use super::SearchTree;
use crate::model::NESTED_SEPARATOR;
use std::collections::{BTreeSet, HashMap};

const SEGMENT_SEPARATORS: [char; 2] = ['.', NESTED_SEPARATOR];

#[derive(Clone, Debug, Default)]
struct TrieNode {
    children: HashMap<String, usize>,
    /// Index into `NamespaceTrie::patterns` when a registered pattern ends here.
    terminal: Option<usize>,
}

/// Segment trie over a fixed list of namespace patterns.
///
/// Nodes live in one arena and refer to each other by index; the structure is immutable
/// once built. A query walks its own segments from the root and records every terminal
/// node it passes, so `App` and `App.Core` both match `App.Core.Model`. Segments are
/// compared whole: `System` never matches `SystemAsNamespacePrefix`.
#[derive(Clone, Debug)]
pub struct NamespaceTrie {
    nodes: Vec<TrieNode>,
    patterns: Vec<String>,
}

impl Default for NamespaceTrie {
    fn default() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            patterns: Vec::new(),
        }
    }
}

impl NamespaceTrie {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = NamespaceTrie::default();
        for pattern in patterns {
            trie.insert(pattern.as_ref());
        }
        trie
    }

    fn insert(&mut self, pattern: &str) {
        let pattern = pattern.trim().trim_matches('.');
        if pattern.is_empty() {
            return;
        }

        let mut node = 0;
        for segment in pattern.split(SEGMENT_SEPARATORS) {
            node = match self.nodes[node].children.get(segment) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[node].children.insert(segment.to_string(), child);
                    child
                }
            };
        }

        if self.nodes[node].terminal.is_none() {
            self.nodes[node].terminal = Some(self.patterns.len());
            self.patterns.push(pattern.to_string());
        }
    }

    /// Registered patterns, in first-registration order, without duplicates.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Walk `full_name` through the trie, calling `visit` with each terminal reached.
    /// Stops early when `visit` returns `false`.
    fn walk(&self, full_name: &str, mut visit: impl FnMut(usize) -> bool) {
        let mut node = 0;
        for segment in full_name.split(SEGMENT_SEPARATORS) {
            let Some(&child) = self.nodes[node].children.get(segment) else {
                return;
            };
            node = child;
            if let Some(pattern) = self.nodes[node].terminal
                && !visit(pattern)
            {
                return;
            }
        }
    }
}

impl SearchTree for NamespaceTrie {
    fn matches(&self, full_name: &str) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.walk(full_name, |pattern| {
            out.insert(self.patterns[pattern].clone());
            true
        });
        out
    }

    fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    fn is_match(&self, full_name: &str) -> bool {
        let mut found = false;
        self.walk(full_name, |_| {
            found = true;
            false
        });
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn matches_whole_segments_only() {
        let trie = NamespaceTrie::new(["System"]);
        assert_eq!(trie.matches("System"), set(&["System"]));
        assert_eq!(trie.matches("System.Text"), set(&["System"]));
        assert!(trie.matches("SystemAsNamespacePrefix").is_empty());
        assert!(trie.matches("SystemAsNamespacePrefix.Y").is_empty());
        assert!(!trie.is_match("Sys"));
    }

    #[test]
    fn records_every_terminal_along_the_walk() {
        let trie = NamespaceTrie::new(["App", "App.Core", "App.Core.Model.Order", "Other"]);
        assert_eq!(
            trie.matches("App.Core.Model.Invoice"),
            set(&["App", "App.Core"])
        );
        assert_eq!(
            trie.matches("App.Core.Model.Order"),
            set(&["App", "App.Core", "App.Core.Model.Order"])
        );
    }

    #[test]
    fn nested_type_separator_is_a_segment_boundary() {
        let trie = NamespaceTrie::new(["App.Order"]);
        assert!(trie.is_match("App.Order+Line"));
        assert!(!trie.is_match("App.OrderLine"));
    }

    #[test]
    fn counts_distinct_patterns() {
        let trie = NamespaceTrie::new(["X", "Y", "X", " Y ", "", "Z."]);
        assert_eq!(trie.pattern_count(), 3);
        assert_eq!(trie.patterns(), &["X".to_string(), "Y".to_string(), "Z".to_string()]);
    }

    #[test]
    fn empty_trie_matches_nothing() {
        let trie = NamespaceTrie::new(Vec::<String>::new());
        assert!(trie.is_empty());
        assert!(trie.matches("App").is_empty());
        assert_eq!(trie.pattern_count(), 0);
    }
}
