use crate::matcher::{NamespaceTrie, SearchTree};
use crate::model::TypeRecord;
use regex::Regex;

/// Which textual field of a record a text predicate reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextField {
    Namespace,
    /// Simple name, without namespace or declaring type.
    Name,
}

impl TextField {
    pub fn of(self, record: &TypeRecord) -> &str {
        match self {
            TextField::Namespace => &record.namespace,
            TextField::Name => &record.name,
        }
    }
}

#[derive(Clone, Debug)]
pub enum TextTest {
    /// Equal to, or nested under, the pattern on whole segments.
    Segments(NamespaceTrie),
    Exact(String),
    StartsWith(String),
    EndsWith(String),
    Contains(String),
    Pattern(Regex),
}

impl TextTest {
    pub fn is_match(&self, text: &str) -> bool {
        match self {
            TextTest::Segments(trie) => trie.is_match(text),
            TextTest::Exact(value) => text == value,
            TextTest::StartsWith(value) => text.starts_with(value.as_str()),
            TextTest::EndsWith(value) => text.ends_with(value.as_str()),
            TextTest::Contains(value) => text.contains(value.as_str()),
            TextTest::Pattern(regex) => regex.is_match(text),
        }
    }
}
