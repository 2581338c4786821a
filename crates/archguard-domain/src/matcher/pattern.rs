use super::SearchTree;
use regex::Regex;
use std::collections::BTreeSet;

/// Matcher wrapping one compiled regular expression.
///
/// A name matches when the expression matches anywhere in it (anchor with `^`/`$` for
/// whole-name matching). The matched name itself is reported as the match identifier.
#[derive(Clone, Debug)]
pub struct PatternMatcher {
    regex: Regex,
}

impl PatternMatcher {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl From<Regex> for PatternMatcher {
    fn from(regex: Regex) -> Self {
        Self { regex }
    }
}

impl SearchTree for PatternMatcher {
    fn matches(&self, full_name: &str) -> BTreeSet<String> {
        if self.regex.is_match(full_name) {
            BTreeSet::from([full_name.to_string()])
        } else {
            BTreeSet::new()
        }
    }

    fn pattern_count(&self) -> usize {
        0
    }

    fn is_match(&self, full_name: &str) -> bool {
        self.regex.is_match(full_name)
    }
}
