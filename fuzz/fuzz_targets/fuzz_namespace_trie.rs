//! Fuzz target for segment-based namespace matching.
//!
//! Builds a trie from arbitrary patterns and checks that matching never panics and that
//! every matched candidate is one of the inputs.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    patterns: Vec<String>,
    candidates: Vec<String>,
}

fuzz_target!(|input: Input| {
    let matched = archguard_catalog::fuzz::match_namespaces(&input.patterns, &input.candidates);
    assert!(matched.len() <= input.candidates.len());
    for name in &matched {
        assert!(input.candidates.contains(name));
    }
});
