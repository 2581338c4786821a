//! Catalog adapters: discover type catalog files, read and parse them, and build the
//! type catalog the rule engine evaluates.
//!
//! This crate is allowed to do filesystem IO. Per-file read and parse failures are absorbed
//! (logged and skipped) so one broken catalog never hides the rest.

#![forbid(unsafe_code)]

mod discover;
mod parse;

use anyhow::Context;
use archguard_domain::matcher::{NamespaceTrie, SearchTree};
use archguard_domain::model::{TypeCatalog, TypeRecord};
use archguard_types::RepoPath;
use camino::Utf8Path;
use rayon::prelude::*;
use tracing::{debug, warn};

pub use discover::discover_catalogs;
pub use parse::{ModuleCatalog, parse_module};

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use super::*;

    /// Parse arbitrary text as a catalog file.
    ///
    /// Returns `Ok(type_count)` on valid catalog JSON, `Err(...)` otherwise.
    /// **Never panics** on any input.
    pub fn parse_catalog(text: &str) -> anyhow::Result<usize> {
        let path = RepoPath::new("fuzz.catalog.json");
        let module = parse::parse_module(&path, text)?;
        Ok(TypeCatalog::new(module.types).len())
    }

    /// Build a namespace trie from `patterns` and return the candidates it matches.
    ///
    /// **Never panics** on any input.
    pub fn match_namespaces(patterns: &[String], candidates: &[String]) -> Vec<String> {
        let trie = NamespaceTrie::new(patterns);
        candidates
            .iter()
            .filter(|c| trie.is_match(c))
            .cloned()
            .collect()
    }
}

/// How catalog files are found and filtered.
#[derive(Clone, Debug)]
pub struct LoaderOptions {
    /// Globs relative to the catalog root.
    pub include: Vec<String>,
    /// Types in these namespaces (segment match) are dropped.
    pub exclude_namespaces: Vec<String>,
    /// References into these namespaces are removed from every type.
    pub ignore_references: Vec<String>,
    pub include_compiler_generated: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            include: vec!["**/*.catalog.json".to_string()],
            exclude_namespaces: Vec::new(),
            ignore_references: Vec::new(),
            include_compiler_generated: false,
        }
    }
}

/// The catalog plus bookkeeping about the files it came from.
#[derive(Clone, Debug, Default)]
pub struct LoadedCatalog {
    pub catalog: TypeCatalog,
    /// Every discovered catalog file, in load order.
    pub files: Vec<RepoPath>,
    /// Files that could not be read or parsed and contributed nothing.
    pub skipped: Vec<RepoPath>,
}

impl LoadedCatalog {
    pub fn modules_loaded(&self) -> usize {
        self.files.len() - self.skipped.len()
    }
}

/// Discover, parse and filter every catalog under `root`.
///
/// Files are parsed in parallel; results are combined in path order, so when two files
/// declare the same type the one with the smaller path wins.
pub fn load_catalog(root: &Utf8Path, options: &LoaderOptions) -> anyhow::Result<LoadedCatalog> {
    let files =
        discover::discover_catalogs(root, &options.include).context("discover catalogs")?;

    let parsed: Vec<Option<ModuleCatalog>> = files
        .par_iter()
        .map(|path| read_module(root, path))
        .collect();

    let mut skipped = Vec::new();
    let mut records: Vec<TypeRecord> = Vec::new();
    for (path, module) in files.iter().zip(parsed) {
        match module {
            Some(module) => records.extend(module.types),
            None => skipped.push(path.clone()),
        }
    }

    let mut catalog = TypeCatalog::new(records);
    let excluded = NamespaceTrie::new(&options.exclude_namespaces);
    let include_generated = options.include_compiler_generated;
    catalog.retain(|t| {
        (include_generated || !is_compiler_generated(t)) && !excluded.is_match(&t.full_name)
    });

    let ignored = NamespaceTrie::new(&options.ignore_references);
    if !ignored.is_empty() {
        catalog.strip_references(&ignored);
    }

    debug!(
        files = files.len(),
        skipped = skipped.len(),
        types = catalog.len(),
        "catalog loaded"
    );

    Ok(LoadedCatalog {
        catalog,
        files,
        skipped,
    })
}

fn read_module(root: &Utf8Path, path: &RepoPath) -> Option<ModuleCatalog> {
    let abs = root.join(path.as_str());
    let text = match std::fs::read_to_string(&abs) {
        Ok(text) => text,
        Err(err) => {
            warn!(path = %path.as_str(), error = %err, "skipping unreadable catalog file");
            return None;
        }
    };
    match parse::parse_module(path, &text) {
        Ok(module) => {
            debug!(
                path = %path.as_str(),
                module = %module.name,
                types = module.types.len(),
                "catalog file parsed"
            );
            Some(module)
        }
        Err(err) => {
            warn!(
                path = %path.as_str(),
                error = %format!("{err:#}"),
                "skipping malformed catalog file"
            );
            None
        }
    }
}

/// Compiler-generated types carry the flag, or an angle bracket in their name
/// (`<Main>d__0`, `<>c__DisplayClass1_0`).
fn is_compiler_generated(record: &TypeRecord) -> bool {
    record.compiler_generated || record.full_name.contains('<')
}
