use anyhow::Context;
use archguard_types::RepoPath;
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::PathBuf;
use walkdir::WalkDir;

/// Discover catalog files under `root` matching any of `include` (globs relative to `root`).
///
/// Returns repo-relative paths in lexicographic order. Unreadable directory entries are
/// skipped; an invalid glob or a missing root is an error.
pub fn discover_catalogs(root: &Utf8Path, include: &[String]) -> anyhow::Result<Vec<RepoPath>> {
    if !root.is_dir() {
        anyhow::bail!("catalog root {root} is not a directory");
    }
    let include_set = build_globset(include).context("compile catalog include globset")?;

    let mut out: Vec<RepoPath> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| pathbuf_to_utf8(e.path().to_path_buf()))
        .map(|abs| RepoPath::relative_to(root, &abs))
        .filter(|rel| include_set.is_match(rel.as_str()))
        .collect();

    // Stable order.
    out.sort();
    out.dedup();

    Ok(out)
}

fn build_globset(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut b = GlobSetBuilder::new();
    for p in patterns {
        b.add(Glob::new(p).with_context(|| format!("invalid include glob: {p}"))?);
    }
    Ok(b.build()?)
}

fn pathbuf_to_utf8(path: PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}
