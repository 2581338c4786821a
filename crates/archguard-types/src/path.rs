use camino::{Utf8Path, Utf8PathBuf};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canonical repo-relative path of a catalog file, used in type records and findings.
///
/// Normalization rules are intentionally simple and deterministic:
/// - always forward slashes (`/`)
/// - no leading `./`
/// - never empty (the catalog root itself is `.`)
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct RepoPath(String);

impl Default for RepoPath {
    fn default() -> Self {
        RepoPath::new(".")
    }
}

impl RepoPath {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let mut v = s.as_ref().replace('\\', "/");
        while let Some(rest) = v.strip_prefix("./") {
            v = rest.to_string();
        }
        if v.is_empty() {
            v = ".".to_string();
        }
        Self(v)
    }

    /// Express `path` relative to `root`; paths outside `root` are kept as given.
    pub fn relative_to(root: &Utf8Path, path: &Utf8Path) -> Self {
        match path.strip_prefix(root) {
            Ok(rel) => RepoPath::new(rel.as_str()),
            Err(_) => RepoPath::new(path.as_str()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Final path component, e.g. `app.catalog.json`.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    pub fn to_utf8_pathbuf(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(self.0.clone())
    }
}

impl From<&Utf8Path> for RepoPath {
    fn from(value: &Utf8Path) -> Self {
        RepoPath::new(value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_separators_and_leading_dot() {
        assert_eq!(RepoPath::new(".\\catalogs\\app.catalog.json").as_str(), "catalogs/app.catalog.json");
        assert_eq!(RepoPath::new("././a.json").as_str(), "a.json");
        assert_eq!(RepoPath::new("").as_str(), ".");
    }

    #[test]
    fn relative_to_strips_root() {
        let root = Utf8Path::new("/repo");
        let path = Utf8Path::new("/repo/catalogs/app.catalog.json");
        let rel = RepoPath::relative_to(root, path);
        assert_eq!(rel.as_str(), "catalogs/app.catalog.json");
        assert_eq!(rel.file_name(), "app.catalog.json");
    }

    #[test]
    fn relative_to_keeps_foreign_paths() {
        let rel = RepoPath::relative_to(Utf8Path::new("/repo"), Utf8Path::new("/other/x.json"));
        assert_eq!(rel.as_str(), "/other/x.json");
    }
}
