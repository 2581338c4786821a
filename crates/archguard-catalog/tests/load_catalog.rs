//! Integration tests for catalog loading.
//!
//! These tests write catalog files into a temporary directory and verify that loading is
//! deterministic, tolerant of broken files, and applies the configured filters.

use archguard_catalog::{LoaderOptions, load_catalog};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path")
}

fn write_file(path: &Utf8Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent");
    }
    std::fs::write(path, contents).expect("write file");
}

fn names(loaded: &archguard_catalog::LoadedCatalog) -> Vec<&str> {
    loaded
        .catalog
        .types()
        .iter()
        .map(|t| t.full_name.as_str())
        .collect()
}

const CORE: &str = r#"{
  "module": "App.Core",
  "types": [
    {
      "full_name": "App.Core.Order",
      "references": ["App.Core.Money", "System.String"],
      "nested": [{ "full_name": "App.Core.Order+Line", "references": ["System.Decimal"] }]
    },
    { "full_name": "App.Core.Money" },
    { "full_name": "App.Core.Order+<>c", "compiler_generated": true },
    { "full_name": "App.Core.<Run>d__4" }
  ]
}"#;

const GENERATED: &str = r#"{
  "module": "App.Generated",
  "types": [
    { "full_name": "App.Generated.Proxy" },
    { "full_name": "App.GeneratedHelpers.Shim" }
  ]
}"#;

/// Test that nested types are flattened right after their declaring type, in path order.
#[test]
fn loads_files_in_path_order_with_nested_types_flattened() {
    let tmp = TempDir::new().expect("temp dir");
    let root = utf8_root(&tmp);
    write_file(&root.join("b/App.Generated.catalog.json"), GENERATED);
    write_file(&root.join("a/App.Core.catalog.json"), CORE);

    let loaded = load_catalog(&root, &LoaderOptions::default()).expect("load");

    assert_eq!(loaded.modules_loaded(), 2);
    assert_eq!(
        names(&loaded),
        vec![
            "App.Core.Order",
            "App.Core.Order+Line",
            "App.Core.Money",
            "App.Generated.Proxy",
            "App.GeneratedHelpers.Shim",
        ]
    );
    let line = loaded.catalog.get("App.Core.Order+Line").expect("nested");
    assert!(line.is_nested);
    assert_eq!(line.module.as_str(), "a/App.Core.catalog.json");
}

/// Test that namespace exclusion works on whole segments.
#[test]
fn excluded_namespaces_respect_segment_boundaries() {
    let tmp = TempDir::new().expect("temp dir");
    let root = utf8_root(&tmp);
    write_file(&root.join("App.Generated.catalog.json"), GENERATED);

    let options = LoaderOptions {
        exclude_namespaces: vec!["App.Generated".to_string()],
        ..LoaderOptions::default()
    };
    let loaded = load_catalog(&root, &options).expect("load");
    assert_eq!(names(&loaded), vec!["App.GeneratedHelpers.Shim"]);
}

/// Test that ignored reference namespaces disappear from every type's references.
#[test]
fn ignored_references_are_stripped() {
    let tmp = TempDir::new().expect("temp dir");
    let root = utf8_root(&tmp);
    write_file(&root.join("App.Core.catalog.json"), CORE);

    let options = LoaderOptions {
        ignore_references: vec!["System".to_string()],
        ..LoaderOptions::default()
    };
    let loaded = load_catalog(&root, &options).expect("load");

    let order = loaded.catalog.get("App.Core.Order").expect("order");
    let refs: Vec<&str> = order.references.iter().map(String::as_str).collect();
    assert_eq!(refs, vec!["App.Core.Money"]);
    let line = loaded.catalog.get("App.Core.Order+Line").expect("line");
    assert!(line.references.is_empty());
}

/// Test that compiler-generated types are kept only on request.
#[test]
fn compiler_generated_types_are_opt_in() {
    let tmp = TempDir::new().expect("temp dir");
    let root = utf8_root(&tmp);
    write_file(&root.join("App.Core.catalog.json"), CORE);

    let default = load_catalog(&root, &LoaderOptions::default()).expect("load");
    assert!(default.catalog.get("App.Core.Order+<>c").is_none());
    assert!(default.catalog.get("App.Core.<Run>d__4").is_none());

    let options = LoaderOptions {
        include_compiler_generated: true,
        ..LoaderOptions::default()
    };
    let all = load_catalog(&root, &options).expect("load");
    assert!(all.catalog.get("App.Core.Order+<>c").is_some());
    assert!(all.catalog.get("App.Core.<Run>d__4").is_some());
}

/// Test that a malformed file is skipped without hiding the others.
#[test]
fn malformed_files_contribute_nothing() {
    let tmp = TempDir::new().expect("temp dir");
    let root = utf8_root(&tmp);
    write_file(&root.join("a.catalog.json"), "{ not json");
    write_file(&root.join("b.catalog.json"), GENERATED);

    let loaded = load_catalog(&root, &LoaderOptions::default()).expect("load");
    assert_eq!(loaded.files.len(), 2);
    assert_eq!(loaded.skipped.len(), 1);
    assert_eq!(loaded.skipped[0].as_str(), "a.catalog.json");
    assert_eq!(loaded.modules_loaded(), 1);
    assert_eq!(loaded.catalog.len(), 2);
}

/// Test that the first declaration of a type wins across files.
#[test]
fn duplicate_types_keep_the_first_file() {
    let tmp = TempDir::new().expect("temp dir");
    let root = utf8_root(&tmp);
    write_file(
        &root.join("a.catalog.json"),
        r#"{ "types": [{ "full_name": "App.Shared", "sealed": true }] }"#,
    );
    write_file(
        &root.join("b.catalog.json"),
        r#"{ "types": [{ "full_name": "App.Shared", "sealed": false }] }"#,
    );

    let loaded = load_catalog(&root, &LoaderOptions::default()).expect("load");
    assert_eq!(loaded.catalog.len(), 1);
    let shared = loaded.catalog.get("App.Shared").expect("shared");
    assert!(shared.is_sealed);
    assert_eq!(shared.module.as_str(), "a.catalog.json");
}

/// Test that loading the same directory twice is idempotent.
#[test]
fn loading_is_idempotent() {
    let tmp = TempDir::new().expect("temp dir");
    let root = utf8_root(&tmp);
    write_file(&root.join("a/App.Core.catalog.json"), CORE);
    write_file(&root.join("b/App.Generated.catalog.json"), GENERATED);

    let run1 = load_catalog(&root, &LoaderOptions::default()).expect("first load");
    let run2 = load_catalog(&root, &LoaderOptions::default()).expect("second load");
    assert_eq!(names(&run1), names(&run2));
    assert_eq!(run1.files, run2.files);
}
