//! CLI tests for the render, explain, and error paths.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(deprecated)]
fn archguard_cmd() -> Command {
    Command::cargo_bin("archguard").expect("archguard binary not found - run `cargo build` first")
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../tests/fixtures")
        .join(name)
}

/// Run `check` on a fixture and return the report path inside `tmp`.
fn check_into(tmp: &TempDir, fixture_name: &str) -> PathBuf {
    let report = tmp.path().join("out/report.json");
    archguard_cmd()
        .arg("--catalog-root")
        .arg(fixture(fixture_name))
        .arg("check")
        .arg("--report-out")
        .arg(&report)
        .assert()
        .code(2);
    report
}

fn read_json(path: &Path) -> Value {
    let text = std::fs::read_to_string(path).expect("read json");
    serde_json::from_str(&text).expect("parse json")
}

#[test]
fn check_writes_markdown_when_asked() {
    let tmp = TempDir::new().expect("temp dir");
    let markdown = tmp.path().join("comment.md");
    archguard_cmd()
        .arg("--catalog-root")
        .arg(fixture("domain_violation"))
        .arg("check")
        .arg("--report-out")
        .arg(tmp.path().join("report.json"))
        .arg("--write-markdown")
        .arg("--markdown-out")
        .arg(&markdown)
        .assert()
        .code(2);

    let md = std::fs::read_to_string(&markdown).expect("read markdown");
    assert!(md.starts_with("# Archguard report"));
    assert!(md.contains("- Verdict: **FAIL**"));
    assert!(md.contains("`App.Domain.Invoice` in `catalogs/core.catalog.json`"));
}

#[test]
fn md_renders_an_existing_report() {
    let tmp = TempDir::new().expect("temp dir");
    let report = check_into(&tmp, "domain_violation");

    archguard_cmd()
        .arg("md")
        .arg("--report")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("### `domain-isolated`"))
        .stdout(predicate::str::contains("depends on: `App.Data`, `App.Web`"));
}

#[test]
fn annotations_respect_max() {
    let tmp = TempDir::new().expect("temp dir");
    let report = check_into(&tmp, "domain_violation");

    let output = archguard_cmd()
        .arg("annotations")
        .arg("--report")
        .arg(&report)
        .arg("--max")
        .arg("1")
        .output()
        .expect("run annotations");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with(
        "::error file=catalogs/core.catalog.json,title=App.Domain.Invoice::[domain-isolated:rule_violation]"
    ));
}

#[test]
fn explain_known_predicate() {
    archguard_cmd()
        .args(["explain", "resides_in_namespace"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Resides In Namespace"))
        .stdout(predicate::str::contains("Remediation"));
}

#[test]
fn explain_unknown_identifier_lists_alternatives() {
    archguard_cmd()
        .args(["explain", "are_purple"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown predicate or code: are_purple"))
        .stderr(predicate::str::contains("have_dependency_on_any"));
}

#[test]
fn missing_catalog_root_writes_runtime_error_report() {
    let tmp = TempDir::new().expect("temp dir");
    let report = tmp.path().join("report.json");

    archguard_cmd()
        .arg("--catalog-root")
        .arg(tmp.path().join("does-not-exist"))
        .arg("check")
        .arg("--report-out")
        .arg(&report)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("archguard error"));

    let value = read_json(&report);
    assert_eq!(value["verdict"], "fail");
    assert_eq!(value["findings"][0]["check_id"], "tool.runtime");
    assert_eq!(value["findings"][0]["code"], "runtime_error");
}

#[test]
fn invalid_config_is_a_runtime_error() {
    let tmp = TempDir::new().expect("temp dir");
    std::fs::write(
        tmp.path().join("archguard.toml"),
        "[rules.broken]\nshould = [[{ predicate = \"are_purple\" }]]\n",
    )
    .expect("write config");
    let report = tmp.path().join("report.json");

    archguard_cmd()
        .arg("--catalog-root")
        .arg(tmp.path())
        .arg("check")
        .arg("--report-out")
        .arg(&report)
        .assert()
        .code(1);

    let value = read_json(&report);
    let message = value["findings"][0]["message"].as_str().expect("message");
    assert!(message.contains("broken"), "message was: {message}");
}

#[test]
fn profile_override_downgrades_failures() {
    let tmp = TempDir::new().expect("temp dir");
    let report = tmp.path().join("report.json");

    archguard_cmd()
        .arg("--catalog-root")
        .arg(fixture("domain_violation"))
        .args(["--profile", "compat", "--max-findings", "1"])
        .arg("check")
        .arg("--report-out")
        .arg(&report)
        .assert()
        .success();

    let value = read_json(&report);
    assert_eq!(value["verdict"], "warn");
    assert_eq!(value["data"]["profile"], "compat");
    assert_eq!(value["data"]["findings_emitted"], 1);
    assert_eq!(value["data"]["findings_total"], 2);
}
