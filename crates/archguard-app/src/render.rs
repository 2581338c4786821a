//! Render use cases and output helpers.

use anyhow::Context;
use archguard_render::RenderableReport;
use archguard_types::ArchguardReport;
use camino::Utf8Path;

pub fn render_markdown(report: &RenderableReport) -> String {
    archguard_render::render_markdown(report)
}

pub fn render_annotations(report: &RenderableReport, max: usize) -> Vec<String> {
    archguard_render::render_github_annotations(report)
        .into_iter()
        .take(max)
        .collect()
}

/// Write `report` as pretty JSON, creating parent directories.
pub fn write_report(path: &Utf8Path, report: &ArchguardReport) -> anyhow::Result<()> {
    let bytes = crate::serialize_report(report)?;
    write_bytes(path, &bytes)
}

pub fn write_text(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    write_bytes(path, text.as_bytes())
}

fn write_bytes(path: &Utf8Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write {path}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CheckInput, parse_report_json, run_check, runtime_error_report, to_renderable};
    use archguard_settings::Overrides;
    use camino::Utf8PathBuf;

    fn checked_report() -> ArchguardReport {
        let tmp = tempfile::tempdir().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path");
        std::fs::write(
            root.join("core.catalog.json"),
            r#"{
  "module": "Core",
  "types": [
    { "full_name": "App.Domain.Invoice", "references": ["App.Data.Repository", "App.Web.Client"] },
    { "full_name": "App.Data.Repository" },
    { "full_name": "App.Web.Client" }
  ]
}"#,
        )
        .expect("write catalog");
        let config = r#"
[rules.domain-isolated]
description = "Domain must not depend on data access or web"
that = [[{ predicate = "resides_in_namespace", value = "App.Domain" }]]
should_not = [[{ predicate = "have_dependency_on_any", values = ["App.Data", "App.Web"] }]]
"#;
        run_check(CheckInput {
            catalog_root: &root,
            config_text: config,
            overrides: Overrides::default(),
        })
        .expect("run_check")
        .report
    }

    #[test]
    fn annotations_from_a_check_list_dependencies_once() {
        let lines = render_annotations(&to_renderable(&checked_report()), 10);
        assert_eq!(
            lines,
            vec![
                "::error file=core.catalog.json,title=App.Domain.Invoice::[domain-isolated:rule_violation] \
type 'App.Domain.Invoice' violates rule 'domain-isolated': Domain must not depend on data access or web \
(depends on App.Data, App.Web)"
            ]
        );
    }

    #[test]
    fn markdown_from_a_check_lists_dependencies_once() {
        let markdown = render_markdown(&to_renderable(&checked_report()));
        assert_eq!(markdown.matches("App.Web").count(), 1);
        assert!(markdown.contains("  - depends on: `App.Data`, `App.Web`\n"));
    }

    #[test]
    fn render_annotations_respects_max() {
        let mut report = runtime_error_report("first");
        let second = report.findings[0].clone();
        report.findings.push(second);
        let renderable = to_renderable(&report);
        assert_eq!(render_annotations(&renderable, 1).len(), 1);
        assert_eq!(render_annotations(&renderable, 10).len(), 2);
    }

    #[test]
    fn render_markdown_smoke() {
        let markdown = render_markdown(&to_renderable(&runtime_error_report("boom")));
        assert!(markdown.starts_with("# Archguard report"));
        assert!(markdown.contains("boom"));
    }

    #[test]
    fn write_report_creates_parent_directories() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path");
        let path = root.join("artifacts/archguard/report.json");

        write_report(&path, &runtime_error_report("boom")).expect("write report");
        let text = std::fs::read_to_string(&path).expect("read back");
        let parsed = parse_report_json(&text).expect("parse");
        assert_eq!(parsed.findings[0].message, "boom");
    }
}
