//! The `check` use case: load catalogs, evaluate rules, and produce a report.

use anyhow::Context;
use archguard_catalog::LoaderOptions;
use archguard_settings::{CatalogSettings, Overrides, ResolvedConfig};
use archguard_types::{
    ArchguardReport, RepoPath, ReportEnvelope, SCHEMA_REPORT_V1, ToolMeta, Verdict,
};
use camino::Utf8Path;
use time::OffsetDateTime;
use tracing::{debug, info};

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Directory the catalog include globs are resolved against.
    pub catalog_root: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    /// The generated report.
    pub report: ArchguardReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
    /// Catalog files that could not be read or parsed.
    pub skipped_catalogs: Vec<RepoPath>,
}

/// Run the check use case: parse config, load catalogs, evaluate rules, produce report.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        archguard_settings::ArchguardConfigV1::default()
    } else {
        archguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    let resolved = archguard_settings::resolve_config(cfg, input.overrides.clone())
        .context("resolve config")?;

    let loaded = archguard_catalog::load_catalog(
        input.catalog_root,
        &loader_options(&resolved.catalog),
    )
    .context("load catalogs")?;

    let domain_report = archguard_domain::evaluate(&loaded.catalog, &resolved.effective);
    for rule in &domain_report.rules {
        debug!(
            rule = %rule.rule,
            severity = ?rule.severity,
            violations = rule.violations,
            allowed = rule.allowed,
            "rule evaluated"
        );
    }
    let mut data = domain_report.data;
    data.catalogs_loaded = loaded.modules_loaded() as u32;

    info!(
        catalogs = data.catalogs_loaded,
        types = data.types_scanned,
        rules = data.rules_evaluated,
        failed = data.rules_failed,
        findings = data.findings_total,
        verdict = ?domain_report.verdict,
        "check finished"
    );

    let report = ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "archguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict: domain_report.verdict,
        findings: domain_report.findings,
        data,
    };

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
        skipped_catalogs: loaded.skipped,
    })
}

fn loader_options(settings: &CatalogSettings) -> LoaderOptions {
    LoaderOptions {
        include: settings.include.clone(),
        exclude_namespaces: settings.exclude_namespaces.clone(),
        ignore_references: settings.ignore_references.clone(),
        include_compiler_generated: settings.include_compiler_generated,
    }
}

/// Map verdict to exit code: 0 = pass/warn, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 0,
        Verdict::Fail => 2,
    }
}
