use crate::fingerprint::fingerprint_for_type;
use crate::model::{TypeCatalog, TypeRecord};
use crate::policy::{EffectiveConfig, RulePolicy};
use crate::report::{DomainReport, RuleSummary, SeverityCounts};
use crate::result::TestResult;
use crate::rules::Condition;
use archguard_types::{ArchguardData, Finding, Location, Severity, ids};
use serde_json::json;
use tracing::debug;

pub fn evaluate(catalog: &TypeCatalog, cfg: &EffectiveConfig) -> DomainReport {
    let types = catalog.as_refs();
    let mut findings: Vec<Finding> = Vec::new();
    let mut rules: Vec<RuleSummary> = Vec::new();

    for policy in cfg.enabled_rules() {
        let result = policy.rule.evaluate(&types);
        rules.push(push_violations(policy, &result, &mut findings));
    }

    // Deterministic ordering before truncation.
    findings.sort_by(compare_findings);

    // The verdict covers every violation; max_findings only limits what is emitted.
    let counts = SeverityCounts::from_findings(&findings);
    let verdict = counts.verdict(cfg.fail_on);
    let total = counts.total();
    let rules_evaluated = rules.len() as u32;
    let rules_failed = rules.iter().filter(|r| r.failed()).count() as u32;

    let mut emitted = findings;
    let mut truncated_reason: Option<String> = None;
    if emitted.len() > cfg.max_findings {
        emitted.truncate(cfg.max_findings);
        truncated_reason = Some(format!(
            "findings truncated to max_findings={}",
            cfg.max_findings
        ));
    }

    debug!(
        rules = rules_evaluated,
        failed = rules_failed,
        findings = total,
        ?verdict,
        "catalog evaluated"
    );

    let data = ArchguardData {
        profile: cfg.profile.clone(),
        catalogs_loaded: 0,
        types_scanned: catalog.len() as u32,
        rules_evaluated,
        rules_failed,
        findings_total: total,
        findings_emitted: emitted.len() as u32,
        truncated_reason,
    };

    DomainReport {
        verdict,
        findings: emitted,
        data,
        counts,
        rules,
    }
}

fn push_violations(
    policy: &RulePolicy,
    result: &TestResult<'_>,
    out: &mut Vec<Finding>,
) -> RuleSummary {
    let rule_id = policy.id();
    let mut summary = RuleSummary {
        rule: rule_id.to_string(),
        severity: policy.severity,
        violations: 0,
        allowed: 0,
    };
    for ty in result.failing_types() {
        if policy.allow.is_allowed(&ty.full_name) {
            summary.allowed += 1;
            continue;
        }
        summary.violations += 1;
        let dependencies: Vec<&str> = result
            .dependencies_of(&ty.full_name)
            .map(|deps| deps.iter().map(String::as_str).collect())
            .unwrap_or_default();

        out.push(Finding {
            severity: policy.severity,
            check_id: rule_id.to_string(),
            code: ids::CODE_RULE_VIOLATION.to_string(),
            message: violation_message(policy, ty),
            location: Some(Location {
                path: ty.module.clone(),
                symbol: Some(ty.full_name.clone()),
            }),
            help: Some(violation_help(policy.rule.condition()).to_string()),
            url: None,
            fingerprint: Some(fingerprint_for_type(
                rule_id,
                ids::CODE_RULE_VIOLATION,
                &ty.full_name,
            )),
            data: json!({
                "type": ty.full_name,
                "rule": rule_id,
                "dependencies": dependencies,
            }),
        });
    }
    summary
}

/// Dependencies travel in `data.dependencies`; renderers print them from there.
fn violation_message(policy: &RulePolicy, ty: &TypeRecord) -> String {
    match &policy.description {
        Some(description) => format!(
            "type '{}' violates rule '{}': {}",
            ty.full_name,
            policy.id(),
            description
        ),
        None => format!("type '{}' violates rule '{}'", ty.full_name, policy.id()),
    }
}

fn violation_help(condition: Condition) -> &'static str {
    match condition {
        Condition::Should => {
            "Change the type so it satisfies the rule's `should` condition, or add it to the rule's allow list."
        }
        Condition::ShouldNot => {
            "Change the type so it no longer matches the rule's `should_not` condition, or add it to the rule's allow list."
        }
    }
}

pub(crate) fn compare_findings(a: &Finding, b: &Finding) -> std::cmp::Ordering {
    // Ordering priority:
    // 1) severity (error -> warning -> info)
    // 2) location.path (missing last)
    // 3) location.symbol (missing last)
    // 4) check_id
    // 5) code
    // 6) message
    let severity_rank = |sev: Severity| match sev {
        Severity::Error => 0,
        Severity::Warning => 1,
        Severity::Info => 2,
    };
    let (ap, asym) = match &a.location {
        Some(l) => (l.path.as_str(), l.symbol.as_deref().unwrap_or("~")),
        None => ("~", "~"),
    };
    let (bp, bsym) = match &b.location {
        Some(l) => (l.path.as_str(), l.symbol.as_deref().unwrap_or("~")),
        None => ("~", "~"),
    };

    severity_rank(a.severity)
        .cmp(&severity_rank(b.severity))
        .then(ap.cmp(bp))
        .then(asym.cmp(bsym))
        .then(a.check_id.cmp(&b.check_id))
        .then(a.code.cmp(&b.code))
        .then(a.message.cmp(&b.message))
}
