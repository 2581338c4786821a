use crate::{RenderableFinding, RenderableReport, RenderableVerdictStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Archguard report\n\n");
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Warn => "WARN",
        RenderableVerdictStatus::Fail => "FAIL",
    };
    let data = &report.data;
    out.push_str(&format!("- Verdict: **{}**\n", verdict));
    if !data.profile.is_empty() {
        out.push_str(&format!("- Profile: `{}`\n", data.profile));
    }
    out.push_str(&format!("- Types scanned: {}\n", data.types_scanned));
    out.push_str(&format!(
        "- Rules: {} evaluated, {} failed\n",
        data.rules_evaluated, data.rules_failed
    ));
    out.push_str(&format!(
        "- Findings: {} (emitted) / {} (total)\n\n",
        data.findings_emitted, data.findings_total
    ));

    if let Some(r) = &data.truncated_reason {
        out.push_str(&format!("> Note: {}\n\n", r));
    }

    if report.findings.is_empty() {
        out.push_str("No findings.\n");
        return out;
    }

    out.push_str("## Findings\n");

    for (check_id, findings) in group_by_check(&report.findings) {
        out.push_str(&format!("\n### `{}`\n\n", check_id));
        for f in findings {
            render_finding(&mut out, f);
        }
    }

    out
}

/// Groups in order of first appearance; findings keep report order within a group.
fn group_by_check(findings: &[RenderableFinding]) -> Vec<(&str, Vec<&RenderableFinding>)> {
    let mut groups: Vec<(&str, Vec<&RenderableFinding>)> = Vec::new();
    for f in findings {
        let check_id = f.check_id.as_deref().unwrap_or("archguard");
        match groups.iter_mut().find(|(id, _)| *id == check_id) {
            Some((_, members)) => members.push(f),
            None => groups.push((check_id, vec![f])),
        }
    }
    groups
}

fn render_finding(out: &mut String, f: &RenderableFinding) {
    let sev = f.severity.label();
    match &f.location {
        Some(loc) => match &loc.symbol {
            Some(symbol) => out.push_str(&format!(
                "- [{}] `{}` in `{}`: {}\n",
                sev, symbol, loc.path, f.message
            )),
            None => out.push_str(&format!("- [{}] `{}`: {}\n", sev, loc.path, f.message)),
        },
        None => out.push_str(&format!("- [{}] {}\n", sev, f.message)),
    }

    if !f.dependencies.is_empty() {
        let deps: Vec<String> = f.dependencies.iter().map(|d| format!("`{d}`")).collect();
        out.push_str(&format!("  - depends on: {}\n", deps.join(", ")));
    }
    if let Some(help) = &f.help {
        out.push_str(&format!("  - help: {}\n", help));
    }
    if let Some(url) = &f.url {
        out.push_str(&format!("  - url: {}\n", url));
    }
}
