use crate::model::{ArchguardConfigV1, CallConfig, CatalogConfig, RuleConfig};
use crate::presets;
use anyhow::Context;
use archguard_domain::policy::{Allowlist, EffectiveConfig, FailOn, RulePolicy};
use archguard_domain::{Condition, FunctionCall, FunctionSequence, Operand, Polarity, Rule};
use archguard_types::Severity;

/// Catalog include glob used when `[catalog].include` is empty.
pub const DEFAULT_CATALOG_GLOB: &str = "**/*.catalog.json";

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub max_findings: Option<u32>,
}

/// Resolved `[catalog]` section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogSettings {
    pub include: Vec<String>,
    pub exclude_namespaces: Vec<String>,
    pub ignore_references: Vec<String>,
    pub include_compiler_generated: bool,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            include: vec![DEFAULT_CATALOG_GLOB.to_string()],
            exclude_namespaces: Vec::new(),
            ignore_references: Vec::new(),
            include_compiler_generated: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
    pub catalog: CatalogSettings,
}

pub fn resolve_config(
    cfg: ArchguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "strict".to_string());

    let preset = presets::preset(&profile);
    let mut effective = EffectiveConfig {
        profile: preset.profile,
        fail_on: preset.fail_on,
        max_findings: preset.max_findings,
        rules: Vec::new(),
    };

    // max findings
    if let Some(mf) = overrides.max_findings.or(cfg.max_findings) {
        effective.max_findings = mf as usize;
    }

    // fail_on override from config
    if let Some(fail_on_s) = cfg.fail_on.as_deref() {
        effective.fail_on = parse_fail_on(fail_on_s)?;
    }

    // rules, in id order
    for (rule_id, rc) in cfg.rules.iter() {
        let policy = resolve_rule(rule_id, rc, preset.severity)
            .with_context(|| format!("invalid rule '{rule_id}'"))?;
        effective.rules.push(policy);
    }

    Ok(ResolvedConfig {
        effective,
        catalog: resolve_catalog(cfg.catalog),
    })
}

fn resolve_catalog(cc: CatalogConfig) -> CatalogSettings {
    let defaults = CatalogSettings::default();
    CatalogSettings {
        include: if cc.include.is_empty() {
            defaults.include
        } else {
            cc.include
        },
        exclude_namespaces: cc.exclude_namespaces,
        ignore_references: cc.ignore_references,
        include_compiler_generated: cc
            .include_compiler_generated
            .unwrap_or(defaults.include_compiler_generated),
    }
}

fn resolve_rule(
    rule_id: &str,
    rc: &RuleConfig,
    default_severity: Severity,
) -> anyhow::Result<RulePolicy> {
    let mut builder = Rule::builder(rule_id).selection(build_sequence(&rc.that, "that")?);
    if let Some(groups) = &rc.should {
        let sequence = build_sequence(groups, "should")?;
        builder = builder.condition(Condition::Should, sequence);
    }
    if let Some(groups) = &rc.should_not {
        let sequence = build_sequence(groups, "should_not")?;
        builder = builder.condition(Condition::ShouldNot, sequence);
    }
    let rule = builder.build()?;

    let severity = match rc.severity.as_deref() {
        Some(sev) => parse_severity(sev).context("invalid severity")?,
        None => default_severity,
    };
    let allow = Allowlist::new(rc.allow.iter().cloned())
        .with_context(|| format!("invalid allow glob in {:?}", rc.allow))?;

    Ok(RulePolicy {
        rule,
        description: rc.description.clone(),
        enabled: rc.enabled.unwrap_or(true),
        severity,
        allow,
    })
}

/// Outer list is OR, inner list is AND.
fn build_sequence(
    groups: &[Vec<CallConfig>],
    section: &str,
) -> anyhow::Result<FunctionSequence> {
    let mut sequence = FunctionSequence::new();
    for (index, group) in groups.iter().enumerate() {
        let Some((first, rest)) = group.split_first() else {
            anyhow::bail!("`{section}` group {index} is empty");
        };
        let first = build_call(first).with_context(|| format!("in `{section}`"))?;
        sequence = sequence.or(first);
        for call in rest {
            let call = build_call(call).with_context(|| format!("in `{section}`"))?;
            sequence = sequence.and(call);
        }
    }
    Ok(sequence)
}

fn build_call(call: &CallConfig) -> anyhow::Result<FunctionCall> {
    let operand = match (&call.value, &call.values, &call.pattern) {
        (None, None, None) => Operand::None,
        (Some(value), None, None) => Operand::Value(value.clone()),
        (None, Some(values), None) => Operand::Values(values.clone()),
        (None, None, Some(pattern)) => Operand::Pattern(pattern.clone()),
        _ => anyhow::bail!(
            "predicate '{}' sets more than one of `value`, `values`, `pattern`",
            call.predicate
        ),
    };
    let polarity = if call.negate {
        Polarity::IsNot
    } else {
        Polarity::Is
    };
    Ok(FunctionCall::from_id(&call.predicate, operand, polarity)?)
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    match v {
        "info" => Ok(Severity::Info),
        "warning" | "warn" => Ok(Severity::Warning),
        "error" => Ok(Severity::Error),
        other => anyhow::bail!("unknown severity: {other} (expected info|warning|error)"),
    }
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    match v {
        "error" => Ok(FailOn::Error),
        "warning" | "warn" => Ok(FailOn::Warning),
        other => anyhow::bail!("unknown fail_on: {other} (expected error|warning)"),
    }
}
