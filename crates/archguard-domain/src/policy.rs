use crate::rules::Rule;
use archguard_types::Severity;
use globset::{Glob, GlobSet, GlobSetBuilder};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailOn {
    Error,
    Warning,
}

/// Glob patterns over full type names (`App.Legacy.*`) exempting types from a rule.
#[derive(Clone, Debug, Default)]
pub struct Allowlist {
    patterns: Vec<String>,
    set: Option<GlobSet>,
}

impl Allowlist {
    pub fn new<I, S>(patterns: I) -> Result<Self, globset::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        if patterns.is_empty() {
            return Ok(Self::default());
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            // Case-sensitive, like type names.
            builder.add(Glob::new(pattern)?);
        }
        Ok(Self {
            set: Some(builder.build()?),
            patterns,
        })
    }

    pub fn is_allowed(&self, type_name: &str) -> bool {
        self.set.as_ref().is_some_and(|set| set.is_match(type_name))
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

/// A configured rule together with how its violations are reported.
#[derive(Clone, Debug)]
pub struct RulePolicy {
    pub rule: Rule,
    pub description: Option<String>,
    pub enabled: bool,
    pub severity: Severity,
    pub allow: Allowlist,
}

impl RulePolicy {
    pub fn new(rule: Rule, severity: Severity) -> Self {
        Self {
            rule,
            description: None,
            enabled: true,
            severity,
            allow: Allowlist::default(),
        }
    }

    pub fn id(&self) -> &str {
        self.rule.id()
    }
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    pub fail_on: FailOn,
    pub max_findings: usize,
    /// Rules in evaluation order (sorted by id when resolved from configuration).
    pub rules: Vec<RulePolicy>,
}

impl EffectiveConfig {
    pub fn enabled_rules(&self) -> impl Iterator<Item = &RulePolicy> {
        self.rules.iter().filter(|p| p.enabled)
    }

    pub fn rule_policy(&self, rule_id: &str) -> Option<&RulePolicy> {
        self.enabled_rules().find(|p| p.id() == rule_id)
    }
}
