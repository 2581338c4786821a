//! What one evaluation hands back to the app layer.

use crate::policy::FailOn;
use archguard_types::{ArchguardData, Finding, Severity, Verdict};

/// Violations per severity, counted over every finding before truncation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    pub info: u32,
    pub warning: u32,
    pub error: u32,
}

impl SeverityCounts {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut counts = SeverityCounts::default();
        for f in findings {
            counts.record(f.severity);
        }
        counts
    }

    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Info => self.info += 1,
            Severity::Warning => self.warning += 1,
            Severity::Error => self.error += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.info + self.warning + self.error
    }

    /// Errors always fail; warnings fail only under `fail_on = warning`.
    pub fn verdict(&self, fail_on: FailOn) -> Verdict {
        if self.error > 0 {
            return Verdict::Fail;
        }
        if self.warning > 0 {
            return match fail_on {
                FailOn::Warning => Verdict::Fail,
                FailOn::Error => Verdict::Warn,
            };
        }
        Verdict::Pass
    }
}

/// Outcome of one enabled rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleSummary {
    pub rule: String,
    pub severity: Severity,
    /// Failing types turned into findings.
    pub violations: u32,
    /// Failing types suppressed by the rule's allow list.
    pub allowed: u32,
}

impl RuleSummary {
    pub fn failed(&self) -> bool {
        self.violations > 0
    }
}

#[derive(Clone, Debug)]
pub struct DomainReport {
    pub verdict: Verdict,
    /// Sorted, truncated to `max_findings`.
    pub findings: Vec<Finding>,
    pub data: ArchguardData,
    pub counts: SeverityCounts,
    /// One entry per enabled rule, in rule id order.
    pub rules: Vec<RuleSummary>,
}
