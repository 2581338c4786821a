use archguard_domain::policy::FailOn;
use archguard_types::Severity;

/// Profile defaults applied before per-rule configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preset {
    pub profile: String,
    pub fail_on: FailOn,
    pub max_findings: usize,
    /// Severity of rules that do not set one.
    pub severity: Severity,
}

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything complex should go into repo config.
pub fn preset(profile: &str) -> Preset {
    match profile {
        "warn" => warn_profile(),
        "compat" => compat_profile(),
        // default
        _ => strict_profile(),
    }
}

fn strict_profile() -> Preset {
    Preset {
        profile: "strict".to_string(),
        fail_on: FailOn::Error,
        max_findings: 200,
        severity: Severity::Error,
    }
}

fn warn_profile() -> Preset {
    Preset {
        profile: "warn".to_string(),
        fail_on: FailOn::Warning,
        max_findings: 200,
        severity: Severity::Warning,
    }
}

fn compat_profile() -> Preset {
    // Rules report, but only explicit `severity = "error"` rules fail the run.
    Preset {
        profile: "compat".to_string(),
        fail_on: FailOn::Error,
        max_findings: 200,
        severity: Severity::Warning,
    }
}
