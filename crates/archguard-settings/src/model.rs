use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `archguard.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so forward-compat is easy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ArchguardConfigV1 {
    /// Optional schema string for tooling (`archguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// When to fail the check: `error` (default) or `warning`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on: Option<String>,

    /// How many findings to emit before truncating the list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_findings: Option<u32>,

    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Map of rule id -> rule.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleConfig>,
}

/// Where type catalogs are found and how they are filtered before evaluation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogConfig {
    /// Globs (relative to the catalog root) selecting catalog files.
    /// Defaults to `**/*.catalog.json`.
    #[serde(default)]
    pub include: Vec<String>,

    /// Namespaces whose types are dropped from the catalog (segment match).
    #[serde(default)]
    pub exclude_namespaces: Vec<String>,

    /// Namespaces removed from every type's references (framework noise such as `System`).
    #[serde(default)]
    pub ignore_references: Vec<String>,

    /// Keep compiler-generated types (closures, state machines, anonymous types).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_compiler_generated: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RuleConfig {
    /// Free text shown in finding messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Override the profile severity: `info`, `warning`, `error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    /// Globs over full type names exempt from this rule.
    #[serde(default)]
    pub allow: Vec<String>,

    /// Selection: groups joined by OR, calls within a group joined by AND.
    /// Empty selects every type.
    #[serde(default)]
    pub that: Vec<Vec<CallConfig>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should: Option<Vec<Vec<CallConfig>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_not: Option<Vec<Vec<CallConfig>>>,
}

/// One predicate call. At most one of `value`, `values`, `pattern` may be set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CallConfig {
    pub predicate: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Invert the predicate (keep the types it would drop).
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub negate: bool,
}
