//! Stable identifiers for predicates and finding codes.
//!
//! Predicate ids are snake_case and double as the `predicate` key of a call in
//! `archguard.toml`. Rule ids are user-defined and become the `check_id` of findings.

// Predicates: namespace
pub const PRED_RESIDES_IN_NAMESPACE: &str = "resides_in_namespace";
pub const PRED_RESIDES_IN_NAMESPACE_MATCHING: &str = "resides_in_namespace_matching";
pub const PRED_RESIDES_IN_NAMESPACE_STARTING_WITH: &str = "resides_in_namespace_starting_with";
pub const PRED_RESIDES_IN_NAMESPACE_ENDING_WITH: &str = "resides_in_namespace_ending_with";
pub const PRED_RESIDES_IN_NAMESPACE_CONTAINING: &str = "resides_in_namespace_containing";

// Predicates: naming
pub const PRED_HAVE_NAME: &str = "have_name";
pub const PRED_HAVE_NAME_MATCHING: &str = "have_name_matching";
pub const PRED_HAVE_NAME_STARTING_WITH: &str = "have_name_starting_with";
pub const PRED_HAVE_NAME_ENDING_WITH: &str = "have_name_ending_with";
pub const PRED_HAVE_NAME_CONTAINING: &str = "have_name_containing";

// Predicates: kind and shape
pub const PRED_ARE_CLASSES: &str = "are_classes";
pub const PRED_ARE_INTERFACES: &str = "are_interfaces";
pub const PRED_ARE_STRUCTS: &str = "are_structs";
pub const PRED_ARE_ENUMS: &str = "are_enums";
pub const PRED_ARE_DELEGATES: &str = "are_delegates";
pub const PRED_ARE_ABSTRACT: &str = "are_abstract";
pub const PRED_ARE_SEALED: &str = "are_sealed";
pub const PRED_ARE_STATIC: &str = "are_static";
pub const PRED_ARE_GENERIC: &str = "are_generic";
pub const PRED_ARE_NESTED: &str = "are_nested";
pub const PRED_ARE_PUBLIC: &str = "are_public";
pub const PRED_ARE_INTERNAL: &str = "are_internal";

// Predicates: relations
pub const PRED_HAVE_ATTRIBUTE: &str = "have_attribute";
pub const PRED_INHERIT: &str = "inherit";
pub const PRED_IMPLEMENT_INTERFACE: &str = "implement_interface";

// Predicates: dependencies (one per dependency policy, plus the regex form)
pub const PRED_HAVE_DEPENDENCY_ON_ANY: &str = "have_dependency_on_any";
pub const PRED_HAVE_DEPENDENCY_ON_ALL: &str = "have_dependency_on_all";
pub const PRED_ONLY_HAVE_DEPENDENCIES_ON_ANY: &str = "only_have_dependencies_on_any";
pub const PRED_ONLY_HAVE_DEPENDENCIES_ON_ALL: &str = "only_have_dependencies_on_all";
pub const PRED_ONLY_HAVE_DEPENDENCIES_ON_ANY_OR_NONE: &str =
    "only_have_dependencies_on_any_or_none";
pub const PRED_HAVE_DEPENDENCY_MATCHING: &str = "have_dependency_matching";

// Codes: rule evaluation
pub const CODE_RULE_VIOLATION: &str = "rule_violation";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
