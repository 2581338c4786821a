//! Explain registry for predicates and finding codes.
//!
//! Maps predicate ids and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a predicate or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the predicate/code.
    pub title: &'static str,
    /// What the predicate tests, or what the code reports.
    pub description: &'static str,
    /// What to do when a rule built on it fails.
    pub remediation: &'static str,
    /// An `archguard.toml` snippet using it.
    pub example: &'static str,
}

/// Look up an explanation by predicate id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        ids::CODE_RULE_VIOLATION => Some(explain_rule_violation()),
        ids::CODE_RUNTIME_ERROR => Some(explain_runtime_error()),
        _ => PREDICATES
            .iter()
            .find(|entry| entry.id == identifier)
            .map(PredicateEntry::explanation),
    }
}

/// List all known predicate ids.
pub fn all_predicate_ids() -> Vec<&'static str> {
    PREDICATES.iter().map(|entry| entry.id).collect()
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[ids::CODE_RULE_VIOLATION, ids::CODE_RUNTIME_ERROR]
}

struct PredicateEntry {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    operand: Operand,
}

#[derive(Clone, Copy)]
enum Operand {
    None,
    Value,
    Pattern,
    Values,
}

impl PredicateEntry {
    fn explanation(&self) -> Explanation {
        let (remediation, example) = match self.operand {
            Operand::None => (
                "Change the offending types so they satisfy the predicate, or narrow the rule's \
`that` selection so they are no longer in scope.",
                "[rules.example]\nthat = [[{ predicate = \"resides_in_namespace\", value = \"App.Domain\" }]]\nshould = [[{ predicate = \"are_sealed\" }]]",
            ),
            Operand::Value => (
                "Rename or move the offending types, or add them to the rule's `allow` list \
if they are a deliberate exception.",
                "[rules.example]\nthat = [[{ predicate = \"are_classes\" }]]\nshould = [[{ predicate = \"resides_in_namespace\", value = \"App\" }]]",
            ),
            Operand::Pattern => (
                "Rename or move the offending types, or relax the regular expression. \
Patterns use Rust `regex` syntax and are unanchored unless you add `^` / `$`.",
                "[rules.example]\nthat = [[{ predicate = \"are_interfaces\" }]]\nshould = [[{ predicate = \"have_name_matching\", pattern = \"^I[A-Z]\" }]]",
            ),
            Operand::Values => (
                "Remove the offending references from the listed types (see the finding's \
`dependencies` data for the matched namespaces), or adjust the dependency list.",
                "[rules.example]\nthat = [[{ predicate = \"resides_in_namespace\", value = \"App.Domain\" }]]\nshould_not = [[{ predicate = \"have_dependency_on_any\", values = [\"App.Infrastructure\"] }]]",
            ),
        };
        Explanation {
            title: self.title,
            description: self.description,
            remediation,
            example,
        }
    }
}

const PREDICATES: &[PredicateEntry] = &[
    PredicateEntry {
        id: ids::PRED_RESIDES_IN_NAMESPACE,
        title: "Resides In Namespace",
        description: "\
Selects types whose namespace is the given namespace or one of its sub-namespaces.

Matching is segment-based: `App.Core` matches `App.Core` and `App.Core.Model`
but never `App.CoreExtensions`.",
        operand: Operand::Value,
    },
    PredicateEntry {
        id: ids::PRED_RESIDES_IN_NAMESPACE_MATCHING,
        title: "Resides In Namespace Matching",
        description: "Selects types whose namespace matches a regular expression.",
        operand: Operand::Pattern,
    },
    PredicateEntry {
        id: ids::PRED_RESIDES_IN_NAMESPACE_STARTING_WITH,
        title: "Resides In Namespace Starting With",
        description: "\
Selects types whose namespace starts with the given text.

This is a raw text comparison: `App.Core` also matches `App.CoreExtensions`.
Use `resides_in_namespace` for segment-correct matching.",
        operand: Operand::Value,
    },
    PredicateEntry {
        id: ids::PRED_RESIDES_IN_NAMESPACE_ENDING_WITH,
        title: "Resides In Namespace Ending With",
        description: "Selects types whose namespace ends with the given text.",
        operand: Operand::Value,
    },
    PredicateEntry {
        id: ids::PRED_RESIDES_IN_NAMESPACE_CONTAINING,
        title: "Resides In Namespace Containing",
        description: "Selects types whose namespace contains the given text.",
        operand: Operand::Value,
    },
    PredicateEntry {
        id: ids::PRED_HAVE_NAME,
        title: "Have Name",
        description: "Selects types whose simple name (without namespace) equals the given text.",
        operand: Operand::Value,
    },
    PredicateEntry {
        id: ids::PRED_HAVE_NAME_MATCHING,
        title: "Have Name Matching",
        description: "Selects types whose simple name matches a regular expression.",
        operand: Operand::Pattern,
    },
    PredicateEntry {
        id: ids::PRED_HAVE_NAME_STARTING_WITH,
        title: "Have Name Starting With",
        description: "Selects types whose simple name starts with the given text.",
        operand: Operand::Value,
    },
    PredicateEntry {
        id: ids::PRED_HAVE_NAME_ENDING_WITH,
        title: "Have Name Ending With",
        description: "\
Selects types whose simple name ends with the given text.

Typical use: `Controller`, `Repository` or `Handler` suffix conventions.",
        operand: Operand::Value,
    },
    PredicateEntry {
        id: ids::PRED_HAVE_NAME_CONTAINING,
        title: "Have Name Containing",
        description: "Selects types whose simple name contains the given text.",
        operand: Operand::Value,
    },
    PredicateEntry {
        id: ids::PRED_ARE_CLASSES,
        title: "Are Classes",
        description: "Selects class types.",
        operand: Operand::None,
    },
    PredicateEntry {
        id: ids::PRED_ARE_INTERFACES,
        title: "Are Interfaces",
        description: "Selects interface types.",
        operand: Operand::None,
    },
    PredicateEntry {
        id: ids::PRED_ARE_STRUCTS,
        title: "Are Structs",
        description: "Selects value types declared as structs.",
        operand: Operand::None,
    },
    PredicateEntry {
        id: ids::PRED_ARE_ENUMS,
        title: "Are Enums",
        description: "Selects enumeration types.",
        operand: Operand::None,
    },
    PredicateEntry {
        id: ids::PRED_ARE_DELEGATES,
        title: "Are Delegates",
        description: "Selects delegate types.",
        operand: Operand::None,
    },
    PredicateEntry {
        id: ids::PRED_ARE_ABSTRACT,
        title: "Are Abstract",
        description: "Selects abstract types. Interfaces count as abstract.",
        operand: Operand::None,
    },
    PredicateEntry {
        id: ids::PRED_ARE_SEALED,
        title: "Are Sealed",
        description: "Selects sealed types (types that cannot be inherited from).",
        operand: Operand::None,
    },
    PredicateEntry {
        id: ids::PRED_ARE_STATIC,
        title: "Are Static",
        description: "Selects static types.",
        operand: Operand::None,
    },
    PredicateEntry {
        id: ids::PRED_ARE_GENERIC,
        title: "Are Generic",
        description: "Selects types that declare generic parameters.",
        operand: Operand::None,
    },
    PredicateEntry {
        id: ids::PRED_ARE_NESTED,
        title: "Are Nested",
        description: "Selects types declared inside another type.",
        operand: Operand::None,
    },
    PredicateEntry {
        id: ids::PRED_ARE_PUBLIC,
        title: "Are Public",
        description: "Selects types with public visibility.",
        operand: Operand::None,
    },
    PredicateEntry {
        id: ids::PRED_ARE_INTERNAL,
        title: "Are Internal",
        description: "Selects types visible only inside their own module.",
        operand: Operand::None,
    },
    PredicateEntry {
        id: ids::PRED_HAVE_ATTRIBUTE,
        title: "Have Attribute",
        description: "\
Selects types decorated with the given attribute.

The operand may be the attribute's full name (`App.Annotations.AggregateRoot`)
or its simple name (`AggregateRoot`).",
        operand: Operand::Value,
    },
    PredicateEntry {
        id: ids::PRED_INHERIT,
        title: "Inherit",
        description: "Selects types whose direct base type is the given full type name.",
        operand: Operand::Value,
    },
    PredicateEntry {
        id: ids::PRED_IMPLEMENT_INTERFACE,
        title: "Implement Interface",
        description: "\
Selects types implementing the given interface, by full name or simple name.",
        operand: Operand::Value,
    },
    PredicateEntry {
        id: ids::PRED_HAVE_DEPENDENCY_ON_ANY,
        title: "Have Dependency On Any",
        description: "\
Selects types that reference at least one type in any of the listed namespaces.

References include base types, interfaces, generic arguments, member signatures,
method bodies and attributes.",
        operand: Operand::Values,
    },
    PredicateEntry {
        id: ids::PRED_HAVE_DEPENDENCY_ON_ALL,
        title: "Have Dependency On All",
        description: "\
Selects types that reference at least one type in every listed namespace.",
        operand: Operand::Values,
    },
    PredicateEntry {
        id: ids::PRED_ONLY_HAVE_DEPENDENCIES_ON_ANY,
        title: "Only Have Dependencies On Any",
        description: "\
Selects types whose every reference lies in one of the listed namespaces, and
that have at least one such reference.

A type's reference to itself is not counted.",
        operand: Operand::Values,
    },
    PredicateEntry {
        id: ids::PRED_ONLY_HAVE_DEPENDENCIES_ON_ALL,
        title: "Only Have Dependencies On All",
        description: "\
Selects types whose every reference lies in the listed namespaces and that
reference every listed namespace at least once.",
        operand: Operand::Values,
    },
    PredicateEntry {
        id: ids::PRED_ONLY_HAVE_DEPENDENCIES_ON_ANY_OR_NONE,
        title: "Only Have Dependencies On Any Or None",
        description: "\
Selects types whose every reference lies in the listed namespaces. Types with no
references at all are selected too.",
        operand: Operand::Values,
    },
    PredicateEntry {
        id: ids::PRED_HAVE_DEPENDENCY_MATCHING,
        title: "Have Dependency Matching",
        description: "\
Selects types that reference at least one type whose full name matches a
regular expression.",
        operand: Operand::Pattern,
    },
];

// --- Code-level explanations ---

fn explain_rule_violation() -> Explanation {
    Explanation {
        title: "Rule Violation",
        description: "\
A type selected by a rule did not meet the rule's condition.

For `should` rules, the type satisfied none of the condition groups.
For `should_not` rules, the type satisfied at least one condition group.
When dependency predicates were involved, the finding's `dependencies` data lists
the namespaces that were matched while walking the type's references.",
        remediation: "\
Fix the type so it conforms, or, if the type is a deliberate exception, add its
full name (or a glob) to the rule's `allow` list.",
        example: "[rules.domain_isolation]\nallow = [\"App.Domain.Legacy.*\"]",
    }
}

fn explain_runtime_error() -> Explanation {
    Explanation {
        title: "Runtime Error",
        description: "\
archguard could not complete the evaluation: the configuration was invalid or the
catalog root could not be read. No rules were evaluated.",
        remediation: "\
Read the finding message for the underlying cause. Configuration errors name the
rule and predicate that failed validation.",
        example: "[rules.example]\nthat = [[{ predicate = \"resides_in_namespace\", value = \"App\" }]]\nshould = [[{ predicate = \"are_sealed\" }]]",
    }
}
