//! Predicate library.
//!
//! Every predicate narrows an ordered set of type records. A predicate is identified by a
//! [`PredicateKind`], takes an [`Operand`] whose shape the kind fixes, and is compiled into a
//! [`Predicate`] once, when the rule is built. Polarity is applied by the predicate itself:
//! [`Polarity::IsNot`] keeps exactly the input records the positive form would drop.

mod dependencies;
mod relations;
mod shape;
mod text;


use crate::dependency::{DependencyDiagnostics, DependencyPolicy};
use crate::error::RuleError;
use crate::matcher::{NamespaceMatcher, NamespaceTrie, PatternMatcher};
use crate::model::TypeRecord;
use archguard_types::ids;

use relations::Relation;
use shape::ShapeTest;
use text::{TextField, TextTest};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Polarity {
    #[default]
    Is,
    IsNot,
}

impl Polarity {
    /// Whether a record whose positive test returned `hit` is kept.
    pub fn keep(self, hit: bool) -> bool {
        match self {
            Polarity::Is => hit,
            Polarity::IsNot => !hit,
        }
    }
}

/// The argument a predicate call carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    None,
    Value(String),
    Values(Vec<String>),
    Pattern(String),
}

impl Operand {
    pub fn shape(&self) -> OperandShape {
        match self {
            Operand::None => OperandShape::None,
            Operand::Value(_) => OperandShape::Value,
            Operand::Values(_) => OperandShape::Values,
            Operand::Pattern(_) => OperandShape::Pattern,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandShape {
    None,
    Value,
    Values,
    Pattern,
}

impl OperandShape {
    pub fn describe(self) -> &'static str {
        match self {
            OperandShape::None => "no operand",
            OperandShape::Value => "a `value`",
            OperandShape::Values => "a `values` list",
            OperandShape::Pattern => "a `pattern`",
        }
    }
}

macro_rules! predicate_kinds {
    ($($variant:ident => $id:path, $shape:ident;)+) => {
        /// Closed set of predicates a rule may call.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum PredicateKind {
            $($variant,)+
        }

        impl PredicateKind {
            pub const ALL: &'static [PredicateKind] = &[$(PredicateKind::$variant,)+];

            /// Stable snake_case id, as written in `archguard.toml`.
            pub fn id(self) -> &'static str {
                match self {
                    $(PredicateKind::$variant => $id,)+
                }
            }

            pub fn from_id(id: &str) -> Option<Self> {
                match id {
                    $($id => Some(PredicateKind::$variant),)+
                    _ => None,
                }
            }

            pub fn operand_shape(self) -> OperandShape {
                match self {
                    $(PredicateKind::$variant => OperandShape::$shape,)+
                }
            }
        }
    };
}

predicate_kinds! {
    ResidesInNamespace => ids::PRED_RESIDES_IN_NAMESPACE, Value;
    ResidesInNamespaceMatching => ids::PRED_RESIDES_IN_NAMESPACE_MATCHING, Pattern;
    ResidesInNamespaceStartingWith => ids::PRED_RESIDES_IN_NAMESPACE_STARTING_WITH, Value;
    ResidesInNamespaceEndingWith => ids::PRED_RESIDES_IN_NAMESPACE_ENDING_WITH, Value;
    ResidesInNamespaceContaining => ids::PRED_RESIDES_IN_NAMESPACE_CONTAINING, Value;
    HaveName => ids::PRED_HAVE_NAME, Value;
    HaveNameMatching => ids::PRED_HAVE_NAME_MATCHING, Pattern;
    HaveNameStartingWith => ids::PRED_HAVE_NAME_STARTING_WITH, Value;
    HaveNameEndingWith => ids::PRED_HAVE_NAME_ENDING_WITH, Value;
    HaveNameContaining => ids::PRED_HAVE_NAME_CONTAINING, Value;
    AreClasses => ids::PRED_ARE_CLASSES, None;
    AreInterfaces => ids::PRED_ARE_INTERFACES, None;
    AreStructs => ids::PRED_ARE_STRUCTS, None;
    AreEnums => ids::PRED_ARE_ENUMS, None;
    AreDelegates => ids::PRED_ARE_DELEGATES, None;
    AreAbstract => ids::PRED_ARE_ABSTRACT, None;
    AreSealed => ids::PRED_ARE_SEALED, None;
    AreStatic => ids::PRED_ARE_STATIC, None;
    AreGeneric => ids::PRED_ARE_GENERIC, None;
    AreNested => ids::PRED_ARE_NESTED, None;
    ArePublic => ids::PRED_ARE_PUBLIC, None;
    AreInternal => ids::PRED_ARE_INTERNAL, None;
    HaveAttribute => ids::PRED_HAVE_ATTRIBUTE, Value;
    Inherit => ids::PRED_INHERIT, Value;
    ImplementInterface => ids::PRED_IMPLEMENT_INTERFACE, Value;
    HaveDependencyOnAny => ids::PRED_HAVE_DEPENDENCY_ON_ANY, Values;
    HaveDependencyOnAll => ids::PRED_HAVE_DEPENDENCY_ON_ALL, Values;
    OnlyHaveDependenciesOnAny => ids::PRED_ONLY_HAVE_DEPENDENCIES_ON_ANY, Values;
    OnlyHaveDependenciesOnAll => ids::PRED_ONLY_HAVE_DEPENDENCIES_ON_ALL, Values;
    OnlyHaveDependenciesOnAnyOrNone => ids::PRED_ONLY_HAVE_DEPENDENCIES_ON_ANY_OR_NONE, Values;
    HaveDependencyMatching => ids::PRED_HAVE_DEPENDENCY_MATCHING, Pattern;
}

impl std::fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// A predicate with its operand validated and compiled.
#[derive(Clone, Debug)]
pub enum Predicate {
    Text { field: TextField, test: TextTest },
    Shape(ShapeTest),
    Relation { relation: Relation, name: String },
    Dependency {
        policy: DependencyPolicy,
        matcher: NamespaceMatcher,
    },
}

/// Records kept by one predicate call, plus dependency diagnostics when the predicate
/// searched references.
#[derive(Clone, Debug, Default)]
pub struct PredicateOutput<'a> {
    pub types: Vec<&'a TypeRecord>,
    pub dependencies: Option<DependencyDiagnostics>,
}

impl Predicate {
    pub fn compile(kind: PredicateKind, operand: Operand) -> Result<Self, RuleError> {
        let expected = kind.operand_shape();
        if operand.shape() != expected {
            return Err(RuleError::OperandMismatch {
                predicate: kind.id(),
                expected: expected.describe(),
            });
        }

        use PredicateKind as K;
        let predicate = match (kind, operand) {
            (K::ResidesInNamespace, Operand::Value(v)) => Predicate::Text {
                field: TextField::Namespace,
                test: TextTest::Segments(NamespaceTrie::new([non_empty(kind, v)?])),
            },
            (K::ResidesInNamespaceStartingWith, Operand::Value(v)) => Predicate::Text {
                field: TextField::Namespace,
                test: TextTest::StartsWith(non_empty(kind, v)?),
            },
            (K::ResidesInNamespaceEndingWith, Operand::Value(v)) => Predicate::Text {
                field: TextField::Namespace,
                test: TextTest::EndsWith(non_empty(kind, v)?),
            },
            (K::ResidesInNamespaceContaining, Operand::Value(v)) => Predicate::Text {
                field: TextField::Namespace,
                test: TextTest::Contains(non_empty(kind, v)?),
            },
            (K::ResidesInNamespaceMatching, Operand::Pattern(p)) => Predicate::Text {
                field: TextField::Namespace,
                test: TextTest::Pattern(compile_pattern(kind, p)?),
            },
            (K::HaveName, Operand::Value(v)) => Predicate::Text {
                field: TextField::Name,
                test: TextTest::Exact(non_empty(kind, v)?),
            },
            (K::HaveNameStartingWith, Operand::Value(v)) => Predicate::Text {
                field: TextField::Name,
                test: TextTest::StartsWith(non_empty(kind, v)?),
            },
            (K::HaveNameEndingWith, Operand::Value(v)) => Predicate::Text {
                field: TextField::Name,
                test: TextTest::EndsWith(non_empty(kind, v)?),
            },
            (K::HaveNameContaining, Operand::Value(v)) => Predicate::Text {
                field: TextField::Name,
                test: TextTest::Contains(non_empty(kind, v)?),
            },
            (K::HaveNameMatching, Operand::Pattern(p)) => Predicate::Text {
                field: TextField::Name,
                test: TextTest::Pattern(compile_pattern(kind, p)?),
            },
            (K::AreClasses, _) => Predicate::Shape(ShapeTest::Class),
            (K::AreInterfaces, _) => Predicate::Shape(ShapeTest::Interface),
            (K::AreStructs, _) => Predicate::Shape(ShapeTest::Struct),
            (K::AreEnums, _) => Predicate::Shape(ShapeTest::Enum),
            (K::AreDelegates, _) => Predicate::Shape(ShapeTest::Delegate),
            (K::AreAbstract, _) => Predicate::Shape(ShapeTest::Abstract),
            (K::AreSealed, _) => Predicate::Shape(ShapeTest::Sealed),
            (K::AreStatic, _) => Predicate::Shape(ShapeTest::Static),
            (K::AreGeneric, _) => Predicate::Shape(ShapeTest::Generic),
            (K::AreNested, _) => Predicate::Shape(ShapeTest::Nested),
            (K::ArePublic, _) => Predicate::Shape(ShapeTest::Public),
            (K::AreInternal, _) => Predicate::Shape(ShapeTest::Internal),
            (K::HaveAttribute, Operand::Value(v)) => Predicate::Relation {
                relation: Relation::Attribute,
                name: non_empty(kind, v)?,
            },
            (K::Inherit, Operand::Value(v)) => Predicate::Relation {
                relation: Relation::Inherit,
                name: non_empty(kind, v)?,
            },
            (K::ImplementInterface, Operand::Value(v)) => Predicate::Relation {
                relation: Relation::Implement,
                name: non_empty(kind, v)?,
            },
            (K::HaveDependencyMatching, Operand::Pattern(p)) => Predicate::Dependency {
                policy: DependencyPolicy::HaveDependencyOnAny,
                matcher: PatternMatcher::from(compile_pattern(kind, p)?).into(),
            },
            (kind, Operand::Values(values)) => {
                let policy = dependency_policy(kind).ok_or(RuleError::OperandMismatch {
                    predicate: kind.id(),
                    expected: expected.describe(),
                })?;
                let trie = NamespaceTrie::new(values);
                if trie.is_empty() {
                    return Err(RuleError::EmptyDependencyList {
                        predicate: kind.id(),
                    });
                }
                Predicate::Dependency {
                    policy,
                    matcher: trie.into(),
                }
            }
            (kind, _) => {
                return Err(RuleError::OperandMismatch {
                    predicate: kind.id(),
                    expected: expected.describe(),
                });
            }
        };
        Ok(predicate)
    }

    /// Narrow `current` to the records this predicate keeps under `polarity`.
    pub fn apply<'a>(
        &self,
        current: Vec<&'a TypeRecord>,
        polarity: Polarity,
    ) -> PredicateOutput<'a> {
        match self {
            Predicate::Text { field, test } => {
                filter(current, polarity, |t| test.is_match(field.of(t)))
            }
            Predicate::Shape(test) => filter(current, polarity, |t| test.is_match(t)),
            Predicate::Relation { relation, name } => {
                filter(current, polarity, |t| relation.holds(t, name))
            }
            Predicate::Dependency { policy, matcher } => {
                dependencies::apply(current, *policy, matcher, polarity)
            }
        }
    }
}

fn filter<'a>(
    current: Vec<&'a TypeRecord>,
    polarity: Polarity,
    test: impl Fn(&TypeRecord) -> bool,
) -> PredicateOutput<'a> {
    PredicateOutput {
        types: current
            .into_iter()
            .filter(|t| polarity.keep(test(t)))
            .collect(),
        dependencies: None,
    }
}

fn non_empty(kind: PredicateKind, value: String) -> Result<String, RuleError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RuleError::EmptyValue {
            predicate: kind.id(),
        });
    }
    Ok(trimmed.to_string())
}

fn compile_pattern(kind: PredicateKind, pattern: String) -> Result<regex::Regex, RuleError> {
    if pattern.is_empty() {
        return Err(RuleError::EmptyValue {
            predicate: kind.id(),
        });
    }
    regex::Regex::new(&pattern).map_err(|source| RuleError::InvalidPattern {
        predicate: kind.id(),
        pattern,
        source,
    })
}

fn dependency_policy(kind: PredicateKind) -> Option<DependencyPolicy> {
    match kind {
        PredicateKind::HaveDependencyOnAny => Some(DependencyPolicy::HaveDependencyOnAny),
        PredicateKind::HaveDependencyOnAll => Some(DependencyPolicy::HaveDependencyOnAll),
        PredicateKind::OnlyHaveDependenciesOnAny => {
            Some(DependencyPolicy::OnlyHaveDependenciesOnAny)
        }
        PredicateKind::OnlyHaveDependenciesOnAll => {
            Some(DependencyPolicy::OnlyHaveDependenciesOnAll)
        }
        PredicateKind::OnlyHaveDependenciesOnAnyOrNone => {
            Some(DependencyPolicy::OnlyHaveDependenciesOnAnyOrNone)
        }
        _ => None,
    }
}
