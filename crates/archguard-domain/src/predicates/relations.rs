use crate::model::{TypeRecord, split_full_name};

/// Structural relations between a type and a named type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    Attribute,
    /// Direct base type only.
    Inherit,
    Implement,
}

impl Relation {
    pub fn holds(self, record: &TypeRecord, name: &str) -> bool {
        match self {
            Relation::Attribute => record.attributes.iter().any(|a| names_type(a, name)),
            Relation::Inherit => record
                .base_type
                .as_deref()
                .is_some_and(|base| base == name),
            Relation::Implement => record.interfaces.iter().any(|i| names_type(i, name)),
        }
    }
}

/// `name` is either the full name of `candidate` or, when it has no namespace, its simple name.
fn names_type(candidate: &str, name: &str) -> bool {
    if candidate == name {
        return true;
    }
    !name.contains('.') && split_full_name(candidate).1 == name
}
