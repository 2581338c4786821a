use crate::matcher::SearchTree;
use archguard_types::RepoPath;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

/// Separator between a declaring type and its nested type (`App.Order+Line`).
pub const NESTED_SEPARATOR: char = '+';

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Struct,
    Enum,
    Delegate,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Internal,
    Protected,
    Private,
}

/// Structural metadata for one type.
///
/// Records are produced by the catalog loader and never mutated during evaluation.
/// `references` is the closure of every type name the type structurally touches; after
/// [`TypeCatalog::new`] it also contains the base type, interfaces and attribute types.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TypeRecord {
    pub full_name: String,
    pub namespace: String,
    pub name: String,
    pub kind: TypeKind,
    pub visibility: Visibility,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    #[serde(rename = "sealed")]
    pub is_sealed: bool,
    #[serde(rename = "static")]
    pub is_static: bool,
    #[serde(rename = "generic")]
    pub is_generic: bool,
    #[serde(rename = "nested_type")]
    pub is_nested: bool,
    pub compiler_generated: bool,
    pub base_type: Option<String>,
    pub interfaces: Vec<String>,
    pub attributes: Vec<String>,
    pub references: BTreeSet<String>,
    pub nested: Vec<TypeRecord>,

    /// Catalog file the record was loaded from.
    #[serde(skip)]
    pub module: RepoPath,
}

impl TypeRecord {
    pub fn new(full_name: impl Into<String>) -> Self {
        let mut record = TypeRecord {
            full_name: full_name.into(),
            ..TypeRecord::default()
        };
        record.fill_names();
        record
    }

    /// True when `name` is this type or one of its nested types.
    pub fn is_self_or_nested(&self, name: &str) -> bool {
        name == self.full_name
            || name
                .strip_prefix(self.full_name.as_str())
                .is_some_and(|rest| rest.starts_with(NESTED_SEPARATOR))
    }

    /// References that point outside the type itself.
    pub fn external_references(&self) -> impl Iterator<Item = &str> {
        self.references
            .iter()
            .map(String::as_str)
            .filter(|r| !self.is_self_or_nested(r))
    }

    fn fill_names(&mut self) {
        let (namespace, name) = split_full_name(&self.full_name);
        if self.namespace.is_empty() {
            self.namespace = namespace.to_string();
        }
        if self.name.is_empty() {
            self.name = name.to_string();
        }
    }

    fn normalize(&mut self) {
        self.fill_names();
        if let Some(base) = &self.base_type {
            self.references.insert(base.clone());
        }
        self.references.extend(self.interfaces.iter().cloned());
        self.references.extend(self.attributes.iter().cloned());
    }
}

/// Split `App.Domain.Order+Line` into (`App.Domain`, `Line`).
pub fn split_full_name(full_name: &str) -> (&str, &str) {
    let declaring = full_name
        .split_once(NESTED_SEPARATOR)
        .map_or(full_name, |(outer, _)| outer);
    let namespace = declaring.rsplit_once('.').map_or("", |(ns, _)| ns);
    let name = full_name
        .rsplit(['.', NESTED_SEPARATOR])
        .next()
        .unwrap_or(full_name);
    (namespace, name)
}

struct ParentScope {
    namespace: String,
    module: RepoPath,
}

/// Ordered, name-deduplicated set of type records.
///
/// Nested records are flattened in directly after their declaring type. When two records
/// share a full name the first one wins.
#[derive(Clone, Debug, Default)]
pub struct TypeCatalog {
    types: Vec<TypeRecord>,
    index: BTreeMap<String, usize>,
}

impl TypeCatalog {
    pub fn new<I>(records: I) -> Self
    where
        I: IntoIterator<Item = TypeRecord>,
    {
        let mut catalog = TypeCatalog::default();
        for record in records {
            catalog.push_flattened(record, None);
        }
        catalog
    }

    fn push_flattened(&mut self, mut record: TypeRecord, parent: Option<&ParentScope>) {
        let nested = std::mem::take(&mut record.nested);
        if let Some(parent) = parent {
            record.is_nested = true;
            if record.namespace.is_empty() {
                record.namespace = parent.namespace.clone();
            }
            if record.module == RepoPath::default() {
                record.module = parent.module.clone();
            }
        }
        record.normalize();

        if record.full_name.is_empty() || self.index.contains_key(&record.full_name) {
            return;
        }
        let scope = ParentScope {
            namespace: record.namespace.clone(),
            module: record.module.clone(),
        };
        self.index.insert(record.full_name.clone(), self.types.len());
        self.types.push(record);

        for child in nested {
            self.push_flattened(child, Some(&scope));
        }
    }

    /// Keep only the records for which `keep` returns true, preserving order.
    pub fn retain(&mut self, mut keep: impl FnMut(&TypeRecord) -> bool) {
        self.types.retain(|t| keep(t));
        self.index = self
            .types
            .iter()
            .enumerate()
            .map(|(i, t)| (t.full_name.clone(), i))
            .collect();
    }

    /// Remove every reference `ignored` matches. Base types, interfaces and attributes are
    /// kept on the record; only the dependency view changes.
    pub fn strip_references<S: SearchTree + ?Sized>(&mut self, ignored: &S) {
        for record in &mut self.types {
            record.references.retain(|r| !ignored.is_match(r));
        }
    }

    pub fn types(&self) -> &[TypeRecord] {
        &self.types
    }

    /// Borrowed view of every record, in catalog order.
    pub fn as_refs(&self) -> Vec<&TypeRecord> {
        self.types.iter().collect()
    }

    pub fn get(&self, full_name: &str) -> Option<&TypeRecord> {
        self.index.get(full_name).map(|&i| &self.types[i])
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
