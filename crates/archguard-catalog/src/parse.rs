use anyhow::Context;
use archguard_domain::model::TypeRecord;
use archguard_types::RepoPath;
use serde::Deserialize;

/// On-disk shape of one catalog file.
#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    module: Option<String>,
    #[serde(default)]
    types: Vec<TypeRecord>,
}

/// Types declared by one compiled module, as read from its catalog file.
#[derive(Clone, Debug)]
pub struct ModuleCatalog {
    pub path: RepoPath,
    /// Declared module name; falls back to the file name.
    pub name: String,
    pub types: Vec<TypeRecord>,
}

pub fn parse_module(path: &RepoPath, text: &str) -> anyhow::Result<ModuleCatalog> {
    let file: CatalogFile = serde_json::from_str(text).context("parse catalog json")?;

    let mut types = file.types;
    for record in &mut types {
        stamp_module(record, path);
    }

    Ok(ModuleCatalog {
        path: path.clone(),
        name: file
            .module
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| path.file_name().to_string()),
        types,
    })
}

fn stamp_module(record: &mut TypeRecord, path: &RepoPath) {
    record.module = path.clone();
    for nested in &mut record.nested {
        stamp_module(nested, path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archguard_domain::model::{TypeKind, Visibility};

    #[test]
    fn parses_records_and_stamps_nested_modules() {
        let path = RepoPath::new("core/App.Core.catalog.json");
        let text = r#"{
            "module": "App.Core",
            "types": [
                {
                    "full_name": "App.Core.Order",
                    "kind": "class",
                    "sealed": true,
                    "base_type": "App.Core.Entity",
                    "references": ["App.Core.Money"],
                    "nested": [{ "full_name": "App.Core.Order+Line", "kind": "struct" }]
                },
                { "full_name": "App.Core.IClock", "kind": "interface", "visibility": "internal" }
            ]
        }"#;

        let module = parse_module(&path, text).expect("parse");
        assert_eq!(module.name, "App.Core");
        assert_eq!(module.types.len(), 2);

        let order = &module.types[0];
        assert!(order.is_sealed);
        assert_eq!(order.base_type.as_deref(), Some("App.Core.Entity"));
        assert_eq!(order.module, path);
        assert_eq!(order.nested[0].kind, TypeKind::Struct);
        assert_eq!(order.nested[0].module, path);

        let clock = &module.types[1];
        assert_eq!(clock.kind, TypeKind::Interface);
        assert_eq!(clock.visibility, Visibility::Internal);
    }

    #[test]
    fn module_name_defaults_to_file_name() {
        let path = RepoPath::new("web/App.Web.catalog.json");
        let module = parse_module(&path, r#"{ "types": [] }"#).expect("parse");
        assert_eq!(module.name, "App.Web.catalog.json");
    }

    #[test]
    fn malformed_json_is_an_error() {
        let path = RepoPath::new("broken.catalog.json");
        assert!(parse_module(&path, "{ \"types\": [").is_err());
        assert!(parse_module(&path, r#"{ "types": [{ "kind": "trait" }] }"#).is_err());
    }
}
