//! Developer tasks (schema generation, fixture conformance, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use archguard_test_util::normalize_nondeterministic;
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));

    if manifest_dir.ends_with("xtask")
        && let Some(parent) = manifest_dir.parent()
    {
        return parent.to_path_buf();
    }
    manifest_dir
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(archguard_types::ArchguardReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(archguard_settings::ArchguardConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "archguard.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "archguard.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    for name in &missing {
        eprintln!("  - missing: {}", name);
    }
    for name in &mismatched {
        eprintln!("  - out of date: {}", name);
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  conform           Validate fixture golden reports against the report schema");
    eprintln!("  explain-coverage  Validate all predicate ids and codes have explanations");
}

/// Snake-case token, as used by finding codes.
fn is_valid_token(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// No absolute paths, no `../`, forward slashes only.
fn is_clean_path(path: &str) -> bool {
    !(path.starts_with('/')
        || path.starts_with('\\')
        || path.contains("..")
        || path.contains('\\')
        || (path.len() >= 2 && path.as_bytes()[1] == b':'))
}

fn is_fingerprint(s: &str) -> bool {
    s.len() == 64 && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Hygiene checks the schema cannot express.
fn report_hygiene(name: &str, value: &serde_json::Value) -> Vec<String> {
    let mut errors = Vec::new();
    let findings = value
        .get("findings")
        .and_then(|v| v.as_array())
        .cloned()
        .unwrap_or_default();

    for (i, finding) in findings.iter().enumerate() {
        if let Some(path) = finding.pointer("/location/path").and_then(|v| v.as_str())
            && !is_clean_path(path)
        {
            errors.push(format!(
                "{name}: findings[{i}].location.path '{path}' is not clean"
            ));
        }
        if let Some(code) = finding.get("code").and_then(|v| v.as_str())
            && !is_valid_token(code)
        {
            errors.push(format!("{name}: findings[{i}].code '{code}' is not a valid token"));
        }
        if let Some(fp) = finding.get("fingerprint").and_then(|v| v.as_str())
            && !is_fingerprint(fp)
        {
            errors.push(format!("{name}: findings[{i}].fingerprint is not a sha256 hex digest"));
        }
    }

    let emitted = value.pointer("/data/findings_emitted").and_then(|v| v.as_u64());
    if emitted != Some(findings.len() as u64) {
        errors.push(format!(
            "{name}: data.findings_emitted {:?} does not match {} findings",
            emitted,
            findings.len()
        ));
    }
    errors
}

fn fixture_reports(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut reports = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read {}", dir.display()))? {
        let path = entry?.path().join("expected.report.json");
        if path.is_file() {
            reports.push(path);
        }
    }
    reports.sort();
    Ok(reports)
}

/// Validate golden reports against the generated report schema.
fn conform() -> anyhow::Result<()> {
    let schema = serde_json::to_value(generate_report_schema()).context("schema to json")?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile report schema: {}", e))?;
    println!("✓ archguard.report.v1 schema compiles");

    let reports = fixture_reports(&fixtures_dir())?;
    if reports.is_empty() {
        bail!("no expected.report.json found under {}", fixtures_dir().display());
    }

    let mut errors = Vec::new();
    for path in &reports {
        let name = path
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", name))?;
        let value: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {} as JSON", name))?;
        let value = normalize_nondeterministic(value);

        for err in validator.iter_errors(&value) {
            errors.push(format!("{}: schema validation: {}", name, err));
        }
        errors.extend(report_hygiene(&name, &value));
    }

    if !errors.is_empty() {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!("Conformance validation failed with {} errors", errors.len());
    }

    println!("✓ {} fixture reports conform", reports.len());
    Ok(())
}

/// Validate that all predicate ids and codes have explanations.
fn explain_coverage() -> anyhow::Result<()> {
    let predicates = archguard_types::explain::all_predicate_ids();
    let codes = archguard_types::explain::all_codes();

    let mut errors = Vec::new();
    for (kind, id) in predicates
        .iter()
        .map(|id| ("Predicate", *id))
        .chain(codes.iter().map(|code| ("Code", *code)))
    {
        match archguard_types::explain::lookup_explanation(id) {
            Some(exp) => {
                if exp.title.is_empty() {
                    errors.push(format!("{kind} '{id}' has empty title"));
                }
                if exp.description.is_empty() {
                    errors.push(format!("{kind} '{id}' has empty description"));
                }
                if exp.remediation.is_empty() {
                    errors.push(format!("{kind} '{id}' has empty remediation"));
                }
            }
            None => errors.push(format!("{kind} '{id}' has no explanation")),
        }
    }

    if errors.is_empty() {
        println!("✓ {} predicates have explanations", predicates.len());
        println!("✓ {} codes have explanations", codes.len());
        println!("\n✓ All explain coverage checks passed!");
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!(
            "Explain coverage validation failed with {} errors",
            errors.len()
        )
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "explain-coverage" => explain_coverage(),
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
