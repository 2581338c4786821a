//! CLI entry point for archguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `archguard-app` crate.

use anyhow::Context;
use archguard_app::{
    CheckInput, ExplainOutput, parse_report_json, render_annotations, render_markdown, run_check,
    run_explain, runtime_error_report, to_renderable, verdict_exit_code, write_report, write_text,
};
use archguard_settings::Overrides;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use tracing::{debug, warn};

#[derive(Parser, Debug)]
#[command(
    name = "archguard",
    version,
    about = "Architecture rules over structural type catalogs"
)]
struct Cli {
    /// Directory containing the type catalog files.
    #[arg(long, default_value = ".")]
    catalog_root: Utf8PathBuf,

    /// Path to archguard config TOML (relative paths resolve against the catalog root).
    #[arg(long, default_value = "archguard.toml")]
    config: Utf8PathBuf,

    /// Override profile (strict|warn|compat).
    #[arg(long)]
    profile: Option<String>,

    /// Override maximum findings to emit.
    #[arg(long)]
    max_findings: Option<u32>,

    /// Log at debug level (RUST_LOG takes precedence).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate rules and write artifacts.
    Check {
        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/archguard/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/archguard/comment.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/archguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/archguard/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a predicate id or finding code.
    Explain {
        /// The predicate (e.g., "resides_in_namespace") or code (e.g., "rule_violation").
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    match &cli.cmd {
        Commands::Check {
            report_out,
            write_markdown,
            markdown_out,
        } => cmd_check(&cli, report_out, *write_markdown, markdown_out),
        Commands::Md { report, output } => cmd_md(report, output.as_ref()),
        Commands::Annotations { report, max } => cmd_annotations(report, *max),
        Commands::Explain { identifier } => cmd_explain(identifier),
    }
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_check(
    cli: &Cli,
    report_out: &Utf8PathBuf,
    write_markdown: bool,
    markdown_out: &Utf8PathBuf,
) -> anyhow::Result<()> {
    let catalog_root = cli
        .catalog_root
        .canonicalize_utf8()
        .unwrap_or_else(|_| cli.catalog_root.clone());

    let result = (|| -> anyhow::Result<i32> {
        if !catalog_root.is_dir() {
            anyhow::bail!("catalog root does not exist: {}", catalog_root);
        }
        // Missing config file is allowed (defaults apply).
        let cfg_path = catalog_root.join(&cli.config);
        let cfg_text = match std::fs::read_to_string(&cfg_path) {
            Ok(text) => text,
            Err(err) => {
                debug!(path = %cfg_path, error = %err, "no config file; using defaults");
                String::new()
            }
        };

        let output = run_check(CheckInput {
            catalog_root: &catalog_root,
            config_text: &cfg_text,
            overrides: Overrides {
                profile: cli.profile.clone(),
                max_findings: cli.max_findings,
            },
        })?;

        for skipped in &output.skipped_catalogs {
            warn!(path = %skipped.as_str(), "catalog file skipped");
        }

        write_report(report_out, &output.report).context("write report json")?;

        if write_markdown {
            let md = render_markdown(&to_renderable(&output.report));
            write_text(markdown_out, &md).context("write markdown")?;
        }

        Ok(verdict_exit_code(output.report.verdict))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(&format!("{err:#}"));
            let _ = write_report(report_out, &report);
            eprintln!("archguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn cmd_md(report_path: &Utf8PathBuf, output: Option<&Utf8PathBuf>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    let md = render_markdown(&to_renderable(&report));

    if let Some(out_path) = output {
        write_text(out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_annotations(report_path: &Utf8PathBuf, max: usize) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;

    for annotation in render_annotations(&to_renderable(&report), max) {
        println!("{}", annotation);
    }

    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", archguard_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_predicates,
            available_codes,
        } => {
            eprint!(
                "{}",
                archguard_app::format_not_found(&identifier, &available_predicates, available_codes)
            );
            std::process::exit(1);
        }
    }
}
