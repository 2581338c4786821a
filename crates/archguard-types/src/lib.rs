//! Stable DTOs and IDs used across the archguard workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted report
//! - stable predicate IDs and finding codes
//! - canonical repo-relative path handling
//! - explain registry for predicates and codes

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod path;
pub mod receipt;

pub use explain::{Explanation, lookup_explanation};
pub use path::RepoPath;
pub use receipt::{
    ArchguardData, ArchguardReport, Finding, Location, ReportEnvelope, SCHEMA_REPORT_V1,
    Severity, ToolMeta, Verdict,
};
