//! Timeline diagnostics, validation reports, and fix suggestions for Storyline.
//!
//! This crate provides:
//! - [`ValidationReporter`] - Runs diagnostic passes over a causality engine
//! - [`ValidationPass`] - The pass seam, with five built-in passes
//! - [`ValidationReport`] - Issues, suggestions, and recommendations from one run
//! - [`format_report`] - Plain-text rendering of a report

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod format;
pub mod issue;
pub mod passes;
pub mod report;
pub mod reporter;
pub mod suggest;

pub use config::ReporterConfig;
pub use format::format_report;
pub use issue::{IssueType, Severity, ValidationIssue};
pub use passes::{PassContext, ValidationPass};
pub use report::{NO_ISSUES_RECOMMENDATION, VALIDATION_FAILED_RECOMMENDATION, ValidationReport};
pub use reporter::ValidationReporter;
pub use suggest::{AUTO_FIX_CONFIDENCE, FixKind, FixSuggestion, suggest_fixes};
