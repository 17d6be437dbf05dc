//! Validation reports.

use std::collections::BTreeMap;
use std::time::{Duration, SystemTime};

use crate::issue::{IssueType, Severity, ValidationIssue};
use crate::suggest::FixSuggestion;

/// The only recommendation in a report whose passes did not complete.
///
/// A report carrying it says nothing about the timeline: it is not a clean
/// bill of health.
pub const VALIDATION_FAILED_RECOMMENDATION: &str =
    "Validation did not complete (it failed or timed out); the timeline was not checked.";

/// Recommendation for a report without issues.
pub const NO_ISSUES_RECOMMENDATION: &str = "Timeline is valid, no issues found.";

/// Everything the reporter found in one run.
#[derive(Clone, Debug)]
pub struct ValidationReport {
    /// When the report was generated.
    pub timestamp: SystemTime,
    /// Number of issues.
    pub total_issues: usize,
    /// Issue counts per severity.
    pub issues_by_severity: BTreeMap<Severity, usize>,
    /// Issue counts per type.
    pub issues_by_type: BTreeMap<IssueType, usize>,
    /// Every issue, in pass order.
    pub issues: Vec<ValidationIssue>,
    /// Suggestions at or above `confidence_threshold`.
    pub suggestions: Vec<FixSuggestion>,
    /// The threshold the suggestions were filtered with.
    pub confidence_threshold: f64,
    /// How long the run took.
    pub validation_duration: Duration,
    /// Summary advice.
    pub recommendations: Vec<String>,
    /// Why the run did not complete, if it did not.
    pub failure: Option<String>,
}

impl ValidationReport {
    /// Builds a report from the issues of a completed run.
    ///
    /// Each issue keeps all of its own suggestions. The report-level list
    /// only holds those with confidence at or above `threshold`.
    #[must_use]
    pub fn from_issues(issues: Vec<ValidationIssue>, threshold: f64, duration: Duration) -> Self {
        let mut issues_by_severity = BTreeMap::new();
        let mut issues_by_type = BTreeMap::new();
        for issue in &issues {
            *issues_by_severity.entry(issue.severity).or_insert(0) += 1;
            *issues_by_type.entry(issue.issue_type).or_insert(0) += 1;
        }

        let suggestions: Vec<_> = issues
            .iter()
            .flat_map(|issue| issue.suggestions.iter())
            .filter(|s| s.confidence >= threshold)
            .cloned()
            .collect();

        let mut report = Self {
            timestamp: SystemTime::now(),
            total_issues: issues.len(),
            issues_by_severity,
            issues_by_type,
            issues,
            suggestions,
            confidence_threshold: threshold,
            validation_duration: duration,
            recommendations: Vec::new(),
            failure: None,
        };
        report.recommendations = report.build_recommendations();
        report
    }

    /// The report for a run that did not complete.
    #[must_use]
    pub fn failed(reason: impl Into<String>, duration: Duration) -> Self {
        Self {
            timestamp: SystemTime::now(),
            total_issues: 0,
            issues_by_severity: BTreeMap::new(),
            issues_by_type: BTreeMap::new(),
            issues: Vec::new(),
            suggestions: Vec::new(),
            confidence_threshold: 0.0,
            validation_duration: duration,
            recommendations: vec![VALIDATION_FAILED_RECOMMENDATION.to_string()],
            failure: Some(reason.into()),
        }
    }

    fn build_recommendations(&self) -> Vec<String> {
        if self.total_issues == 0 {
            return vec![NO_ISSUES_RECOMMENDATION.to_string()];
        }

        let mut out = Vec::new();
        let errors = self.count_severity(Severity::Error);
        if errors > 0 {
            out.push(format!("Fix {errors} error(s) before relying on this timeline."));
        }
        let warnings = self.count_severity(Severity::Warning);
        if warnings > 0 {
            out.push(format!("Review {warnings} warning(s)."));
        }
        let auto = self.auto_fixable().count();
        if auto > 0 {
            out.push(format!(
                "{auto} suggestion(s) are confident enough to apply automatically."
            ));
        }
        out
    }

    /// Returns false for the failure report.
    #[must_use]
    pub fn did_run(&self) -> bool {
        self.failure.is_none()
    }

    /// Returns true if the run completed and found nothing.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.did_run() && self.total_issues == 0
    }

    /// Number of issues with `severity`.
    #[must_use]
    pub fn count_severity(&self, severity: Severity) -> usize {
        self.issues_by_severity.get(&severity).copied().unwrap_or(0)
    }

    /// Number of issues of `issue_type`.
    #[must_use]
    pub fn count_type(&self, issue_type: IssueType) -> usize {
        self.issues_by_type.get(&issue_type).copied().unwrap_or(0)
    }

    /// Issues of `issue_type`, in pass order.
    pub fn issues_of(&self, issue_type: IssueType) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |i| i.issue_type == issue_type)
    }

    /// Report-level suggestions that can be applied without review.
    pub fn auto_fixable(&self) -> impl Iterator<Item = &FixSuggestion> {
        self.suggestions.iter().filter(|s| s.is_auto_fixable())
    }
}
