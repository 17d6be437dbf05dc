//! Human-readable rendering of validation reports.

use std::fmt::Write;

use crate::report::ValidationReport;

/// Renders `report` as plain text: a summary line, counts, every issue
/// with its suggestions, then the recommendations.
#[must_use]
pub fn format_report(report: &ValidationReport) -> String {
    let mut output = String::new();

    if let Some(reason) = &report.failure {
        let _ = writeln!(output, "Validation did not run: {reason}");
        for recommendation in &report.recommendations {
            let _ = writeln!(output, "  * {recommendation}");
        }
        return output;
    }

    let _ = writeln!(
        output,
        "Validation report: {} issue(s) in {:.1}ms",
        report.total_issues,
        report.validation_duration.as_secs_f64() * 1000.0
    );

    if !report.issues_by_severity.is_empty() {
        let counts: Vec<_> = report
            .issues_by_severity
            .iter()
            .map(|(severity, n)| format!("{severity}: {n}"))
            .collect();
        let _ = writeln!(output, "  {}", counts.join(", "));
    }

    if !report.issues.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "--- Issues ({}) ---", report.issues.len());
        for issue in &report.issues {
            let _ = writeln!(output, "  {issue}");
            for suggestion in &issue.suggestions {
                if suggestion.confidence >= report.confidence_threshold {
                    let _ = writeln!(output, "    - {suggestion}");
                }
            }
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "--- Recommendations ---");
    for recommendation in &report.recommendations {
        let _ = writeln!(output, "  * {recommendation}");
    }
    output
}
