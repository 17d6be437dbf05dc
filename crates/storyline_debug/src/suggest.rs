//! Fix suggestions for validation issues.
//!
//! Every issue type maps to a fixed set of suggestion templates with fixed
//! confidences. Suggestions above [`AUTO_FIX_CONFIDENCE`] count as safe to
//! apply without review.

use std::fmt;

use storyline_foundation::ActId;

use crate::issue::{IssueType, ValidationIssue};

/// Confidence above which a suggestion is considered auto-fixable.
pub const AUTO_FIX_CONFIDENCE: f64 = 0.8;

/// The kind of edit a suggestion proposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FixKind {
    /// Insert a new act.
    AddAct,
    /// Change an existing act's parameters.
    ModifyAct,
    /// Delete an act.
    RemoveAct,
    /// Change when acts happen.
    ReorderActs,
    /// No mechanical fix is known.
    ManualReview,
}

impl FixKind {
    /// Stable string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AddAct => "ADD_ACT",
            Self::ModifyAct => "MODIFY_ACT",
            Self::RemoveAct => "REMOVE_ACT",
            Self::ReorderActs => "REORDER_ACTS",
            Self::ManualReview => "MANUAL_REVIEW",
        }
    }
}

impl fmt::Display for FixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proposed edit to the timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct FixSuggestion {
    /// The kind of edit.
    pub kind: FixKind,
    /// What to do.
    pub description: String,
    /// How likely the edit is to resolve the issue, in `0.0..=1.0`.
    pub confidence: f64,
    /// The acts the edit touches.
    pub acts: Vec<ActId>,
}

impl FixSuggestion {
    /// Creates a suggestion.
    #[must_use]
    pub fn new(kind: FixKind, description: impl Into<String>, confidence: f64, acts: Vec<ActId>) -> Self {
        Self {
            kind,
            description: description.into(),
            confidence,
            acts,
        }
    }

    /// Returns true if the suggestion is confident enough to apply unreviewed.
    #[must_use]
    pub fn is_auto_fixable(&self) -> bool {
        self.confidence > AUTO_FIX_CONFIDENCE
    }
}

impl fmt::Display for FixSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.0}%): {}", self.kind, self.confidence * 100.0, self.description)
    }
}

fn join(acts: &[ActId]) -> String {
    let names: Vec<_> = acts.iter().map(ActId::as_str).collect();
    names.join(", ")
}

/// Proposes fixes for `issue`, most confident first.
#[must_use]
pub fn suggest_fixes(issue: &ValidationIssue) -> Vec<FixSuggestion> {
    let acts = issue.affected_acts.clone();
    let primary = issue
        .primary_act()
        .map_or_else(|| "the act".to_string(), ToString::to_string);

    let mut suggestions = match issue.issue_type {
        IssueType::PreconditionViolated => {
            let add = if issue.hints.is_empty() {
                format!("Add an act before {primary} that establishes its preconditions")
            } else {
                issue.hints.join("; ")
            };
            vec![
                FixSuggestion::new(FixKind::AddAct, add, 0.8, acts.clone()),
                FixSuggestion::new(
                    FixKind::ModifyAct,
                    format!("Change the parameters of {primary} to match the state at its time"),
                    0.6,
                    acts,
                ),
            ]
        }
        IssueType::CircularDependency => {
            let last = acts.last().map_or_else(|| primary.clone(), ToString::to_string);
            vec![
                FixSuggestion::new(
                    FixKind::RemoveAct,
                    format!("Remove {last} to break the cycle"),
                    0.7,
                    acts.last().cloned().into_iter().collect(),
                ),
                FixSuggestion::new(
                    FixKind::ReorderActs,
                    format!("Reorder {} to break the cycle", join(&acts)),
                    0.8,
                    acts,
                ),
            ]
        }
        IssueType::Deadlock => vec![FixSuggestion::new(
            FixKind::AddAct,
            format!("Add acts that satisfy the preconditions of {}", join(&acts)),
            0.9,
            acts,
        )],
        IssueType::RedundantAct => vec![FixSuggestion::new(
            FixKind::RemoveAct,
            format!("Remove {primary}, which repeats an earlier act"),
            0.8,
            acts.into_iter().take(1).collect(),
        )],
        IssueType::TemporalParadox => vec![FixSuggestion::new(
            FixKind::ReorderActs,
            format!("Reorder {} so their effects happen in a consistent order", join(&acts)),
            0.8,
            acts,
        )],
        IssueType::InconsistentState => vec![FixSuggestion::new(
            FixKind::ManualReview,
            "Review the timeline manually",
            0.3,
            acts,
        )],
    };
    suggestions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    suggestions
}
