//! Issues found by validation passes.

use std::fmt;

use storyline_foundation::{ActId, EntityId, Timestamp};

use crate::suggest::FixSuggestion;

/// How serious an issue is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// The timeline cannot play out as written.
    Error,
    /// The timeline plays out but something looks wrong.
    Warning,
    /// Worth knowing.
    Info,
}

impl Severity {
    /// Stable string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of problem an issue describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IssueType {
    /// An act's preconditions fail at its point on the timeline.
    PreconditionViolated,
    /// Acts depend on each other in a cycle.
    CircularDependency,
    /// Two neighbouring acts contradict each other in time.
    TemporalParadox,
    /// A failing act shares entities with another failing act.
    Deadlock,
    /// An act repeats an earlier act's type and entities.
    RedundantAct,
    /// The replayed state contradicts itself.
    InconsistentState,
}

impl IssueType {
    /// Stable string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PreconditionViolated => "PRECONDITION_VIOLATED",
            Self::CircularDependency => "CIRCULAR_DEPENDENCY",
            Self::TemporalParadox => "TEMPORAL_PARADOX",
            Self::Deadlock => "DEADLOCK",
            Self::RedundantAct => "REDUNDANT_ACT",
            Self::InconsistentState => "INCONSISTENT_STATE",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One problem found in a timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationIssue {
    /// Kind of problem.
    pub issue_type: IssueType,
    /// How serious it is.
    pub severity: Severity,
    /// Human-readable explanation.
    pub message: String,
    /// Acts involved, the primary act first.
    pub affected_acts: Vec<ActId>,
    /// Entities involved.
    pub affected_entities: Vec<EntityId>,
    /// When the primary act happens.
    pub timestamp: Option<Timestamp>,
    /// Corrective edits carried over from the failed checks.
    pub hints: Vec<String>,
    /// Proposed fixes, filled in by the reporter.
    pub suggestions: Vec<FixSuggestion>,
}

impl ValidationIssue {
    /// Creates an issue about `acts`.
    #[must_use]
    pub fn new(
        issue_type: IssueType,
        severity: Severity,
        message: impl Into<String>,
        affected_acts: Vec<ActId>,
    ) -> Self {
        Self {
            issue_type,
            severity,
            message: message.into(),
            affected_acts,
            affected_entities: Vec::new(),
            timestamp: None,
            hints: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Builder method to set the entities involved.
    #[must_use]
    pub fn with_entities(mut self, entities: impl IntoIterator<Item = EntityId>) -> Self {
        self.affected_entities = entities.into_iter().collect();
        self
    }

    /// Builder method to set the timestamp.
    #[must_use]
    pub fn at(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Builder method to add hints.
    #[must_use]
    pub fn with_hints(mut self, hints: impl IntoIterator<Item = String>) -> Self {
        self.hints.extend(hints);
        self
    }

    /// The primary act, if any.
    #[must_use]
    pub fn primary_act(&self) -> Option<&ActId> {
        self.affected_acts.first()
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.issue_type, self.message)?;
        if let Some(t) = self.timestamp {
            write!(f, " (t={t})")?;
        }
        Ok(())
    }
}
