//! Validation passes.
//!
//! A pass inspects an engine's timeline and returns the issues it finds.
//! The reporter runs the enabled built-in passes in a fixed order, then any
//! extra passes registered with
//! [`ValidationReporter::with_pass`](crate::ValidationReporter::with_pass).
//!
//! Passes are independent: two passes may report the same underlying
//! problem under different issue types.

mod consistency;
mod deadlock;
mod paradox;
mod redundancy;
mod timeline;

pub use consistency::{ConsistencyPass, detect_inconsistent_state};
pub use deadlock::DeadlockPass;
pub use paradox::{ParadoxPass, find_dependency_cycles, temporal_paradox_between};
pub use redundancy::RedundancyPass;
pub use timeline::TimelinePass;

use std::collections::BTreeSet;

use storyline_engine::{Act, CausalityEngine, ValidationError};
use storyline_foundation::{ActId, Result, Timestamp};
use storyline_storage::WorldState;

use crate::issue::{IssueType, Severity, ValidationIssue};

/// What a pass gets to look at.
#[derive(Clone, Copy, Debug)]
pub struct PassContext<'a> {
    /// The engine under inspection.
    pub engine: &'a CausalityEngine,
    /// The state the timeline starts from.
    pub initial_state: &'a WorldState,
}

impl<'a> PassContext<'a> {
    /// Creates a context.
    #[must_use]
    pub fn new(engine: &'a CausalityEngine, initial_state: &'a WorldState) -> Self {
        Self {
            engine,
            initial_state,
        }
    }

    /// Every stored act in timeline order.
    #[must_use]
    pub fn timeline(&self) -> Vec<&'a Act> {
        self.engine.acts()
    }
}

/// One diagnostic over a timeline.
///
/// Failures must be reported by returning `Err`. The reporter turns an error
/// into a failure report, but it does not catch panics: a pass that panics
/// unwinds out of [`ValidationReporter::run`](crate::ValidationReporter::run)
/// and [`ValidationReporter::generate_report`](crate::ValidationReporter::generate_report).
pub trait ValidationPass {
    /// Short name used in logs and failure messages.
    fn name(&self) -> &str;

    /// Inspects the timeline.
    ///
    /// # Errors
    ///
    /// Returns an error if the pass cannot complete. The reporter then
    /// discards every issue and returns a failure report.
    ///
    /// # Panics
    ///
    /// Implementations should not panic. A panic is not converted into a
    /// failure report.
    fn run(&self, ctx: &PassContext<'_>) -> Result<Vec<ValidationIssue>>;
}

/// Builds a `PRECONDITION_VIOLATED` issue for one failing act.
pub(crate) fn precondition_issue(
    act: &ActId,
    timestamp: Timestamp,
    errors: &[ValidationError],
) -> ValidationIssue {
    let entities: BTreeSet<_> = errors
        .iter()
        .flat_map(|e| e.affected_entities.iter().cloned())
        .collect();
    let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();

    ValidationIssue::new(
        IssueType::PreconditionViolated,
        Severity::Error,
        format!("{act}: {}", messages.join("; ")),
        vec![act.clone()],
    )
    .with_entities(entities)
    .with_hints(errors.iter().filter_map(|e| e.suggestion.clone()))
    .at(timestamp)
}
