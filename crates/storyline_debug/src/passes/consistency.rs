//! State consistency along the timeline.

use storyline_foundation::{Result, Timestamp};
use storyline_storage::WorldState;

use super::{PassContext, ValidationPass, precondition_issue};
use crate::issue::ValidationIssue;

/// Replays the whole timeline and reports every act that had to be skipped,
/// then checks the final state.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsistencyPass;

impl ValidationPass for ConsistencyPass {
    fn name(&self) -> &str {
        "consistency"
    }

    fn run(&self, ctx: &PassContext<'_>) -> Result<Vec<ValidationIssue>> {
        let replay = ctx.engine.replay(Timestamp::MAX, ctx.initial_state);
        let mut issues: Vec<_> = replay
            .skipped
            .iter()
            .map(|s| precondition_issue(&s.act_id, s.timestamp, &s.result.errors))
            .collect();
        issues.extend(detect_inconsistent_state(&replay.state));
        Ok(issues)
    }
}

/// Looks for contradictions inside a single snapshot.
///
/// No rule is implemented yet, so this never reports an
/// `INCONSISTENT_STATE` issue.
#[must_use]
pub fn detect_inconsistent_state(_state: &WorldState) -> Vec<ValidationIssue> {
    Vec::new()
}
