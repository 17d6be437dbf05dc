//! Precondition failures along the timeline.

use storyline_foundation::Result;

use super::{PassContext, ValidationPass, precondition_issue};
use crate::issue::ValidationIssue;

/// Reports every conflict found by
/// [`CausalityEngine::validate_timeline_from`](storyline_engine::CausalityEngine::validate_timeline_from).
#[derive(Clone, Copy, Debug, Default)]
pub struct TimelinePass;

impl ValidationPass for TimelinePass {
    fn name(&self) -> &str {
        "timeline"
    }

    fn run(&self, ctx: &PassContext<'_>) -> Result<Vec<ValidationIssue>> {
        let validation = ctx.engine.validate_timeline_from(ctx.initial_state);
        Ok(validation
            .conflicts
            .iter()
            .map(|c| precondition_issue(&c.act_id_1, c.timestamp, &c.errors))
            .collect())
    }
}
