//! Redundant acts.

use std::collections::BTreeMap;

use storyline_engine::ActType;
use storyline_foundation::{ActId, EntityId, Result};

use super::{PassContext, ValidationPass};
use crate::issue::{IssueType, Severity, ValidationIssue};

/// Flags every act whose type and entity set repeat an earlier act.
///
/// The first act with a given signature is never flagged.
#[derive(Clone, Copy, Debug, Default)]
pub struct RedundancyPass;

impl ValidationPass for RedundancyPass {
    fn name(&self) -> &str {
        "redundancy"
    }

    fn run(&self, ctx: &PassContext<'_>) -> Result<Vec<ValidationIssue>> {
        let mut first_seen: BTreeMap<(ActType, Vec<EntityId>), ActId> = BTreeMap::new();
        let mut issues = Vec::new();

        for act in ctx.timeline() {
            let entities: Vec<EntityId> = act.affected_entities().into_iter().collect();
            let signature = (act.act_type(), entities);
            match first_seen.get(&signature) {
                Some(first) => issues.push(
                    ValidationIssue::new(
                        IssueType::RedundantAct,
                        Severity::Warning,
                        format!("{} repeats {first} ({})", act.id(), act.act_type()),
                        vec![act.id().clone(), first.clone()],
                    )
                    .with_entities(signature.1)
                    .at(act.timestamp()),
                ),
                None => {
                    first_seen.insert(signature, act.id().clone());
                }
            }
        }
        Ok(issues)
    }
}
