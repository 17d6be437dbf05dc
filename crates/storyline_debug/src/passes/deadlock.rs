//! Deadlocks between failing acts.
//!
//! The pass walks the timeline once, applying every act whose preconditions
//! hold. A failing act is blocked. When a newly blocked act shares an
//! entity with an act that is already blocked, the two are waiting on the
//! same part of the world and neither can proceed on its own.

use std::collections::BTreeSet;

use storyline_foundation::{ActId, EntityId, Result};

use super::{PassContext, ValidationPass};
use crate::issue::{IssueType, Severity, ValidationIssue};

/// Reports blocked acts that overlap with earlier blocked acts.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeadlockPass;

struct Blocked {
    act: ActId,
    entities: BTreeSet<EntityId>,
}

impl ValidationPass for DeadlockPass {
    fn name(&self) -> &str {
        "deadlock"
    }

    fn run(&self, ctx: &PassContext<'_>) -> Result<Vec<ValidationIssue>> {
        let mut state = ctx.initial_state.clone();
        let mut blocked: Vec<Blocked> = Vec::new();
        let mut issues = Vec::new();

        for act in ctx.timeline() {
            if act.check_preconditions(&state).valid {
                state = act.apply_postconditions(&state);
                blocked.retain(|b| &b.act != act.id());
                continue;
            }

            let entities = act.affected_entities();
            let waiting_on: Vec<_> = blocked
                .iter()
                .filter(|b| !b.entities.is_disjoint(&entities))
                .collect();
            if !waiting_on.is_empty() {
                let shared: BTreeSet<EntityId> = waiting_on
                    .iter()
                    .flat_map(|b| b.entities.intersection(&entities).cloned())
                    .collect();
                let others: Vec<_> = waiting_on.iter().map(|b| b.act.as_str()).collect();
                let names: Vec<_> = shared.iter().map(EntityId::as_str).collect();
                let mut acts = vec![act.id().clone()];
                acts.extend(waiting_on.iter().map(|b| b.act.clone()));

                issues.push(
                    ValidationIssue::new(
                        IssueType::Deadlock,
                        Severity::Error,
                        format!(
                            "{} is blocked on {} alongside {}",
                            act.id(),
                            names.join(", "),
                            others.join(", ")
                        ),
                        acts,
                    )
                    .with_entities(shared)
                    .at(act.timestamp()),
                );
            }
            blocked.push(Blocked {
                act: act.id().clone(),
                entities,
            });
        }
        Ok(issues)
    }
}
