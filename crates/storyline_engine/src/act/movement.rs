//! Moving between locations.

use std::collections::BTreeSet;

use storyline_foundation::EntityId;
use storyline_storage::WorldState;

use super::checks::{require_at, require_person};
use crate::validation::ValidationError;

/// The actor walks from `from` to `to`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Move {
    /// Where the actor must be.
    pub from: EntityId,
    /// Where the actor ends up.
    pub to: EntityId,
}

impl Move {
    /// Creates a move payload.
    #[must_use]
    pub fn new(from: impl Into<EntityId>, to: impl Into<EntityId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub(super) fn check(
        &self,
        actor: &EntityId,
        state: &WorldState,
        errors: &mut Vec<ValidationError>,
    ) {
        if require_person(state, actor, errors) {
            require_at(state, actor, &self.from, errors);
        }
    }

    pub(super) fn apply(&self, actor: &EntityId, state: &WorldState) -> WorldState {
        state.set_position(actor.clone(), self.to.clone())
    }

    pub(super) fn collect_entities(&self, out: &mut BTreeSet<EntityId>) {
        out.insert(self.from.clone());
        out.insert(self.to.clone());
    }

    pub(super) fn describe(&self, actor: &EntityId) -> String {
        format!("{actor} moves from {} to {}", self.from, self.to)
    }
}
