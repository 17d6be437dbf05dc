//! Passing information between people.

use std::collections::BTreeSet;

use storyline_foundation::EntityId;
use storyline_storage::WorldState;

use super::checks::{require_co_located, require_person};
use crate::validation::{ErrorCode, ValidationError};

/// The actor tells `info` to everyone in `to_persons`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Speak {
    /// Who hears it.
    pub to_persons: Vec<EntityId>,
    /// What is said.
    pub info: EntityId,
}

impl Speak {
    /// Creates a speak payload.
    #[must_use]
    pub fn new<I, P>(to_persons: I, info: impl Into<EntityId>) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<EntityId>,
    {
        Self {
            to_persons: to_persons.into_iter().map(Into::into).collect(),
            info: info.into(),
        }
    }

    pub(super) fn check(
        &self,
        actor: &EntityId,
        state: &WorldState,
        errors: &mut Vec<ValidationError>,
    ) {
        let actor_exists = require_person(state, actor, errors);
        if actor_exists && !state.knows(actor, &self.info) {
            errors.push(ValidationError::new(
                ErrorCode::InfoNotKnown,
                format!("{actor} does not know {}", self.info),
                vec![actor.clone(), self.info.clone()],
            ));
        }

        if self.to_persons.is_empty() {
            errors.push(ValidationError::new(
                ErrorCode::NoRecipients,
                format!("{actor} speaks to nobody"),
                vec![actor.clone()],
            ));
        }

        if self.to_persons.contains(actor) {
            errors.push(ValidationError::new(
                ErrorCode::SpeakingToSelf,
                format!("{actor} is listed among their own listeners"),
                vec![actor.clone()],
            ));
        }

        for recipient in self.to_persons.iter().filter(|r| *r != actor) {
            if require_person(state, recipient, errors) && actor_exists {
                require_co_located(state, actor, recipient, errors);
            }
        }
    }

    pub(super) fn apply(&self, state: &WorldState) -> WorldState {
        self.to_persons.iter().fold(state.clone(), |world, recipient| {
            world.add_knowledge(recipient.clone(), self.info.clone())
        })
    }

    pub(super) fn collect_entities(&self, out: &mut BTreeSet<EntityId>) {
        out.extend(self.to_persons.iter().cloned());
        out.insert(self.info.clone());
    }

    pub(super) fn describe(&self, actor: &EntityId) -> String {
        let listeners: Vec<_> = self.to_persons.iter().map(EntityId::as_str).collect();
        format!("{actor} tells {} to {}", self.info, listeners.join(", "))
    }
}
