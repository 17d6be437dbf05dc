//! Using an item, optionally on a target.

use std::collections::BTreeSet;

use storyline_foundation::EntityId;
use storyline_storage::WorldState;

use super::checks::{require_owns, require_person};
use crate::validation::{ErrorCode, ValidationError};

/// What kind of entity a use target is.
///
/// Entity ids carry no type, so the act says how to interpret its target.
/// Without a type, the target may be anything that exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetType {
    /// Another person, who must be in the same place.
    Person,
    /// An item the actor carries or that lies where the actor stands.
    Item,
    /// The location the actor stands in.
    Location,
}

/// The actor uses `item`, optionally on a target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UseItem {
    /// The item used. The actor must own it.
    pub item: EntityId,
    /// What it is used on.
    pub target: Option<EntityId>,
    /// How to interpret `target`.
    pub target_type: Option<TargetType>,
}

impl UseItem {
    /// Use `item` with no target.
    #[must_use]
    pub fn new(item: impl Into<EntityId>) -> Self {
        Self {
            item: item.into(),
            target: None,
            target_type: None,
        }
    }

    /// Sets the target.
    #[must_use]
    pub fn with_target(mut self, target: impl Into<EntityId>, target_type: Option<TargetType>) -> Self {
        self.target = Some(target.into());
        self.target_type = target_type;
        self
    }

    pub(super) fn check(
        &self,
        actor: &EntityId,
        state: &WorldState,
        errors: &mut Vec<ValidationError>,
    ) {
        let actor_exists = require_person(state, actor, errors);
        require_owns(state, actor, &self.item, errors);

        let Some(target) = &self.target else {
            return;
        };
        let kinds = match self.target_type {
            Some(kind) => vec![kind],
            None => vec![TargetType::Person, TargetType::Item, TargetType::Location],
        };

        let existing: Vec<_> = kinds
            .into_iter()
            .filter(|kind| target_exists(state, target, *kind))
            .collect();
        if existing.is_empty() {
            errors.push(ValidationError::new(
                ErrorCode::TargetNotFound,
                format!("use target {target} does not exist"),
                vec![target.clone()],
            ));
            return;
        }

        let reachable = actor_exists
            && existing
                .iter()
                .any(|kind| target_reachable(state, actor, target, *kind));
        if !reachable {
            errors.push(ValidationError::new(
                ErrorCode::TargetNotReachable,
                format!("{actor} cannot reach {target}"),
                vec![actor.clone(), target.clone()],
            ));
        }
    }

    /// Item effects are not modelled yet: using an item only advances the
    /// clock (the timestamp is stamped by [`Act::apply_postconditions`]).
    ///
    /// [`Act::apply_postconditions`]: crate::act::Act::apply_postconditions
    pub(super) fn apply(&self, state: &WorldState) -> WorldState {
        state.clone()
    }

    pub(super) fn collect_entities(&self, out: &mut BTreeSet<EntityId>) {
        out.insert(self.item.clone());
        out.extend(self.target.iter().cloned());
    }

    pub(super) fn describe(&self, actor: &EntityId) -> String {
        match &self.target {
            Some(target) => format!("{actor} uses {} on {target}", self.item),
            None => format!("{actor} uses {}", self.item),
        }
    }
}

fn target_exists(state: &WorldState, target: &EntityId, kind: TargetType) -> bool {
    match kind {
        TargetType::Person => state.has_person(target),
        TargetType::Item => state.has_item(target),
        TargetType::Location => state.has_location(target),
    }
}

fn target_reachable(state: &WorldState, actor: &EntityId, target: &EntityId, kind: TargetType) -> bool {
    let here = state.position_of(actor);
    match kind {
        TargetType::Person => target == actor || state.co_located(actor, target),
        TargetType::Item => {
            state.owns(actor, target) || (here.is_some() && state.item_location(target) == here)
        }
        TargetType::Location => here == Some(target),
    }
}
