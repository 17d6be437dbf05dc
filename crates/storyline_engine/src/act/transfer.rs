//! Item transfers: giving, taking, and placing.

use std::collections::BTreeSet;

use storyline_foundation::EntityId;
use storyline_storage::WorldState;

use super::checks::{require_at, require_co_located, require_distinct, require_owns, require_person};
use crate::validation::{ErrorCode, ValidationError};

// =============================================================================
// Give
// =============================================================================

/// The actor hands `item` to `to_person`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GiveItem {
    /// The item handed over.
    pub item: EntityId,
    /// The recipient.
    pub to_person: EntityId,
}

impl GiveItem {
    /// Creates a give payload.
    #[must_use]
    pub fn new(item: impl Into<EntityId>, to_person: impl Into<EntityId>) -> Self {
        Self {
            item: item.into(),
            to_person: to_person.into(),
        }
    }

    pub(super) fn check(
        &self,
        actor: &EntityId,
        state: &WorldState,
        errors: &mut Vec<ValidationError>,
    ) {
        let actor_exists = require_person(state, actor, errors);
        let distinct = require_distinct(actor, &self.to_person, errors);
        require_owns(state, actor, &self.item, errors);
        if distinct && require_person(state, &self.to_person, errors) && actor_exists {
            require_co_located(state, actor, &self.to_person, errors);
        }
    }

    pub(super) fn apply(&self, state: &WorldState) -> WorldState {
        state.set_owner(self.item.clone(), self.to_person.clone())
    }

    pub(super) fn collect_entities(&self, out: &mut BTreeSet<EntityId>) {
        out.insert(self.item.clone());
        out.insert(self.to_person.clone());
    }

    pub(super) fn describe(&self, actor: &EntityId) -> String {
        format!("{actor} gives {} to {}", self.item, self.to_person)
    }
}

// =============================================================================
// Take
// =============================================================================

/// The actor takes `item` from exactly one source: a location or a person.
///
/// Both sources are optional in the payload so that a malformed act (no
/// source, or two) can be represented and reported instead of being
/// unrepresentable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TakeItem {
    /// The item taken.
    pub item: EntityId,
    /// Take it from where it lies.
    pub from_location: Option<EntityId>,
    /// Take it from whoever carries it.
    pub from_person: Option<EntityId>,
}

impl TakeItem {
    /// Take `item` from `location`.
    #[must_use]
    pub fn from_location(item: impl Into<EntityId>, location: impl Into<EntityId>) -> Self {
        Self {
            item: item.into(),
            from_location: Some(location.into()),
            from_person: None,
        }
    }

    /// Take `item` from `person`.
    #[must_use]
    pub fn from_person(item: impl Into<EntityId>, person: impl Into<EntityId>) -> Self {
        Self {
            item: item.into(),
            from_location: None,
            from_person: Some(person.into()),
        }
    }

    pub(super) fn check(
        &self,
        actor: &EntityId,
        state: &WorldState,
        errors: &mut Vec<ValidationError>,
    ) {
        let actor_exists = require_person(state, actor, errors);
        match (&self.from_location, &self.from_person) {
            (Some(location), None) => {
                if state.item_location(&self.item) != Some(location) {
                    errors.push(
                        ValidationError::new(
                            ErrorCode::ItemNotAtLocation,
                            format!("{} is not at {location}", self.item),
                            vec![self.item.clone(), location.clone()],
                        )
                        .with_suggestion(format!(
                            "Add an act that places {} at {location} before this one",
                            self.item
                        )),
                    );
                }
                if actor_exists {
                    require_at(state, actor, location, errors);
                }
            }
            (None, Some(source)) => {
                let distinct = require_distinct(actor, source, errors);
                let source_exists = require_person(state, source, errors);
                require_owns(state, source, &self.item, errors);
                if distinct && source_exists && actor_exists {
                    require_co_located(state, actor, source, errors);
                }
            }
            _ => errors.push(ValidationError::new(
                ErrorCode::InvalidSource,
                format!(
                    "taking {} needs exactly one source (a location or a person)",
                    self.item
                ),
                vec![self.item.clone()],
            )),
        }
    }

    pub(super) fn apply(&self, actor: &EntityId, state: &WorldState) -> WorldState {
        state.set_owner(self.item.clone(), actor.clone())
    }

    pub(super) fn collect_entities(&self, out: &mut BTreeSet<EntityId>) {
        out.insert(self.item.clone());
        out.extend(self.from_location.iter().cloned());
        out.extend(self.from_person.iter().cloned());
    }

    pub(super) fn describe(&self, actor: &EntityId) -> String {
        match (&self.from_location, &self.from_person) {
            (Some(location), _) => format!("{actor} takes {} from {location}", self.item),
            (None, Some(person)) => format!("{actor} takes {} from {person}", self.item),
            (None, None) => format!("{actor} takes {}", self.item),
        }
    }
}

// =============================================================================
// Place
// =============================================================================

/// The actor puts `item` down at `location`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaceItem {
    /// The item put down.
    pub item: EntityId,
    /// Where it ends up. The actor must be standing there.
    pub location: EntityId,
}

impl PlaceItem {
    /// Creates a place payload.
    #[must_use]
    pub fn new(item: impl Into<EntityId>, location: impl Into<EntityId>) -> Self {
        Self {
            item: item.into(),
            location: location.into(),
        }
    }

    pub(super) fn check(
        &self,
        actor: &EntityId,
        state: &WorldState,
        errors: &mut Vec<ValidationError>,
    ) {
        let actor_exists = require_person(state, actor, errors);
        require_owns(state, actor, &self.item, errors);
        if actor_exists {
            require_at(state, actor, &self.location, errors);
        }
    }

    pub(super) fn apply(&self, state: &WorldState) -> WorldState {
        state.set_item_location(self.item.clone(), self.location.clone())
    }

    pub(super) fn collect_entities(&self, out: &mut BTreeSet<EntityId>) {
        out.insert(self.item.clone());
        out.insert(self.location.clone());
    }

    pub(super) fn describe(&self, actor: &EntityId) -> String {
        format!("{actor} places {} at {}", self.item, self.location)
    }
}
