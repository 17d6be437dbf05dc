//! Shared precondition predicates.
//!
//! Each helper appends zero or more errors and returns whether the rule held,
//! so a variant can keep checking after a failure and still skip checks that
//! only make sense when an earlier one passed.

use storyline_foundation::EntityId;
use storyline_storage::WorldState;

use crate::validation::{ErrorCode, ValidationError};

/// The person must exist in the world.
pub fn require_person(
    state: &WorldState,
    person: &EntityId,
    errors: &mut Vec<ValidationError>,
) -> bool {
    if state.has_person(person) {
        return true;
    }
    errors.push(
        ValidationError::new(
            ErrorCode::PersonNotFound,
            format!("{person} does not exist in the world"),
            vec![person.clone()],
        )
        .with_suggestion(format!("Place {person} at a location in the initial state")),
    );
    false
}

/// `owner` must currently own `item`.
pub fn require_owns(
    state: &WorldState,
    owner: &EntityId,
    item: &EntityId,
    errors: &mut Vec<ValidationError>,
) -> bool {
    if state.owns(owner, item) {
        return true;
    }
    let message = match state.owner_of(item) {
        Some(actual) => format!("{owner} does not own {item} ({actual} does)"),
        None => format!("{owner} does not own {item}"),
    };
    errors.push(
        ValidationError::new(
            ErrorCode::ItemNotOwned,
            message,
            vec![owner.clone(), item.clone()],
        )
        .with_suggestion(format!(
            "Add an act that gives {item} to {owner} before this one"
        )),
    );
    false
}

/// `person` must be standing at `location`.
pub fn require_at(
    state: &WorldState,
    person: &EntityId,
    location: &EntityId,
    errors: &mut Vec<ValidationError>,
) -> bool {
    let actual = state.position_of(person);
    if actual == Some(location) {
        return true;
    }
    let message = match actual {
        Some(actual) => format!("{person} is at {actual}, not {location}"),
        None => format!("{person} has no known location, expected {location}"),
    };
    errors.push(
        ValidationError::new(
            ErrorCode::NotAtLocation,
            message,
            vec![person.clone(), location.clone()],
        )
        .with_suggestion(format!("Move {person} to {location} before this act")),
    );
    false
}

/// `a` and `b` must both have known positions, and they must be the same.
pub fn require_co_located(
    state: &WorldState,
    a: &EntityId,
    b: &EntityId,
    errors: &mut Vec<ValidationError>,
) -> bool {
    if state.co_located(a, b) {
        return true;
    }
    let show = |p: &EntityId| {
        state
            .position_of(p)
            .map_or_else(|| "nowhere".to_string(), ToString::to_string)
    };
    let mut error = ValidationError::new(
        ErrorCode::NotSameLocation,
        format!("{a} (at {}) and {b} (at {}) are not in the same location", show(a), show(b)),
        vec![a.clone(), b.clone()],
    );
    if let Some(target) = state.position_of(b) {
        error = error.with_suggestion(format!("Move {a} to {target} before this act"));
    }
    errors.push(error);
    false
}

/// Two roles that must be filled by different persons.
pub fn require_distinct(
    a: &EntityId,
    b: &EntityId,
    errors: &mut Vec<ValidationError>,
) -> bool {
    if a != b {
        return true;
    }
    errors.push(ValidationError::new(
        ErrorCode::SamePerson,
        format!("{a} cannot act on themselves here"),
        vec![a.clone()],
    ));
    false
}
