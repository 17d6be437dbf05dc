//! MessagePack round trips through the `serde` feature

use storyline_foundation::EntityId;
use storyline_storage::{StateChange, WorldState, diff_states};

fn id(s: &str) -> EntityId {
    EntityId::from(s)
}

fn sample() -> WorldState {
    WorldState::new(42)
        .set_position(id("alice"), id("hall"))
        .set_position(id("bob"), id("study"))
        .set_owner(id("key"), id("alice"))
        .set_item_location(id("lamp"), id("study"))
        .add_knowledge(id("bob"), id("code"))
        .add_knowledge(id("bob"), id("rumour"))
}

#[test]
fn world_state_round_trip() {
    let state = sample();
    let bytes = rmp_serde::to_vec_named(&state).unwrap();
    let loaded: WorldState = rmp_serde::from_slice(&bytes).unwrap();

    assert_eq!(loaded, state);
    assert_eq!(loaded.timestamp(), 42);
    assert!(loaded.knows(&id("bob"), &id("rumour")));
}

#[test]
fn ids_serialize_as_plain_strings() {
    let bytes = rmp_serde::to_vec(&id("alice")).unwrap();
    let raw: String = rmp_serde::from_slice(&bytes).unwrap();
    assert_eq!(raw, "alice");

    let from_number: EntityId = rmp_serde::from_slice(&rmp_serde::to_vec("7").unwrap()).unwrap();
    assert_eq!(from_number, EntityId::from(7_u64));
}

#[test]
fn state_changes_round_trip() {
    let before = sample();
    let after = before
        .set_position(id("alice"), id("study"))
        .set_owner(id("key"), id("bob"));
    let changes = diff_states(&before, &after);

    let bytes = rmp_serde::to_vec_named(&changes).unwrap();
    let loaded: Vec<StateChange> = rmp_serde::from_slice(&bytes).unwrap();
    assert_eq!(loaded, changes);
    assert_eq!(loaded.len(), 2);
}
