//! Timeline replay and validation tests

use storyline_engine::{Act, ActOutcome, CausalityEngine, ConflictKind, ErrorCode};
use storyline_foundation::{ActId, EntityId};
use storyline_storage::WorldState;

fn id(s: &str) -> EntityId {
    EntityId::from(s)
}

/// alice in room1, bob in room2, alice holds the key.
fn initial() -> WorldState {
    WorldState::new(0)
        .set_position(id("alice"), id("room1"))
        .set_position(id("bob"), id("room2"))
        .set_owner(id("key"), id("alice"))
}

fn walk() -> Act {
    Act::movement("walk", "alice", 50, "room1", "room2")
}

fn hand_over() -> Act {
    Act::give_item("hand-over", "alice", 100, "key", "bob")
}

// =============================================================================
// Replay
// =============================================================================

#[test]
fn walk_then_hand_over() {
    let mut engine = CausalityEngine::new(initial());
    assert!(engine.add_act(walk()).valid);
    assert!(engine.add_act(hand_over()).valid);

    let state = engine.state_at_from(150, &initial());
    assert_eq!(state.position_of(&id("alice")), Some(&id("room2")));
    assert_eq!(state.owner_of(&id("key")), Some(&id("bob")));
}

#[test]
fn insertion_order_does_not_change_the_result() {
    let mut forward = CausalityEngine::new(initial());
    forward.add_act(walk());
    forward.add_act(hand_over());

    // Inserted second-act-first, the give has to be forced in: on its own it
    // is invalid at t=100.
    let mut reverse = CausalityEngine::new(initial());
    reverse.insert_unchecked(hand_over());
    assert!(reverse.add_act(walk()).valid);

    assert_eq!(forward.state_at(150), reverse.state_at(150));
    assert!(reverse.validate_timeline().valid);
}

#[test]
fn state_at_is_idempotent() {
    let mut engine = CausalityEngine::new(initial());
    engine.add_act(walk());
    engine.add_act(hand_over());

    let first = engine.state_at_from(150, &initial());
    let second = engine.state_at_from(150, &initial());
    assert_eq!(first, second);
    assert_eq!(engine.history().len(), 2);
}

#[test]
fn replay_tracks_every_act_outcome() {
    let mut engine = CausalityEngine::new(initial());
    engine.insert_unchecked(hand_over());
    engine.insert_unchecked(Act::movement("later", "bob", 200, "room2", "room1"));

    let replay = engine.replay(150, &initial());
    assert_eq!(replay.outcome(&ActId::from("hand-over")), ActOutcome::SkippedInvalid);
    assert_eq!(replay.outcome(&ActId::from("later")), ActOutcome::NotYetReached);
    assert_eq!(replay.state.owner_of(&id("key")), Some(&id("alice")));
    assert_eq!(replay.state.timestamp(), 150);
}

#[test]
fn equal_timestamps_keep_insertion_order() {
    // alice gives bob the key and bob hands it straight back, both at t=10.
    let start = initial().set_position(id("bob"), id("room1"));
    let mut engine = CausalityEngine::new(start.clone());
    engine.insert_unchecked(Act::give_item("there", "alice", 10, "key", "bob"));
    engine.insert_unchecked(Act::give_item("back", "bob", 10, "key", "alice"));

    let replay = engine.replay(10, &start);
    assert_eq!(replay.applied, vec![ActId::from("there"), ActId::from("back")]);
    assert_eq!(replay.state.owner_of(&id("key")), Some(&id("alice")));
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn hand_over_across_rooms_is_one_conflict() {
    let mut engine = CausalityEngine::new(initial());
    engine.insert_unchecked(hand_over());

    let validation = engine.validate_timeline_from(&initial());
    assert!(!validation.valid);
    assert_eq!(validation.conflicts.len(), 1);

    let conflict = &validation.conflicts[0];
    assert_eq!(conflict.kind, ConflictKind::PreconditionViolated);
    assert_eq!(conflict.kind.to_string(), "precondition_violated");
    assert_eq!(conflict.act_id_1.as_str(), "hand-over");
    assert_eq!(conflict.act_id_1, conflict.act_id_2);
    assert_eq!(validation.suggestions.len(), 1);
    assert_eq!(validation.suggestions[0].code, ErrorCode::NotSameLocation);
}

#[test]
fn add_act_rejects_what_the_timeline_cannot_support() {
    let mut engine = CausalityEngine::new(initial());
    let result = engine.add_act(hand_over());
    assert_eq!(result.codes(), vec![ErrorCode::NotSameLocation]);
    assert!(engine.get_act(&ActId::from("hand-over")).is_none());
}

#[test]
fn valid_timeline_has_no_conflicts_or_suggestions() {
    let mut engine = CausalityEngine::new(initial());
    engine.add_act(walk());
    engine.add_act(hand_over());

    let validation = engine.validate_timeline();
    assert!(validation.valid);
    assert!(validation.conflicts.is_empty());
    assert!(validation.suggestions.is_empty());
}
