//! Act removal, causal links, and causal tracing tests

use storyline_engine::{
    Act, CausalLink, CausalityEngine, Dependency, EngineConfig, ErrorCode, LinkType,
};
use storyline_foundation::{ActId, EntityId, ErrorKind, LinkId};
use storyline_storage::{ChangeKind, WorldState};

fn id(s: &str) -> EntityId {
    EntityId::from(s)
}

fn initial() -> WorldState {
    WorldState::new(0)
        .set_position(id("alice"), id("room1"))
        .set_position(id("bob"), id("room2"))
        .set_owner(id("key"), id("alice"))
}

fn engine_with_story() -> CausalityEngine {
    let mut engine = CausalityEngine::new(initial());
    engine.add_act(Act::movement("walk", "alice", 50, "room1", "room2"));
    engine.add_act(Act::give_item("hand-over", "alice", 100, "key", "bob"));
    engine
        .add_link(
            CausalLink::new(
                "walk-enables-hand-over",
                "walk",
                "hand-over",
                LinkType::Enables,
                Dependency::Position,
            )
            .with_description("alice has to be in room2 to reach bob"),
        )
        .unwrap();
    engine
}

// =============================================================================
// Removal
// =============================================================================

#[test]
fn removing_an_enabling_act_fails() {
    let mut engine = engine_with_story();
    let result = engine.remove_act(&ActId::from("walk"));
    assert_eq!(result.codes(), vec![ErrorCode::HasDependencies]);
    assert_eq!(engine.len(), 2);
}

#[test]
fn removing_a_leaf_always_succeeds() {
    let mut engine = engine_with_story();
    engine.state_at(150);

    assert!(engine.remove_act(&ActId::from("hand-over")).valid);
    assert_eq!(engine.len(), 1);
    assert_eq!(engine.links().count(), 0);
    assert!(engine.history().get(&ActId::from("hand-over")).is_none());
}

#[test]
fn removing_an_unknown_act() {
    let mut engine = engine_with_story();
    let result = engine.remove_act(&ActId::from("nothing"));
    assert_eq!(result.codes(), vec![ErrorCode::ActNotFound]);
}

// =============================================================================
// Links
// =============================================================================

#[test]
fn links_are_queryable_from_both_ends() {
    let engine = engine_with_story();
    let out = engine.links_from(&ActId::from("walk"));
    let incoming = engine.links_to(&ActId::from("hand-over"));
    assert_eq!(out.len(), 1);
    assert_eq!(out, incoming);
    assert_eq!(out[0].to_string(), "walk ENABLES hand-over (via position)");
}

#[test]
fn links_need_stored_endpoints() {
    let mut engine = engine_with_story();
    let err = engine
        .add_link(CausalLink::new(
            "dangling",
            "walk",
            "nowhere",
            LinkType::Triggers,
            Dependency::Existence,
        ))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ActNotFound(_)));
    assert_eq!(err.to_string(), "act not found: nowhere");
}

#[test]
fn inferred_links_are_never_produced() {
    let engine = engine_with_story();
    assert!(engine.infer_causal_links(&Act::use_item("u", "bob", 200, "key")).is_empty());
    // Only the link added by hand is stored.
    assert_eq!(engine.links().count(), 1);
}

#[test]
fn removing_a_link_unblocks_removal() {
    let mut engine = engine_with_story();
    let link = engine.remove_link(&LinkId::from("walk-enables-hand-over")).unwrap();
    assert_eq!(link.dependency.as_str(), "position");
    assert!(engine.remove_act(&ActId::from("walk")).valid);
}

// =============================================================================
// Tracing
// =============================================================================

#[test]
fn trace_ownership_back_to_the_hand_over() {
    let mut engine = engine_with_story();
    let trace = engine.trace_causality(&id("key"), ChangeKind::Ownership, 150, &initial());

    assert_eq!(trace.causing_acts.len(), 1);
    assert_eq!(trace.root_cause.as_ref().map(|a| a.id().as_str()), Some("hand-over"));
    assert_eq!(trace.links.len(), 1);
}

#[test]
fn trace_position_stops_at_the_timestamp() {
    let mut engine = engine_with_story();
    assert!(
        engine
            .trace_causality(&id("alice"), ChangeKind::Position, 49, &initial())
            .root_cause
            .is_none()
    );

    let trace = engine.trace_causality(&id("alice"), ChangeKind::Position, 50, &initial());
    assert_eq!(trace.root_cause.map(|a| a.timestamp()), Some(50));
}

#[test]
fn history_can_be_turned_off_and_cleared() {
    let mut quiet = CausalityEngine::with_config(
        initial(),
        EngineConfig::new().with_record_history(false),
    );
    quiet.add_act(Act::movement("walk", "alice", 50, "room1", "room2"));
    quiet.state_at(100);
    assert!(quiet.history().is_empty());

    let mut engine = engine_with_story();
    engine.state_at(150);
    assert_eq!(engine.history().len(), 2);
    engine.clear_history();
    assert!(engine.history().is_empty());
}
