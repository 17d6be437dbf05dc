//! World state snapshot tests

use storyline_foundation::EntityId;
use storyline_storage::WorldState;

fn id(s: &str) -> EntityId {
    EntityId::from(s)
}

// =============================================================================
// Snapshots
// =============================================================================

#[test]
fn producers_leave_the_source_untouched() {
    let base = WorldState::new(0).set_position(id("alice"), id("room1"));
    let moved = base.set_position(id("alice"), id("room2"));

    assert_eq!(base.position_of(&id("alice")), Some(&id("room1")));
    assert_eq!(moved.position_of(&id("alice")), Some(&id("room2")));
}

#[test]
fn ownership_and_location_are_exclusive() {
    let state = WorldState::new(0)
        .set_item_location(id("key"), id("room1"))
        .set_owner(id("key"), id("alice"));

    assert_eq!(state.owner_of(&id("key")), Some(&id("alice")));
    assert_eq!(state.item_location(&id("key")), None);

    let dropped = state.set_item_location(id("key"), id("room2"));
    assert_eq!(dropped.owner_of(&id("key")), None);
    assert_eq!(dropped.item_location(&id("key")), Some(&id("room2")));
}

#[test]
fn existence_is_derived_from_facts() {
    let state = WorldState::new(0)
        .set_position(id("alice"), id("room1"))
        .add_knowledge(id("oracle"), id("prophecy"))
        .set_item_location(id("lamp"), id("attic"));

    assert!(state.has_person(&id("alice")));
    assert!(state.has_person(&id("oracle")));
    assert!(!state.has_person(&id("bob")));
    assert!(state.has_item(&id("lamp")));
    assert!(state.has_location(&id("attic")));
    assert!(state.has_location(&id("room1")));
    assert!(!state.has_location(&id("cellar")));
}

#[test]
fn co_location_needs_two_known_positions() {
    let state = WorldState::new(0)
        .set_position(id("alice"), id("room1"))
        .set_position(id("bob"), id("room1"))
        .add_knowledge(id("ghost"), id("secret"));

    assert!(state.co_located(&id("alice"), &id("bob")));
    assert!(!state.co_located(&id("alice"), &id("ghost")));
    let room1 = id("room1");
    let here: Vec<_> = state.persons_at(&room1).map(EntityId::as_str).collect();
    assert_eq!(here, ["alice", "bob"]);
}

#[test]
fn knowledge_is_a_set() {
    let state = WorldState::new(0)
        .add_knowledge(id("alice"), id("secret"))
        .add_knowledge(id("alice"), id("secret"))
        .add_knowledge(id("alice"), id("rumour"));

    assert_eq!(state.knowledge_of(&id("alice")).map(|k| k.len()), Some(2));
    assert!(state.knows(&id("alice"), &id("rumour")));
}

#[test]
fn clearing_a_position_keeps_knowing_persons() {
    let state = WorldState::new(0)
        .set_position(id("alice"), id("room1"))
        .set_position(id("bob"), id("room1"))
        .add_knowledge(id("alice"), id("secret"));

    let vanished = state.clear_position(&id("alice")).clear_position(&id("bob"));
    assert_eq!(vanished.position_of(&id("alice")), None);
    // alice still exists through what she knows; bob is gone.
    assert!(vanished.has_person(&id("alice")));
    assert!(!vanished.has_person(&id("bob")));
    assert!(!vanished.has_location(&id("room1")));
    assert_eq!(state.position_of(&id("alice")), Some(&id("room1")));
}

#[test]
fn items_lists_owned_and_placed_once_each() {
    let state = WorldState::new(0)
        .set_owner(id("key"), id("alice"))
        .set_item_location(id("lamp"), id("attic"))
        .set_item_location(id("key"), id("hall"));

    let mut items: Vec<_> = state.items().map(EntityId::as_str).collect();
    items.sort_unstable();
    assert_eq!(items, ["key", "lamp"]);

    let persons: Vec<_> = state.persons().map(EntityId::as_str).collect();
    assert!(persons.is_empty());
}
