//! State diff tests

use storyline_foundation::EntityId;
use storyline_storage::{ChangeKind, ChangeValue, WorldState, diff_states, format_changes};

fn id(s: &str) -> EntityId {
    EntityId::from(s)
}

#[test]
fn identical_states_have_no_changes() {
    let state = WorldState::new(0).set_position(id("alice"), id("room1"));
    assert!(diff_states(&state, &state.at_timestamp(99)).is_empty());
    assert_eq!(format_changes(&[]), "No changes");
}

#[test]
fn handing_over_an_item_is_one_ownership_change() {
    let before = WorldState::new(0).set_owner(id("key"), id("alice"));
    let after = before.set_owner(id("key"), id("bob"));

    let changes = diff_states(&before, &after);
    assert_eq!(changes.len(), 1);
    assert!(changes[0].matches(&id("key"), ChangeKind::Ownership));
    assert_eq!(changes[0].old_value, Some(ChangeValue::Entity(id("alice"))));
    assert_eq!(changes[0].new_value, Some(ChangeValue::Entity(id("bob"))));
    assert_eq!(changes[0].to_string(), "ownership key: alice -> bob");
}

#[test]
fn placing_an_item_changes_two_maps() {
    let before = WorldState::new(0).set_owner(id("key"), id("alice"));
    let after = before.set_item_location(id("key"), id("room1"));

    let kinds: Vec<_> = diff_states(&before, &after).iter().map(|c| c.kind).collect();
    assert_eq!(kinds, [ChangeKind::Ownership, ChangeKind::ItemLocation]);
}

#[test]
fn learning_is_a_knowledge_change() {
    let before = WorldState::new(0);
    let after = before.add_knowledge(id("bob"), id("secret"));

    let changes = diff_states(&before, &after);
    assert_eq!(changes.len(), 1);
    assert!(changes[0].is_added());
    assert_eq!(changes[0].kind.as_str(), "knowledge");
}
