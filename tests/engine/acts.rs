//! Act contract tests

use proptest::prelude::*;
use storyline_engine::{Act, ActType, ErrorCode, TargetType};
use storyline_foundation::EntityId;
use storyline_storage::WorldState;

fn id(s: &str) -> EntityId {
    EntityId::from(s)
}

fn apart() -> WorldState {
    WorldState::new(0)
        .set_position(id("alice"), id("room1"))
        .set_position(id("bob"), id("room2"))
        .set_owner(id("key"), id("alice"))
}

fn together() -> WorldState {
    apart().set_position(id("bob"), id("room1"))
}

// =============================================================================
// Give
// =============================================================================

#[test]
fn give_between_co_located_people_transfers_ownership() {
    let act = Act::give_item("g", "alice", 100, "key", "bob");
    let state = together();
    assert!(act.check_preconditions(&state).valid);

    let next = act.apply_postconditions(&state);
    assert_eq!(next.owner_of(&id("key")), Some(&id("bob")));
    assert_eq!(next.person_positions(), state.person_positions());
    assert_eq!(next.knowledge(), state.knowledge());
}

#[test]
fn give_across_rooms_is_exactly_one_error() {
    let act = Act::give_item("g", "alice", 100, "key", "bob");
    let state = apart();

    let result = act.check_preconditions(&state);
    assert!(!result.valid);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].code, ErrorCode::NotSameLocation);
    assert_eq!(
        result.errors[0].suggestion.as_deref(),
        Some("Move alice to room2 before this act")
    );
}

#[test]
fn give_to_self_is_rejected() {
    let act = Act::give_item("g", "alice", 100, "key", "alice");
    assert_eq!(
        act.check_preconditions(&apart()).codes(),
        vec![ErrorCode::SamePerson]
    );
}

// =============================================================================
// Take and Place
// =============================================================================

#[test]
fn take_from_location_then_place_elsewhere() {
    let start = apart().set_item_location(id("lamp"), id("room1"));
    let take = Act::take_from_location("t", "alice", 10, "lamp", "room1");
    assert!(take.check_preconditions(&start).valid);
    let carrying = take.apply_postconditions(&start);
    assert!(carrying.owns(&id("alice"), &id("lamp")));
    assert_eq!(carrying.item_location(&id("lamp")), None);

    let walk = Act::movement("w", "alice", 20, "room1", "room2");
    let there = walk.apply_postconditions(&carrying);

    let place = Act::place_item("p", "alice", 30, "lamp", "room2");
    assert!(place.check_preconditions(&there).valid);
    let placed = place.apply_postconditions(&there);
    assert_eq!(placed.item_location(&id("lamp")), Some(&id("room2")));
    assert_eq!(placed.owner_of(&id("lamp")), None);
}

#[test]
fn take_from_person_needs_their_ownership() {
    let take = Act::take_from_person("t", "bob", 10, "key", "alice");
    assert!(take.check_preconditions(&together()).valid);
    assert_eq!(
        take.check_preconditions(&apart()).codes(),
        vec![ErrorCode::NotSameLocation]
    );

    let nothing = Act::take_from_person("t", "bob", 10, "lamp", "alice");
    assert_eq!(
        nothing.check_preconditions(&together()).codes(),
        vec![ErrorCode::ItemNotOwned]
    );
}

#[test]
fn take_from_wrong_location() {
    let start = apart().set_item_location(id("lamp"), id("room2"));
    let take = Act::take_from_location("t", "alice", 10, "lamp", "room1");
    assert_eq!(
        take.check_preconditions(&start).codes(),
        vec![ErrorCode::ItemNotAtLocation]
    );
}

// =============================================================================
// Speak, Use, Combine
// =============================================================================

#[test]
fn speaking_spreads_knowledge_to_the_room() {
    let start = together().add_knowledge(id("alice"), id("password"));
    let speak = Act::speak("s", "alice", 10, ["bob"], "password");
    assert!(speak.check_preconditions(&start).valid);
    assert!(speak.apply_postconditions(&start).knows(&id("bob"), &id("password")));

    let across = apart().add_knowledge(id("alice"), id("password"));
    assert_eq!(
        speak.check_preconditions(&across).codes(),
        vec![ErrorCode::NotSameLocation]
    );
}

#[test]
fn using_an_item_changes_nothing_but_the_clock() {
    let start = together();
    let act = Act::use_item_on("u", "alice", 10, "key", "bob", Some(TargetType::Person));
    assert!(act.check_preconditions(&start).valid);
    assert_eq!(act.apply_postconditions(&start), start.at_timestamp(10));
}

#[test]
fn combining_duplicates_and_unowned_items_reports_both() {
    let act = Act::combine_items("c", "alice", 10, ["key", "key", "gem"], None);
    let result = act.check_preconditions(&apart());
    assert_eq!(result.count_code(ErrorCode::DuplicateItems), 1);
    assert_eq!(result.count_code(ErrorCode::ItemNotOwned), 1);
    assert_eq!(result.errors.len(), 2);
}

#[test]
fn act_types_have_stable_names() {
    let names: Vec<_> = [
        Act::movement("a", "p", 0, "x", "y"),
        Act::give_item("a", "p", 0, "i", "q"),
        Act::take_from_location("a", "p", 0, "i", "x"),
        Act::place_item("a", "p", 0, "i", "x"),
        Act::speak("a", "p", 0, ["q"], "k"),
        Act::use_item("a", "p", 0, "i"),
        Act::combine_items("a", "p", 0, ["i", "j"], None),
    ]
    .iter()
    .map(|act| act.act_type().as_str())
    .collect();

    assert_eq!(
        names,
        ["MOVE", "GIVE_ITEM", "TAKE_ITEM", "PLACE_ITEM", "SPEAK", "USE_ITEM", "COMBINE_ITEMS"]
    );
    assert_eq!(ActType::GiveItem.to_string(), "GIVE_ITEM");
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn move_round_trip_restores_position(
        from in "[a-c]",
        to in "[a-c]",
    ) {
        let start = WorldState::new(0).set_position(id("alice"), EntityId::from(from.as_str()));
        let there = Act::movement("m1", "alice", 1, from.as_str(), to.as_str());
        let back = Act::movement("m2", "alice", 2, to.as_str(), from.as_str());

        let mid = there.apply_postconditions(&start);
        let end = back.apply_postconditions(&mid);
        prop_assert_eq!(end.person_positions(), start.person_positions());
        prop_assert_eq!(start.timestamp(), 0);
    }
}
