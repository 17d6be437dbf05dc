//! Individual validation pass tests

use storyline_debug::passes::{
    ConsistencyPass, DeadlockPass, ParadoxPass, PassContext, RedundancyPass, TimelinePass,
    ValidationPass, detect_inconsistent_state, temporal_paradox_between,
};
use storyline_debug::{IssueType, Severity};
use storyline_engine::{Act, CausalityEngine};
use storyline_foundation::{ActId, EntityId};
use storyline_storage::WorldState;

fn id(s: &str) -> EntityId {
    EntityId::from(s)
}

fn ids(acts: &[ActId]) -> Vec<&str> {
    acts.iter().map(ActId::as_str).collect()
}

/// alice and bob share room1; neither owns anything. alice knows a secret.
fn empty_handed() -> WorldState {
    WorldState::new(0)
        .set_position(id("alice"), id("room1"))
        .set_position(id("bob"), id("room1"))
        .add_knowledge(id("alice"), id("secret"))
}

// =============================================================================
// Timeline & Consistency
// =============================================================================

#[test]
fn timeline_pass_carries_suggestion_hints() {
    let start = empty_handed().set_position(id("bob"), id("room2"));
    let mut engine = CausalityEngine::new(start.clone());
    engine.insert_unchecked(Act::speak("s", "alice", 10, ["bob"], "secret"));

    let issues = TimelinePass.run(&PassContext::new(&engine, &start)).unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].issue_type, IssueType::PreconditionViolated);
    assert_eq!(issues[0].severity, Severity::Error);
    assert_eq!(issues[0].timestamp, Some(10));
    assert!(!issues[0].hints.is_empty());
}

#[test]
fn consistency_pass_agrees_with_timeline_pass() {
    let start = empty_handed();
    let mut engine = CausalityEngine::new(start.clone());
    engine.insert_unchecked(Act::give_item("g", "alice", 10, "key", "bob"));
    engine.add_act(Act::movement("m", "bob", 20, "room1", "room2"));

    let ctx = PassContext::new(&engine, &start);
    let from_timeline = TimelinePass.run(&ctx).unwrap();
    let from_replay = ConsistencyPass.run(&ctx).unwrap();
    assert_eq!(from_timeline.len(), 1);
    assert_eq!(ids(&from_replay[0].affected_acts), ids(&from_timeline[0].affected_acts));
}

#[test]
fn inconsistent_state_is_never_reported() {
    assert!(detect_inconsistent_state(&empty_handed()).is_empty());
}

// =============================================================================
// Paradox
// =============================================================================

#[test]
fn two_acts_on_one_item_do_not_form_a_cycle() {
    let start = empty_handed().set_owner(id("key"), id("alice"));
    let mut engine = CausalityEngine::new(start.clone());
    engine.add_act(Act::give_item("there", "alice", 10, "key", "bob"));
    engine.add_act(Act::give_item("back", "bob", 20, "key", "alice"));

    let issues = ParadoxPass.run(&PassContext::new(&engine, &start)).unwrap();
    assert!(issues.is_empty());
}

#[test]
fn temporal_paradox_is_never_reported() {
    let earlier = Act::movement("a", "alice", 10, "room1", "room2");
    let later = Act::movement("b", "alice", 5, "room2", "room1");
    assert!(temporal_paradox_between(&earlier, &later).is_none());
}

// =============================================================================
// Deadlock
// =============================================================================

#[test]
fn mutual_give_without_items_deadlocks() {
    let start = empty_handed();
    let mut engine = CausalityEngine::new(start.clone());
    engine.insert_unchecked(Act::give_item("g1", "alice", 10, "book", "bob"));
    engine.insert_unchecked(Act::give_item("g2", "bob", 20, "key", "alice"));

    let ctx = PassContext::new(&engine, &start);
    let deadlocks = DeadlockPass.run(&ctx).unwrap();
    let preconditions = TimelinePass.run(&ctx).unwrap();

    for act in ["g1", "g2"] {
        let reported = deadlocks
            .iter()
            .chain(&preconditions)
            .any(|issue| ids(&issue.affected_acts).contains(&act));
        assert!(reported, "{act} should be reported");
    }
    assert_eq!(deadlocks.len(), 1);
    assert_eq!(deadlocks[0].issue_type, IssueType::Deadlock);
}

// =============================================================================
// Redundancy
// =============================================================================

#[test]
fn repeated_speech_is_flagged_once() {
    let start = empty_handed();
    let mut engine = CausalityEngine::new(start.clone());
    engine.add_act(Act::speak("s1", "alice", 10, ["bob"], "secret"));
    engine.add_act(Act::speak("s2", "alice", 20, ["bob"], "secret"));

    let issues = RedundancyPass.run(&PassContext::new(&engine, &start)).unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].issue_type, IssueType::RedundantAct);
    assert_eq!(ids(&issues[0].affected_acts), ["s2", "s1"]);
}
