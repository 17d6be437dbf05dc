//! Whole-story scenarios: build a timeline, query it, edit it, report on it.

use storyline_debug::{IssueType, ReporterConfig, Severity, ValidationReporter, format_report};
use storyline_engine::{Act, ActOutcome, CausalityEngine, CausalLink, Dependency, ErrorCode, LinkType};
use storyline_foundation::{ActId, EntityId};
use storyline_storage::{ChangeKind, WorldState};

fn id(s: &str) -> EntityId {
    EntityId::from(s)
}

/// The key lies in the hall with alice; bob waits in the study.
fn opening() -> WorldState {
    WorldState::new(0)
        .set_position(id("alice"), id("hall"))
        .set_position(id("bob"), id("study"))
        .set_item_location(id("key"), id("hall"))
        .add_knowledge(id("alice"), id("code"))
}

fn story() -> CausalityEngine {
    let mut engine = CausalityEngine::new(opening());
    let acts = [
        Act::take_from_location("pick-up", "alice", 10, "key", "hall"),
        Act::movement("walk", "alice", 20, "hall", "study"),
        Act::give_item("hand-over", "alice", 30, "key", "bob"),
        Act::speak("tell", "alice", 40, ["bob"], "code"),
        Act::use_item("unlock", "bob", 50, "key"),
    ];
    for act in acts {
        let result = engine.add_act(act);
        assert!(result.valid, "{}", result.summary());
    }
    engine
}

#[test]
fn story_plays_out() {
    let mut engine = story();
    let end = engine.state_at(100);

    assert_eq!(end.position_of(&id("alice")), Some(&id("study")));
    assert_eq!(end.owner_of(&id("key")), Some(&id("bob")));
    assert_eq!(end.item_location(&id("key")), None);
    assert!(end.knows(&id("bob"), &id("code")));
    assert!(engine.validate_timeline().valid);

    // Using the key changes nothing, so it leaves no transition behind.
    assert_eq!(engine.history().len(), 4);
}

#[test]
fn midpoint_state() {
    let mut engine = story();
    let middle = engine.state_at(25);
    assert_eq!(middle.position_of(&id("alice")), Some(&id("study")));
    assert_eq!(middle.owner_of(&id("key")), Some(&id("alice")));
    assert!(!middle.knows(&id("bob"), &id("code")));
}

#[test]
fn key_ownership_traces_back_to_the_pick_up() {
    let mut engine = story();
    let trace = engine.trace_causality(&id("key"), ChangeKind::Ownership, 100, &opening());
    let ids: Vec<_> = trace.causing_acts.iter().map(|a| a.id().as_str()).collect();
    assert_eq!(ids, ["pick-up", "hand-over"]);
    assert_eq!(trace.root_cause.map(|a| a.id().clone()), Some(ActId::from("pick-up")));
}

#[test]
fn a_busy_protagonist_is_a_dependency_cycle() {
    let engine = story();
    let report = ValidationReporter::new(&engine, opening()).run();

    // Every act involves alice or bob, so shared entities chain the acts
    // into cycles. Nothing else is wrong with the story.
    assert!(report.count_type(IssueType::CircularDependency) >= 1);
    assert_eq!(report.count_type(IssueType::PreconditionViolated), 0);
    assert_eq!(report.count_type(IssueType::Deadlock), 0);
    assert_eq!(report.count_type(IssueType::RedundantAct), 0);

    let timeline_only =
        ValidationReporter::with_config(&engine, opening(), ReporterConfig::minimal()).run();
    assert!(timeline_only.is_clean());
}

#[test]
fn cutting_the_walk_breaks_what_follows() {
    let mut engine = story();
    assert!(engine.remove_act(&ActId::from("walk")).valid);

    let validation = engine.validate_timeline();
    let failing: Vec<_> = validation.conflicts.iter().map(|c| c.act_id_1.as_str()).collect();
    assert_eq!(failing, ["hand-over", "tell", "unlock"]);

    let replay = engine.replay(100, &opening());
    assert_eq!(replay.outcome(&ActId::from("pick-up")), ActOutcome::Applied);
    assert_eq!(replay.outcome(&ActId::from("unlock")), ActOutcome::SkippedInvalid);

    let report = ValidationReporter::new(&engine, opening()).run();
    assert!(report.count_type(IssueType::Deadlock) >= 1);
    assert_eq!(report.count_severity(Severity::Error), report.total_issues);
    assert!(format_report(&report).contains("Move alice to study before this act"));
}

#[test]
fn linked_walk_cannot_be_cut() {
    let mut engine = story();
    engine
        .add_link(CausalLink::new(
            "walk-to-bob",
            "walk",
            "hand-over",
            LinkType::Enables,
            Dependency::Position,
        ))
        .unwrap();

    let result = engine.remove_act(&ActId::from("walk"));
    assert_eq!(result.codes(), vec![ErrorCode::HasDependencies]);
    assert!(engine.validate_timeline().valid);
}
