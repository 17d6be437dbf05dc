//! The causality engine.
//!
//! The engine owns a set of acts keyed by id and derives everything else
//! from them: the state at any timestamp, the list of conflicts, and the
//! acts that caused a given change. Nothing about order is stored; every
//! query sorts the acts by `(timestamp, insertion sequence)` and replays
//! them from an initial state.
//!
//! Replay degrades gracefully: an act whose preconditions fail at its point
//! on the timeline is skipped with a warning and the replay carries on.

use storyline_foundation::{ActId, EntityId, Error, LinkId, LtMap, Result, Timestamp};
use storyline_storage::{ChangeKind, WorldState, diff_states};
use tracing::{debug, warn};

use crate::act::Act;
use crate::history::{StateTransition, TransitionLog};
use crate::link::{CausalLink, LinkType};
use crate::validation::{ErrorCode, ValidationError, ValidationResult};

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for a [`CausalityEngine`].
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Record a [`StateTransition`] for every applied act during
    /// [`CausalityEngine::state_at`].
    pub record_history: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            record_history: true,
        }
    }
}

impl EngineConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether replays record history.
    #[must_use]
    pub fn with_record_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }
}

// =============================================================================
// Replay Results
// =============================================================================

/// Where an act stands relative to one replay.
///
/// Every act starts as `NotYetReached` and moves to exactly one of the
/// other two states when the replay reaches it. There is no backtracking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActOutcome {
    /// The replay stopped before this act.
    NotYetReached,
    /// The act's preconditions held and its effect was applied.
    Applied,
    /// The act's preconditions failed and it was skipped.
    SkippedInvalid,
}

/// An act the replay skipped, with the reasons.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedAct {
    /// The skipped act.
    pub act_id: ActId,
    /// Its timestamp.
    pub timestamp: Timestamp,
    /// Every precondition that failed.
    pub result: ValidationResult,
}

/// The full outcome of replaying the timeline.
#[derive(Clone, Debug)]
pub struct Replay {
    /// The state after the last reached act.
    pub state: WorldState,
    /// Acts applied, in replay order.
    pub applied: Vec<ActId>,
    /// Acts skipped, in replay order.
    pub skipped: Vec<SkippedAct>,
    /// One transition per applied act that changed something.
    pub transitions: Vec<StateTransition>,
}

impl Replay {
    fn start(initial: &WorldState) -> Self {
        Self {
            state: initial.clone(),
            applied: Vec::new(),
            skipped: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// What happened to `act` in this replay.
    #[must_use]
    pub fn outcome(&self, act: &ActId) -> ActOutcome {
        if self.applied.contains(act) {
            ActOutcome::Applied
        } else if self.skipped.iter().any(|s| &s.act_id == act) {
            ActOutcome::SkippedInvalid
        } else {
            ActOutcome::NotYetReached
        }
    }
}

/// How a timeline conflict was detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConflictKind {
    /// An act's preconditions did not hold at its point on the timeline.
    PreconditionViolated,
}

impl ConflictKind {
    /// Stable string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PreconditionViolated => "precondition_violated",
        }
    }
}

impl std::fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A conflict found by [`CausalityEngine::validate_timeline`].
///
/// Only self-conflicts are detected: `act_id_1` and `act_id_2` name the
/// same act.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConflictInfo {
    /// The conflicting act.
    pub act_id_1: ActId,
    /// The act it conflicts with.
    pub act_id_2: ActId,
    /// How the conflict was found.
    pub kind: ConflictKind,
    /// Every failed precondition, joined.
    pub description: String,
    /// When the conflicting act happens.
    pub timestamp: Timestamp,
    /// The individual failures.
    pub errors: Vec<ValidationError>,
}

/// A corrective edit proposed by a failed precondition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuggestionInfo {
    /// The act the suggestion is for.
    pub act_id: ActId,
    /// The failure that produced it.
    pub code: ErrorCode,
    /// What to do.
    pub suggestion: String,
}

/// Result of [`CausalityEngine::validate_timeline`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimelineValidation {
    /// True when there are no conflicts.
    pub valid: bool,
    /// One entry per act whose preconditions failed.
    pub conflicts: Vec<ConflictInfo>,
    /// Every suggestion carried by those failures.
    pub suggestions: Vec<SuggestionInfo>,
}

/// Result of [`CausalityEngine::trace_causality`].
#[derive(Clone, Debug, Default)]
pub struct CausalTrace {
    /// Acts whose effect touched the traced fact, in timeline order.
    pub causing_acts: Vec<Act>,
    /// Stored links touching any causing act.
    pub links: Vec<CausalLink>,
    /// The earliest causing act.
    pub root_cause: Option<Act>,
}

// =============================================================================
// Causality Engine
// =============================================================================

#[derive(Clone, Debug)]
struct StoredAct {
    seq: u64,
    act: Act,
}

/// Stores acts and derives world state, conflicts, and causes from them.
#[derive(Clone, Debug)]
pub struct CausalityEngine {
    config: EngineConfig,
    initial_state: WorldState,
    acts: LtMap<ActId, StoredAct>,
    links: LtMap<LinkId, CausalLink>,
    history: TransitionLog,
    next_seq: u64,
}

impl CausalityEngine {
    /// Creates an empty engine whose timeline starts from `initial_state`.
    #[must_use]
    pub fn new(initial_state: WorldState) -> Self {
        Self::with_config(initial_state, EngineConfig::default())
    }

    /// Creates an empty engine with explicit configuration.
    #[must_use]
    pub fn with_config(initial_state: WorldState, config: EngineConfig) -> Self {
        Self {
            config,
            initial_state,
            acts: LtMap::new(),
            links: LtMap::new(),
            history: TransitionLog::new(),
            next_seq: 0,
        }
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The default starting state.
    #[must_use]
    pub fn initial_state(&self) -> &WorldState {
        &self.initial_state
    }

    // -------------------------------------------------------------------------
    // Acts
    // -------------------------------------------------------------------------

    /// Validates `act` against the state just before its timestamp and
    /// stores it if valid.
    ///
    /// Acts at the same timestamp do not count as "before". The act is
    /// stored only when the returned result is valid.
    pub fn add_act(&mut self, act: Act) -> ValidationResult {
        if self.acts.contains_key(act.id()) {
            debug!(act = %act.id(), "rejected duplicate act id");
            return ValidationResult::fail(ValidationError::new(
                ErrorCode::DuplicateActId,
                format!("an act with id {} is already stored", act.id()),
                vec![act.person_id().clone()],
            ));
        }

        let timestamp = act.timestamp();
        let before = self.replay_where(&self.initial_state, |a| a.timestamp() < timestamp);
        let result = act.check_preconditions(&before.state);
        if !result.valid {
            debug!(act = %act.id(), timestamp, codes = ?result.codes(), "rejected act");
            return result;
        }

        let inferred = self.infer_causal_links(&act);
        self.store(act);
        for link in inferred {
            if let Err(err) = self.add_link(link) {
                warn!(error = %err, "dropped inferred causal link");
            }
        }
        result
    }

    /// Proposes causal links between `act` and the stored timeline.
    ///
    /// Link inference is not implemented: this always returns no links.
    /// Links come only from [`CausalityEngine::add_link`].
    #[must_use]
    pub fn infer_causal_links(&self, _act: &Act) -> Vec<CausalLink> {
        Vec::new()
    }

    /// Stores `act` without validating it, replacing any act with the same
    /// id. Returns the replaced act.
    ///
    /// Only for tests that need an invalid timeline.
    #[cfg(feature = "test-support")]
    pub fn insert_unchecked(&mut self, act: Act) -> Option<Act> {
        let previous = self.acts.get(act.id()).map(|stored| stored.act.clone());
        self.store(act);
        previous
    }

    fn store(&mut self, act: Act) {
        debug!(act = %act.id(), timestamp = act.timestamp(), kind = %act.act_type(), "act stored");
        let stored = StoredAct {
            seq: self.next_seq,
            act,
        };
        self.next_seq += 1;
        self.acts = self.acts.insert(stored.act.id().clone(), stored);
    }

    /// Removes an act along with its links and history.
    ///
    /// Fails with `ACT_NOT_FOUND` if the act is not stored, and with
    /// `HAS_DEPENDENCIES` while an `ENABLES` link starts from it.
    pub fn remove_act(&mut self, id: &ActId) -> ValidationResult {
        let Some(stored) = self.acts.get(id) else {
            return ValidationResult::fail(ValidationError::new(
                ErrorCode::ActNotFound,
                format!("no act with id {id}"),
                Vec::new(),
            ));
        };

        let dependents: Vec<_> = self
            .links_from(id)
            .into_iter()
            .filter(|link| link.link_type == LinkType::Enables)
            .map(|link| link.to_act_id.as_str())
            .collect();
        if !dependents.is_empty() {
            return ValidationResult::fail(
                ValidationError::new(
                    ErrorCode::HasDependencies,
                    format!("{id} enables {}", dependents.join(", ")),
                    vec![stored.act.person_id().clone()],
                )
                .with_suggestion(format!("Remove the acts {id} enables first")),
            );
        }

        self.acts = self.acts.remove(id);
        let touching: Vec<_> = self
            .links
            .values()
            .filter(|link| link.touches(id))
            .map(|link| link.id.clone())
            .collect();
        for link in &touching {
            self.links = self.links.remove(link);
        }
        self.history.forget(id);
        debug!(act = %id, links = touching.len(), "act removed");
        ValidationResult::ok()
    }

    /// Looks up a stored act.
    #[must_use]
    pub fn get_act(&self, id: &ActId) -> Option<&Act> {
        self.acts.get(id).map(|stored| &stored.act)
    }

    /// Every stored act in timeline order.
    #[must_use]
    pub fn acts(&self) -> Vec<&Act> {
        self.timeline().into_iter().map(|stored| &stored.act).collect()
    }

    /// Number of stored acts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.acts.len()
    }

    /// Returns true if no acts are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.acts.is_empty()
    }

    fn timeline(&self) -> Vec<&StoredAct> {
        let mut ordered: Vec<_> = self.acts.values().collect();
        ordered.sort_by_key(|stored| (stored.act.timestamp(), stored.seq));
        ordered
    }

    // -------------------------------------------------------------------------
    // Replay
    // -------------------------------------------------------------------------

    fn replay_where(&self, initial: &WorldState, include: impl Fn(&Act) -> bool) -> Replay {
        let mut replay = Replay::start(initial);
        for act in self.timeline().into_iter().map(|stored| &stored.act) {
            if !include(act) {
                continue;
            }

            let result = act.check_preconditions(&replay.state);
            if !result.valid {
                warn!(
                    act = %act.id(),
                    timestamp = act.timestamp(),
                    codes = ?result.codes(),
                    "skipping invalid act during replay"
                );
                replay.skipped.push(SkippedAct {
                    act_id: act.id().clone(),
                    timestamp: act.timestamp(),
                    result,
                });
                continue;
            }

            let next = act.apply_postconditions(&replay.state);
            let changes = diff_states(&replay.state, &next);
            if !changes.is_empty() {
                replay.transitions.push(StateTransition::new(
                    replay.state.clone(),
                    next.clone(),
                    act.id().clone(),
                    act.timestamp(),
                    changes,
                ));
            }
            replay.applied.push(act.id().clone());
            replay.state = next;
        }
        replay
    }

    /// Replays every act at or before `timestamp` from `initial`, without
    /// touching history.
    ///
    /// The returned state is stamped with `timestamp`.
    #[must_use]
    pub fn replay(&self, timestamp: Timestamp, initial: &WorldState) -> Replay {
        let mut replay = self.replay_where(initial, |act| act.timestamp() <= timestamp);
        replay.state = replay.state.at_timestamp(timestamp);
        replay
    }

    /// The world at `timestamp`, starting from the engine's initial state.
    pub fn state_at(&mut self, timestamp: Timestamp) -> WorldState {
        let initial = self.initial_state.clone();
        self.state_at_from(timestamp, &initial)
    }

    /// The world at `timestamp`, starting from `initial`.
    ///
    /// Records one transition per applied act that changed something.
    /// Calling this again refreshes those entries rather than adding more.
    pub fn state_at_from(&mut self, timestamp: Timestamp, initial: &WorldState) -> WorldState {
        let replay = self.replay(timestamp, initial);
        self.record(&replay);
        replay.state
    }

    fn record(&mut self, replay: &Replay) {
        if !self.config.record_history {
            return;
        }
        let reached = replay
            .applied
            .iter()
            .chain(replay.skipped.iter().map(|s| &s.act_id));
        for act in reached {
            self.history.forget(act);
        }
        for transition in &replay.transitions {
            self.history.record(transition.clone());
        }
    }

    /// Recorded transitions.
    #[must_use]
    pub fn history(&self) -> &TransitionLog {
        &self.history
    }

    /// Drops all recorded transitions.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// Checks the whole timeline from the engine's initial state.
    #[must_use]
    pub fn validate_timeline(&self) -> TimelineValidation {
        self.validate_timeline_from(&self.initial_state)
    }

    /// Checks the whole timeline from `initial` in one forward pass.
    ///
    /// Every act whose preconditions fail becomes one conflict, and the
    /// replay continues past it.
    #[must_use]
    pub fn validate_timeline_from(&self, initial: &WorldState) -> TimelineValidation {
        let replay = self.replay_where(initial, |_| true);

        let mut conflicts = Vec::with_capacity(replay.skipped.len());
        let mut suggestions = Vec::new();
        for skipped in replay.skipped {
            suggestions.extend(skipped.result.errors.iter().filter_map(|error| {
                error.suggestion.as_ref().map(|suggestion| SuggestionInfo {
                    act_id: skipped.act_id.clone(),
                    code: error.code,
                    suggestion: suggestion.clone(),
                })
            }));
            conflicts.push(ConflictInfo {
                act_id_1: skipped.act_id.clone(),
                act_id_2: skipped.act_id,
                kind: ConflictKind::PreconditionViolated,
                description: skipped.result.summary(),
                timestamp: skipped.timestamp,
                errors: skipped.result.errors,
            });
        }

        TimelineValidation {
            valid: conflicts.is_empty(),
            conflicts,
            suggestions,
        }
    }

    /// Finds the acts whose effects changed `(entity, kind)` up to
    /// `timestamp`.
    ///
    /// Replays first so the trace reflects the current set of acts.
    pub fn trace_causality(
        &mut self,
        entity: &EntityId,
        kind: ChangeKind,
        timestamp: Timestamp,
        initial: &WorldState,
    ) -> CausalTrace {
        let replay = self.replay(timestamp, initial);
        self.record(&replay);

        let causing_acts: Vec<Act> = replay
            .transitions
            .iter()
            .filter(|t| t.timestamp() <= timestamp && t.touches(entity, kind))
            .filter_map(|t| self.get_act(t.act_id()).cloned())
            .collect();

        let links = self
            .links
            .values()
            .filter(|link| causing_acts.iter().any(|act| link.touches(act.id())))
            .cloned()
            .collect();

        CausalTrace {
            root_cause: causing_acts.first().cloned(),
            causing_acts,
            links,
        }
    }

    // -------------------------------------------------------------------------
    // Causal Links
    // -------------------------------------------------------------------------

    /// Stores a link between two stored acts.
    ///
    /// # Errors
    ///
    /// Returns `ActNotFound` if either end is not stored and
    /// `DuplicateLink` if the link id is taken.
    pub fn add_link(&mut self, link: CausalLink) -> Result<()> {
        for end in [&link.from_act_id, &link.to_act_id] {
            if !self.acts.contains_key(end) {
                return Err(Error::act_not_found(end.clone()));
            }
        }
        if self.links.contains_key(&link.id) {
            return Err(Error::duplicate_link(link.id));
        }
        debug!(link = %link.id, from = %link.from_act_id, to = %link.to_act_id, kind = %link.link_type, "causal link added");
        self.links = self.links.insert(link.id.clone(), link);
        Ok(())
    }

    /// Removes a link and returns it.
    ///
    /// # Errors
    ///
    /// Returns `LinkNotFound` if no link has this id.
    pub fn remove_link(&mut self, id: &LinkId) -> Result<CausalLink> {
        let link = self
            .links
            .get(id)
            .cloned()
            .ok_or_else(|| Error::link_not_found(id.clone()))?;
        self.links = self.links.remove(id);
        debug!(link = %id, "causal link removed");
        Ok(link)
    }

    /// Links starting at `act`.
    #[must_use]
    pub fn links_from(&self, act: &ActId) -> Vec<&CausalLink> {
        self.links
            .values()
            .filter(|link| &link.from_act_id == act)
            .collect()
    }

    /// Links ending at `act`.
    #[must_use]
    pub fn links_to(&self, act: &ActId) -> Vec<&CausalLink> {
        self.links
            .values()
            .filter(|link| &link.to_act_id == act)
            .collect()
    }

    /// Every stored link, ordered by id.
    pub fn links(&self) -> impl Iterator<Item = &CausalLink> {
        self.links.values()
    }
}

// =============================================================================
// Tests
// =============================================================================
