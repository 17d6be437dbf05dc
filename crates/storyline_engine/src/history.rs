//! State transition history.
//!
//! Every act the engine successfully applies during a replay leaves a
//! [`StateTransition`]: the snapshot before, the snapshot after, and the
//! fact-level changes between them. The log is the substrate for causal
//! tracing.
//!
//! The log keeps one transition per act. Replaying again replaces an act's
//! entry, so repeated queries refresh history instead of duplicating it.

use std::sync::Arc;

use storyline_foundation::{ActId, EntityId, Timestamp};
use storyline_storage::{ChangeKind, StateChange, WorldState};

// =============================================================================
// State Transition
// =============================================================================

/// The effect of one applied act.
#[derive(Clone, Debug)]
pub struct StateTransition {
    /// Snapshot before the act (shared via Arc).
    from_state: Arc<WorldState>,
    /// Snapshot after the act (shared via Arc).
    to_state: Arc<WorldState>,
    /// The act that was applied.
    act_id: ActId,
    /// When it happened.
    timestamp: Timestamp,
    /// What changed, in (kind, entity) order.
    changes: Vec<StateChange>,
}

impl StateTransition {
    /// Creates a transition record.
    #[must_use]
    pub fn new(
        from_state: WorldState,
        to_state: WorldState,
        act_id: ActId,
        timestamp: Timestamp,
        changes: Vec<StateChange>,
    ) -> Self {
        Self {
            from_state: Arc::new(from_state),
            to_state: Arc::new(to_state),
            act_id,
            timestamp,
            changes,
        }
    }

    /// Snapshot before the act.
    #[must_use]
    pub fn from_state(&self) -> &WorldState {
        &self.from_state
    }

    /// Snapshot after the act.
    #[must_use]
    pub fn to_state(&self) -> &WorldState {
        &self.to_state
    }

    /// The applied act.
    #[must_use]
    pub fn act_id(&self) -> &ActId {
        &self.act_id
    }

    /// When it happened.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// What changed.
    #[must_use]
    pub fn changes(&self) -> &[StateChange] {
        &self.changes
    }

    /// Returns true if any change touched `(entity, kind)`.
    #[must_use]
    pub fn touches(&self, entity: &EntityId, kind: ChangeKind) -> bool {
        self.changes.iter().any(|c| c.matches(entity, kind))
    }
}

// =============================================================================
// Transition Log
// =============================================================================

/// Transitions recorded by an engine, in timeline order.
#[derive(Clone, Debug, Default)]
pub struct TransitionLog {
    transitions: Vec<StateTransition>,
}

impl TransitionLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded transitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Records a transition, replacing any earlier one for the same act.
    ///
    /// The log stays sorted by timestamp; an insert after entries with the
    /// same timestamp keeps replay order.
    pub fn record(&mut self, transition: StateTransition) {
        self.forget(&transition.act_id);
        let at = self
            .transitions
            .partition_point(|t| t.timestamp <= transition.timestamp);
        self.transitions.insert(at, transition);
    }

    /// Drops the transition recorded for `act`, if any.
    pub fn forget(&mut self, act: &ActId) -> bool {
        let before = self.transitions.len();
        self.transitions.retain(|t| &t.act_id != act);
        self.transitions.len() != before
    }

    /// The transition recorded for `act`.
    #[must_use]
    pub fn get(&self, act: &ActId) -> Option<&StateTransition> {
        self.transitions.iter().find(|t| &t.act_id == act)
    }

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &StateTransition> {
        self.transitions.iter()
    }

    /// Transitions with a timestamp at or before `timestamp`.
    pub fn up_to(&self, timestamp: Timestamp) -> impl Iterator<Item = &StateTransition> {
        self.transitions
            .iter()
            .take_while(move |t| t.timestamp <= timestamp)
    }

    /// Clears all transitions.
    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}
