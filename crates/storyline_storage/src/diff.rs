//! World state diff functionality.
//!
//! Compares two snapshots fact by fact. The engine records these changes
//! for every act it applies, and causal tracing searches them.

use std::collections::BTreeSet;
use std::fmt;

use storyline_foundation::{EntityId, LtMap, LtVec};

use crate::state::WorldState;

// =============================================================================
// Change Types
// =============================================================================

/// Which fact map a change touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChangeKind {
    /// A person's location.
    Position,
    /// An item's owner.
    Ownership,
    /// Where an uncarried item lies.
    ItemLocation,
    /// What a person knows.
    Knowledge,
}

impl ChangeKind {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Ownership => "ownership",
            Self::ItemLocation => "item_location",
            Self::Knowledge => "knowledge",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value on either side of a change.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChangeValue {
    /// A single entity (a location or an owner).
    Entity(EntityId),
    /// A list of entities (known information).
    Entities(Vec<EntityId>),
}

impl fmt::Display for ChangeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity(id) => write!(f, "{id}"),
            Self::Entities(ids) => {
                let names: Vec<_> = ids.iter().map(EntityId::as_str).collect();
                write!(f, "[{}]", names.join(", "))
            }
        }
    }
}

/// One fact that differs between two snapshots.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateChange {
    /// Which fact map changed.
    pub kind: ChangeKind,
    /// The key in that map (a person or an item).
    pub entity_id: EntityId,
    /// The value before (None if newly added).
    pub old_value: Option<ChangeValue>,
    /// The value after (None if removed).
    pub new_value: Option<ChangeValue>,
}

impl StateChange {
    /// Creates a new change.
    #[must_use]
    pub fn new(
        kind: ChangeKind,
        entity_id: EntityId,
        old_value: Option<ChangeValue>,
        new_value: Option<ChangeValue>,
    ) -> Self {
        Self {
            kind,
            entity_id,
            old_value,
            new_value,
        }
    }

    /// Returns true if the fact did not exist before.
    #[must_use]
    pub fn is_added(&self) -> bool {
        self.old_value.is_none() && self.new_value.is_some()
    }

    /// Returns true if the fact no longer exists.
    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.old_value.is_some() && self.new_value.is_none()
    }

    /// Returns true if the fact matches the given key and kind.
    #[must_use]
    pub fn matches(&self, entity_id: &EntityId, kind: ChangeKind) -> bool {
        self.kind == kind && &self.entity_id == entity_id
    }
}

impl fmt::Display for StateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |v: &Option<ChangeValue>| {
            v.as_ref()
                .map_or_else(|| "(none)".to_string(), ToString::to_string)
        };
        write!(
            f,
            "{} {}: {} -> {}",
            self.kind,
            self.entity_id,
            show(&self.old_value),
            show(&self.new_value)
        )
    }
}

// =============================================================================
// Diff Functions
// =============================================================================

/// Computes every fact that differs between two snapshots.
///
/// Changes are ordered by kind, then by entity id. Timestamps are not facts
/// and never produce a change.
#[must_use]
pub fn diff_states(before: &WorldState, after: &WorldState) -> Vec<StateChange> {
    let mut changes = Vec::new();
    diff_entity_map(
        ChangeKind::Position,
        before.person_positions(),
        after.person_positions(),
        &mut changes,
    );
    diff_entity_map(
        ChangeKind::Ownership,
        before.item_ownership(),
        after.item_ownership(),
        &mut changes,
    );
    diff_entity_map(
        ChangeKind::ItemLocation,
        before.item_locations(),
        after.item_locations(),
        &mut changes,
    );
    diff_knowledge(before.knowledge(), after.knowledge(), &mut changes);
    changes
}

fn diff_entity_map(
    kind: ChangeKind,
    before: &LtMap<EntityId, EntityId>,
    after: &LtMap<EntityId, EntityId>,
    out: &mut Vec<StateChange>,
) {
    if before == after {
        return;
    }
    let keys: BTreeSet<_> = before.keys().chain(after.keys()).collect();
    for key in keys {
        let old = before.get(key);
        let new = after.get(key);
        if old != new {
            out.push(StateChange::new(
                kind,
                key.clone(),
                old.cloned().map(ChangeValue::Entity),
                new.cloned().map(ChangeValue::Entity),
            ));
        }
    }
}

fn diff_knowledge(
    before: &LtMap<EntityId, LtVec<EntityId>>,
    after: &LtMap<EntityId, LtVec<EntityId>>,
    out: &mut Vec<StateChange>,
) {
    if before == after {
        return;
    }
    let as_value = |known: &LtVec<EntityId>| ChangeValue::Entities(known.iter().cloned().collect());
    let keys: BTreeSet<_> = before.keys().chain(after.keys()).collect();
    for key in keys {
        let old = before.get(key);
        let new = after.get(key);
        if old != new {
            out.push(StateChange::new(
                ChangeKind::Knowledge,
                key.clone(),
                old.map(as_value),
                new.map(as_value),
            ));
        }
    }
}

/// Formats a list of changes as human-readable text, one per line.
#[must_use]
pub fn format_changes(changes: &[StateChange]) -> String {
    if changes.is_empty() {
        return "No changes".to_string();
    }
    let lines: Vec<_> = changes.iter().map(ToString::to_string).collect();
    lines.join("\n")
}

// =============================================================================
// Tests
// =============================================================================
