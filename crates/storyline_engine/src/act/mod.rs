//! Acts: immutable, typed units of causation.
//!
//! Every act has the same contract:
//! - [`Act::check_preconditions`] enumerates *every* violated rule against a
//!   snapshot (never just the first one).
//! - [`Act::apply_postconditions`] returns a new snapshot with the act's
//!   effect applied. It does not re-validate: applying an act whose
//!   preconditions never held produces a state built on false assumptions.
//!   Callers check first.
//!
//! The seven kinds form a closed enum. Each kind's payload lives in its own
//! module next to its check and effect, and the shared predicates (existence,
//! ownership, co-location) live in [`checks`].

pub mod checks;
pub mod combine;
pub mod movement;
pub mod speech;
pub mod transfer;
pub mod use_item;

use std::collections::BTreeSet;
use std::fmt;

use storyline_foundation::{ActId, EntityId, Timestamp};
use storyline_storage::WorldState;

use crate::validation::{ValidationError, ValidationResult};

pub use combine::CombineItems;
pub use movement::Move;
pub use speech::Speak;
pub use transfer::{GiveItem, PlaceItem, TakeItem};
pub use use_item::{TargetType, UseItem};

// =============================================================================
// Act Type
// =============================================================================

/// Discriminant of an act kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActType {
    /// A person walks from one location to another.
    Move,
    /// A person hands an item to someone nearby.
    GiveItem,
    /// A person picks up an item from a location or from someone nearby.
    TakeItem,
    /// A person puts down an item where they stand.
    PlaceItem,
    /// A person tells nearby people something they know.
    Speak,
    /// A person uses an item, optionally on a target.
    UseItem,
    /// A person combines several carried items.
    CombineItems,
}

impl ActType {
    /// Stable string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Move => "MOVE",
            Self::GiveItem => "GIVE_ITEM",
            Self::TakeItem => "TAKE_ITEM",
            Self::PlaceItem => "PLACE_ITEM",
            Self::Speak => "SPEAK",
            Self::UseItem => "USE_ITEM",
            Self::CombineItems => "COMBINE_ITEMS",
        }
    }
}

impl fmt::Display for ActType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Act Kind
// =============================================================================

/// Kind-specific payload of an act.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActKind {
    /// See [`Move`].
    Move(Move),
    /// See [`GiveItem`].
    GiveItem(GiveItem),
    /// See [`TakeItem`].
    TakeItem(TakeItem),
    /// See [`PlaceItem`].
    PlaceItem(PlaceItem),
    /// See [`Speak`].
    Speak(Speak),
    /// See [`UseItem`].
    UseItem(UseItem),
    /// See [`CombineItems`].
    CombineItems(CombineItems),
}

impl ActKind {
    /// The discriminant.
    #[must_use]
    pub const fn act_type(&self) -> ActType {
        match self {
            Self::Move(_) => ActType::Move,
            Self::GiveItem(_) => ActType::GiveItem,
            Self::TakeItem(_) => ActType::TakeItem,
            Self::PlaceItem(_) => ActType::PlaceItem,
            Self::Speak(_) => ActType::Speak,
            Self::UseItem(_) => ActType::UseItem,
            Self::CombineItems(_) => ActType::CombineItems,
        }
    }

    fn check(&self, actor: &EntityId, state: &WorldState, errors: &mut Vec<ValidationError>) {
        match self {
            Self::Move(p) => p.check(actor, state, errors),
            Self::GiveItem(p) => p.check(actor, state, errors),
            Self::TakeItem(p) => p.check(actor, state, errors),
            Self::PlaceItem(p) => p.check(actor, state, errors),
            Self::Speak(p) => p.check(actor, state, errors),
            Self::UseItem(p) => p.check(actor, state, errors),
            Self::CombineItems(p) => p.check(actor, state, errors),
        }
    }

    fn apply(&self, actor: &EntityId, state: &WorldState) -> WorldState {
        match self {
            Self::Move(p) => p.apply(actor, state),
            Self::GiveItem(p) => p.apply(state),
            Self::TakeItem(p) => p.apply(actor, state),
            Self::PlaceItem(p) => p.apply(state),
            Self::Speak(p) => p.apply(state),
            Self::UseItem(p) => p.apply(state),
            Self::CombineItems(p) => p.apply(state),
        }
    }

    fn collect_entities(&self, out: &mut BTreeSet<EntityId>) {
        match self {
            Self::Move(p) => p.collect_entities(out),
            Self::GiveItem(p) => p.collect_entities(out),
            Self::TakeItem(p) => p.collect_entities(out),
            Self::PlaceItem(p) => p.collect_entities(out),
            Self::Speak(p) => p.collect_entities(out),
            Self::UseItem(p) => p.collect_entities(out),
            Self::CombineItems(p) => p.collect_entities(out),
        }
    }

    fn describe(&self, actor: &EntityId) -> String {
        match self {
            Self::Move(p) => p.describe(actor),
            Self::GiveItem(p) => p.describe(actor),
            Self::TakeItem(p) => p.describe(actor),
            Self::PlaceItem(p) => p.describe(actor),
            Self::Speak(p) => p.describe(actor),
            Self::UseItem(p) => p.describe(actor),
            Self::CombineItems(p) => p.describe(actor),
        }
    }
}

// =============================================================================
// Act
// =============================================================================

/// An immutable unit of causation on the timeline.
///
/// Identity is the `id`. Storage never implies order: timelines are always
/// ordered by `timestamp` at query time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Act {
    id: ActId,
    person_id: EntityId,
    timestamp: Timestamp,
    description: String,
    kind: ActKind,
}

impl Act {
    /// Creates an act with a generated description.
    #[must_use]
    pub fn new(
        id: impl Into<ActId>,
        person_id: impl Into<EntityId>,
        timestamp: Timestamp,
        kind: ActKind,
    ) -> Self {
        let person_id = person_id.into();
        let description = kind.describe(&person_id);
        Self {
            id: id.into(),
            person_id,
            timestamp,
            description,
            kind,
        }
    }

    /// Replaces the generated description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// `person` walks from `from` to `to`.
    #[must_use]
    pub fn movement(
        id: impl Into<ActId>,
        person: impl Into<EntityId>,
        timestamp: Timestamp,
        from: impl Into<EntityId>,
        to: impl Into<EntityId>,
    ) -> Self {
        Self::new(id, person, timestamp, ActKind::Move(Move::new(from, to)))
    }

    /// `person` hands `item` to `to_person`.
    #[must_use]
    pub fn give_item(
        id: impl Into<ActId>,
        person: impl Into<EntityId>,
        timestamp: Timestamp,
        item: impl Into<EntityId>,
        to_person: impl Into<EntityId>,
    ) -> Self {
        Self::new(
            id,
            person,
            timestamp,
            ActKind::GiveItem(GiveItem::new(item, to_person)),
        )
    }

    /// `person` picks `item` up from `location`.
    #[must_use]
    pub fn take_from_location(
        id: impl Into<ActId>,
        person: impl Into<EntityId>,
        timestamp: Timestamp,
        item: impl Into<EntityId>,
        location: impl Into<EntityId>,
    ) -> Self {
        Self::new(
            id,
            person,
            timestamp,
            ActKind::TakeItem(TakeItem::from_location(item, location)),
        )
    }

    /// `person` takes `item` from `from_person`.
    #[must_use]
    pub fn take_from_person(
        id: impl Into<ActId>,
        person: impl Into<EntityId>,
        timestamp: Timestamp,
        item: impl Into<EntityId>,
        from_person: impl Into<EntityId>,
    ) -> Self {
        Self::new(
            id,
            person,
            timestamp,
            ActKind::TakeItem(TakeItem::from_person(item, from_person)),
        )
    }

    /// `person` puts `item` down at `location`.
    #[must_use]
    pub fn place_item(
        id: impl Into<ActId>,
        person: impl Into<EntityId>,
        timestamp: Timestamp,
        item: impl Into<EntityId>,
        location: impl Into<EntityId>,
    ) -> Self {
        Self::new(
            id,
            person,
            timestamp,
            ActKind::PlaceItem(PlaceItem::new(item, location)),
        )
    }

    /// `person` tells `info` to everyone in `to_persons`.
    #[must_use]
    pub fn speak<I, P>(
        id: impl Into<ActId>,
        person: impl Into<EntityId>,
        timestamp: Timestamp,
        to_persons: I,
        info: impl Into<EntityId>,
    ) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<EntityId>,
    {
        Self::new(
            id,
            person,
            timestamp,
            ActKind::Speak(Speak::new(to_persons, info)),
        )
    }

    /// `person` uses `item` without a target.
    #[must_use]
    pub fn use_item(
        id: impl Into<ActId>,
        person: impl Into<EntityId>,
        timestamp: Timestamp,
        item: impl Into<EntityId>,
    ) -> Self {
        Self::new(id, person, timestamp, ActKind::UseItem(UseItem::new(item)))
    }

    /// `person` uses `item` on `target`.
    #[must_use]
    pub fn use_item_on(
        id: impl Into<ActId>,
        person: impl Into<EntityId>,
        timestamp: Timestamp,
        item: impl Into<EntityId>,
        target: impl Into<EntityId>,
        target_type: Option<TargetType>,
    ) -> Self {
        Self::new(
            id,
            person,
            timestamp,
            ActKind::UseItem(UseItem::new(item).with_target(target, target_type)),
        )
    }

    /// `person` combines `items`, optionally naming the item they make.
    #[must_use]
    pub fn combine_items<I, P>(
        id: impl Into<ActId>,
        person: impl Into<EntityId>,
        timestamp: Timestamp,
        items: I,
        result_item: Option<EntityId>,
    ) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<EntityId>,
    {
        Self::new(
            id,
            person,
            timestamp,
            ActKind::CombineItems(CombineItems::new(items, result_item)),
        )
    }

    /// The act's identity.
    #[must_use]
    pub fn id(&self) -> &ActId {
        &self.id
    }

    /// The kind discriminant.
    #[must_use]
    pub const fn act_type(&self) -> ActType {
        self.kind.act_type()
    }

    /// The acting person.
    #[must_use]
    pub fn person_id(&self) -> &EntityId {
        &self.person_id
    }

    /// When the act happens.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The kind-specific payload.
    #[must_use]
    pub fn kind(&self) -> &ActKind {
        &self.kind
    }

    /// Checks every precondition against `state` and reports all violations.
    #[must_use]
    pub fn check_preconditions(&self, state: &WorldState) -> ValidationResult {
        let mut errors = Vec::new();
        self.kind.check(&self.person_id, state, &mut errors);
        ValidationResult::from_errors(errors)
    }

    /// Applies the act's effect to a copy of `state`, stamped with this act's
    /// timestamp. `state` itself is never modified.
    ///
    /// Does not re-check preconditions.
    #[must_use]
    pub fn apply_postconditions(&self, state: &WorldState) -> WorldState {
        self.kind
            .apply(&self.person_id, state)
            .at_timestamp(self.timestamp)
    }

    /// The actor plus every entity named in the payload.
    #[must_use]
    pub fn affected_entities(&self) -> BTreeSet<EntityId> {
        let mut out = BTreeSet::new();
        out.insert(self.person_id.clone());
        self.kind.collect_entities(&mut out);
        out
    }
}

impl fmt::Display for Act {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[t={}] {} {}: {}",
            self.timestamp,
            self.id,
            self.act_type(),
            self.description
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
