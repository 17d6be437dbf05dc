//! World state snapshots.
//!
//! A [`WorldState`] is a value: every producer method returns a new snapshot
//! and leaves the receiver untouched. The four fact maps are persistent
//! (`im`-backed), so a new snapshot shares everything it did not change.
//!
//! Item placement is exclusive: an item is either owned by a person or lying
//! at a location, never both. [`WorldState::set_owner`] and
//! [`WorldState::set_item_location`] each clear the other map's entry.

use storyline_foundation::{EntityId, LtMap, LtVec, Timestamp};

/// Snapshot of every mutable story fact at one timestamp.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    timestamp: Timestamp,
    /// person -> location
    person_positions: LtMap<EntityId, EntityId>,
    /// item -> owning person
    item_ownership: LtMap<EntityId, EntityId>,
    /// item -> location, for items nobody carries
    item_locations: LtMap<EntityId, EntityId>,
    /// person -> information ids, without duplicates
    knowledge: LtMap<EntityId, LtVec<EntityId>>,
}

impl WorldState {
    /// Creates an empty world at the given timestamp.
    #[must_use]
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            ..Self::default()
        }
    }

    // -------------------------------------------------------------------------
    // Readers
    // -------------------------------------------------------------------------

    /// Returns the timestamp this snapshot describes.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Returns the person -> location map.
    #[must_use]
    pub fn person_positions(&self) -> &LtMap<EntityId, EntityId> {
        &self.person_positions
    }

    /// Returns the item -> owner map.
    #[must_use]
    pub fn item_ownership(&self) -> &LtMap<EntityId, EntityId> {
        &self.item_ownership
    }

    /// Returns the item -> location map.
    #[must_use]
    pub fn item_locations(&self) -> &LtMap<EntityId, EntityId> {
        &self.item_locations
    }

    /// Returns the person -> known information map.
    #[must_use]
    pub fn knowledge(&self) -> &LtMap<EntityId, LtVec<EntityId>> {
        &self.knowledge
    }

    /// Where a person currently is, if known.
    #[must_use]
    pub fn position_of(&self, person: &EntityId) -> Option<&EntityId> {
        self.person_positions.get(person)
    }

    /// Who owns an item, if anyone.
    #[must_use]
    pub fn owner_of(&self, item: &EntityId) -> Option<&EntityId> {
        self.item_ownership.get(item)
    }

    /// Where an uncarried item lies, if anywhere.
    #[must_use]
    pub fn item_location(&self, item: &EntityId) -> Option<&EntityId> {
        self.item_locations.get(item)
    }

    /// Information known by a person, in the order it was learned.
    #[must_use]
    pub fn knowledge_of(&self, person: &EntityId) -> Option<&LtVec<EntityId>> {
        self.knowledge.get(person)
    }

    /// Returns true if the person knows the piece of information.
    #[must_use]
    pub fn knows(&self, person: &EntityId, info: &EntityId) -> bool {
        self.knowledge
            .get(person)
            .is_some_and(|known| known.contains(info))
    }

    /// Returns true if `owner` currently owns `item`.
    #[must_use]
    pub fn owns(&self, owner: &EntityId, item: &EntityId) -> bool {
        self.item_ownership.get(item) == Some(owner)
    }

    /// A person exists if the world records a position or knowledge for them.
    #[must_use]
    pub fn has_person(&self, person: &EntityId) -> bool {
        self.person_positions.contains_key(person) || self.knowledge.contains_key(person)
    }

    /// An item exists if it is owned or placed somewhere.
    #[must_use]
    pub fn has_item(&self, item: &EntityId) -> bool {
        self.item_ownership.contains_key(item) || self.item_locations.contains_key(item)
    }

    /// A location exists if any person or item is recorded there.
    #[must_use]
    pub fn has_location(&self, location: &EntityId) -> bool {
        self.person_positions.values().any(|l| l == location)
            || self.item_locations.values().any(|l| l == location)
    }

    /// Returns true if both persons have a known position and it is the same.
    #[must_use]
    pub fn co_located(&self, a: &EntityId, b: &EntityId) -> bool {
        match (self.position_of(a), self.position_of(b)) {
            (Some(la), Some(lb)) => la == lb,
            _ => false,
        }
    }

    /// Iterates over every person with a known position or knowledge.
    pub fn persons(&self) -> impl Iterator<Item = &EntityId> {
        let knowing_only = self
            .knowledge
            .keys()
            .filter(|p| !self.person_positions.contains_key(p));
        self.person_positions.keys().chain(knowing_only)
    }

    /// Iterates over every item that is owned or placed.
    pub fn items(&self) -> impl Iterator<Item = &EntityId> {
        self.item_ownership.keys().chain(self.item_locations.keys())
    }

    /// Persons standing at a location.
    pub fn persons_at<'a>(&'a self, location: &'a EntityId) -> impl Iterator<Item = &'a EntityId> {
        self.person_positions
            .iter()
            .filter(move |(_, l)| *l == location)
            .map(|(p, _)| p)
    }

    // -------------------------------------------------------------------------
    // Producers
    // -------------------------------------------------------------------------

    /// Returns a copy stamped with a new timestamp.
    #[must_use]
    pub fn at_timestamp(&self, timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            ..self.clone()
        }
    }

    /// Returns a copy with the person at `location`.
    #[must_use]
    pub fn set_position(&self, person: EntityId, location: EntityId) -> Self {
        Self {
            person_positions: self.person_positions.insert(person, location),
            ..self.clone()
        }
    }

    /// Returns a copy in which the person has no known position.
    #[must_use]
    pub fn clear_position(&self, person: &EntityId) -> Self {
        Self {
            person_positions: self.person_positions.remove(person),
            ..self.clone()
        }
    }

    /// Returns a copy with `item` owned by `owner`, no longer lying anywhere.
    #[must_use]
    pub fn set_owner(&self, item: EntityId, owner: EntityId) -> Self {
        Self {
            item_locations: self.item_locations.remove(&item),
            item_ownership: self.item_ownership.insert(item, owner),
            ..self.clone()
        }
    }

    /// Returns a copy with `item` lying at `location`, owned by nobody.
    #[must_use]
    pub fn set_item_location(&self, item: EntityId, location: EntityId) -> Self {
        Self {
            item_ownership: self.item_ownership.remove(&item),
            item_locations: self.item_locations.insert(item, location),
            ..self.clone()
        }
    }

    /// Returns a copy with the item gone from both ownership and locations.
    #[must_use]
    pub fn remove_item(&self, item: &EntityId) -> Self {
        Self {
            item_ownership: self.item_ownership.remove(item),
            item_locations: self.item_locations.remove(item),
            ..self.clone()
        }
    }

    /// Returns a copy in which `person` knows `info`.
    ///
    /// Knowing something twice is the same as knowing it once.
    #[must_use]
    pub fn add_knowledge(&self, person: EntityId, info: EntityId) -> Self {
        let known = self
            .knowledge
            .get(&person)
            .cloned()
            .unwrap_or_default()
            .push_unique(info);
        Self {
            knowledge: self.knowledge.insert(person, known),
            ..self.clone()
        }
    }
}
