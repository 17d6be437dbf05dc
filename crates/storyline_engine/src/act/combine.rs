//! Combining carried items.

use std::collections::BTreeSet;

use storyline_foundation::EntityId;
use storyline_storage::WorldState;

use super::checks::{require_owns, require_person};
use crate::validation::{ErrorCode, ValidationError};

/// The actor combines two or more carried items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombineItems {
    /// The ingredients, consumed by the act.
    pub item_ids: Vec<EntityId>,
    /// The item the combination is meant to produce.
    pub result_item_id: Option<EntityId>,
}

impl CombineItems {
    /// Creates a combine payload.
    #[must_use]
    pub fn new<I, P>(item_ids: I, result_item_id: Option<EntityId>) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<EntityId>,
    {
        Self {
            item_ids: item_ids.into_iter().map(Into::into).collect(),
            result_item_id,
        }
    }

    /// Ingredient ids without repeats, in first-seen order.
    fn distinct_items(&self) -> Vec<&EntityId> {
        let mut seen = BTreeSet::new();
        self.item_ids
            .iter()
            .filter(|item| seen.insert(*item))
            .collect()
    }

    pub(super) fn check(
        &self,
        actor: &EntityId,
        state: &WorldState,
        errors: &mut Vec<ValidationError>,
    ) {
        require_person(state, actor, errors);

        let distinct = self.distinct_items();
        if distinct.len() < 2 {
            errors.push(ValidationError::new(
                ErrorCode::InsufficientItems,
                format!(
                    "combining needs at least two different items, got {}",
                    distinct.len()
                ),
                distinct.iter().map(|item| (*item).clone()).collect(),
            ));
        }

        if distinct.len() != self.item_ids.len() {
            let mut seen = BTreeSet::new();
            let repeated: BTreeSet<_> = self
                .item_ids
                .iter()
                .filter(|item| !seen.insert(*item))
                .cloned()
                .collect();
            let names: Vec<_> = repeated.iter().map(EntityId::as_str).collect();
            errors.push(ValidationError::new(
                ErrorCode::DuplicateItems,
                format!("items listed more than once: {}", names.join(", ")),
                repeated.into_iter().collect(),
            ));
        }

        for item in distinct {
            require_owns(state, actor, item, errors);
        }
    }

    /// Consumes every ingredient. The result item is not granted yet, so a
    /// combination currently only destroys its inputs.
    pub(super) fn apply(&self, state: &WorldState) -> WorldState {
        self.item_ids
            .iter()
            .fold(state.clone(), |world, item| world.remove_item(item))
    }

    pub(super) fn collect_entities(&self, out: &mut BTreeSet<EntityId>) {
        out.extend(self.item_ids.iter().cloned());
        out.extend(self.result_item_id.iter().cloned());
    }

    pub(super) fn describe(&self, actor: &EntityId) -> String {
        let items: Vec<_> = self.item_ids.iter().map(EntityId::as_str).collect();
        match &self.result_item_id {
            Some(result) => format!("{actor} combines {} into {result}", items.join(" + ")),
            None => format!("{actor} combines {}", items.join(" + ")),
        }
    }
}
