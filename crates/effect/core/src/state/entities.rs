use std::collections::BTreeMap;

use crate::env::{Affectable, CasterSkills, EntityStore};

use super::types::{EntityId, Mobile};

/// In-memory entity table backing the reference [`EntityStore`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitiesState {
    mobiles: BTreeMap<EntityId, Mobile>,
}

impl EntitiesState {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Inserts or replaces a mobile, keyed by its id.
    pub fn insert(&mut self, mobile: Mobile) -> Option<Mobile> {
        self.mobiles.insert(mobile.id, mobile)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Mobile> {
        self.mobiles.remove(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Mobile> {
        self.mobiles.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Mobile> {
        self.mobiles.get_mut(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mobile> {
        self.mobiles.values()
    }

    pub fn len(&self) -> usize {
        self.mobiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mobiles.is_empty()
    }
}

impl FromIterator<Mobile> for EntitiesState {
    fn from_iter<I: IntoIterator<Item = Mobile>>(iter: I) -> Self {
        Self {
            mobiles: iter.into_iter().map(|m| (m.id, m)).collect(),
        }
    }
}

impl EntityStore for EntitiesState {
    fn caster_skills(&self, id: EntityId) -> Option<CasterSkills> {
        self.get(id).map(Mobile::caster_skills)
    }

    fn affectable(&mut self, id: EntityId) -> Option<&mut dyn Affectable> {
        self.get_mut(id).map(|m| m as &mut dyn Affectable)
    }
}
