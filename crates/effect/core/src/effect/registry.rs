//! Authoritative "who is affected" index.

use std::collections::BTreeMap;

use crate::state::EntityId;

use super::{EffectInstance, InstanceId};

/// Live instances keyed by id, plus the single active instance per target.
///
/// Every method keeps the two maps consistent: a target maps to an id only
/// while that id's instance is stored.
#[derive(Clone, Debug, Default)]
pub struct EffectRegistry {
    instances: BTreeMap<InstanceId, EffectInstance>,
    by_target: BTreeMap<EntityId, InstanceId>,
    next_id: u64,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn allocate_id(&mut self) -> InstanceId {
        self.next_id += 1;
        InstanceId(self.next_id)
    }

    /// Stores `instance` as the active one for its target.
    ///
    /// Returns the id it displaced, if any. The engine expires the previous
    /// instance before inserting, so a displaced id signals a caller bug.
    pub(crate) fn insert(&mut self, instance: EffectInstance) -> Option<InstanceId> {
        let id = instance.id();
        let displaced = self.by_target.insert(instance.target(), id);
        if let Some(old) = displaced {
            self.instances.remove(&old);
        }
        self.instances.insert(id, instance);
        displaced
    }

    /// Removes `id`; clears its target's entry only if it still points at `id`.
    pub(crate) fn remove(&mut self, id: InstanceId) -> Option<EffectInstance> {
        let instance = self.instances.remove(&id)?;
        if self.by_target.get(&instance.target()) == Some(&id) {
            self.by_target.remove(&instance.target());
        }
        Some(instance)
    }

    pub fn get(&self, id: InstanceId) -> Option<&EffectInstance> {
        self.instances.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: InstanceId) -> Option<&mut EffectInstance> {
        self.instances.get_mut(&id)
    }

    pub fn active_id(&self, target: EntityId) -> Option<InstanceId> {
        self.by_target.get(&target).copied()
    }

    pub fn active_for(&self, target: EntityId) -> Option<&EffectInstance> {
        self.active_id(target).and_then(|id| self.instances.get(&id))
    }

    pub fn is_affected(&self, target: EntityId) -> bool {
        self.by_target.contains_key(&target)
    }

    /// Ids of all live instances, oldest first.
    pub fn ids(&self) -> Vec<InstanceId> {
        self.instances.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EffectInstance> {
        self.instances.values()
    }

    pub fn len(&self) -> usize {
        self.by_target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_target.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{EffectKind, InstanceMods};
    use crate::formula::EffectDuration;
    use crate::state::Tick;

    fn instance(registry: &mut EffectRegistry, target: u32) -> EffectInstance {
        EffectInstance::new(
            registry.allocate_id(),
            EffectKind::CorpseSkin,
            EntityId(0),
            EntityId(target),
            InstanceMods::new(),
            EffectDuration::from_secs_f64(5.0),
            Tick::ZERO,
        )
    }

    #[test]
    fn tracks_one_instance_per_target() {
        let mut registry = EffectRegistry::new();
        let a = instance(&mut registry, 7);
        let a_id = a.id();
        assert_eq!(registry.insert(a), None);

        assert!(registry.is_affected(EntityId(7)));
        assert_eq!(registry.active_id(EntityId(7)), Some(a_id));
        assert!(!registry.is_affected(EntityId(8)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn removing_stale_id_keeps_newer_entry() {
        let mut registry = EffectRegistry::new();
        let old = instance(&mut registry, 7);
        let old_id = old.id();
        registry.insert(old);
        let stale = registry.remove(old_id).expect("old instance stored");

        let new = instance(&mut registry, 7);
        let new_id = new.id();
        registry.insert(new);
        // Re-inserting the stale instance under its own id and removing it
        // again must not touch the target's current entry.
        registry.instances.insert(old_id, stale);
        registry.remove(old_id);

        assert_eq!(registry.active_id(EntityId(7)), Some(new_id));
        assert!(registry.get(old_id).is_none());
    }

    #[test]
    fn ids_are_never_reused() {
        let mut registry = EffectRegistry::new();
        let first = registry.allocate_id();
        let second = registry.allocate_id();
        assert_ne!(first, second);
        assert!(second > first);
    }
}
