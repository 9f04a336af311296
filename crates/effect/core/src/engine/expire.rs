use crate::effect::{ExpireReason, InstanceId};
use crate::env::{BuffIcon, Notification};
use crate::state::EntityId;

use super::EffectEngine;

impl EffectEngine<'_> {
    /// Ends `instance` without the "wore off" message.
    ///
    /// Idempotent: a second call, a call for an unknown id, or a call racing a
    /// timer that already fired returns false and touches nothing.
    pub fn expire_now(&mut self, instance: InstanceId) -> bool {
        self.expire_with(instance, ExpireReason::Cancelled)
    }

    /// Cleanses `target`: sends "wore off" and expires its instance.
    ///
    /// Returns false, with no side effects, if `target` is not affected.
    pub fn force_remove(&mut self, target: EntityId) -> bool {
        let Some(id) = self.state.registry.active_id(target) else {
            return false;
        };
        self.env.sink().notify(target, Notification::WoreOff);
        self.expire_with(id, ExpireReason::Cancelled)
    }

    /// Forgets a target that left the world.
    ///
    /// The target's attribute store is gone, so nothing is reverted and no
    /// icon or message is sent; only the registry entry and timer go away.
    pub fn on_entity_removed(&mut self, target: EntityId) -> bool {
        let Some(id) = self.state.registry.active_id(target) else {
            return false;
        };
        let Some(expiry) = self
            .state
            .registry
            .get_mut(id)
            .and_then(|instance| instance.begin_expire())
        else {
            return false;
        };
        if let Some(timer) = expiry.timer {
            self.state.timers.cancel(timer);
        }
        self.state.registry.remove(id);
        self.env
            .sink()
            .expired(target, id, ExpireReason::EntityRemoved);
        true
    }

    /// Expires every live instance and drops any leftover timers.
    ///
    /// Modifiers are reverted and icons cleared; no "wore off" messages.
    /// Returns the number of instances expired.
    pub fn shutdown(&mut self) -> usize {
        let expired = self
            .state
            .registry
            .ids()
            .into_iter()
            .filter(|&id| self.expire_with(id, ExpireReason::Shutdown))
            .count();
        self.state.timers.clear();
        expired
    }

    /// Timer callback: the natural-expiry path.
    pub(super) fn fire(&mut self, id: InstanceId) -> bool {
        let Some(target) = self
            .state
            .registry
            .get(id)
            .filter(|instance| !instance.is_expired())
            .map(|instance| instance.target())
        else {
            return false;
        };
        self.env.sink().notify(target, Notification::WoreOff);
        self.expire_with(id, ExpireReason::Elapsed)
    }

    /// Shared exit path for every reason except entity removal.
    ///
    /// Runs to completion once started: revert modifiers, disarm the timer,
    /// drop the registry entry (only if it still names this instance), clear
    /// the icon.
    pub(super) fn expire_with(&mut self, id: InstanceId, reason: ExpireReason) -> bool {
        let Some(instance) = self.state.registry.get_mut(id) else {
            return false;
        };
        let Some(expiry) = instance.begin_expire() else {
            return false;
        };
        let target = instance.target();
        let icon = BuffIcon::from(instance.kind());

        let (store, sink) = self.env.parts();
        if let Some(entity) = store.affectable(target) {
            for modifier in &expiry.mods {
                entity.remove_resistance_mod(modifier);
            }
        }
        if let Some(timer) = expiry.timer {
            self.state.timers.cancel(timer);
        }
        self.state.registry.remove(id);

        sink.remove_buff(target, icon);
        sink.expired(target, id, reason);
        true
    }
}
