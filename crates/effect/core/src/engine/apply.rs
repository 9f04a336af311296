use crate::effect::{EffectInstance, ExpireReason, InstanceId, InstanceMods};
use crate::env::{BuffInfo, Notification};
use crate::error::ApplyError;
use crate::formula::{EffectDuration, compute_duration, compute_resistance_deltas};
use crate::state::{EntityId, ResistanceKind, Tick};

use super::EffectEngine;

/// Result of a successful application.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ApplyOutcome {
    pub instance: InstanceId,
    pub caster: EntityId,
    pub target: EntityId,
    pub duration: EffectDuration,
    pub expires_at: Tick,
    /// True when an existing instance on the target was replaced.
    pub refreshed: bool,
    pub modifiers: InstanceMods,
}

impl EffectEngine<'_> {
    /// Applies the effect from `caster` to `target` at `strength`.
    ///
    /// Order of side effects:
    /// 1. expire the target's current instance, if any (refresh)
    /// 2. sample caster skills and target resistances, compute duration and deltas
    /// 3. add all four modifiers to the target
    /// 4. register the new instance and arm its timer
    /// 5. publish the timed status icon
    pub fn apply(
        &mut self,
        caster: EntityId,
        target: EntityId,
        strength: f64,
    ) -> Result<ApplyOutcome, ApplyError> {
        if !strength.is_finite() {
            return Err(ApplyError::InvalidStrength(strength));
        }
        let skills = self
            .env
            .store()
            .caster_skills(caster)
            .ok_or(ApplyError::CasterNotFound(caster))?;
        if self.env.store().affectable(target).is_none() {
            return Err(ApplyError::TargetNotAffectable(target));
        }

        // 1. refresh
        let refreshed = match self.state.registry.active_id(target) {
            Some(previous) => self.expire_with(previous, ExpireReason::Refreshed),
            None => false,
        };
        let notification = if refreshed {
            Notification::Refreshed
        } else {
            Notification::Applied
        };
        self.env.sink().notify(target, notification);

        let config = &self.state.config;
        let (store, sink) = self.env.parts();
        let entity = store
            .affectable(target)
            .ok_or(ApplyError::TargetNotAffectable(target))?;
        entity.interrupt_action();

        // 2. sample and compute
        let self_targeted = caster == target;
        let duration = compute_duration(
            config,
            skills.damage,
            entity.resist_skill(),
            self_targeted,
            strength,
        );
        entity.check_resist_gain();
        let deltas = compute_resistance_deltas(
            config,
            skills.cast,
            skills.damage,
            entity.resistance(ResistanceKind::Fire),
            entity.resistance(ResistanceKind::Poison),
            strength,
        );
        let mods = deltas.to_mods();

        // 3. modifiers
        for modifier in &mods {
            entity.add_resistance_mod(*modifier);
        }

        // 4. register and arm
        let id = self.state.registry.allocate_id();
        let mut instance = EffectInstance::new(
            id,
            self.state.kind,
            caster,
            target,
            mods.clone(),
            duration,
            self.state.clock,
        );
        let expires_at = instance.expires_at();
        instance.arm(self.state.timers.arm(expires_at, id));
        self.state.registry.insert(instance);

        // 5. status icon
        sink.add_buff(target, BuffInfo::new(self.state.kind, duration, caster));
        sink.harmful_act(caster, target);

        Ok(ApplyOutcome {
            instance: id,
            caster,
            target,
            duration,
            expires_at,
            refreshed,
            modifiers: mods,
        })
    }

    /// Applies the effect to each linked target in turn, at `strength`.
    ///
    /// Each target goes through the full [`EffectEngine::apply`] path, so an
    /// already affected target is refreshed. Failures are reported per target
    /// and do not stop the remaining ones.
    pub fn propagate(
        &mut self,
        caster: EntityId,
        linked: &[EntityId],
        strength: f64,
    ) -> Vec<Result<ApplyOutcome, ApplyError>> {
        linked
            .iter()
            .map(|&target| self.apply(caster, target, strength))
            .collect()
    }
}
