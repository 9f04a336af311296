//! One live application of the effect on one target.

use arrayvec::ArrayVec;

use crate::config::EffectConfig;
use crate::formula::EffectDuration;
use crate::scheduler::TimerHandle;
use crate::state::{EntityId, ResistanceMod, Tick};

use super::{EffectKind, InstanceId};

/// Modifier set owned by one instance, fixed at creation.
pub type InstanceMods = ArrayVec<ResistanceMod, { EffectConfig::MODIFIERS_PER_INSTANCE }>;

/// Why an instance left the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ExpireReason {
    /// Its timer fired.
    Elapsed,
    /// Explicit cancellation (cleanse or direct `expire_now`).
    Cancelled,
    /// Replaced by a newer application on the same target.
    Refreshed,
    /// The target left the world; nothing was reverted.
    EntityRemoved,
    /// The engine was shut down.
    Shutdown,
}

/// What a first call to [`EffectInstance::begin_expire`] hands back.
#[derive(Debug)]
pub(crate) struct Expiry {
    pub mods: InstanceMods,
    pub timer: Option<TimerHandle>,
}

/// Active effect on one target.
///
/// The transition to expired is one-way: [`EffectInstance::begin_expire`]
/// yields the modifiers to revert exactly once and `None` afterwards.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectInstance {
    id: InstanceId,
    kind: EffectKind,
    caster: EntityId,
    target: EntityId,
    mods: InstanceMods,
    duration: EffectDuration,
    applied_at: Tick,
    expires_at: Tick,
    timer: Option<TimerHandle>,
    expired: bool,
}

impl EffectInstance {
    pub(crate) fn new(
        id: InstanceId,
        kind: EffectKind,
        caster: EntityId,
        target: EntityId,
        mods: InstanceMods,
        duration: EffectDuration,
        applied_at: Tick,
    ) -> Self {
        Self {
            id,
            kind,
            caster,
            target,
            mods,
            duration,
            applied_at,
            expires_at: applied_at + duration.as_ticks(),
            timer: None,
            expired: false,
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    pub fn caster(&self) -> EntityId {
        self.caster
    }

    pub fn target(&self) -> EntityId {
        self.target
    }

    pub fn modifiers(&self) -> &[ResistanceMod] {
        &self.mods
    }

    pub fn duration(&self) -> EffectDuration {
        self.duration
    }

    pub fn applied_at(&self) -> Tick {
        self.applied_at
    }

    pub fn expires_at(&self) -> Tick {
        self.expires_at
    }

    /// Milliseconds left at `now`.
    pub fn remaining(&self, now: Tick) -> u64 {
        self.expires_at.saturating_since(now)
    }

    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    pub(crate) fn arm(&mut self, timer: TimerHandle) {
        self.timer = Some(timer);
    }

    pub(crate) fn begin_expire(&mut self) -> Option<Expiry> {
        if self.expired {
            return None;
        }
        self.expired = true;
        Some(Expiry {
            mods: self.mods.clone(),
            timer: self.timer.take(),
        })
    }
}
