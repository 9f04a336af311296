//! Fire-and-forget output channels: player messages and status icons.

use crate::effect::{EffectKind, ExpireReason, InstanceId};
use crate::formula::EffectDuration;
use crate::state::EntityId;

/// User-facing message about the effect on a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Notification {
    /// Fresh application on an unaffected target.
    Applied,
    /// An existing instance was replaced by a new one.
    Refreshed,
    /// The effect ended on its own or was cleansed.
    WoreOff,
}

impl Notification {
    /// Localized message id, where the client has one.
    pub const fn cliloc(self) -> Option<u32> {
        match self {
            Self::Applied => Some(1_061_689),
            Self::Refreshed => None,
            Self::WoreOff => Some(1_061_688),
        }
    }

    /// Fallback text for hosts without a localization table.
    pub const fn message(self) -> &'static str {
        match self {
            Self::Applied => "Your skin turns dry and corpselike.",
            Self::Refreshed => "Your skin remains dry and corpselike.",
            Self::WoreOff => "Your skin returns to normal.",
        }
    }
}

/// Status icon slot shown on the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BuffIcon {
    CorpseSkin,
}

impl From<EffectKind> for BuffIcon {
    fn from(kind: EffectKind) -> Self {
        match kind {
            EffectKind::CorpseSkin => BuffIcon::CorpseSkin,
        }
    }
}

/// Timed icon registration. Supersedes any icon with the same [`BuffIcon`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuffInfo {
    pub icon: BuffIcon,
    pub title_cliloc: u32,
    pub duration: EffectDuration,
    pub caster: EntityId,
}

impl BuffInfo {
    pub const CORPSE_SKIN_TITLE: u32 = 1_075_663;

    pub fn new(kind: EffectKind, duration: EffectDuration, caster: EntityId) -> Self {
        Self {
            icon: kind.into(),
            title_cliloc: Self::CORPSE_SKIN_TITLE,
            duration,
            caster,
        }
    }
}

/// Output side of the engine. Nothing returned from here is consumed.
pub trait EffectSink {
    fn notify(&mut self, target: EntityId, notification: Notification);

    fn add_buff(&mut self, target: EntityId, buff: BuffInfo);

    fn remove_buff(&mut self, target: EntityId, icon: BuffIcon);

    /// The caster performed a harmful act on the target (aggression, criminal
    /// flagging and similar bookkeeping).
    fn harmful_act(&mut self, _caster: EntityId, _target: EntityId) {}

    /// An instance left the registry.
    fn expired(&mut self, _target: EntityId, _instance: InstanceId, _reason: ExpireReason) {}
}

/// Sink that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EffectSink for NullSink {
    fn notify(&mut self, _target: EntityId, _notification: Notification) {}
    fn add_buff(&mut self, _target: EntityId, _buff: BuffInfo) {}
    fn remove_buff(&mut self, _target: EntityId, _icon: BuffIcon) {}
}

/// One call recorded by [`BufferedSink`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SinkRecord {
    Notify {
        target: EntityId,
        notification: Notification,
    },
    AddBuff {
        target: EntityId,
        buff: BuffInfo,
    },
    RemoveBuff {
        target: EntityId,
        icon: BuffIcon,
    },
    Harmful {
        caster: EntityId,
        target: EntityId,
    },
    Expired {
        target: EntityId,
        instance: InstanceId,
        reason: ExpireReason,
    },
}

/// Sink that keeps every call in order until drained.
///
/// Hosts that publish elsewhere (an event bus, a network session) collect
/// into this during a synchronous engine call and forward afterwards.
#[derive(Clone, Debug, Default)]
pub struct BufferedSink {
    records: Vec<SinkRecord>,
}

impl BufferedSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[SinkRecord] {
        &self.records
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, SinkRecord> {
        self.records.drain(..)
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Notifications sent to `target`, in order.
    pub fn notifications_for(&self, target: EntityId) -> Vec<Notification> {
        self.records
            .iter()
            .filter_map(|r| match r {
                SinkRecord::Notify {
                    target: t,
                    notification,
                } if *t == target => Some(*notification),
                _ => None,
            })
            .collect()
    }
}

impl EffectSink for BufferedSink {
    fn notify(&mut self, target: EntityId, notification: Notification) {
        self.records.push(SinkRecord::Notify {
            target,
            notification,
        });
    }

    fn add_buff(&mut self, target: EntityId, buff: BuffInfo) {
        self.records.push(SinkRecord::AddBuff { target, buff });
    }

    fn remove_buff(&mut self, target: EntityId, icon: BuffIcon) {
        self.records.push(SinkRecord::RemoveBuff { target, icon });
    }

    fn harmful_act(&mut self, caster: EntityId, target: EntityId) {
        self.records.push(SinkRecord::Harmful { caster, target });
    }

    fn expired(&mut self, target: EntityId, instance: InstanceId, reason: ExpireReason) {
        self.records.push(SinkRecord::Expired {
            target,
            instance,
            reason,
        });
    }
}
