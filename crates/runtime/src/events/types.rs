//! Event types for different topics.

use effect_core::{
    ApplyOutcome, BuffIcon, BuffInfo, EntityId, ExpireReason, InstanceId, Notification, Tick,
};
use serde::{Deserialize, Serialize};

/// Message shown to a target, with its localized id when one exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub target: EntityId,
    pub notification: Notification,
    pub cliloc: Option<u32>,
    pub message: String,
    pub clock: Tick,
}

impl NotificationEvent {
    pub fn new(target: EntityId, notification: Notification, clock: Tick) -> Self {
        Self {
            target,
            notification,
            cliloc: notification.cliloc(),
            message: notification.message().to_owned(),
            clock,
        }
    }
}

/// Status icon changes on a target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IconEvent {
    /// Timed icon shown; supersedes any icon in the same slot.
    Added {
        target: EntityId,
        buff: BuffInfo,
        clock: Tick,
    },

    /// Icon cleared.
    Removed {
        target: EntityId,
        icon: BuffIcon,
        clock: Tick,
    },
}

/// Instance lifecycle transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LifecycleEvent {
    /// A new instance is live. `outcome.refreshed` marks a replacement.
    Applied { outcome: ApplyOutcome, clock: Tick },

    /// The caster committed a harmful act against the target.
    HarmfulAct {
        caster: EntityId,
        target: EntityId,
        clock: Tick,
    },

    /// An instance left the registry.
    Expired {
        target: EntityId,
        instance: InstanceId,
        reason: ExpireReason,
        clock: Tick,
    },
}
