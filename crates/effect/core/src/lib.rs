//! Deterministic timed status-effect engine.
//!
//! `effect-core` owns the rules for Corpse Skin: how long an instance lasts,
//! which resistance modifiers it carries, the one-instance-per-target
//! registry, and the cancellable expiry timers. It performs no I/O; hosts
//! drive the clock through [`engine::EffectEngine::advance_to`] and receive
//! messages and status icons through [`env::EffectSink`].
//! All state mutation flows through [`engine::EffectEngine`], and supporting
//! crates depend on the types re-exported here.
pub mod config;
pub mod effect;
pub mod engine;
pub mod env;
pub mod error;
pub mod formula;
pub mod scheduler;
pub mod state;
pub use config::EffectConfig;
pub use effect::{EffectInstance, EffectKind, EffectRegistry, ExpireReason, InstanceId, InstanceMods};
pub use engine::{ApplyOutcome, EffectEngine, EffectState};
pub use env::{
    Affectable, BuffIcon, BuffInfo, BufferedSink, CasterSkills, EffectEnv, EffectSink,
    EntityStore, Notification, NullSink, SinkRecord,
};
pub use error::{ApplyError, EffectError, ErrorSeverity};
pub use formula::{
    EffectDuration, ResistanceDeltas, compute_duration, compute_resistance_deltas,
};
pub use scheduler::{TimerHandle, TimerQueue};
pub use state::{
    EntitiesState, EntityId, Mobile, ResistanceKind, ResistanceMod, ResistanceSet, Skills, Tick,
};
