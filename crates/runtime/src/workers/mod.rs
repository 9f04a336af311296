//! Worker tasks that back the runtime orchestration.
//!
//! The effect worker owns the engine state and the world; every mutation is
//! a command processed on its task.

mod effect;

pub use effect::{Command, EffectWorker};
