//! Pure numeric formulas: how long an instance lasts and how hard it hits.
//!
//! Both read their constants from [`crate::EffectConfig`] and take every
//! skill and resistance input as a plain value sampled by the caller.
mod duration;
mod magnitude;

pub use duration::{EffectDuration, compute_duration};
pub use magnitude::{ResistanceDeltas, compute_resistance_deltas};
