//! Data-driven effect content and loaders.
//!
//! This crate provides loaders for TOML/RON data files:
//! - Effect tuning constants (`EffectConfig`, TOML or RON)
//! - Starting worlds for hosts and demos (mobiles with skills and resistances, RON)
//!
//! Content is consumed by hosts at startup and never appears in engine state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, MobileSpec, WorldLoader};
