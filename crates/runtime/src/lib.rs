//! Async host for the timed status-effect engine.
//!
//! This crate owns one [`effect_core::EffectState`] and its world inside a
//! single worker task, so every application, refresh and expiry runs on one
//! context in order. Consumers embed [`Runtime`] and talk to the worker
//! through the cloneable [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder and configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus for notifications and icons
//! - `workers` keeps the engine task internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{Event, EventBus, IconEvent, LifecycleEvent, NotificationEvent, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
