//! Topic-based event bus for runtime events.
//!
//! Everything the engine reports through its sink is republished here, so
//! consumers subscribe only to the topics they need.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{IconEvent, LifecycleEvent, NotificationEvent};
