//! Entity-side data the engine reads and modifies.
//!
//! The engine never owns entities. Hosts either bring their own types through
//! the [`crate::env`] traits or use the reference [`EntitiesState`] table.
mod entities;
pub mod types;

pub use entities::EntitiesState;
pub use types::{
    EntityId, Mobile, ResistanceKind, ResistanceMod, ResistanceSet, Skills, Tick,
};
