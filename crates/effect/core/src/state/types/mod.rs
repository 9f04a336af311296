mod common;
mod mobile;
mod resistance;

pub use common::{EntityId, Tick};
pub use mobile::{Mobile, Skills};
pub use resistance::{ResistanceKind, ResistanceMod, ResistanceSet};
