//! Effect instances and the per-target registry.
mod instance;
mod registry;

use std::fmt;

pub use instance::{EffectInstance, ExpireReason, InstanceMods};
pub use registry::EffectRegistry;

pub(crate) use instance::Expiry;

/// The timed effect this engine manages.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EffectKind {
    /// Rots the target's flesh: weaker to fire and poison, tougher against
    /// cold and physical damage.
    #[default]
    CorpseSkin,
}

impl EffectKind {
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::CorpseSkin => "Corpse Skin",
        }
    }
}

/// Identity of one instance, unique for the lifetime of a registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fx{}", self.0)
    }
}
