//! Resistance deltas applied by one instance.
//!
//! ```text
//! reduction = trunc(min(cap, (cast + damage) * rate))
//! fire      = trunc(-(max(0, fire_resist - threshold) + reduction) * strength)
//! poison    = same as fire, also driven by fire_resist
//! cold      = trunc(+cold_bonus * strength)
//! physical  = trunc(+physical_bonus * strength)
//! ```

use arrayvec::ArrayVec;

use crate::config::EffectConfig;
use crate::state::{ResistanceKind, ResistanceMod};

/// Integral deltas for the four resistances the effect touches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResistanceDeltas {
    pub fire: i32,
    pub poison: i32,
    pub cold: i32,
    pub physical: i32,
}

impl ResistanceDeltas {
    /// Materializes the deltas as modifiers, in fire, poison, cold, physical order.
    pub fn to_mods(self) -> ArrayVec<ResistanceMod, { EffectConfig::MODIFIERS_PER_INSTANCE }> {
        ArrayVec::from([
            ResistanceMod::new(ResistanceKind::Fire, self.fire),
            ResistanceMod::new(ResistanceKind::Poison, self.poison),
            ResistanceMod::new(ResistanceKind::Cold, self.cold),
            ResistanceMod::new(ResistanceKind::Physical, self.physical),
        ])
    }
}

/// Computes the resistance deltas for one application.
///
/// The poison penalty is driven by `target_fire_resist`; `_target_poison_resist`
/// is accepted and not read. Any finite strength is accepted; deltas that
/// overflow `i32` saturate at `i32::MIN`/`i32::MAX`.
pub fn compute_resistance_deltas(
    config: &EffectConfig,
    caster_cast_skill: f64,
    caster_damage_skill: f64,
    target_fire_resist: i32,
    _target_poison_resist: i32,
    strength: f64,
) -> ResistanceDeltas {
    let reduction = config
        .reduction_cap
        .min((caster_cast_skill + caster_damage_skill) * config.reduction_rate)
        .trunc();
    let excess = f64::from(
        target_fire_resist
            .saturating_sub(config.resist_threshold)
            .max(0),
    );
    let penalty = excess + reduction;

    ResistanceDeltas {
        fire: truncate(-penalty * strength),
        poison: truncate(-penalty * strength),
        cold: truncate(config.cold_bonus * strength),
        physical: truncate(config.physical_bonus * strength),
    }
}

/// Truncates toward zero; non-finite input yields 0 and out-of-range input
/// saturates.
#[inline]
fn truncate(value: f64) -> i32 {
    value as i32
}
