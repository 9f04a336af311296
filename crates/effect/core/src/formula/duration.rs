//! Duration from the caster/target skill differential.
//!
//! Formula: `(((caster - target) / divisor) + base) * strength` seconds.
//!
//! The default divisor is 2.5, a fixed-point rendering of a design that reads
//! `/ 2`. The numeric output is part of the contract, so it stays 2.5.

use crate::config::EffectConfig;

/// Computed effect length in seconds.
///
/// Not clamped: a weak caster against a strong resister can produce a zero or
/// negative value, which the engine treats as immediate expiry.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectDuration(f64);

impl EffectDuration {
    pub const ZERO: Self = Self(0.0);

    pub const fn from_secs_f64(secs: f64) -> Self {
        Self(secs)
    }

    pub const fn as_secs_f64(self) -> f64 {
        self.0
    }

    /// Whole milliseconds, truncated. Non-finite and non-positive values map
    /// to zero.
    pub fn as_ticks(self) -> u64 {
        if self.is_immediate() {
            return 0;
        }
        // `as` saturates at u64::MAX for huge values.
        (self.0 * 1000.0) as u64
    }

    /// True when the effect should expire as soon as it is scheduled.
    pub fn is_immediate(self) -> bool {
        !self.0.is_finite() || self.0 <= 0.0
    }
}

/// Computes the effect's duration.
///
/// `self_targeted` skips the resistance check: the target skill counts as 0.
pub fn compute_duration(
    config: &EffectConfig,
    caster_skill: f64,
    target_skill: f64,
    self_targeted: bool,
    strength: f64,
) -> EffectDuration {
    let target_skill = if self_targeted { 0.0 } else { target_skill };
    let base_seconds = ((caster_skill - target_skill) / config.skill_divisor) + config.base_seconds;

    EffectDuration(base_seconds * strength)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duration(caster: f64, target: f64, self_targeted: bool, strength: f64) -> f64 {
        compute_duration(&EffectConfig::default(), caster, target, self_targeted, strength)
            .as_secs_f64()
    }

    #[test]
    fn self_target_ignores_resist_skill() {
        assert_eq!(duration(50.0, 50.0, true, 1.0), 60.0);
        assert_eq!(duration(50.0, 50.0, false, 1.0), 40.0);
    }

    #[test]
    fn strength_scales_final_seconds() {
        assert_eq!(duration(60.0, 20.0, false, 0.5), 28.0);
        assert_eq!(duration(60.0, 20.0, false, 1.5), 84.0);
    }

    #[test]
    fn negative_result_is_not_clamped() {
        let d = compute_duration(&EffectConfig::default(), 0.0, 120.0, false, 1.0);
        assert_eq!(d.as_secs_f64(), -8.0);
        assert!(d.is_immediate());
        assert_eq!(d.as_ticks(), 0);
    }

    #[test]
    fn ticks_truncate_to_whole_milliseconds() {
        assert_eq!(EffectDuration::from_secs_f64(28.0).as_ticks(), 28_000);
        assert_eq!(EffectDuration::from_secs_f64(0.0015).as_ticks(), 1);
        assert_eq!(EffectDuration::from_secs_f64(f64::NAN).as_ticks(), 0);
        assert_eq!(EffectDuration::from_secs_f64(f64::INFINITY).as_ticks(), 0);
    }

    #[test]
    fn divisor_comes_from_config() {
        let config = EffectConfig {
            skill_divisor: 2.0,
            ..EffectConfig::default()
        };
        let d = compute_duration(&config, 60.0, 20.0, false, 1.0);
        assert_eq!(d.as_secs_f64(), 60.0);
    }
}
