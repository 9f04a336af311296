/// Tunable numeric constants of the effect.
///
/// Defaults reproduce the shipped behaviour exactly, including the 2.5
/// duration divisor. Changing them changes observable numbers, so content
/// files should only override them deliberately.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EffectConfig {
    /// Seconds added to the scaled skill differential.
    pub base_seconds: f64,
    /// Divisor applied to `caster skill - target skill`.
    pub skill_divisor: f64,
    /// Reduction per point of combined caster cast + damage skill.
    pub reduction_rate: f64,
    /// Upper bound on the skill-based reduction.
    pub reduction_cap: f64,
    /// Fire resistance above this value is added to the penalty.
    pub resist_threshold: i32,
    /// Cold resistance granted at strength 1.0.
    pub cold_bonus: f64,
    /// Physical resistance granted at strength 1.0.
    pub physical_bonus: f64,
}

impl EffectConfig {
    // ===== compile-time constants =====
    /// Modifiers per instance: fire, poison, cold, physical.
    pub const MODIFIERS_PER_INSTANCE: usize = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BASE_SECONDS: f64 = 40.0;
    pub const DEFAULT_SKILL_DIVISOR: f64 = 2.5;
    pub const DEFAULT_REDUCTION_RATE: f64 = 0.075;
    pub const DEFAULT_REDUCTION_CAP: f64 = 15.0;
    pub const DEFAULT_RESIST_THRESHOLD: i32 = 70;
    pub const DEFAULT_COLD_BONUS: f64 = 10.0;
    pub const DEFAULT_PHYSICAL_BONUS: f64 = 10.0;

    pub const fn new() -> Self {
        Self {
            base_seconds: Self::DEFAULT_BASE_SECONDS,
            skill_divisor: Self::DEFAULT_SKILL_DIVISOR,
            reduction_rate: Self::DEFAULT_REDUCTION_RATE,
            reduction_cap: Self::DEFAULT_REDUCTION_CAP,
            resist_threshold: Self::DEFAULT_RESIST_THRESHOLD,
            cold_bonus: Self::DEFAULT_COLD_BONUS,
            physical_bonus: Self::DEFAULT_PHYSICAL_BONUS,
        }
    }
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self::new()
    }
}
