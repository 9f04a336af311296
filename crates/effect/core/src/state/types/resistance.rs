//! Resistance attributes and the modifiers that adjust them.
//!
//! A [`ResistanceMod`] is the atomic, reversible unit of change. The
//! [`ResistanceSet`] is a reference attribute store: it keeps base values and
//! the list of live modifiers, and reports their sum.

/// Damage type a resistance value defends against.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ResistanceKind {
    Physical,
    Fire,
    Cold,
    Poison,
    Energy,
}

impl ResistanceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Physical => 0,
            Self::Fire => 1,
            Self::Cold => 2,
            Self::Poison => 3,
            Self::Energy => 4,
        }
    }
}

/// A signed adjustment to one resistance.
///
/// Immutable once built. Reverting means removing this exact value from the
/// store it was added to, never recomputing it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResistanceMod {
    kind: ResistanceKind,
    offset: i32,
}

impl ResistanceMod {
    pub const fn new(kind: ResistanceKind, offset: i32) -> Self {
        Self { kind, offset }
    }

    #[inline]
    pub const fn kind(&self) -> ResistanceKind {
        self.kind
    }

    #[inline]
    pub const fn offset(&self) -> i32 {
        self.offset
    }
}

/// Number of resistance kinds tracked per entity.
const KIND_COUNT: usize = <ResistanceKind as strum::EnumCount>::COUNT;

/// Base resistances plus every live modifier on one entity.
///
/// Aggregation policy: effective value is `base + Σ offsets` for that kind,
/// saturating at the `i32` bounds and otherwise unclamped. Several modifiers
/// of the same kind and value may coexist.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResistanceSet {
    base: [i32; KIND_COUNT],
    mods: Vec<ResistanceMod>,
}

impl ResistanceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style base value setter.
    #[must_use]
    pub fn with_base(mut self, kind: ResistanceKind, value: i32) -> Self {
        self.set_base(kind, value);
        self
    }

    pub fn set_base(&mut self, kind: ResistanceKind, value: i32) {
        self.base[kind.index()] = value;
    }

    pub fn base(&self, kind: ResistanceKind) -> i32 {
        self.base[kind.index()]
    }

    /// Effective value including all live modifiers, saturating at the `i32` bounds.
    pub fn value(&self, kind: ResistanceKind) -> i32 {
        self.base(kind).saturating_add(self.offset(kind))
    }

    /// Net offset contributed by live modifiers of `kind`.
    pub fn offset(&self, kind: ResistanceKind) -> i32 {
        self.mods
            .iter()
            .filter(|m| m.kind() == kind)
            .map(ResistanceMod::offset)
            .fold(0, i32::saturating_add)
    }

    pub fn add_mod(&mut self, modifier: ResistanceMod) {
        self.mods.push(modifier);
    }

    /// Removes one modifier equal to `modifier`.
    ///
    /// Returns false when no such modifier is live.
    pub fn remove_mod(&mut self, modifier: &ResistanceMod) -> bool {
        match self.mods.iter().position(|m| m == modifier) {
            Some(index) => {
                self.mods.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn mods(&self) -> &[ResistanceMod] {
        &self.mods
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_sums_base_and_mods() {
        let mut set = ResistanceSet::new().with_base(ResistanceKind::Fire, 80);
        set.add_mod(ResistanceMod::new(ResistanceKind::Fire, -20));
        set.add_mod(ResistanceMod::new(ResistanceKind::Cold, 10));

        assert_eq!(set.value(ResistanceKind::Fire), 60);
        assert_eq!(set.value(ResistanceKind::Cold), 10);
        assert_eq!(set.offset(ResistanceKind::Poison), 0);
    }

    #[test]
    fn remove_takes_out_a_single_equal_mod() {
        let mut set = ResistanceSet::new();
        let m = ResistanceMod::new(ResistanceKind::Physical, 10);
        set.add_mod(m);
        set.add_mod(m);

        assert!(set.remove_mod(&m));
        assert_eq!(set.value(ResistanceKind::Physical), 10);
        assert!(set.remove_mod(&m));
        assert!(!set.remove_mod(&m));
        assert!(set.mods().is_empty());
    }

    #[test]
    fn value_saturates_at_bounds() {
        let mut set = ResistanceSet::new()
            .with_base(ResistanceKind::Fire, i32::MIN)
            .with_base(ResistanceKind::Cold, i32::MAX);
        set.add_mod(ResistanceMod::new(ResistanceKind::Fire, -20));
        set.add_mod(ResistanceMod::new(ResistanceKind::Cold, 10));
        set.add_mod(ResistanceMod::new(ResistanceKind::Poison, i32::MAX));
        set.add_mod(ResistanceMod::new(ResistanceKind::Poison, i32::MAX));

        assert_eq!(set.value(ResistanceKind::Fire), i32::MIN);
        assert_eq!(set.value(ResistanceKind::Cold), i32::MAX);
        assert_eq!(set.offset(ResistanceKind::Poison), i32::MAX);
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("FIRE".parse::<ResistanceKind>(), Ok(ResistanceKind::Fire));
        assert_eq!(ResistanceKind::Poison.to_string(), "poison");
    }
}
