use crate::env::{Affectable, CasterSkills};

use super::common::EntityId;
use super::resistance::{ResistanceKind, ResistanceMod, ResistanceSet};

/// Skill values an entity brings to an application, on the usual 0-120 scale.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skills {
    /// Skill the caster casts the effect with (e.g. Necromancy).
    pub cast: f64,
    /// Skill that drives duration and damage-side scaling (e.g. Spirit Speak).
    pub damage: f64,
    /// Skill the target resists with (e.g. Resisting Spells).
    pub resist: f64,
}

impl Skills {
    pub const fn new(cast: f64, damage: f64, resist: f64) -> Self {
        Self {
            cast,
            damage,
            resist,
        }
    }
}

/// Reference entity: skills plus a resistance attribute store.
///
/// The counters record host hook calls so embedders and tests can observe
/// them without wiring their own entity type.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mobile {
    pub id: EntityId,
    pub skills: Skills,
    pub resistances: ResistanceSet,
    /// Times an in-progress action was interrupted by an incoming effect.
    pub interruptions: u32,
    /// Times the resist skill was offered a gain check.
    pub resist_checks: u32,
}

impl Mobile {
    pub fn new(id: EntityId, skills: Skills) -> Self {
        Self {
            id,
            skills,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_resistance(mut self, kind: ResistanceKind, value: i32) -> Self {
        self.resistances.set_base(kind, value);
        self
    }

    pub fn caster_skills(&self) -> CasterSkills {
        CasterSkills {
            cast: self.skills.cast,
            damage: self.skills.damage,
        }
    }
}

impl Affectable for Mobile {
    fn resistance(&self, kind: ResistanceKind) -> i32 {
        self.resistances.value(kind)
    }

    fn resist_skill(&self) -> f64 {
        self.skills.resist
    }

    fn add_resistance_mod(&mut self, modifier: ResistanceMod) {
        self.resistances.add_mod(modifier);
    }

    fn remove_resistance_mod(&mut self, modifier: &ResistanceMod) -> bool {
        self.resistances.remove_mod(modifier)
    }

    fn interrupt_action(&mut self) {
        self.interruptions += 1;
    }

    fn check_resist_gain(&mut self) {
        self.resist_checks += 1;
    }
}
