//! Entity-facing collaborator contracts.

use crate::state::{EntityId, ResistanceKind, ResistanceMod};

/// Skill values read from the caster at the moment of application.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CasterSkills {
    pub cast: f64,
    pub damage: f64,
}

impl CasterSkills {
    pub const fn new(cast: f64, damage: f64) -> Self {
        Self { cast, damage }
    }
}

/// Capability an entity must offer to receive the effect.
///
/// Resolved once at the engine boundary through [`EntityStore::affectable`];
/// nothing downstream re-checks entity types. The attribute store behind it
/// owns the aggregation policy for simultaneous modifiers.
pub trait Affectable {
    /// Current effective resistance, including live modifiers.
    fn resistance(&self, kind: ResistanceKind) -> i32;

    /// Skill used to resist the effect's duration.
    fn resist_skill(&self) -> f64;

    fn add_resistance_mod(&mut self, modifier: ResistanceMod);

    /// Removes one modifier equal to `modifier`; false if none was live.
    fn remove_resistance_mod(&mut self, modifier: &ResistanceMod) -> bool;

    /// Called when the effect lands, before anything is computed.
    ///
    /// Hosts disrupt whatever the entity was doing (e.g. a spell in progress).
    fn interrupt_action(&mut self) {}

    /// Called once per application so the host may award resist skill gain.
    fn check_resist_gain(&mut self) {}
}

/// Lookup of casters and affectable targets by id.
pub trait EntityStore {
    /// Skills of `id` if it can act as a caster.
    fn caster_skills(&self, id: EntityId) -> Option<CasterSkills>;

    /// `id` as an affectable entity, or `None` if it lacks the capability or
    /// does not exist.
    fn affectable(&mut self, id: EntityId) -> Option<&mut dyn Affectable>;
}
