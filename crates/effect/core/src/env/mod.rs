//! Traits and adapters for everything the engine consumes from its host.
//!
//! The engine reads skills and resistances through [`EntityStore`], writes
//! modifiers through [`Affectable`], and reports through [`EffectSink`].
//! [`EffectEnv`] bundles a store and a sink for one engine call.
mod entity;
mod sink;

pub use entity::{Affectable, CasterSkills, EntityStore};
pub use sink::{BufferedSink, BuffIcon, BuffInfo, EffectSink, Notification, NullSink, SinkRecord};

/// Borrowed host collaborators for one batch of engine operations.
pub struct EffectEnv<'a> {
    store: &'a mut dyn EntityStore,
    sink: &'a mut dyn EffectSink,
}

impl<'a> EffectEnv<'a> {
    pub fn new(store: &'a mut dyn EntityStore, sink: &'a mut dyn EffectSink) -> Self {
        Self { store, sink }
    }

    pub fn store(&mut self) -> &mut dyn EntityStore {
        &mut *self.store
    }

    pub fn sink(&mut self) -> &mut dyn EffectSink {
        &mut *self.sink
    }

    /// Splits into store and sink so both can be borrowed at once.
    pub fn parts(&mut self) -> (&mut dyn EntityStore, &mut dyn EffectSink) {
        (&mut *self.store, &mut *self.sink)
    }
}
