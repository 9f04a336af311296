//! Application, expiry and the cooperative clock pump.
//!
//! [`EffectState`] is everything the engine owns: config, clock, registry and
//! timers. [`EffectEngine`] borrows it together with the host collaborators
//! for a batch of operations. All mutation of instances, modifiers and the
//! registry happens inside these calls, one at a time, so a refresh always
//! finishes reverting before the next modifier set lands.

mod apply;
mod expire;

pub use apply::ApplyOutcome;

use crate::config::EffectConfig;
use crate::effect::{EffectInstance, EffectKind, EffectRegistry, InstanceId};
use crate::env::EffectEnv;
use crate::scheduler::TimerQueue;
use crate::state::{EntityId, Tick};

/// Engine-owned state, kept by the host between calls.
#[derive(Clone, Debug)]
pub struct EffectState {
    config: EffectConfig,
    kind: EffectKind,
    clock: Tick,
    registry: EffectRegistry,
    timers: TimerQueue<InstanceId>,
}

impl EffectState {
    pub fn new(config: EffectConfig) -> Self {
        Self {
            config,
            kind: EffectKind::CorpseSkin,
            clock: Tick::ZERO,
            registry: EffectRegistry::new(),
            timers: TimerQueue::new(),
        }
    }

    /// Starts the clock at `clock` instead of zero.
    #[must_use]
    pub fn with_clock(mut self, clock: Tick) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    pub fn clock(&self) -> Tick {
        self.clock
    }

    pub fn registry(&self) -> &EffectRegistry {
        &self.registry
    }

    pub fn is_affected(&self, target: EntityId) -> bool {
        self.registry.is_affected(target)
    }

    pub fn instance(&self, target: EntityId) -> Option<&EffectInstance> {
        self.registry.active_for(target)
    }

    /// Number of armed expiry timers.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Due tick of the next expiry, if any.
    pub fn next_expiry(&self) -> Option<Tick> {
        self.timers.next_due()
    }
}

impl Default for EffectState {
    fn default() -> Self {
        Self::new(EffectConfig::default())
    }
}

/// Engine operating on borrowed state and host collaborators.
pub struct EffectEngine<'a> {
    state: &'a mut EffectState,
    env: EffectEnv<'a>,
}

impl<'a> EffectEngine<'a> {
    pub fn new(state: &'a mut EffectState, env: EffectEnv<'a>) -> Self {
        Self { state, env }
    }

    pub fn state(&self) -> &EffectState {
        &*self.state
    }

    /// True iff the registry holds a live instance for `target`.
    pub fn is_affected(&self, target: EntityId) -> bool {
        self.state.is_affected(target)
    }

    pub fn instance(&self, target: EntityId) -> Option<&EffectInstance> {
        self.state.instance(target)
    }

    /// Moves the clock forward and fires every timer due by then.
    ///
    /// The clock never goes back; an earlier `now` still fires anything
    /// already due. Returns how many instances expired.
    pub fn advance_to(&mut self, now: Tick) -> usize {
        self.state.clock = self.state.clock.max(now);
        let clock = self.state.clock;

        let mut expired = 0;
        while let Some((_, id)) = self.state.timers.pop_due(clock) {
            if self.fire(id) {
                expired += 1;
            }
        }
        expired
    }
}

#[cfg(test)]
mod tests;
