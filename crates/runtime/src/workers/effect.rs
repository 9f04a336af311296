//! Effect worker that owns the authoritative [`effect_core::EffectState`].
//!
//! Receives commands from [`crate::RuntimeHandle`], runs them through
//! [`effect_core::EffectEngine`], drives expiry from a wall-clock interval,
//! and republishes everything the engine reports on the [`EventBus`].

use std::ops::ControlFlow;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use effect_core::{
    ApplyError, ApplyOutcome, BufferedSink, EffectEngine, EffectEnv, EffectError, EffectInstance,
    EffectState, EntitiesState, EntityId, InstanceId, Mobile, SinkRecord, Tick,
};

use crate::api::Result;
use crate::events::{Event, EventBus, IconEvent, LifecycleEvent, NotificationEvent};

/// Commands that can be sent to the effect worker
pub enum Command {
    /// Apply the effect from `caster` to `target`.
    Apply {
        caster: EntityId,
        target: EntityId,
        strength: f64,
        reply: oneshot::Sender<Result<ApplyOutcome>>,
    },
    /// Apply the effect to each linked target in order.
    Propagate {
        caster: EntityId,
        linked: Vec<EntityId>,
        strength: f64,
        reply: oneshot::Sender<Vec<std::result::Result<ApplyOutcome, ApplyError>>>,
    },
    /// Cleanse a target.
    ForceRemove {
        target: EntityId,
        reply: oneshot::Sender<bool>,
    },
    /// End one instance without the "wore off" message.
    ExpireNow {
        instance: InstanceId,
        reply: oneshot::Sender<bool>,
    },
    IsAffected {
        target: EntityId,
        reply: oneshot::Sender<bool>,
    },
    /// Read-only copy of the target's live instance.
    Instance {
        target: EntityId,
        reply: oneshot::Sender<Option<EffectInstance>>,
    },
    /// Add or replace a mobile in the world.
    InsertEntity {
        mobile: Mobile,
        reply: oneshot::Sender<Option<Mobile>>,
    },
    /// Remove a mobile from the world and forget its instance.
    RemoveEntity {
        target: EntityId,
        reply: oneshot::Sender<Option<Mobile>>,
    },
    /// Query the current world (read-only).
    QueryWorld { reply: oneshot::Sender<EntitiesState> },
    /// Pump the engine clock to `to`.
    Advance {
        to: Tick,
        reply: oneshot::Sender<usize>,
    },
    /// Current engine clock.
    Clock { reply: oneshot::Sender<Tick> },
    /// Expire everything and stop the worker.
    Shutdown { reply: oneshot::Sender<usize> },
}

/// Background task that processes effect commands.
pub struct EffectWorker {
    state: EffectState,
    world: EntitiesState,
    sink: BufferedSink,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    tick_interval: Duration,
    started: Instant,
    origin: Tick,
}

impl EffectWorker {
    /// Creates a new effect worker.
    pub fn new(
        state: EffectState,
        world: EntitiesState,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        tick_interval: Duration,
    ) -> Self {
        info!(
            target: "runtime::worker",
            mobiles = world.len(),
            tick_ms = tick_interval.as_millis() as u64,
            "EffectWorker initialized"
        );

        let origin = state.clock();
        Self {
            state,
            world,
            sink: BufferedSink::new(),
            command_rx,
            event_bus,
            tick_interval: tick_interval.max(Duration::from_millis(1)),
            started: Instant::now(),
            origin,
        }
    }

    /// Main worker loop.
    ///
    /// Exits on [`Command::Shutdown`] or once every handle is dropped; either
    /// way the engine is shut down before returning.
    pub async fn run(mut self) {
        let mut ticker = tokio::time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;

                _ = ticker.tick() => {
                    let now = self.wall_clock();
                    self.advance(now);
                }
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => {
                        if self.handle_command(cmd).is_break() {
                            return;
                        }
                    }
                    None => break,
                },
            }
        }

        self.shutdown();
    }

    fn handle_command(&mut self, cmd: Command) -> ControlFlow<()> {
        match cmd {
            Command::Apply {
                caster,
                target,
                strength,
                reply,
            } => {
                let result = self.handle_apply(caster, target, strength);
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "Apply reply channel closed (caller dropped)");
                }
            }
            Command::Propagate {
                caster,
                linked,
                strength,
                reply,
            } => {
                let results = self.handle_propagate(caster, &linked, strength);
                if reply.send(results).is_err() {
                    debug!(target: "runtime::worker", "Propagate reply channel closed (caller dropped)");
                }
            }
            Command::ForceRemove { target, reply } => {
                let removed = self.engine().force_remove(target);
                debug!(target: "runtime::worker", %target, removed, "Force remove");
                self.flush();
                let _ = reply.send(removed);
            }
            Command::ExpireNow { instance, reply } => {
                let expired = self.engine().expire_now(instance);
                debug!(target: "runtime::worker", %instance, expired, "Expire now");
                self.flush();
                let _ = reply.send(expired);
            }
            Command::IsAffected { target, reply } => {
                let _ = reply.send(self.state.is_affected(target));
            }
            Command::Instance { target, reply } => {
                let _ = reply.send(self.state.instance(target).cloned());
            }
            Command::InsertEntity { mobile, reply } => {
                let id = mobile.id;
                let replaced = self.world.insert(mobile);
                // The fresh attribute store carries none of the old modifiers.
                let dropped = replaced.is_some() && self.engine().on_entity_removed(id);
                debug!(
                    target: "runtime::worker",
                    %id,
                    replaced = replaced.is_some(),
                    dropped_instance = dropped,
                    "Insert entity"
                );
                self.flush();
                let _ = reply.send(replaced);
            }
            Command::RemoveEntity { target, reply } => {
                let removed = self.world.remove(target);
                let dropped = self.engine().on_entity_removed(target);
                debug!(
                    target: "runtime::worker",
                    %target,
                    present = removed.is_some(),
                    dropped_instance = dropped,
                    "Remove entity"
                );
                self.flush();
                let _ = reply.send(removed);
            }
            Command::QueryWorld { reply } => {
                if reply.send(self.world.clone()).is_err() {
                    debug!(target: "runtime::worker", "QueryWorld reply channel closed (caller dropped)");
                }
            }
            Command::Advance { to, reply } => {
                let expired = self.advance(to);
                let _ = reply.send(expired);
            }
            Command::Clock { reply } => {
                let _ = reply.send(self.state.clock());
            }
            Command::Shutdown { reply } => {
                let expired = self.shutdown();
                if reply.send(expired).is_err() {
                    debug!(target: "runtime::worker", "Shutdown reply channel closed (caller dropped)");
                }
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    fn handle_apply(
        &mut self,
        caster: EntityId,
        target: EntityId,
        strength: f64,
    ) -> Result<ApplyOutcome> {
        let result = self.engine().apply(caster, target, strength);
        self.log_apply(caster, target, &result);
        self.flush();
        if let Ok(outcome) = &result {
            self.publish_applied(outcome);
        }
        Ok(result?)
    }

    fn handle_propagate(
        &mut self,
        caster: EntityId,
        linked: &[EntityId],
        strength: f64,
    ) -> Vec<std::result::Result<ApplyOutcome, ApplyError>> {
        let results = self.engine().propagate(caster, linked, strength);
        for (target, result) in linked.iter().zip(&results) {
            self.log_apply(caster, *target, result);
        }
        self.flush();
        for outcome in results.iter().flatten() {
            self.publish_applied(outcome);
        }
        results
    }

    fn log_apply(
        &self,
        caster: EntityId,
        target: EntityId,
        result: &std::result::Result<ApplyOutcome, ApplyError>,
    ) {
        match result {
            Ok(outcome) => debug!(
                target: "runtime::worker",
                %caster,
                %target,
                instance = %outcome.instance,
                duration_secs = outcome.duration.as_secs_f64(),
                expires_at = %outcome.expires_at,
                refreshed = outcome.refreshed,
                "Effect applied"
            ),
            Err(error) => warn!(
                target: "runtime::worker",
                %caster,
                %target,
                %error,
                code = error.error_code(),
                severity = error.severity().as_str(),
                "Apply rejected"
            ),
        }
    }

    fn advance(&mut self, now: Tick) -> usize {
        let expired = self.engine().advance_to(now);
        if expired > 0 {
            debug!(
                target: "runtime::clock",
                clock = %self.state.clock(),
                expired,
                "Expiry timers fired"
            );
        }
        self.flush();
        expired
    }

    fn shutdown(&mut self) -> usize {
        let expired = self.engine().shutdown();
        self.flush();
        info!(target: "runtime::worker", expired, "EffectWorker shut down");
        expired
    }

    fn engine(&mut self) -> EffectEngine<'_> {
        EffectEngine::new(
            &mut self.state,
            EffectEnv::new(&mut self.world, &mut self.sink),
        )
    }

    /// Engine clock at start plus elapsed wall time.
    fn wall_clock(&self) -> Tick {
        let millis = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.origin + millis
    }

    fn publish_applied(&self, outcome: &ApplyOutcome) {
        self.event_bus
            .publish(Event::Lifecycle(LifecycleEvent::Applied {
                outcome: outcome.clone(),
                clock: self.state.clock(),
            }));
    }

    /// Republishes buffered sink records as events.
    fn flush(&mut self) {
        let clock = self.state.clock();
        for record in self.sink.drain() {
            let event = match record {
                SinkRecord::Notify {
                    target,
                    notification,
                } => Event::Notification(NotificationEvent::new(target, notification, clock)),
                SinkRecord::AddBuff { target, buff } => Event::Icon(IconEvent::Added {
                    target,
                    buff,
                    clock,
                }),
                SinkRecord::RemoveBuff { target, icon } => Event::Icon(IconEvent::Removed {
                    target,
                    icon,
                    clock,
                }),
                SinkRecord::Harmful { caster, target } => {
                    Event::Lifecycle(LifecycleEvent::HarmfulAct {
                        caster,
                        target,
                        clock,
                    })
                }
                SinkRecord::Expired {
                    target,
                    instance,
                    reason,
                } => Event::Lifecycle(LifecycleEvent::Expired {
                    target,
                    instance,
                    reason,
                    clock,
                }),
            };
            self.event_bus.publish(event);
        }
    }
}
