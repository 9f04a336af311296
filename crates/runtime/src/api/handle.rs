//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! applying effects, querying the world or streaming events from specific
//! topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use effect_core::{
    ApplyError, ApplyOutcome, EffectInstance, EntitiesState, EntityId, InstanceId, Mobile, Tick,
};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Apply the effect from `caster` to `target`, refreshing any live instance.
    pub async fn apply(
        &self,
        caster: EntityId,
        target: EntityId,
        strength: f64,
    ) -> Result<ApplyOutcome> {
        self.request(|reply| Command::Apply {
            caster,
            target,
            strength,
            reply,
        })
        .await?
    }

    /// Apply the effect to each linked target in order.
    ///
    /// Per-target failures are returned in place and do not stop the rest.
    pub async fn propagate(
        &self,
        caster: EntityId,
        linked: Vec<EntityId>,
        strength: f64,
    ) -> Result<Vec<std::result::Result<ApplyOutcome, ApplyError>>> {
        self.request(|reply| Command::Propagate {
            caster,
            linked,
            strength,
            reply,
        })
        .await
    }

    /// Cleanse `target`. Returns false if it was not affected.
    pub async fn force_remove(&self, target: EntityId) -> Result<bool> {
        self.request(|reply| Command::ForceRemove { target, reply })
            .await
    }

    /// End one instance silently. Returns false if it had already ended.
    pub async fn expire_now(&self, instance: InstanceId) -> Result<bool> {
        self.request(|reply| Command::ExpireNow { instance, reply })
            .await
    }

    pub async fn is_affected(&self, target: EntityId) -> Result<bool> {
        self.request(|reply| Command::IsAffected { target, reply })
            .await
    }

    /// Snapshot of the live instance on `target`, if any.
    pub async fn instance(&self, target: EntityId) -> Result<Option<EffectInstance>> {
        self.request(|reply| Command::Instance { target, reply })
            .await
    }

    /// Add a mobile to the world, returning the one it replaced.
    ///
    /// A replaced mobile's instance is dropped as if the entity had left.
    pub async fn insert_entity(&self, mobile: Mobile) -> Result<Option<Mobile>> {
        self.request(|reply| Command::InsertEntity { mobile, reply })
            .await
    }

    /// Remove a mobile from the world; its instance is dropped without revert.
    pub async fn remove_entity(&self, target: EntityId) -> Result<Option<Mobile>> {
        self.request(|reply| Command::RemoveEntity { target, reply })
            .await
    }

    /// Query the current world (read-only snapshot)
    pub async fn query_world(&self) -> Result<EntitiesState> {
        self.request(|reply| Command::QueryWorld { reply }).await
    }

    /// Pump the engine clock to `to`, firing due expiries.
    ///
    /// The worker also advances on its own interval; the clock keeps the
    /// later of the two.
    pub async fn advance(&self, to: Tick) -> Result<usize> {
        self.request(|reply| Command::Advance { to, reply }).await
    }

    pub async fn clock(&self) -> Result<Tick> {
        self.request(|reply| Command::Clock { reply }).await
    }

    pub(crate) async fn shutdown(&self) -> Result<usize> {
        self.request(|reply| Command::Shutdown { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Notification` - Player-facing messages
    /// - `Topic::StatusIcon` - Icon adds and removals
    /// - `Topic::Lifecycle` - Applications, harmful acts and expiries
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use effect_runtime::Topic;
    ///
    /// let mut icons = handle.subscribe(Topic::StatusIcon);
    /// while let Ok(event) = icons.recv().await {
    ///     // Redraw the status bar
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
