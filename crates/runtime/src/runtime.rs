//! High-level runtime orchestrator.
//!
//! The runtime owns the effect worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive the engine.

use std::env;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use effect_core::{EffectConfig, EffectState, EntitiesState, Tick};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, Topic};
use crate::workers::{Command, EffectWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub effect: EffectConfig,
    pub command_buffer_size: usize,
    pub event_buffer_size: usize,
    /// How often the worker pumps expiry timers from the wall clock.
    pub tick_interval: Duration,
}

impl RuntimeConfig {
    pub const DEFAULT_COMMAND_BUFFER: usize = 32;
    pub const DEFAULT_EVENT_BUFFER: usize = 100;
    pub const DEFAULT_TICK_MS: u64 = 100;

    /// Construct configuration from process environment variables.
    ///
    /// - `EFFECT_COMMAND_BUFFER` - Command queue size (default: 32)
    /// - `EFFECT_EVENT_BUFFER` - Per-topic event capacity (default: 100)
    /// - `EFFECT_TICK_MS` - Expiry pump interval in milliseconds (default: 100)
    ///
    /// Unset or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(capacity) = read_env::<usize>("EFFECT_COMMAND_BUFFER") {
            config.command_buffer_size = capacity.max(1);
        }

        if let Some(capacity) = read_env::<usize>("EFFECT_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }

        if let Some(millis) = read_env::<u64>("EFFECT_TICK_MS") {
            config.tick_interval = Duration::from_millis(millis.max(1));
        }

        config
    }

    #[must_use]
    pub fn with_effect(mut self, effect: EffectConfig) -> Self {
        self.effect = effect;
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            effect: EffectConfig::default(),
            command_buffer_size: Self::DEFAULT_COMMAND_BUFFER,
            event_buffer_size: Self::DEFAULT_EVENT_BUFFER,
            tick_interval: Duration::from_millis(Self::DEFAULT_TICK_MS),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Main runtime that hosts the effect engine
///
/// Design: Runtime owns the worker and coordinates shutdown.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to events from a specific topic
    pub fn subscribe(&self, topic: Topic) -> tokio::sync::broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Shutdown the runtime gracefully
    ///
    /// Every live instance is expired (modifiers reverted, icons cleared)
    /// before the worker exits. Returns how many were expired.
    pub async fn shutdown(self) -> Result<usize> {
        let expired = match self.handle.shutdown().await {
            Ok(expired) => expired,
            // Worker already gone; joining reports why.
            Err(RuntimeError::CommandChannelClosed | RuntimeError::ReplyChannelClosed(_)) => 0,
            Err(other) => return Err(other),
        };
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)?;

        Ok(expired)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    world: Option<EntitiesState>,
    start_clock: Tick,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            world: None,
            start_clock: Tick::ZERO,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide the initial world (empty if not set)
    pub fn world(mut self, world: EntitiesState) -> Self {
        self.world = Some(world);
        self
    }

    /// Start the engine clock somewhere other than zero
    pub fn start_clock(mut self, clock: Tick) -> Self {
        self.start_clock = clock;
        self
    }

    /// Build the runtime and spawn its worker
    ///
    /// Must be called from within a tokio runtime.
    pub fn build(self) -> Runtime {
        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let state = EffectState::new(self.config.effect).with_clock(self.start_clock);
        let worker = EffectWorker::new(
            state,
            self.world.unwrap_or_default(),
            command_rx,
            event_bus,
            self.config.tick_interval,
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Runtime {
            handle,
            worker_handle,
        }
    }
}
