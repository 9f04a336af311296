//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

use super::types::{IconEvent, LifecycleEvent, NotificationEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Player-facing messages
    Notification,
    /// Status icon adds and removals
    StatusIcon,
    /// Applications, harmful acts and expiries
    Lifecycle,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Notification, Topic::StatusIcon, Topic::Lifecycle];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Notification(NotificationEvent),
    Icon(IconEvent),
    Lifecycle(LifecycleEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Notification(_) => Topic::Notification,
            Event::Icon(_) => Topic::StatusIcon,
            Event::Lifecycle(_) => Topic::Lifecycle,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about.
pub struct EventBus {
    channels: Arc<RwLock<HashMap<Topic, broadcast::Sender<Event>>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let channels = Topic::ALL
            .iter()
            .map(|&topic| (topic, broadcast::channel(capacity).0))
            .collect();

        Self {
            channels: Arc::new(RwLock::new(channels)),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();

        // Events are best-effort: skip rather than block the worker
        match self.channels.try_read() {
            Ok(channels) => {
                if let Some(tx) = channels.get(&topic)
                    && tx.send(event).is_err()
                {
                    tracing::trace!(target: "runtime::events", ?topic, "No subscribers for topic");
                }
            }
            Err(_) => {
                tracing::debug!(
                    target: "runtime::events",
                    ?topic,
                    "Failed to acquire event bus lock"
                );
            }
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        let channels = self
            .channels
            .try_read()
            .expect("Failed to acquire read lock on event channels");
        channels
            .get(&topic)
            .expect("Topic channel not initialized")
            .subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use effect_core::{EntityId, Notification, Tick};

    fn wore_off() -> Event {
        Event::Notification(NotificationEvent::new(
            EntityId(1),
            Notification::WoreOff,
            Tick(10),
        ))
    }

    #[tokio::test]
    async fn routes_events_by_topic() {
        let bus = EventBus::with_capacity(4);
        let mut notifications = bus.subscribe(Topic::Notification);
        let mut icons = bus.subscribe(Topic::StatusIcon);

        bus.publish(wore_off());

        assert_eq!(notifications.recv().await.unwrap(), wore_off());
        assert!(icons.try_recv().is_err());
    }

    #[test]
    fn publish_without_subscribers_is_silent() {
        EventBus::new().publish(wore_off());
    }

    #[test]
    fn notification_event_carries_message() {
        let Event::Notification(event) = wore_off() else {
            unreachable!();
        };
        assert_eq!(event.cliloc, Some(1_061_688));
        assert_eq!(event.message, "Your skin returns to normal.");
    }
}
