//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`RegistryEvent`]s. It is
//! shared via `Arc<EventBus>` between the registry and its observers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

use foundrytrack_core::types::PatternId;

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

/// A scan added one use to a pattern.
pub const EVENT_USAGE_INCREMENTED: &str = "pattern.usage_incremented";
/// A pattern's derived status changed.
pub const EVENT_STATUS_CHANGED: &str = "pattern.status_changed";
/// A maintenance log was recorded.
pub const EVENT_MAINTENANCE_LOGGED: &str = "maintenance.logged";

// ---------------------------------------------------------------------------
// RegistryEvent
// ---------------------------------------------------------------------------

/// A change that happened inside the pattern registry.
///
/// Constructed via [`RegistryEvent::new`] and enriched with
/// [`for_pattern`](RegistryEvent::for_pattern) and
/// [`with_payload`](RegistryEvent::with_payload).
#[derive(Debug, Clone, Serialize)]
pub struct RegistryEvent {
    /// Dot-separated event name, e.g. `"maintenance.logged"`.
    pub event_type: String,

    /// The pattern the event concerns, when there is one.
    pub pattern_id: Option<PatternId>,

    /// Event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl RegistryEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            pattern_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    pub fn for_pattern(mut self, pattern_id: impl Into<PatternId>) -> Self {
        self.pattern_id = Some(pattern_id.into());
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus.
///
/// Publishing is synchronous, so the registry can notify from plain method
/// calls. Receivers may `recv().await` or drain with `try_recv()`.
///
/// ```rust
/// use foundrytrack_events::bus::{EventBus, RegistryEvent, EVENT_MAINTENANCE_LOGGED};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(RegistryEvent::new(EVENT_MAINTENANCE_LOGGED));
/// assert_eq!(rx.try_recv().unwrap().event_type, EVENT_MAINTENANCE_LOGGED);
/// ```
pub struct EventBus {
    sender: broadcast::Sender<RegistryEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest unread events are dropped and slow
    /// receivers observe `Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: RegistryEvent) {
        tracing::debug!(event_type = %event.event_type, "Publishing registry event");
        // A send error only means nobody is listening.
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let event = RegistryEvent::new(EVENT_USAGE_INCREMENTED)
            .for_pattern("PTN002")
            .with_payload(serde_json::json!({"usageCount": 53}));

        bus.publish(event);

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.event_type, EVENT_USAGE_INCREMENTED);
        assert_eq!(received.pattern_id.as_deref(), Some("PTN002"));
        assert_eq!(received.payload["usageCount"], 53);
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(RegistryEvent::new(EVENT_MAINTENANCE_LOGGED));

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");
        assert_eq!(e1.event_type, EVENT_MAINTENANCE_LOGGED);
        assert_eq!(e2.event_type, EVENT_MAINTENANCE_LOGGED);
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        bus.publish(RegistryEvent::new(EVENT_STATUS_CHANGED));
    }

    #[test]
    fn try_recv_drains_without_a_runtime() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();
        bus.publish(RegistryEvent::new(EVENT_USAGE_INCREMENTED));
        bus.publish(RegistryEvent::new(EVENT_STATUS_CHANGED));

        assert_eq!(rx.try_recv().unwrap().event_type, EVENT_USAGE_INCREMENTED);
        assert_eq!(rx.try_recv().unwrap().event_type, EVENT_STATUS_CHANGED);
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn default_event_has_empty_optional_fields() {
        let event = RegistryEvent::new("bare.event");
        assert!(event.pattern_id.is_none());
        assert!(event.payload.is_object());
    }
}
