//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is designed to be shared via `Arc<EventBus>`.

use chrono::{DateTime, Utc};
use pollbox_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// PollEvent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollEventKind {
    VoteCast,
    PollUpdated,
    PollDeleted,
}

impl PollEventKind {
    /// Dot-separated name used in logs, e.g. `"poll.vote_cast"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PollEventKind::VoteCast => "poll.vote_cast",
            PollEventKind::PollUpdated => "poll.updated",
            PollEventKind::PollDeleted => "poll.deleted",
        }
    }
}

/// A change to a single poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollEvent {
    pub kind: PollEventKind,
    pub poll_id: DbId,
    /// The user that caused the change; `None` for anonymous voters.
    pub actor_user_id: Option<DbId>,
    pub timestamp: DateTime<Utc>,
}

impl PollEvent {
    pub fn new(kind: PollEventKind, poll_id: DbId) -> Self {
        Self {
            kind,
            poll_id,
            actor_user_id: None,
            timestamp: Utc::now(),
        }
    }

    pub fn vote_cast(poll_id: DbId) -> Self {
        Self::new(PollEventKind::VoteCast, poll_id)
    }

    pub fn updated(poll_id: DbId) -> Self {
        Self::new(PollEventKind::PollUpdated, poll_id)
    }

    pub fn deleted(poll_id: DbId) -> Self {
        Self::new(PollEventKind::PollDeleted, poll_id)
    }

    /// Attach the acting user to the event.
    pub fn with_actor(mut self, user_id: Option<DbId>) -> Self {
        self.actor_user_id = user_id;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Every subscriber independently receives every published [`PollEvent`].
///
/// ```rust
/// use pollbox_events::bus::{EventBus, PollEvent};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(PollEvent::vote_cast(1));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<PollEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest unread events are dropped and slow
    /// receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// With no subscribers the event is dropped.
    pub fn publish(&self, event: PollEvent) {
        tracing::trace!(
            event = event.kind.as_str(),
            poll_id = event.poll_id,
            "Publishing poll event"
        );
        // A SendError only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PollEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
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

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(PollEvent::vote_cast(42).with_actor(Some(7)));

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.kind, PollEventKind::VoteCast);
        assert_eq!(received.poll_id, 42);
        assert_eq!(received.actor_user_id, Some(7));
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(PollEvent::deleted(3));

        assert_eq!(rx1.recv().await.unwrap().kind, PollEventKind::PollDeleted);
        assert_eq!(rx2.recv().await.unwrap().poll_id, 3);
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        bus.publish(PollEvent::updated(1));
    }

    #[test]
    fn event_kind_serializes_snake_case() {
        let json = serde_json::to_value(PollEvent::vote_cast(1)).unwrap();
        assert_eq!(json["kind"], "vote_cast");
        assert!(json["actor_user_id"].is_null());
    }
}
