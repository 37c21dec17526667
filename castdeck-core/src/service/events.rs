//! Outward event fan-out
//!
//! Sessions publish [`SessionEvent`]s to an [`EventSink`]. Publishing is
//! best-effort and never fails the command that produced the event.

use tokio::sync::broadcast;
use tracing::debug;

use crate::models::SessionEvent;

/// Destination for session events (dashboard, viewer overlay, archival)
pub trait EventSink: Send + Sync {
    fn publish(&self, event: SessionEvent);
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn publish(&self, _event: SessionEvent) {}
}

/// In-process fan-out over a tokio broadcast channel
#[derive(Debug, Clone)]
pub struct BroadcastEventSink {
    sender: broadcast::Sender<SessionEvent>,
}

impl BroadcastEventSink {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl EventSink for BroadcastEventSink {
    fn publish(&self, event: SessionEvent) {
        let event_type = event.event_type();
        let session_id = event.session_id().clone();

        match self.sender.send(event) {
            Ok(receivers) => {
                debug!(
                    session_id = %session_id,
                    event_type,
                    receivers,
                    "Event published"
                );
            }
            Err(_) => {
                debug!(
                    session_id = %session_id,
                    event_type,
                    "Event dropped, no subscribers"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Notice, SessionId};

    fn notice_event() -> SessionEvent {
        SessionEvent::NoticeSent {
            session_id: SessionId::from("s1"),
            notice: Notice::new("hello".into()),
        }
    }

    #[tokio::test]
    async fn test_broadcast_sink_delivers_to_subscribers() {
        let sink = BroadcastEventSink::new(8);
        let mut first = sink.subscribe();
        let mut second = sink.subscribe();

        sink.publish(notice_event());

        assert_eq!(first.recv().await.unwrap().event_type(), "notice_sent");
        assert_eq!(second.recv().await.unwrap().event_type(), "notice_sent");
    }

    #[test]
    fn test_publish_without_subscribers_is_harmless() {
        let sink = BroadcastEventSink::new(8);
        assert_eq!(sink.receiver_count(), 0);
        sink.publish(notice_event());
        NoopEventSink.publish(notice_event());
    }
}
