use marquee_catalog::{Ticket, User};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tracing::trace;

/// Cross-screen domain events.
#[derive(Debug, Clone)]
pub enum AppEvent {
    UserUpdated(User),
    TicketPurchased(Ticket),
    TicketCancelled(Ticket),
    FavoriteMovieAdded(String),
    FavoriteMovieRemoved(String),
    FavoriteCinemaAdded(String),
    FavoriteCinemaRemoved(String),
    SwitchToTicketsTab,
}

/// In-process event bus. Publish is fire-and-forget; subscribers get
/// at-most-once delivery while subscribed and nothing that was published
/// before they subscribed.
///
/// Constructed and injected explicitly — there is no process-wide instance.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<AppEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn publish(&self, event: AppEvent) {
        // Err only means no live subscribers, which fire-and-forget allows.
        if self.tx.send(event).is_err() {
            trace!("event dropped, no subscribers");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.tx.subscribe()
    }

    /// Subscription as a `Stream`, for callers driving a select loop. Lagged
    /// slots surface as stream errors, matching the receiver's semantics.
    pub fn subscribe_stream(&self) -> BroadcastStream<AppEvent> {
        BroadcastStream::new(self.tx.subscribe())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_published_event() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(AppEvent::FavoriteMovieAdded("m1".into()));

        match rx.recv().await.unwrap() {
            AppEvent::FavoriteMovieAdded(id) => assert_eq!(id, "m1"),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_a_no_op() {
        let bus = EventBus::new(4);
        bus.publish(AppEvent::SwitchToTicketsTab);
    }

    #[tokio::test]
    async fn stream_subscription_yields_events() {
        use tokio_stream::StreamExt;

        let bus = EventBus::default();
        let mut stream = bus.subscribe_stream();

        bus.publish(AppEvent::FavoriteMovieRemoved("m2".into()));

        match stream.next().await {
            Some(Ok(AppEvent::FavoriteMovieRemoved(id))) => assert_eq!(id, "m2"),
            other => panic!("unexpected stream item: {other:?}"),
        }
    }

    #[tokio::test]
    async fn late_subscribers_miss_earlier_events() {
        let bus = EventBus::default();
        bus.publish(AppEvent::FavoriteCinemaAdded("c1".into()));

        let mut rx = bus.subscribe();
        bus.publish(AppEvent::SwitchToTicketsTab);

        assert!(matches!(
            rx.recv().await.unwrap(),
            AppEvent::SwitchToTicketsTab
        ));
    }
}
