use crate::relay::ServerEvent;
use tokio::sync::broadcast;
use tracing::debug;

/// The single "all clients" topic.
///
/// Every published event reaches every subscriber. Publishing never waits: a subscriber that
/// falls more than `capacity` events behind gets `RecvError::Lagged` and must re-bootstrap.
#[derive(Debug, Clone)]
pub struct EventHub {
    tx: broadcast::Sender<ServerEvent>,
}

impl EventHub {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Fans `event` out to every current subscriber and returns how many there were.
    pub fn publish(&self, event: ServerEvent) -> usize {
        let name = event.name();
        // Err only means nobody is connected right now.
        let receivers = self.tx.send(event).unwrap_or(0);
        debug!(event = name, receivers, "Published");
        receivers
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
