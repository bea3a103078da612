//! In-process change notification.
//!
//! Mutating services publish a [`ChangeEvent`] after every successful write;
//! interested parties (dashboard pollers, test harnesses) subscribe and
//! re-run their fetch and aggregation. Aggregation code itself never touches
//! the bus, so it stays pure.

use log::debug;
use tokio::sync::broadcast;

/// Logical collection a change happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    AgeGroups,
    Stock,
    Donations,
    Usage,
    Purchases,
    Profiles,
    PageSettings,
    Reminders,
    Users,
}

/// What kind of change occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOp {
    Created,
    Updated,
    Deleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    pub collection: Collection,
    pub op: ChangeOp,
}

/// Broadcast bus for change events.
///
/// Publishing never fails the mutation: a bus with no subscribers simply
/// drops the event, and lagged receivers are the subscriber's problem.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ChangeEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(64);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, collection: Collection, op: ChangeOp) {
        let event = ChangeEvent { collection, op };
        debug!("Publishing change event: {:?}", event);
        // Err here only means nobody is listening right now.
        let _ = self.sender.send(event);
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

    #[tokio::test]
    async fn test_subscriber_receives_published_event() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.publish(Collection::Donations, ChangeOp::Created);

        let event = rx.recv().await.expect("event should arrive");
        assert_eq!(event.collection, Collection::Donations);
        assert_eq!(event.op, ChangeOp::Created);
    }

    #[test]
    fn test_publish_without_subscribers_does_not_panic() {
        let bus = EventBus::new();
        bus.publish(Collection::Stock, ChangeOp::Updated);
    }
}
