use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use super::events::StoreEvent;

/// Event bus for distributing store change notifications
#[derive(Debug, Clone)]
pub struct EventBus {
    /// Per-collection event channels: collection name -> sender
    channels: Arc<RwLock<HashMap<String, broadcast::Sender<StoreEvent>>>>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Creates a new event bus with no channels yet
    pub fn new() -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Emits an event to all subscribers of its collection
    pub async fn emit(&self, event: StoreEvent) {
        let collection = event.collection();
        let channels = self.channels.read().await;

        if let Some(sender) = channels.get(collection) {
            match sender.send(event) {
                Ok(receiver_count) => {
                    debug!(
                        collection = %collection,
                        receivers = receiver_count,
                        "Store event emitted"
                    );
                }
                Err(_) => {
                    debug!(collection = %collection, "Store event emitted with no receivers");
                }
            }
        } else {
            debug!(collection = %collection, "No channel found - creating one");
            drop(channels);

            // Create the collection channel if it doesn't exist
            let mut channels = self.channels.write().await;
            let (sender, _) = broadcast::channel(100); // Channel capacity
            channels.insert(collection.to_string(), sender.clone());

            // Try to send again
            if sender.send(event).is_err() {
                debug!(collection = %collection, "Store event sent to new channel with no receivers");
            }
        }
    }

    /// Subscribe to change notifications for a collection
    pub async fn subscribe(&self, collection: &str) -> broadcast::Receiver<StoreEvent> {
        let channels = self.channels.read().await;

        if let Some(sender) = channels.get(collection) {
            sender.subscribe()
        } else {
            debug!(collection = %collection, "Creating new channel for subscription");
            drop(channels);

            // Create the collection channel if it doesn't exist
            let mut channels = self.channels.write().await;
            let (sender, _) = broadcast::channel(100); // Channel capacity
            let receiver = sender.subscribe();
            channels.insert(collection.to_string(), sender);
            receiver
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::collections;

    #[tokio::test]
    async fn test_subscriber_receives_emitted_event() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe(collections::PLAYERS).await;

        bus.emit(StoreEvent::RosterReplaced { players: vec![] }).await;

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type(), "roster_replaced");
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let bus = EventBus::new();
        let mut players_rx = bus.subscribe(collections::PLAYERS).await;
        let mut matches_rx = bus.subscribe(collections::MATCHES).await;

        bus.emit(StoreEvent::MatchesReplaced { matches: vec![] })
            .await;

        let event = matches_rx.recv().await.unwrap();
        assert_eq!(event.collection(), collections::MATCHES);

        // The players channel saw nothing
        assert!(matches!(
            players_rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn test_emit_without_subscribers_does_not_block() {
        let bus = EventBus::new();
        bus.emit(StoreEvent::CurrentMatchReplaced { record: None })
            .await;

        // A late subscriber only sees events emitted after subscribing
        let mut rx = bus.subscribe(collections::CURRENT_MATCH).await;
        bus.emit(StoreEvent::CurrentMatchReplaced { record: None })
            .await;
        assert!(rx.recv().await.is_ok());
    }
}
