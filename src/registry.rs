//! Per-operation subscriber registry.
//!
//! Two keyed mappings behind one mutating boundary:
//!
//! - `subscribers`: operation id → result sink, for every in-flight
//!   operation.
//! - `subscriptions`: operation id → serialized subscribe frame, kept only
//!   for operations whose GraphQL type is `subscription`. Used solely to
//!   replay the subscribe frames after a reconnect, so these records must
//!   survive socket drops.
//!
//! Both maps are mutex-guarded so they can be read from any thread while the
//! connection worker mutates them.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use serde_json::Value;
use tokio::sync::mpsc;

use crate::error::TransportError;

/// One decoded result delivered to an operation's sink: a JSON payload on
/// success, a [`TransportError`] on failure.
pub type OperationResult = Result<Value, TransportError>;

/// Receiving end of an operation's result stream. The stream ends (yields
/// `None`) when the operation's subscriber record is removed.
pub type ResultReceiver = mpsc::UnboundedReceiver<OperationResult>;

type ResultSink = mpsc::UnboundedSender<OperationResult>;

/// Registry of result sinks and replayable subscribe frames.
#[derive(Debug, Default)]
pub struct SubscriberRegistry {
    subscribers: Mutex<HashMap<String, ResultSink>>,
    // BTreeMap so replay iterates in ascending id order.
    subscriptions: Mutex<BTreeMap<String, String>>,
}

impl SubscriberRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subscriber record for `id`. When `subscribe_frame` is given the
    /// operation is a subscription and the frame is retained for replay.
    pub fn register(&self, id: &str, sink: ResultSink, subscribe_frame: Option<String>) {
        self.subscribers
            .lock()
            .expect("subscribers lock poisoned")
            .insert(id.to_string(), sink);
        if let Some(frame) = subscribe_frame {
            self.subscriptions
                .lock()
                .expect("subscriptions lock poisoned")
                .insert(id.to_string(), frame);
        }
    }

    /// Deliver `result` to the sink registered for `id`.
    ///
    /// A missing id is silently ignored -- the subscriber may have already
    /// unsubscribed while this frame was in flight.
    pub fn dispatch(&self, id: &str, result: OperationResult) {
        let subscribers = self.subscribers.lock().expect("subscribers lock poisoned");
        if let Some(sink) = subscribers.get(id) {
            let _ = sink.send(result);
        } else {
            log::debug!("[GraphQLWs] Dropping result for unknown operation id {id}");
        }
    }

    /// Handle a server `complete` for `id`: remove the subscriber only when
    /// the operation is not a subscription. The client, not the server,
    /// decides when a subscription ends; for a one-shot operation `complete`
    /// means the operation is done and its sink is dropped (ending the
    /// caller's result stream).
    pub fn complete_if_one_shot(&self, id: &str) {
        let subscriptions = self
            .subscriptions
            .lock()
            .expect("subscriptions lock poisoned");
        if subscriptions.contains_key(id) {
            return;
        }
        drop(subscriptions);
        self.subscribers
            .lock()
            .expect("subscribers lock poisoned")
            .remove(id);
    }

    /// Remove `id` from both maps. Returns whether a subscriber record
    /// actually existed, so a repeated unsubscribe can stay wire-silent.
    pub fn remove(&self, id: &str) -> bool {
        let existed = self
            .subscribers
            .lock()
            .expect("subscribers lock poisoned")
            .remove(id)
            .is_some();
        self.subscriptions
            .lock()
            .expect("subscriptions lock poisoned")
            .remove(id);
        existed
    }

    /// Deliver `error` to every registered sink. No records are removed, so
    /// the operations can resume after a reconnect.
    pub fn broadcast_error(&self, error: TransportError) {
        let subscribers = self.subscribers.lock().expect("subscribers lock poisoned");
        for sink in subscribers.values() {
            let _ = sink.send(Err(error.clone()));
        }
    }

    /// All retained subscribe frames, in ascending operation-id order.
    #[must_use]
    pub fn replay_frames(&self) -> Vec<String> {
        self.subscriptions
            .lock()
            .expect("subscriptions lock poisoned")
            .values()
            .cloned()
            .collect()
    }

    /// Drop every subscription record (the subscriber records stay).
    pub fn clear_subscriptions(&self) {
        self.subscriptions
            .lock()
            .expect("subscriptions lock poisoned")
            .clear();
    }

    /// Whether `id` currently has a subscriber record.
    #[must_use]
    pub fn has_subscriber(&self, id: &str) -> bool {
        self.subscribers
            .lock()
            .expect("subscribers lock poisoned")
            .contains_key(id)
    }

    /// Number of registered subscriber records.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .expect("subscribers lock poisoned")
            .len()
    }

    /// Number of retained subscription records.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.subscriptions
            .lock()
            .expect("subscriptions lock poisoned")
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_one_shot(registry: &SubscriberRegistry, id: &str) -> ResultReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        registry.register(id, tx, None);
        rx
    }

    fn register_subscription(registry: &SubscriberRegistry, id: &str) -> ResultReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        registry.register(id, tx, Some(format!("subscribe-frame-{id}")));
        rx
    }

    #[test]
    fn test_dispatch_reaches_registered_sink() {
        let registry = SubscriberRegistry::new();
        let mut rx = register_one_shot(&registry, "1");

        registry.dispatch("1", Ok(serde_json::json!({"n": 1})));

        assert_eq!(rx.try_recv().unwrap(), Ok(serde_json::json!({"n": 1})));
    }

    #[test]
    fn test_dispatch_unknown_id_is_ignored() {
        let registry = SubscriberRegistry::new();
        // Must not panic.
        registry.dispatch("missing", Ok(serde_json::json!({})));
    }

    #[test]
    fn test_complete_removes_one_shot_but_not_subscription() {
        let registry = SubscriberRegistry::new();
        let _query_rx = register_one_shot(&registry, "q");
        let _sub_rx = register_subscription(&registry, "s");

        registry.complete_if_one_shot("q");
        registry.complete_if_one_shot("s");

        assert!(!registry.has_subscriber("q"));
        assert!(registry.has_subscriber("s"));
    }

    #[test]
    fn test_remove_clears_both_maps_and_reports_existence() {
        let registry = SubscriberRegistry::new();
        let _rx = register_subscription(&registry, "s");

        assert!(registry.remove("s"));
        assert!(!registry.has_subscriber("s"));
        assert_eq!(registry.subscription_count(), 0);
        // Second removal reports nothing was there.
        assert!(!registry.remove("s"));
    }

    #[test]
    fn test_broadcast_error_reaches_everyone_and_removes_nobody() {
        let registry = SubscriberRegistry::new();
        let mut rx_a = register_subscription(&registry, "a");
        let mut rx_b = register_one_shot(&registry, "b");

        registry.broadcast_error(TransportError::Network("gone".to_string()));

        assert_eq!(
            rx_a.try_recv().unwrap(),
            Err(TransportError::Network("gone".to_string()))
        );
        assert_eq!(
            rx_b.try_recv().unwrap(),
            Err(TransportError::Network("gone".to_string()))
        );
        assert_eq!(registry.subscriber_count(), 2);
    }

    #[test]
    fn test_replay_frames_ascending_by_id() {
        let registry = SubscriberRegistry::new();
        let _rx2 = register_subscription(&registry, "2");
        let _rx1 = register_subscription(&registry, "1");
        let _rx3 = register_subscription(&registry, "3");

        assert_eq!(
            registry.replay_frames(),
            vec![
                "subscribe-frame-1".to_string(),
                "subscribe-frame-2".to_string(),
                "subscribe-frame-3".to_string()
            ]
        );
    }

    #[test]
    fn test_clear_subscriptions_keeps_subscribers() {
        let registry = SubscriberRegistry::new();
        let _rx = register_subscription(&registry, "s");

        registry.clear_subscriptions();

        assert_eq!(registry.subscription_count(), 0);
        assert!(registry.has_subscriber("s"));
    }

    #[test]
    fn test_removed_sink_ends_result_stream() {
        let registry = SubscriberRegistry::new();
        let mut rx = register_one_shot(&registry, "q");

        registry.dispatch("q", Ok(serde_json::json!({"done": true})));
        registry.complete_if_one_shot("q");

        assert!(rx.try_recv().is_ok());
        // Sink dropped -- stream reports disconnect rather than empty.
        assert!(matches!(
            rx.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected)
        ));
    }
}
