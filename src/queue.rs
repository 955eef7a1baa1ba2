//! Pre-ack outbound message queue.
//!
//! Until the server acknowledges the connection handshake, every outbound
//! frame except `connection_init` and `pong` is staged here instead of being
//! written to the socket. Entries are keyed by integer rather than held in a
//! FIFO: subscription replay after a reconnect must be able to overwrite an
//! already-queued frame in place under its original key, so a frame that was
//! still pending when the socket dropped is not written twice.

use std::collections::BTreeMap;

/// Ordered, integer-keyed staging area for outbound frames.
#[derive(Debug, Default)]
pub struct OutboundQueue {
    entries: BTreeMap<u64, String>,
}

impl OutboundQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a frame under `key`, or under `max(existing) + 1` (1 when the
    /// queue is empty) if no key is given. Returns the key used. Passing an
    /// occupied key overwrites that entry in place.
    pub fn enqueue(&mut self, frame: String, key: Option<u64>) -> u64 {
        let key = key.unwrap_or_else(|| {
            self.entries
                .last_key_value()
                .map_or(1, |(max, _)| max + 1)
        });
        self.entries.insert(key, frame);
        key
    }

    /// Remove and return all entries in ascending key order.
    pub fn drain(&mut self) -> Vec<(u64, String)> {
        std::mem::take(&mut self.entries).into_iter().collect()
    }

    /// Key of the first entry whose frame equals `frame`, if any.
    #[must_use]
    pub fn find_key(&self, frame: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(_, staged)| staged.as_str() == frame)
            .map(|(key, _)| *key)
    }

    /// Discard every staged entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Whether nothing is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of staged entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
