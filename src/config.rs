//! Transport configuration.

use std::time::Duration;

use serde_json::Value;

/// Configuration for a [`crate::WebSocketTransport`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Client name written to the `X-Client-Name` request header.
    pub client_name: Option<String>,
    /// Client version written to the `X-Client-Version` request header.
    pub client_version: Option<String>,
    /// Whether disconnects trigger a reconnection attempt.
    pub reconnect: bool,
    /// Delay before a reconnection attempt.
    pub reconnection_interval: Duration,
    /// When false, subscription replay reuses the queue key of an identical
    /// already-queued subscribe frame instead of staging a duplicate.
    pub allow_sending_duplicates: bool,
    /// Connect as soon as the transport is constructed.
    pub connect_on_init: bool,
    /// Payload for the `connection_init` handshake frame.
    pub connecting_payload: Option<Value>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            client_name: None,
            client_version: None,
            reconnect: true,
            reconnection_interval: Duration::from_millis(500),
            allow_sending_duplicates: true,
            connect_on_init: true,
            connecting_payload: Some(Value::Object(serde_json::Map::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TransportConfig::default();
        assert!(config.reconnect);
        assert_eq!(config.reconnection_interval, Duration::from_millis(500));
        assert!(config.allow_sending_duplicates);
        assert!(config.connect_on_init);
        assert_eq!(
            config.connecting_payload,
            Some(Value::Object(serde_json::Map::new()))
        );
    }
}
