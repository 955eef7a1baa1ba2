//! GraphQL-over-WebSocket wire messages and JSON codec.
//!
//! Every control and data frame on the socket is a UTF-8 text frame holding
//! one JSON envelope:
//!
//! ```text
//! { "id": "<string, optional>",
//!   "type": "<kind>",
//!   "payload": <object, optional> }
//! ```
//!
//! Outbound kinds: `connection_init`, `connection_terminate`, `start`,
//! `subscribe`, `stop`, `complete`, `ping`, `pong`.
//!
//! Inbound kinds: `data`, `next`, `error`, `complete`, `connection_ack`,
//! `ka` (keep-alive), `start_ack`, `pong`, `ping`, plus echoes of the
//! outbound kinds. Anything else fails the parse with
//! [`TransportError::UnprocessedMessage`] carrying the raw text.
//!
//! The codec is pure -- no I/O, no state -- so every branch is unit-testable
//! and the functions are safe to call from any task.

// Rust guideline compliant 2026-02

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TransportError;

/// Every message kind that can cross the socket, in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Client handshake, first frame after the socket opens.
    ConnectionInit,
    /// Client farewell, best-effort frame before teardown.
    ConnectionTerminate,
    /// Operation start under the legacy `graphql-ws` sub-protocol.
    Start,
    /// Operation start under the modern `graphql-transport-ws` sub-protocol.
    Subscribe,
    /// Operation stop under the legacy sub-protocol.
    Stop,
    /// Operation stop (outbound) or operation finished (inbound).
    Complete,
    /// GraphQL-level keep-alive probe.
    Ping,
    /// GraphQL-level keep-alive reply.
    Pong,
    /// Server result frame, legacy sub-protocol.
    Data,
    /// Server result frame, modern sub-protocol.
    Next,
    /// Server error frame addressed to one operation.
    Error,
    /// Server accepted the `connection_init` payload.
    ConnectionAck,
    /// Server rejected the connection.
    ConnectionError,
    /// Server keep-alive (`ka` on the wire).
    ConnectionKeepAlive,
    /// Server acknowledged an operation start.
    StartAck,
}

impl MessageKind {
    /// Wire string for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConnectionInit => "connection_init",
            Self::ConnectionTerminate => "connection_terminate",
            Self::Start => "start",
            Self::Subscribe => "subscribe",
            Self::Stop => "stop",
            Self::Complete => "complete",
            Self::Ping => "ping",
            Self::Pong => "pong",
            Self::Data => "data",
            Self::Next => "next",
            Self::Error => "error",
            Self::ConnectionAck => "connection_ack",
            Self::ConnectionError => "connection_error",
            Self::ConnectionKeepAlive => "ka",
            Self::StartAck => "start_ack",
        }
    }

    /// Map a wire string back to a kind. `None` for unknown types.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "connection_init" => Some(Self::ConnectionInit),
            "connection_terminate" => Some(Self::ConnectionTerminate),
            "start" => Some(Self::Start),
            "subscribe" => Some(Self::Subscribe),
            "stop" => Some(Self::Stop),
            "complete" => Some(Self::Complete),
            "ping" => Some(Self::Ping),
            "pong" => Some(Self::Pong),
            "data" => Some(Self::Data),
            "next" => Some(Self::Next),
            "error" => Some(Self::Error),
            "connection_ack" => Some(Self::ConnectionAck),
            "connection_error" => Some(Self::ConnectionError),
            "ka" => Some(Self::ConnectionKeepAlive),
            "start_ack" => Some(Self::StartAck),
            _ => None,
        }
    }
}

/// Serde shape of the wire envelope. Optional fields are omitted entirely
/// rather than serialized as `null`.
#[derive(Debug, Serialize, Deserialize)]
struct WireEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(rename = "type")]
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<Value>,
}

/// One decoded message: kind plus optional operation id and payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireMessage {
    /// Operation id this frame addresses, if any.
    pub id: Option<String>,
    /// Message kind.
    pub kind: MessageKind,
    /// JSON payload, if any.
    pub payload: Option<Value>,
}

impl WireMessage {
    /// Build a message for encoding.
    #[must_use]
    pub fn new(id: Option<String>, kind: MessageKind, payload: Option<Value>) -> Self {
        Self { id, kind, payload }
    }

    /// Encode into the JSON text frame written to the socket.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Parse`] if the payload cannot be serialized.
    pub fn encode(&self) -> Result<String, TransportError> {
        let envelope = WireEnvelope {
            id: self.id.clone(),
            kind: self.kind.as_str().to_string(),
            payload: self.payload.clone(),
        };
        serde_json::to_string(&envelope).map_err(|e| TransportError::Parse(e.to_string()))
    }

    /// Decode an inbound text frame.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Parse`] for malformed JSON or a missing
    /// `type` field, and [`TransportError::UnprocessedMessage`] (carrying the
    /// raw text) when the `type` value is not a recognized kind.
    pub fn parse(text: &str) -> Result<Self, TransportError> {
        let envelope: WireEnvelope =
            serde_json::from_str(text).map_err(|e| TransportError::Parse(e.to_string()))?;

        let kind = MessageKind::parse(&envelope.kind)
            .ok_or_else(|| TransportError::UnprocessedMessage(text.to_string()))?;

        Ok(Self {
            id: envelope.id,
            kind,
            payload: envelope.payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTBOUND_KINDS: [MessageKind; 8] = [
        MessageKind::ConnectionInit,
        MessageKind::ConnectionTerminate,
        MessageKind::Start,
        MessageKind::Subscribe,
        MessageKind::Stop,
        MessageKind::Complete,
        MessageKind::Ping,
        MessageKind::Pong,
    ];

    #[test]
    fn test_encode_connection_init_with_empty_payload() {
        let msg = WireMessage::new(
            None,
            MessageKind::ConnectionInit,
            Some(serde_json::json!({})),
        );
        assert_eq!(msg.encode().unwrap(), r#"{"type":"connection_init","payload":{}}"#);
    }

    #[test]
    fn test_encode_omits_absent_fields() {
        let msg = WireMessage::new(None, MessageKind::Pong, None);
        assert_eq!(msg.encode().unwrap(), r#"{"type":"pong"}"#);
    }

    #[test]
    fn test_encode_includes_id() {
        let msg = WireMessage::new(
            Some("1".to_string()),
            MessageKind::Subscribe,
            Some(serde_json::json!({"query": "subscription { tick }"})),
        );
        let text = msg.encode().unwrap();
        assert!(text.contains(r#""id":"1""#));
        assert!(text.contains(r#""type":"subscribe""#));
    }

    #[test]
    fn test_round_trip_every_outbound_kind() {
        for kind in OUTBOUND_KINDS {
            let msg = WireMessage::new(
                Some("7".to_string()),
                kind,
                Some(serde_json::json!({"k": "v"})),
            );
            let decoded = WireMessage::parse(&msg.encode().unwrap()).unwrap();
            assert_eq!(decoded, msg, "round trip failed for {kind:?}");
        }
    }

    #[test]
    fn test_parse_keep_alive_wire_string() {
        let decoded = WireMessage::parse(r#"{"type":"ka"}"#).unwrap();
        assert_eq!(decoded.kind, MessageKind::ConnectionKeepAlive);
        assert_eq!(decoded.id, None);
        assert_eq!(decoded.payload, None);
    }

    #[test]
    fn test_parse_unknown_type_carries_raw_text() {
        let raw = r#"{"type":"heartbeat","id":"3"}"#;
        match WireMessage::parse(raw) {
            Err(TransportError::UnprocessedMessage(text)) => assert_eq!(text, raw),
            other => panic!("expected UnprocessedMessage, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_malformed_json_is_parse_error() {
        assert!(matches!(
            WireMessage::parse("{not json"),
            Err(TransportError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_missing_type_is_parse_error() {
        assert!(matches!(
            WireMessage::parse(r#"{"id":"1","payload":{}}"#),
            Err(TransportError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_next_with_payload() {
        let decoded =
            WireMessage::parse(r#"{"id":"42","type":"next","payload":{"data":{"n":1}}}"#).unwrap();
        assert_eq!(decoded.kind, MessageKind::Next);
        assert_eq!(decoded.id.as_deref(), Some("42"));
        assert!(decoded.payload.is_some());
    }
}
