//! Transport error taxonomy.
//!
//! Errors are `Clone` because a single connection-level failure fans out to
//! every registered subscriber sink, and the most recent network error is
//! additionally retained on the transport (the "sticky" error) until the next
//! successful connect.

use std::fmt;

/// Errors surfaced by the transport, either as a `send` failure or through a
/// per-operation result sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// An inbound frame could not be mapped to a known message kind, or a
    /// required field was missing. Carries the raw frame text.
    UnprocessedMessage(String),
    /// A well-formed `data`/`next`/`error` frame addressed an operation but
    /// carried neither a payload nor an error.
    NeitherErrorNorPayloadReceived,
    /// The socket disconnected with an error.
    Network(String),
    /// Malformed JSON or a broken message envelope.
    Parse(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnprocessedMessage(raw) => write!(f, "Unprocessed message: {raw}"),
            Self::NeitherErrorNorPayloadReceived => {
                write!(f, "Neither error nor payload received")
            }
            Self::Network(msg) => write!(f, "Network error: {msg}"),
            Self::Parse(msg) => write!(f, "Parse error: {msg}"),
        }
    }
}

impl std::error::Error for TransportError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_raw_text() {
        let err = TransportError::UnprocessedMessage("{\"type\":\"nope\"}".to_string());
        assert!(err.to_string().contains("{\"type\":\"nope\"}"));
    }

    #[test]
    fn test_errors_are_cloneable_for_broadcast() {
        let err = TransportError::Network("connection reset".to_string());
        let copy = err.clone();
        assert_eq!(err, copy);
    }
}
