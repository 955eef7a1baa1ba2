//! GraphQL-over-WebSocket sub-protocol selection.
//!
//! Exactly two sub-protocols exist, negotiated through the
//! `Sec-WebSocket-Protocol` request header. The choice is fixed when the
//! transport is constructed and carried as a typed value from then on --
//! nothing re-inspects headers per send.

use crate::message::MessageKind;

/// The negotiated GraphQL-over-WebSocket sub-protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WsProtocol {
    /// Legacy `graphql-ws` protocol: operations start with `start` and stop
    /// with `stop`.
    GraphqlWs,
    /// Modern `graphql-transport-ws` protocol: operations start with
    /// `subscribe` and stop with `complete`.
    GraphqlTransportWs,
}

impl WsProtocol {
    /// Value for the `Sec-WebSocket-Protocol` request header.
    #[must_use]
    pub const fn header_value(self) -> &'static str {
        match self {
            Self::GraphqlWs => "graphql-ws",
            Self::GraphqlTransportWs => "graphql-transport-ws",
        }
    }

    /// Message kind that starts an operation under this sub-protocol.
    #[must_use]
    pub const fn start_kind(self) -> MessageKind {
        match self {
            Self::GraphqlWs => MessageKind::Start,
            Self::GraphqlTransportWs => MessageKind::Subscribe,
        }
    }

    /// Message kind that stops an operation under this sub-protocol.
    #[must_use]
    pub const fn stop_kind(self) -> MessageKind {
        match self {
            Self::GraphqlWs => MessageKind::Stop,
            Self::GraphqlTransportWs => MessageKind::Complete,
        }
    }
}
