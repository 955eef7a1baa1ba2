//! GraphQL subscription transport over WebSocket.
//!
//! This crate multiplexes many GraphQL operations -- subscriptions,
//! queries, mutations -- onto a single WebSocket connection under either of
//! the two GraphQL-over-WebSocket sub-protocols, and hands each caller a
//! stream of decoded results. Connection lifecycle, the pre-ack outbound
//! queue, reconnection with subscription replay, and keep-alive handling
//! are managed internally.
//!
//! # Architecture
//!
//! - **[`transport`]** - public facade and the worker task driving the
//!   connection state machine
//! - **[`message`]** - pure JSON codec for the wire envelope
//! - **[`queue`]** - integer-keyed pre-ack staging for outbound frames
//! - **[`registry`]** - operation id → result sink mapping, plus the
//!   subscribe frames retained for replay
//! - **[`socket`]** - the abstract WebSocket client the core drives
//! - **[`ws`]** - default socket client over `tokio-tungstenite`
//!
//! # Usage
//!
//! ```ignore
//! use graphql_ws_transport::{
//!     GraphQLOperation, SocketRequest, TransportConfig, TungsteniteClient,
//!     WebSocketTransport, WsProtocol,
//! };
//!
//! let client = TungsteniteClient::new(SocketRequest::new("wss://example.com/graphql"));
//! let transport = WebSocketTransport::new(
//!     Box::new(client),
//!     WsProtocol::GraphqlTransportWs,
//!     TransportConfig::default(),
//! );
//!
//! let mut ticks = transport.send(&GraphQLOperation::subscription(
//!     "subscription { tick }",
//! ))?;
//! while let Some(result) = ticks.recv().await {
//!     println!("tick: {:?}", result?);
//! }
//! # Ok::<(), graphql_ws_transport::TransportError>(())
//! ```

pub mod config;
pub mod error;
pub mod message;
pub mod operation;
pub mod protocol;
pub mod queue;
pub mod registry;
pub mod socket;
pub mod transport;
pub mod ws;

// Re-export commonly used types
pub use config::TransportConfig;
pub use error::TransportError;
pub use message::{MessageKind, WireMessage};
pub use operation::{
    DefaultRequestBodyCreator, GraphQLOperation, OperationIdGenerator, OperationKind,
    RequestBodyCreator, SequentialIdGenerator,
};
pub use protocol::WsProtocol;
pub use registry::{OperationResult, ResultReceiver};
pub use socket::{PingCompletion, SocketEvent, SocketRequest, WebSocketClient};
pub use transport::{
    ConnectionState, OperationHandle, TransportDelegate, WebSocketTransport, CLIENT_NAME_HEADER,
    CLIENT_VERSION_HEADER,
};
pub use ws::TungsteniteClient;
