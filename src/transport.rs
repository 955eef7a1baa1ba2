//! GraphQL subscription transport over a single WebSocket connection.
//!
//! Multiplexes many long-lived GraphQL operations (subscriptions, queries,
//! mutations) onto one bidirectional socket under either GraphQL-over-
//! WebSocket sub-protocol, and surfaces per-operation result streams while
//! managing connection lifecycle, reconnection, message ordering, and
//! pre-ack back-pressure.
//!
//! # Architecture
//!
//! ```text
//!   WebSocketTransport            OperationHandle ("1")
//!         │                              │
//!         │  send(operation)             │  recv() → payload / error
//!         │ ──────────────────────────►  │
//!         │                      OperationHandle ("2")
//!         │  commands (mpsc)             │
//!         ▼                              │
//!   Background worker task              ...
//!   (socket events, ack state,
//!    outbound queue, reconnect,
//!    subscription replay)
//! ```
//!
//! All mutating work runs on one worker task that owns the socket client,
//! the pre-ack outbound queue, and the sub-protocol. Facade calls become
//! commands over an unbounded channel, so frames submitted by one caller
//! are written (or staged) in submission order. Connection state, the ack
//! flag, the sticky error, and the subscriber maps are shared behind
//! atomics and mutexes so they stay readable from any thread.
//!
//! # Protocol
//!
//! - On socket connect, `connection_init` is written immediately (the only
//!   frame beside `pong` allowed to bypass the queue before the server's
//!   `connection_ack`); everything else staged until the ack drains it.
//! - On reconnect, every active subscription's subscribe frame is staged
//!   again; with duplicate sends disabled, a frame still sitting in the
//!   queue is overwritten in place under its original key.
//! - Server `complete` ends one-shot operations only; the client decides
//!   when a subscription ends.
//! - A disconnect with an error fails every sink once, latches the error on
//!   the transport until the next successful connect, and moves the state
//!   machine to `Failed` so repeated socket errors cannot cascade.

// Rust guideline compliant 2026-02

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;
use tokio::sync::mpsc;

use crate::config::TransportConfig;
use crate::error::TransportError;
use crate::message::{MessageKind, WireMessage};
use crate::operation::{
    DefaultRequestBodyCreator, GraphQLOperation, OperationIdGenerator, RequestBodyCreator,
    SequentialIdGenerator,
};
use crate::protocol::WsProtocol;
use crate::queue::OutboundQueue;
use crate::registry::{OperationResult, ResultReceiver, SubscriberRegistry};
use crate::socket::{PingCompletion, SocketEvent, WebSocketClient};

/// Header carrying the configured client name.
pub const CLIENT_NAME_HEADER: &str = "X-Client-Name";
/// Header carrying the configured client version.
pub const CLIENT_VERSION_HEADER: &str = "X-Client-Version";

/// Forced socket timeout used by [`WebSocketTransport::pause`].
const PAUSE_DISCONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Socket-level connection state. Orthogonal to the handshake ack, which is
/// tracked separately: a socket may be `Connected` while still awaiting the
/// server's `connection_ack`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No open socket.
    Disconnected,
    /// Socket open (ack state tracked separately).
    Connected,
    /// Socket dropped with an error; further socket errors are absorbed
    /// without re-running disconnection handling.
    Failed,
}

/// Lifecycle notifications delivered from the worker task.
///
/// The three lifecycle methods are required; the ping/pong observers are
/// explicitly optional and default to doing nothing.
pub trait TransportDelegate: Send + Sync {
    /// The first connection of this transport's lifetime is up.
    fn did_connect(&self);
    /// Any subsequent connection is up (subscriptions have been replayed).
    fn did_reconnect(&self);
    /// The socket closed; `Some` for abnormal closes.
    fn did_disconnect(&self, error: Option<&TransportError>);
    /// A native ping frame arrived.
    fn received_ping(&self, _data: &[u8]) {}
    /// A native pong frame arrived.
    fn received_pong(&self, _data: &[u8]) {}
}

/// Caller's end of one operation: its id plus the result stream.
#[derive(Debug)]
pub struct OperationHandle {
    id: String,
    results: ResultReceiver,
}

impl OperationHandle {
    /// The operation id assigned by the transport.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Wait for the next result. `None` once the operation is complete
    /// (one-shot finished, unsubscribed, or transport torn down).
    pub async fn recv(&mut self) -> Option<OperationResult> {
        self.results.recv().await
    }

    /// Non-blocking poll for the next result. `None` when nothing is
    /// pending right now.
    pub fn try_recv(&mut self) -> Option<OperationResult> {
        self.results.try_recv().ok()
    }
}

// ─── Shared observable state ───────────────────────────────────────────────

/// Fields readable from arbitrary threads without going through the worker.
#[derive(Debug)]
struct Shared {
    state: Mutex<ConnectionState>,
    acked: AtomicBool,
    reconnect: AtomicBool,
    reconnected: AtomicBool,
    last_error: Mutex<Option<TransportError>>,
    registry: SubscriberRegistry,
}

impl Shared {
    fn new(reconnect: bool) -> Self {
        Self {
            state: Mutex::new(ConnectionState::Disconnected),
            acked: AtomicBool::new(false),
            reconnect: AtomicBool::new(reconnect),
            reconnected: AtomicBool::new(false),
            last_error: Mutex::new(None),
            registry: SubscriberRegistry::new(),
        }
    }

    fn state(&self) -> ConnectionState {
        *self.state.lock().expect("state lock poisoned")
    }

    fn set_state(&self, state: ConnectionState) {
        *self.state.lock().expect("state lock poisoned") = state;
    }

    fn last_error(&self) -> Option<TransportError> {
        self.last_error
            .lock()
            .expect("last_error lock poisoned")
            .clone()
    }

    fn set_last_error(&self, error: Option<TransportError>) {
        *self.last_error.lock().expect("last_error lock poisoned") = error;
    }
}

// ─── Worker commands ───────────────────────────────────────────────────────

/// Commands from the facade to the worker task.
enum Command {
    /// Open the socket (resetting `Failed` back to `Disconnected` first).
    Connect,
    /// Write a frame, staging it while the handshake is unacknowledged.
    Write(String),
    /// Stop reconnecting, send a best-effort `connection_terminate`, and
    /// drop the queue and subscription records.
    Close,
    /// Stop reconnecting and disconnect with a forced timeout.
    Pause,
    /// Reconfigure auto-reconnect and connect.
    Resume { auto_reconnect: bool },
    /// Forward a native ping to the socket.
    NativePing {
        data: Vec<u8>,
        completion: Option<PingCompletion>,
    },
    /// Replace request headers; optionally bounce the socket.
    UpdateHeaders {
        headers: Vec<(String, String)>,
        reconnect_if_connected: bool,
    },
    /// Replace the `connection_init` payload; optionally bounce the socket.
    UpdateConnectingPayload {
        payload: Option<Value>,
        reconnect_if_connected: bool,
    },
    /// Tear down: detach the socket delegate, disconnect, drop the queue.
    Shutdown,
}

enum CommandOutcome {
    Continue,
    Shutdown,
}

// ─── Worker ────────────────────────────────────────────────────────────────

/// Owns the socket client and every piece of mutable connection state that
/// is not shared. Runs until shutdown.
struct Worker {
    client: Box<dyn WebSocketClient>,
    shared: Arc<Shared>,
    delegate: Option<Arc<dyn TransportDelegate>>,
    queue: OutboundQueue,
    reconnection_interval: Duration,
    allow_sending_duplicates: bool,
    connecting_payload: Option<Value>,
    // For self-scheduling delayed reconnects.
    command_tx: mpsc::UnboundedSender<Command>,
}

impl Worker {
    async fn run(
        mut self,
        mut command_rx: mpsc::UnboundedReceiver<Command>,
        mut event_rx: mpsc::UnboundedReceiver<SocketEvent>,
    ) {
        loop {
            tokio::select! {
                command = command_rx.recv() => match command {
                    Some(command) => {
                        if matches!(self.handle_command(command), CommandOutcome::Shutdown) {
                            break;
                        }
                    }
                    // Facade dropped without an explicit shutdown.
                    None => {
                        self.client.set_delegate(None);
                        self.client.disconnect(None);
                        break;
                    }
                },
                Some(event) = event_rx.recv() => self.handle_socket_event(event),
            }
        }
        log::debug!("[GraphQLWs] Worker task exited");
    }

    fn handle_command(&mut self, command: Command) -> CommandOutcome {
        match command {
            Command::Connect => self.do_connect(),
            Command::Write(frame) => self.write(frame, false),
            Command::Close => {
                self.shared.reconnect.store(false, Ordering::SeqCst);
                if let Ok(frame) =
                    WireMessage::new(None, MessageKind::ConnectionTerminate, None).encode()
                {
                    // Best effort; bypasses the queue.
                    self.client.write_text(frame);
                }
                self.queue.clear();
                self.shared.registry.clear_subscriptions();
            }
            Command::Pause => {
                self.shared.reconnect.store(false, Ordering::SeqCst);
                self.client.disconnect(Some(PAUSE_DISCONNECT_TIMEOUT));
            }
            Command::Resume { auto_reconnect } => {
                self.shared.reconnect.store(auto_reconnect, Ordering::SeqCst);
                self.do_connect();
            }
            Command::NativePing { data, completion } => {
                self.client.write_ping(data, completion);
            }
            Command::UpdateHeaders {
                headers,
                reconnect_if_connected,
            } => {
                let request = self.client.request_mut();
                for (name, value) in headers {
                    request.set_header(name, value);
                }
                if reconnect_if_connected {
                    self.reconnect_if_connected();
                }
            }
            Command::UpdateConnectingPayload {
                payload,
                reconnect_if_connected,
            } => {
                self.connecting_payload = payload;
                if reconnect_if_connected {
                    self.reconnect_if_connected();
                }
            }
            Command::Shutdown => {
                self.client.set_delegate(None);
                self.client.disconnect(None);
                self.queue.clear();
                return CommandOutcome::Shutdown;
            }
        }
        CommandOutcome::Continue
    }

    /// Connect, treating a retry after failure as a fresh disconnect so a
    /// new error is not absorbed by the `Failed` suppression.
    fn do_connect(&mut self) {
        if self.shared.state() == ConnectionState::Failed {
            self.shared.set_state(ConnectionState::Disconnected);
        }
        self.client.connect();
    }

    /// Bounce the socket without triggering the reconnect machinery for the
    /// teardown half of the bounce.
    fn reconnect_if_connected(&mut self) {
        if self.shared.state() != ConnectionState::Connected {
            return;
        }
        let previous = self.shared.reconnect.swap(false, Ordering::SeqCst);
        self.client.disconnect(None);
        self.client.connect();
        self.shared.reconnect.store(previous, Ordering::SeqCst);
    }

    fn handle_socket_event(&mut self, event: SocketEvent) {
        match event {
            SocketEvent::Connected => self.on_socket_connected(),
            SocketEvent::Disconnected(error) => self.on_socket_disconnected(error),
            SocketEvent::Text(text) => self.on_text(&text),
            SocketEvent::Binary(data) => {
                log::debug!("[GraphQLWs] Ignoring {}-byte binary frame", data.len());
            }
            SocketEvent::Ping(data) => {
                if let Some(delegate) = &self.delegate {
                    delegate.received_ping(&data);
                }
            }
            SocketEvent::Pong(data) => {
                if let Some(delegate) = &self.delegate {
                    delegate.received_pong(&data);
                }
            }
        }
    }

    fn on_socket_connected(&mut self) {
        log::debug!("[GraphQLWs] Socket connected");
        self.shared.set_last_error(None);
        self.shared.acked.store(false, Ordering::SeqCst);
        self.shared.set_state(ConnectionState::Connected);

        match WireMessage::new(None, MessageKind::ConnectionInit, self.connecting_payload.clone())
            .encode()
        {
            // Handshake frame bypasses the queue.
            Ok(frame) => self.client.write_text(frame),
            Err(e) => log::error!("[GraphQLWs] Failed to encode connection_init: {e}"),
        }

        if self.shared.reconnected.load(Ordering::SeqCst) {
            self.replay_subscriptions();
            if let Some(delegate) = &self.delegate {
                delegate.did_reconnect();
            }
        } else if let Some(delegate) = &self.delegate {
            delegate.did_connect();
        }
        self.shared.reconnected.store(true, Ordering::SeqCst);
    }

    /// Stage every active subscription's subscribe frame again so the
    /// server re-establishes the streams. The frames re-enter the queue
    /// (the new handshake is not acked yet) and drain after the ack.
    fn replay_subscriptions(&mut self) {
        let frames = self.shared.registry.replay_frames();
        if frames.is_empty() {
            return;
        }
        log::debug!("[GraphQLWs] Replaying {} subscription(s)", frames.len());
        for frame in frames {
            if self.allow_sending_duplicates {
                self.write(frame, false);
            } else if let Some(key) = self.queue.find_key(&frame) {
                // Identical frame still pending from before the drop:
                // overwrite in place so it is not written twice.
                self.queue.enqueue(frame, Some(key));
            } else {
                self.write(frame, false);
            }
        }
    }

    fn on_socket_disconnected(&mut self, error: Option<String>) {
        match error {
            None => {
                log::debug!("[GraphQLWs] Socket disconnected cleanly");
                self.shared.set_last_error(None);
                if let Some(delegate) = &self.delegate {
                    delegate.did_disconnect(None);
                }
                self.shared.acked.store(false, Ordering::SeqCst);
                self.shared.set_state(ConnectionState::Disconnected);
                if self.shared.reconnect.load(Ordering::SeqCst) {
                    self.schedule_reconnect();
                }
            }
            Some(text) => {
                let error = TransportError::Network(text);
                if self.shared.state() == ConnectionState::Failed {
                    // Already failed: capture the newest error but do not
                    // re-run disconnection handling, so a socket layer that
                    // reports the same failure repeatedly cannot flood the
                    // subscribers or stack reconnect attempts.
                    log::debug!("[GraphQLWs] Suppressing repeat disconnect error: {error}");
                    self.shared.set_last_error(Some(error));
                    return;
                }

                log::warn!("[GraphQLWs] Socket disconnected: {error}");
                self.shared.set_last_error(Some(error.clone()));
                self.shared.registry.broadcast_error(error.clone());
                if let Some(delegate) = &self.delegate {
                    delegate.did_disconnect(Some(&error));
                }
                self.shared.acked.store(false, Ordering::SeqCst);
                self.shared.set_state(ConnectionState::Failed);
                if self.shared.reconnect.load(Ordering::SeqCst) {
                    self.schedule_reconnect();
                }
            }
        }
    }

    fn schedule_reconnect(&self) {
        log::debug!(
            "[GraphQLWs] Reconnecting in {}ms",
            self.reconnection_interval.as_millis()
        );
        let command_tx = self.command_tx.clone();
        let delay = self.reconnection_interval;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = command_tx.send(Command::Connect);
        });
    }

    fn on_text(&mut self, text: &str) {
        let message = match WireMessage::parse(text) {
            Ok(message) => message,
            Err(error) => {
                log::warn!("[GraphQLWs] Unusable inbound frame: {error}");
                self.shared.registry.broadcast_error(error);
                return;
            }
        };

        match message.kind {
            MessageKind::Data | MessageKind::Next | MessageKind::Error => match message.id {
                Some(id) => {
                    let result = match message.payload {
                        Some(payload) => Ok(payload),
                        None => Err(TransportError::NeitherErrorNorPayloadReceived),
                    };
                    self.shared.registry.dispatch(&id, result);
                }
                None => self
                    .shared
                    .registry
                    .broadcast_error(TransportError::UnprocessedMessage(text.to_string())),
            },
            MessageKind::Complete => match message.id {
                Some(id) => self.shared.registry.complete_if_one_shot(&id),
                None => self
                    .shared
                    .registry
                    .broadcast_error(TransportError::UnprocessedMessage(text.to_string())),
            },
            MessageKind::ConnectionAck => {
                log::debug!("[GraphQLWs] Handshake acknowledged");
                self.shared.acked.store(true, Ordering::SeqCst);
                self.drain_queue();
            }
            MessageKind::ConnectionKeepAlive | MessageKind::StartAck | MessageKind::Pong => {
                // Liveness proof from the server.
                self.drain_queue();
            }
            MessageKind::Ping => {
                match WireMessage::new(None, MessageKind::Pong, None).encode() {
                    // The pong reply may bypass the queue even pre-ack.
                    Ok(frame) => self.client.write_text(frame),
                    Err(e) => log::error!("[GraphQLWs] Failed to encode pong: {e}"),
                }
                self.drain_queue();
            }
            // Echoes of client-side kinds prove the server is confused;
            // nobody owns them, so everybody hears about them.
            MessageKind::ConnectionInit
            | MessageKind::ConnectionTerminate
            | MessageKind::Subscribe
            | MessageKind::Start
            | MessageKind::Stop
            | MessageKind::ConnectionError => self
                .shared
                .registry
                .broadcast_error(TransportError::UnprocessedMessage(text.to_string())),
        }
    }

    /// Write a frame now, or stage it until the handshake is acknowledged.
    fn write(&mut self, frame: String, forced: bool) {
        if forced || self.shared.acked.load(Ordering::SeqCst) {
            self.client.write_text(frame);
        } else {
            self.queue.enqueue(frame, None);
        }
    }

    /// Flush staged frames in ascending key order. Before the ack this
    /// restages every entry under its original key, so key identity is
    /// preserved for replay overwrites.
    fn drain_queue(&mut self) {
        let entries = self.queue.drain();
        if entries.is_empty() {
            return;
        }
        let acked = self.shared.acked.load(Ordering::SeqCst);
        for (key, frame) in entries {
            if acked {
                self.client.write_text(frame);
            } else {
                self.queue.enqueue(frame, Some(key));
            }
        }
    }
}

// ─── Facade ────────────────────────────────────────────────────────────────

/// Public surface of the transport. Cheap to construct; spawns one worker
/// task that owns the socket. Dropping the transport tears the worker down
/// without invoking any pending result sinks.
///
/// Must be constructed inside a tokio runtime.
pub struct WebSocketTransport {
    shared: Arc<Shared>,
    command_tx: mpsc::UnboundedSender<Command>,
    protocol: WsProtocol,
    id_generator: Arc<dyn OperationIdGenerator>,
    body_creator: Arc<dyn RequestBodyCreator>,
}

impl std::fmt::Debug for WebSocketTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebSocketTransport")
            .field("protocol", &self.protocol)
            .field("state", &self.shared.state())
            .finish_non_exhaustive()
    }
}

impl WebSocketTransport {
    /// Create a transport over `client` with default collaborators: no
    /// delegate, sequential operation ids, and the standard request body.
    #[must_use]
    pub fn new(
        client: Box<dyn WebSocketClient>,
        protocol: WsProtocol,
        config: TransportConfig,
    ) -> Self {
        Self::with_collaborators(
            client,
            protocol,
            config,
            None,
            Arc::new(SequentialIdGenerator::new()),
            Arc::new(DefaultRequestBodyCreator),
        )
    }

    /// Create a transport with explicit collaborators.
    #[must_use]
    pub fn with_collaborators(
        mut client: Box<dyn WebSocketClient>,
        protocol: WsProtocol,
        config: TransportConfig,
        delegate: Option<Arc<dyn TransportDelegate>>,
        id_generator: Arc<dyn OperationIdGenerator>,
        body_creator: Arc<dyn RequestBodyCreator>,
    ) -> Self {
        {
            let request = client.request_mut();
            request.set_header("Sec-WebSocket-Protocol", protocol.header_value());
            if let Some(name) = &config.client_name {
                request.set_header(CLIENT_NAME_HEADER, name.clone());
            }
            if let Some(version) = &config.client_version {
                request.set_header(CLIENT_VERSION_HEADER, version.clone());
            }
        }

        let shared = Arc::new(Shared::new(config.reconnect));
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        client.set_delegate(Some(event_tx));

        let worker = Worker {
            client,
            shared: Arc::clone(&shared),
            delegate,
            queue: OutboundQueue::new(),
            reconnection_interval: config.reconnection_interval,
            allow_sending_duplicates: config.allow_sending_duplicates,
            connecting_payload: config.connecting_payload.clone(),
            command_tx: command_tx.clone(),
        };
        tokio::spawn(worker.run(command_rx, event_rx));

        if config.connect_on_init {
            let _ = command_tx.send(Command::Connect);
        }

        Self {
            shared,
            command_tx,
            protocol,
            id_generator,
            body_creator,
        }
    }

    /// Submit an operation. The returned handle carries the assigned id and
    /// the result stream; for subscriptions the subscribe frame is retained
    /// for replay across reconnects.
    ///
    /// # Errors
    ///
    /// Fails fast with the sticky connection error if the last disconnect
    /// carried one and no successful connect has happened since, or with
    /// [`TransportError::Parse`] if the frame cannot be encoded. Nothing is
    /// registered or written in either case.
    pub fn send(&self, operation: &GraphQLOperation) -> Result<OperationHandle, TransportError> {
        if let Some(error) = self.shared.last_error() {
            return Err(error);
        }

        let body = self.body_creator.request_body(operation);
        let id = self.id_generator.next_id();
        let frame =
            WireMessage::new(Some(id.clone()), self.protocol.start_kind(), Some(body)).encode()?;

        let (sink, results) = mpsc::unbounded_channel();
        let subscribe_frame = operation.is_subscription().then(|| frame.clone());
        self.shared.registry.register(&id, sink, subscribe_frame);
        let _ = self.command_tx.send(Command::Write(frame));

        Ok(OperationHandle { id, results })
    }

    /// Stop the operation `id`: writes the sub-protocol's stop frame and
    /// removes both the subscriber and any subscription record. Calling this
    /// twice is indistinguishable from calling it once -- the frame is only
    /// written when a record was actually removed.
    pub fn unsubscribe(&self, id: &str) {
        if !self.shared.registry.remove(id) {
            return;
        }
        match WireMessage::new(Some(id.to_string()), self.protocol.stop_kind(), None).encode() {
            Ok(frame) => {
                let _ = self.command_tx.send(Command::Write(frame));
            }
            Err(e) => log::error!("[GraphQLWs] Failed to encode stop frame: {e}"),
        }
    }

    /// Send a native WebSocket ping (orthogonal to the GraphQL-level
    /// `ping` message). `completion` runs once the frame has been written.
    pub fn ping(&self, data: Vec<u8>, completion: Option<PingCompletion>) {
        let _ = self.command_tx.send(Command::NativePing { data, completion });
    }

    /// Replace request header values. With `reconnect_if_connected` the
    /// socket is bounced so the new headers take effect immediately;
    /// otherwise they apply on the next reconnection.
    pub fn update_headers(&self, headers: Vec<(String, String)>, reconnect_if_connected: bool) {
        let _ = self.command_tx.send(Command::UpdateHeaders {
            headers,
            reconnect_if_connected,
        });
    }

    /// Replace the `connection_init` payload. Same reconnect semantics as
    /// [`Self::update_headers`].
    pub fn update_connecting_payload(&self, payload: Option<Value>, reconnect_if_connected: bool) {
        let _ = self.command_tx.send(Command::UpdateConnectingPayload {
            payload,
            reconnect_if_connected,
        });
    }

    /// Rewrite the client-name identification header. Takes effect on the
    /// next reconnection.
    pub fn set_client_name(&self, name: impl Into<String>) {
        self.update_headers(vec![(CLIENT_NAME_HEADER.to_string(), name.into())], false);
    }

    /// Rewrite the client-version identification header. Takes effect on
    /// the next reconnection.
    pub fn set_client_version(&self, version: impl Into<String>) {
        self.update_headers(
            vec![(CLIENT_VERSION_HEADER.to_string(), version.into())],
            false,
        );
    }

    /// Open the socket. Only needed with `connect_on_init = false`, after
    /// [`Self::pause`], or to force an early retry.
    pub fn connect(&self) {
        let _ = self.command_tx.send(Command::Connect);
    }

    /// Stop reconnecting, send a best-effort `connection_terminate`, and
    /// drop all queued frames and subscription records.
    pub fn close(&self) {
        let _ = self.command_tx.send(Command::Close);
    }

    /// Disconnect (forced timeout 2 s) and stop reconnecting until
    /// [`Self::resume`].
    pub fn pause(&self) {
        let _ = self.command_tx.send(Command::Pause);
    }

    /// Reconnect after a pause; `auto_reconnect` configures whether future
    /// disconnects retry.
    pub fn resume(&self, auto_reconnect: bool) {
        let _ = self.command_tx.send(Command::Resume { auto_reconnect });
    }

    /// Current socket state (independent of the handshake ack).
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.shared.state()
    }

    /// Whether the socket is currently connected (ack-independent).
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.shared.state() == ConnectionState::Connected
    }

    /// The sticky error from the last failed disconnect, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<TransportError> {
        self.shared.last_error()
    }

    /// The sub-protocol this transport was constructed with.
    #[must_use]
    pub fn protocol(&self) -> WsProtocol {
        self.protocol
    }
}

impl Drop for WebSocketTransport {
    fn drop(&mut self) {
        let _ = self.command_tx.send(Command::Shutdown);
    }
}
