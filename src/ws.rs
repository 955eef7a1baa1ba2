//! Default WebSocket client backed by `tokio-tungstenite`.
//!
//! Implements the [`WebSocketClient`] contract over a real socket; nothing
//! else in the crate touches `tokio-tungstenite` directly.
//!
//! # Architecture
//!
//! `connect()` spawns one connection task that owns the socket for its
//! lifetime: it builds the handshake from the [`SocketRequest`] (scheme
//! normalized, headers validated), splits the stream on success, then
//! bridges an outgoing `mpsc` channel and the read half in a
//! `tokio::select!` loop. Everything observable is reported to the delegate
//! as [`SocketEvent`]s; native pings are answered in place.
//!
//! Failures never surface as panics or return values here -- every outcome,
//! including a refused handshake, arrives at the transport as a
//! [`SocketEvent::Disconnected`].

// Rust guideline compliant 2026-02

use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite;

use crate::socket::{PingCompletion, SocketEvent, SocketRequest, WebSocketClient};

/// Concrete WebSocket stream type (avoids repeating the generic everywhere).
type WsStream = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

type WsSink = futures_util::stream::SplitSink<WsStream, tungstenite::Message>;
type WsSource = futures_util::stream::SplitStream<WsStream>;

/// Commands from the client handle to its connection task.
enum Outgoing {
    /// Send a UTF-8 text frame.
    Text(String),
    /// Send a native ping frame; the completion runs after the write.
    Ping(Vec<u8>, Option<PingCompletion>),
    /// Close the connection, abandoning a stalled close handshake after the
    /// timeout when one is given.
    Close(Option<Duration>),
}

/// [`WebSocketClient`] implementation over `tokio-tungstenite`.
pub struct TungsteniteClient {
    request: SocketRequest,
    delegate: Option<mpsc::UnboundedSender<SocketEvent>>,
    outgoing_tx: Option<mpsc::UnboundedSender<Outgoing>>,
}

impl std::fmt::Debug for TungsteniteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TungsteniteClient")
            .field("url", &self.request.url)
            .field("connected", &self.is_task_alive())
            .finish_non_exhaustive()
    }
}

impl TungsteniteClient {
    /// Create a client for `request`. Nothing happens until `connect()`.
    #[must_use]
    pub fn new(request: SocketRequest) -> Self {
        Self {
            request,
            delegate: None,
            outgoing_tx: None,
        }
    }

    /// Whether a connection task is currently holding the outgoing channel.
    fn is_task_alive(&self) -> bool {
        self.outgoing_tx
            .as_ref()
            .is_some_and(|tx| !tx.is_closed())
    }
}

impl WebSocketClient for TungsteniteClient {
    fn request_mut(&mut self) -> &mut SocketRequest {
        &mut self.request
    }

    fn set_delegate(&mut self, delegate: Option<mpsc::UnboundedSender<SocketEvent>>) {
        self.delegate = delegate;
    }

    fn connect(&mut self) {
        // A previous connection task may still be draining its close
        // handshake. Dropping its channel makes it close the socket and exit
        // without reporting a disconnect, so the new connection's events are
        // the only ones the transport sees.
        if let Some(old_tx) = self.outgoing_tx.take() {
            if !old_tx.is_closed() {
                log::debug!("[GraphQLWs] connect() superseding a live socket task");
            }
        }

        let (outgoing_tx, outgoing_rx) = mpsc::unbounded_channel();
        self.outgoing_tx = Some(outgoing_tx);

        let request = self.request.clone();
        let delegate = self.delegate.clone();
        tokio::spawn(run_connection(request, delegate, outgoing_rx));
    }

    fn disconnect(&mut self, force_timeout: Option<Duration>) {
        if let Some(tx) = &self.outgoing_tx {
            let _ = tx.send(Outgoing::Close(force_timeout));
        }
    }

    fn write_text(&mut self, text: String) {
        match &self.outgoing_tx {
            Some(tx) => {
                if tx.send(Outgoing::Text(text)).is_err() {
                    log::warn!("[GraphQLWs] Dropping frame -- socket task has exited");
                }
            }
            None => log::warn!("[GraphQLWs] Dropping frame -- socket never connected"),
        }
    }

    fn write_ping(&mut self, data: Vec<u8>, completion: Option<PingCompletion>) {
        if let Some(tx) = &self.outgoing_tx {
            let _ = tx.send(Outgoing::Ping(data, completion));
        }
    }
}

impl Drop for TungsteniteClient {
    fn drop(&mut self) {
        if let Some(tx) = self.outgoing_tx.take() {
            let _ = tx.send(Outgoing::Close(None));
        }
    }
}

/// Perform the WebSocket handshake for `request` and split the stream.
///
/// The request URL is scheme-normalized by [`SocketRequest::ws_url`] and the
/// request's headers are validated before anything touches the network, so a
/// bad header fails the connect attempt rather than being silently dropped.
async fn establish(request: &SocketRequest) -> Result<(WsSink, WsSource)> {
    use tungstenite::client::IntoClientRequest;
    use tungstenite::http::{HeaderName, HeaderValue};

    let url = request.ws_url();
    let mut handshake = url
        .as_str()
        .into_client_request()
        .map_err(|e| anyhow!("cannot build a handshake request for {url}: {e}"))?;

    for (name, value) in request.headers() {
        let entry = HeaderName::try_from(name.as_str())
            .ok()
            .zip(HeaderValue::from_str(value).ok());
        let Some((header_name, header_value)) = entry else {
            bail!("header {name} cannot be sent on the handshake");
        };
        handshake.headers_mut().insert(header_name, header_value);
    }

    let (stream, _response) = tokio_tungstenite::connect_async(handshake)
        .await
        .map_err(|e| anyhow!("handshake with {url} failed: {e}"))?;

    Ok(stream.split())
}

/// Connection task: handshake, then bridge outgoing commands and inbound
/// frames until either side closes.
async fn run_connection(
    request: SocketRequest,
    delegate: Option<mpsc::UnboundedSender<SocketEvent>>,
    mut outgoing_rx: mpsc::UnboundedReceiver<Outgoing>,
) {
    let emit = |event: SocketEvent| {
        if let Some(tx) = &delegate {
            let _ = tx.send(event);
        }
    };

    let (mut sink, mut source) = match establish(&request).await {
        Ok(pair) => pair,
        Err(e) => {
            log::warn!("[GraphQLWs] Connect failed: {e:#}");
            emit(SocketEvent::Disconnected(Some(format!("{e:#}"))));
            return;
        }
    };

    log::debug!("[GraphQLWs] Socket connected to {}", request.url);
    emit(SocketEvent::Connected);

    loop {
        tokio::select! {
            command = outgoing_rx.recv() => match command {
                Some(Outgoing::Text(text)) => {
                    if let Err(e) = sink.send(tungstenite::Message::Text(text)).await {
                        log::warn!("[GraphQLWs] Write failed: {e}");
                        emit(SocketEvent::Disconnected(Some(e.to_string())));
                        return;
                    }
                }
                Some(Outgoing::Ping(data, completion)) => {
                    match sink.send(tungstenite::Message::Ping(data)).await {
                        Ok(()) => {
                            if let Some(completion) = completion {
                                completion();
                            }
                        }
                        Err(e) => {
                            log::warn!("[GraphQLWs] Ping write failed: {e}");
                            emit(SocketEvent::Disconnected(Some(e.to_string())));
                            return;
                        }
                    }
                }
                Some(Outgoing::Close(force_timeout)) => {
                    close_gracefully(&mut sink, &mut source, force_timeout).await;
                    emit(SocketEvent::Disconnected(None));
                    return;
                }
                // Client handle dropped without a close command.
                None => {
                    let _ = sink.send(tungstenite::Message::Close(None)).await;
                    return;
                }
            },

            frame = source.next() => match frame {
                Some(Ok(tungstenite::Message::Text(text))) => {
                    emit(SocketEvent::Text(text.to_string()));
                }
                Some(Ok(tungstenite::Message::Binary(data))) => {
                    emit(SocketEvent::Binary(data.to_vec()));
                }
                Some(Ok(tungstenite::Message::Ping(data))) => {
                    // Answer native pings in place; the transport only
                    // observes them.
                    let _ = sink.send(tungstenite::Message::Pong(data.clone())).await;
                    emit(SocketEvent::Ping(data.to_vec()));
                }
                Some(Ok(tungstenite::Message::Pong(data))) => {
                    emit(SocketEvent::Pong(data.to_vec()));
                }
                Some(Ok(tungstenite::Message::Close(_))) => {
                    log::debug!("[GraphQLWs] Socket closed by server");
                    emit(SocketEvent::Disconnected(None));
                    return;
                }
                Some(Ok(tungstenite::Message::Frame(_))) => {
                    // Raw frames -- skip
                }
                Some(Err(e)) => {
                    log::warn!("[GraphQLWs] Read error: {e}");
                    emit(SocketEvent::Disconnected(Some(e.to_string())));
                    return;
                }
                None => {
                    log::debug!("[GraphQLWs] Socket stream ended");
                    emit(SocketEvent::Disconnected(None));
                    return;
                }
            },
        }
    }
}

/// Send a close frame, then wait for the server's close (bounded by
/// `force_timeout` when given).
async fn close_gracefully(sink: &mut WsSink, source: &mut WsSource, force_timeout: Option<Duration>) {
    let _ = sink.send(tungstenite::Message::Close(None)).await;

    let drain = async {
        while let Some(frame) = source.next().await {
            match frame {
                Ok(tungstenite::Message::Close(_)) | Err(_) => break,
                _ => {}
            }
        }
    };

    match force_timeout {
        Some(timeout) => {
            let _ = tokio::time::timeout(timeout, drain).await;
        }
        None => drain.await,
    }
}
