//! WebSocket client contract consumed by the transport.
//!
//! The transport never performs frame I/O itself. It drives an abstract
//! client through fire-and-forget methods and observes it through a stream
//! of [`SocketEvent`]s delivered on an `mpsc` channel (the "delegate"). A
//! production implementation backed by `tokio-tungstenite` lives in
//! [`crate::ws`]; tests script their own.

use std::time::Duration;

use tokio::sync::mpsc;

/// Callback invoked once a native ping frame has been written.
pub type PingCompletion = Box<dyn FnOnce() + Send + 'static>;

/// Events a [`WebSocketClient`] reports to its delegate.
#[derive(Debug)]
pub enum SocketEvent {
    /// The socket finished its handshake and is open.
    Connected,
    /// The socket closed; `Some` carries the error text for abnormal closes.
    Disconnected(Option<String>),
    /// A UTF-8 text frame arrived.
    Text(String),
    /// A binary frame arrived. The transport logs and ignores these.
    Binary(Vec<u8>),
    /// A native ping frame arrived (the client answers it itself).
    Ping(Vec<u8>),
    /// A native pong frame arrived.
    Pong(Vec<u8>),
}

/// The HTTP request a client connects with: URL plus headers. Header edits
/// take effect on the next (re)connection.
#[derive(Debug, Clone, Default)]
pub struct SocketRequest {
    /// Target URL (`ws://`, `wss://`, or an `http(s)` URL the client is
    /// expected to scheme-convert).
    pub url: String,
    headers: Vec<(String, String)>,
}

impl SocketRequest {
    /// A request for `url` with no headers.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }

    /// Set `name` to `value`, replacing any existing value. Header names
    /// compare case-insensitively.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(existing) = self
            .headers
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            existing.1 = value;
        } else {
            self.headers.push((name, value));
        }
    }

    /// The URL to dial, with an `http(s)` scheme rewritten to `ws(s)`.
    /// Other schemes pass through untouched.
    #[must_use]
    pub fn ws_url(&self) -> String {
        match self.url.split_once("://") {
            Some(("http", rest)) => format!("ws://{rest}"),
            Some(("https", rest)) => format!("wss://{rest}"),
            _ => self.url.clone(),
        }
    }

    /// Current value of `name`, if set.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// All headers in insertion order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

/// Abstract WebSocket client.
///
/// All methods are fire-and-forget: `connect` must not block on the
/// handshake and `write_text` must not block on the network. Outcomes are
/// reported through the delegate channel installed with
/// [`Self::set_delegate`]. Clearing the delegate detaches the client from
/// its observer; no events may be sent afterwards.
pub trait WebSocketClient: Send + 'static {
    /// Mutable access to the connection request (URL and headers).
    fn request_mut(&mut self) -> &mut SocketRequest;

    /// Install or clear the delegate event channel.
    fn set_delegate(&mut self, delegate: Option<mpsc::UnboundedSender<SocketEvent>>);

    /// Start connecting. Reports `SocketEvent::Connected` or
    /// `SocketEvent::Disconnected(Some(_))` on failure.
    fn connect(&mut self);

    /// Start disconnecting. With `force_timeout` the client abandons a
    /// stalled close handshake after the given duration.
    fn disconnect(&mut self, force_timeout: Option<Duration>);

    /// Write a UTF-8 text frame.
    fn write_text(&mut self, text: String);

    /// Write a native ping frame; `completion` runs once it has been sent.
    fn write_ping(&mut self, data: Vec<u8>, completion: Option<PingCompletion>);

    /// Whether this client can route through a SOCKS proxy. Feature-detected:
    /// implementations without the capability keep the default.
    fn supports_socks_proxy(&self) -> bool {
        false
    }

    /// Enable or disable SOCKS proxying. No-op for clients without the
    /// capability.
    fn set_socks_proxy_enabled(&mut self, _enabled: bool) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_header_replaces_case_insensitively() {
        let mut request = SocketRequest::new("wss://example.com/graphql");
        request.set_header("Authorization", "Bearer a");
        request.set_header("authorization", "Bearer b");

        assert_eq!(request.headers().len(), 1);
        assert_eq!(request.header("AUTHORIZATION"), Some("Bearer b"));
    }

    #[test]
    fn test_header_missing_is_none() {
        let request = SocketRequest::new("wss://example.com/graphql");
        assert_eq!(request.header("X-Missing"), None);
    }

    #[test]
    fn test_ws_url_rewrites_http_schemes() {
        assert_eq!(
            SocketRequest::new("https://api.local/graphql").ws_url(),
            "wss://api.local/graphql"
        );
        assert_eq!(
            SocketRequest::new("http://api.local:4000/graphql").ws_url(),
            "ws://api.local:4000/graphql"
        );
    }

    #[test]
    fn test_ws_url_keeps_websocket_schemes() {
        assert_eq!(
            SocketRequest::new("wss://api.local/graphql").ws_url(),
            "wss://api.local/graphql"
        );
        assert_eq!(
            SocketRequest::new("ws://api.local/graphql").ws_url(),
            "ws://api.local/graphql"
        );
    }
}
