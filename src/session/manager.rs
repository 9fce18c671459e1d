//! Connection lifecycle management.
//!
//! [`SessionManager`] owns the single session slot: it performs WebSocket
//! handshakes, spawns exactly one relay task per live connection, cancels
//! the replaced session on reconnect, and routes the front-end's
//! desired-connected signal to the current session's flag.
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──connect──► Connecting ──handshake ok──► Connected
//!                        │                          │
//!                 handshake failed          flag flips false
//!                 (ConnectFailed event,            │
//!                  no relay started)               ▼
//!                                            Disconnecting ──► Idle
//!                                            (socket closed,
//!                                             Closed event)
//! ```
//!
//! A new successful connect while Connected replaces the slot wholesale;
//! the replaced session's flag is flipped so its relay closes the old
//! socket instead of leaking it.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::identifiers::ConnectionId;
use crate::request::{HeaderEntry, QueryEntry, append_query, header_map};

use super::event::{HandshakeInfo, SessionEvent};
use super::relay::{self, RelayContext};

// ============================================================================
// Constants
// ============================================================================

/// Default sleep between relay iterations.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

// ============================================================================
// SessionOptions
// ============================================================================

/// Session layer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Sleep between relay iterations.
    ///
    /// Bounds both frame-relay throughput (one frame per iteration) and
    /// worst-case disconnect latency. Lower values trade CPU for latency.
    pub poll_interval: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl SessionOptions {
    /// Creates options with default settings.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the relay poll interval.
    #[inline]
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

// ============================================================================
// ActiveSession
// ============================================================================

/// The session slot contents: one connection's handles.
///
/// Holds no socket itself; the relay owns the socket, and the manager
/// reaches it only through the desired-connected flag.
struct ActiveSession {
    /// Session identity.
    id: ConnectionId,

    /// Target URL the handshake was performed against.
    url: String,

    /// Per-session cancellation handle.
    desired: watch::Sender<bool>,

    /// Relay task handle.
    relay: JoinHandle<()>,
}

// ============================================================================
// SessionManager
// ============================================================================

/// Owner of the at-most-one active WebSocket session.
///
/// All state lives behind a mutex-guarded slot; the command path
/// (`set_connection`), the signal path (`set_connected`), and the relay
/// task never share bare fields.
pub struct SessionManager {
    /// Session layer configuration.
    options: SessionOptions,

    /// Outbound event channel to the front-end.
    events: mpsc::UnboundedSender<SessionEvent>,

    /// The single session slot.
    active: Mutex<Option<ActiveSession>>,
}

impl SessionManager {
    /// Creates a manager with default options.
    #[must_use]
    pub fn new(events: mpsc::UnboundedSender<SessionEvent>) -> Self {
        Self::with_options(events, SessionOptions::default())
    }

    /// Creates a manager with explicit options.
    #[must_use]
    pub fn with_options(events: mpsc::UnboundedSender<SessionEvent>, options: SessionOptions) -> Self {
        Self {
            options,
            events,
            active: Mutex::new(None),
        }
    }

    /// Connection command from the front-end.
    ///
    /// With `connect = true`, builds the target URL and header set, performs
    /// the handshake, and on success installs the new session (replacing and
    /// cancelling any previous one) and spawns its relay. With
    /// `connect = false` this is a no-op: disconnect is signalled through
    /// [`set_connected`](Self::set_connected).
    ///
    /// # Errors
    ///
    /// - [`Error::Url`] / [`Error::Connection`] for an unusable target
    /// - [`Error::WebSocket`] when the handshake fails (also emitted as
    ///   [`SessionEvent::ConnectFailed`])
    pub async fn set_connection(
        &self,
        url: &str,
        headers: &[HeaderEntry],
        query: &[QueryEntry],
        connect: bool,
    ) -> Result<Option<ConnectionId>> {
        if !connect {
            debug!(url, "Ignoring connection command without connect flag");
            return Ok(None);
        }

        self.connect(url, headers, query).await.map(Some)
    }

    /// Desired-connected signal from the front-end.
    ///
    /// Applies to the currently installed session only; sessions replaced
    /// by a newer connect were already cancelled at replacement time, so a
    /// stale signal cannot reach them.
    pub fn set_connected(&self, connected: bool) {
        let guard = self.active.lock();
        match guard.as_ref() {
            Some(session) => {
                let _ = session.desired.send(connected);
                debug!(connection = %session.id, connected, "Desired-connected flag updated");
            }
            None => {
                debug!(connected, "Desired-connected signal with no session");
            }
        }
    }

    /// Returns `true` while a session is installed, wanted, and relaying.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.active
            .lock()
            .as_ref()
            .is_some_and(|session| *session.desired.borrow() && !session.relay.is_finished())
    }

    /// Returns the identity of the installed session, live or not.
    ///
    /// The slot keeps the most recent session's record until the next
    /// connect replaces it, so this can name an already-closed connection.
    #[must_use]
    pub fn current_connection(&self) -> Option<ConnectionId> {
        self.active.lock().as_ref().map(|session| session.id)
    }

    /// Returns the target URL of the installed session, live or not.
    #[must_use]
    pub fn current_url(&self) -> Option<String> {
        self.active.lock().as_ref().map(|session| session.url.clone())
    }

    /// Performs the handshake and installs the new session.
    async fn connect(
        &self,
        url: &str,
        headers: &[HeaderEntry],
        query: &[QueryEntry],
    ) -> Result<ConnectionId> {
        let target = append_query(url, query);

        let parsed = Url::parse(&target)?;
        if !matches!(parsed.scheme(), "ws" | "wss") {
            return Err(Error::connection(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }

        let mut request = target.as_str().into_client_request()?;
        request.headers_mut().extend(header_map(headers));

        debug!(url = %target, "Starting WebSocket handshake");

        let (socket, response) = match connect_async(request).await {
            Ok(established) => established,
            Err(error) => {
                warn!(url = %target, error = %error, "WebSocket handshake failed");
                let _ = self.events.send(SessionEvent::ConnectFailed {
                    url: target,
                    error: error.to_string(),
                });
                return Err(Error::WebSocket(error));
            }
        };

        let id = ConnectionId::generate();
        let handshake = Arc::new(HandshakeInfo::from_response(&response));
        let (desired_tx, desired_rx) = watch::channel(true);

        let relay = tokio::spawn(relay::run(
            socket,
            RelayContext {
                id,
                handshake,
                desired: desired_rx,
                events: self.events.clone(),
                poll_interval: self.options.poll_interval,
            },
        ));

        let replaced = self.active.lock().replace(ActiveSession {
            id,
            url: target.clone(),
            desired: desired_tx,
            relay,
        });

        if let Some(old) = replaced {
            // Cancel rather than orphan: the old relay closes its socket
            let _ = old.desired.send(false);
            debug!(old = %old.id, new = %id, "Replaced previous session");
        }

        info!(connection = %id, url = %target, "WebSocket session connected");

        Ok(id)
    }
}

// ============================================================================
// Tests
// ============================================================================
