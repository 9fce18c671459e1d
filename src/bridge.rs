//! Bridge facade.
//!
//! [`Bridge`] is the surface the host application shell calls: one HTTP
//! executor plus one session manager, sharing the event channel handed out
//! at construction.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use tokio::sync::mpsc;

use crate::error::Result;
use crate::http::{HttpExecutor, HttpResult};
use crate::identifiers::ConnectionId;
use crate::request::{HeaderEntry, QueryEntry};
use crate::session::{SessionEvent, SessionManager, SessionOptions};

// ============================================================================
// Bridge
// ============================================================================

/// Backend bridge for the API-testing workbench.
///
/// Owns the one-shot HTTP path and the single WebSocket session. Inbound
/// frames and connection failures arrive on the event receiver returned by
/// [`Bridge::new`].
///
/// # Example
///
/// ```no_run
/// use wirebench::{Bridge, HeaderEntry, QueryEntry};
///
/// # async fn example() -> wirebench::Result<()> {
/// let (bridge, mut events) = Bridge::new();
///
/// let result = bridge
///     .execute("GET", "https://example.test/api", &[], &[QueryEntry::new("q", "5")], "")
///     .await;
/// println!("{} -> {}", result.url, result.status);
///
/// bridge
///     .set_connection("wss://example.test/feed", &[], &[], true)
///     .await?;
/// while let Some(event) = events.recv().await {
///     println!("{event:?}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct Bridge {
    /// One-shot HTTP executor.
    http: HttpExecutor,

    /// WebSocket session manager.
    session: SessionManager,
}

impl Bridge {
    /// Creates a bridge with default options.
    ///
    /// Returns the bridge and the receiving end of its event channel.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        Self::with_options(SessionOptions::default())
    }

    /// Creates a bridge with explicit session options.
    #[must_use]
    pub fn with_options(options: SessionOptions) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let bridge = Self {
            http: HttpExecutor::new(),
            session: SessionManager::with_options(events_tx, options),
        };

        (bridge, events_rx)
    }

    /// Executes one HTTP request, swallowing failures.
    ///
    /// See [`HttpExecutor::execute`].
    pub async fn execute(
        &self,
        method: &str,
        url: &str,
        headers: &[HeaderEntry],
        query: &[QueryEntry],
        body: impl Into<String>,
    ) -> HttpResult {
        self.http.execute(method, url, headers, query, body).await
    }

    /// Executes one HTTP request, surfacing failures.
    ///
    /// See [`HttpExecutor::try_execute`].
    ///
    /// # Errors
    ///
    /// See [`HttpExecutor::try_execute`].
    pub async fn try_execute(
        &self,
        method: &str,
        url: &str,
        headers: &[HeaderEntry],
        query: &[QueryEntry],
        body: impl Into<String>,
    ) -> Result<HttpResult> {
        self.http
            .try_execute(method, url, headers, query, body)
            .await
    }

    /// Connection command.
    ///
    /// See [`SessionManager::set_connection`].
    ///
    /// # Errors
    ///
    /// See [`SessionManager::set_connection`].
    pub async fn set_connection(
        &self,
        url: &str,
        headers: &[HeaderEntry],
        query: &[QueryEntry],
        connect: bool,
    ) -> Result<Option<ConnectionId>> {
        self.session
            .set_connection(url, headers, query, connect)
            .await
    }

    /// Desired-connected signal.
    ///
    /// See [`SessionManager::set_connected`].
    pub fn set_connected(&self, connected: bool) {
        self.session.set_connected(connected);
    }

    /// Returns `true` while a session is live.
    #[inline]
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.session.is_connected()
    }

    /// Returns the identity of the installed session, live or not.
    #[inline]
    #[must_use]
    pub fn current_connection(&self) -> Option<ConnectionId> {
        self.session.current_connection()
    }
}

impl fmt::Debug for Bridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bridge")
            .field("connected", &self.is_connected())
            .field("connection", &self.current_connection())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use futures_util::StreamExt;
    use tokio::net::TcpListener;
    use tokio::time::timeout;
    use tokio_tungstenite::tungstenite::Message;

    #[tokio::test]
    async fn test_bridge_starts_idle() {
        let (bridge, _events) = Bridge::new();
        assert!(!bridge.is_connected());
        assert!(bridge.current_connection().is_none());
    }

    #[tokio::test]
    async fn test_bridge_connect_and_disconnect() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
        let port = listener.local_addr().expect("stub addr").port();

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("accept");
            let mut ws = tokio_tungstenite::accept_async(stream)
                .await
                .expect("upgrade");
            while let Some(Ok(message)) = ws.next().await {
                if matches!(message, Message::Close(_)) {
                    break;
                }
            }
        });

        let (bridge, mut events) =
            Bridge::with_options(SessionOptions::new().with_poll_interval(Duration::from_millis(5)));

        let id = bridge
            .set_connection(&format!("ws://127.0.0.1:{port}"), &[], &[], true)
            .await
            .expect("connect succeeds")
            .expect("connection id");
        assert!(bridge.is_connected());

        bridge.set_connected(false);

        let event = timeout(Duration::from_secs(5), events.recv())
            .await
            .expect("event within deadline")
            .expect("channel open");
        assert!(matches!(
            event,
            SessionEvent::Closed { connection, .. } if connection == id
        ));
        assert!(!bridge.is_connected());
    }
}
