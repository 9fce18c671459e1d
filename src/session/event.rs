//! Outbound event types.
//!
//! Everything the session layer tells the front-end flows through
//! [`SessionEvent`] over the channel handed out at bridge construction.
//! One [`SessionEvent::Frame`] is emitted per received frame, in read
//! order; connect and close failures are emitted as their own variants so
//! the front-end can observe them instead of inferring from silence.

// ============================================================================
// Imports
// ============================================================================

use rustc_hash::FxHashMap;
use serde::Serialize;
use tokio_tungstenite::tungstenite::http::Response;

use crate::http::format::{collect_headers, status_line};
use crate::identifiers::ConnectionId;

// ============================================================================
// HandshakeInfo
// ============================================================================

/// Status line and headers of the WebSocket handshake response.
///
/// Captured once per connection and attached to every frame relayed from
/// that socket, so the front-end can show connection metadata next to the
/// message stream.
#[derive(Debug, Clone, Serialize)]
pub struct HandshakeInfo {
    /// Handshake status line (typically `101 Switching Protocols`).
    pub status: String,

    /// Handshake response headers, lowercase names, all values kept.
    pub headers: FxHashMap<String, Vec<String>>,
}

impl HandshakeInfo {
    /// Captures handshake metadata from the upgrade response.
    #[must_use]
    pub fn from_response<T>(response: &Response<T>) -> Self {
        Self {
            status: status_line(response.status()),
            headers: collect_headers(response.headers()),
        }
    }
}

// ============================================================================
// InboundFrame
// ============================================================================

/// One frame received over the active WebSocket session.
#[derive(Debug, Clone, Serialize)]
pub struct InboundFrame {
    /// Session the frame arrived on.
    pub connection: ConnectionId,

    /// Handshake status line of that session.
    pub status: String,

    /// Handshake response headers of that session.
    pub headers: FxHashMap<String, Vec<String>>,

    /// Frame payload (binary frames are lossy UTF-8).
    pub message: String,
}

// ============================================================================
// SessionEvent
// ============================================================================

/// An event emitted to the front-end by the session layer.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SessionEvent {
    /// One relayed frame.
    Frame(InboundFrame),

    /// The WebSocket handshake failed; no relay was started.
    ConnectFailed {
        /// Target URL the handshake was attempted against.
        url: String,
        /// Handshake error text.
        error: String,
    },

    /// A session's socket was closed and its relay terminated.
    Closed {
        /// Session that closed.
        connection: ConnectionId,
        /// Terminal read error, if the close was not requested or clean.
        error: Option<String>,
    },
}

impl SessionEvent {
    /// Returns `true` if this is a relayed frame.
    #[inline]
    #[must_use]
    pub fn is_frame(&self) -> bool {
        matches!(self, Self::Frame(_))
    }

    /// Returns the session the event belongs to, if any.
    #[inline]
    #[must_use]
    pub fn connection(&self) -> Option<ConnectionId> {
        match self {
            Self::Frame(frame) => Some(frame.connection),
            Self::Closed { connection, .. } => Some(*connection),
            Self::ConnectFailed { .. } => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> InboundFrame {
        InboundFrame {
            connection: ConnectionId::generate(),
            status: "101 Switching Protocols".to_string(),
            headers: FxHashMap::default(),
            message: "hello".to_string(),
        }
    }

    #[test]
    fn test_handshake_info_from_response() {
        let response = Response::builder()
            .status(101)
            .header("upgrade", "websocket")
            .body(())
            .expect("build response");

        let info = HandshakeInfo::from_response(&response);
        assert_eq!(info.status, "101 Switching Protocols");
        assert_eq!(
            info.headers.get("upgrade"),
            Some(&vec!["websocket".to_string()])
        );
    }

    #[test]
    fn test_event_predicates() {
        let frame = SessionEvent::Frame(sample_frame());
        assert!(frame.is_frame());
        assert!(frame.connection().is_some());

        let failed = SessionEvent::ConnectFailed {
            url: "ws://example.test".to_string(),
            error: "refused".to_string(),
        };
        assert!(!failed.is_frame());
        assert_eq!(failed.connection(), None);
    }

    #[test]
    fn test_event_serialization_tags() {
        let frame = SessionEvent::Frame(sample_frame());
        let json = serde_json::to_string(&frame).expect("serialize");
        assert!(json.contains("\"kind\":\"frame\""));
        assert!(json.contains("\"message\":\"hello\""));

        let closed = SessionEvent::Closed {
            connection: ConnectionId::generate(),
            error: Some("reset".to_string()),
        };
        let json = serde_json::to_string(&closed).expect("serialize");
        assert!(json.contains("\"kind\":\"closed\""));
        assert!(json.contains("\"error\":\"reset\""));
    }
}
