//! The relay task.
//!
//! One relay runs per live connection, started by the manager after a
//! successful handshake. Each iteration checks the session's
//! desired-connected flag, waits for one frame (racing the read against a
//! flag change so a disconnect interrupts a blocked read), then sleeps the
//! configured poll interval. The fixed sleep throttles the loop and bounds
//! how fast frames are relayed; it is a configuration knob, not a hidden
//! constant.
//!
//! # Termination
//!
//! The relay exits, emitting [`SessionEvent::Closed`], when:
//!
//! - the desired-connected flag flips false (requested disconnect),
//! - the peer sends a close frame or the stream ends,
//! - a terminal read error occurs (closed/reset connection).
//!
//! Non-terminal read errors are logged and discarded; the loop continues.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::{mpsc, watch};
use tokio::time::sleep;
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::error::ProtocolError;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tracing::{debug, warn};

use crate::identifiers::ConnectionId;

use super::event::{HandshakeInfo, InboundFrame, SessionEvent};

// ============================================================================
// RelayContext
// ============================================================================

/// Everything a relay task needs besides the socket itself.
///
/// The relay holds only channel ends and shared handshake metadata; it has
/// no access to the manager's session slot.
pub(crate) struct RelayContext {
    /// Session this relay serves.
    pub id: ConnectionId,

    /// Handshake metadata attached to every relayed frame.
    pub handshake: Arc<HandshakeInfo>,

    /// Per-session desired-connected flag.
    pub desired: watch::Receiver<bool>,

    /// Outbound event channel to the front-end.
    pub events: mpsc::UnboundedSender<SessionEvent>,

    /// Sleep between iterations.
    pub poll_interval: Duration,
}

// ============================================================================
// Relay Loop
// ============================================================================

/// Runs the relay until disconnect or a terminal socket condition.
pub(crate) async fn run<S>(mut socket: WebSocketStream<S>, ctx: RelayContext)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let RelayContext {
        id,
        handshake,
        mut desired,
        events,
        poll_interval,
    } = ctx;

    debug!(connection = %id, "Relay started");

    loop {
        if !*desired.borrow() {
            let _ = socket.close(None).await;
            let _ = events.send(SessionEvent::Closed {
                connection: id,
                error: None,
            });
            debug!(connection = %id, "Relay stopped by disconnect request");
            return;
        }

        tokio::select! {
            changed = desired.changed() => {
                if changed.is_err() {
                    // Manager dropped the session handle
                    let _ = socket.close(None).await;
                    let _ = events.send(SessionEvent::Closed {
                        connection: id,
                        error: None,
                    });
                    debug!(connection = %id, "Relay stopped, session handle dropped");
                    return;
                }
                // Re-check the flag before the next read
                continue;
            }

            frame = socket.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        let _ = events.send(SessionEvent::Frame(InboundFrame {
                            connection: id,
                            status: handshake.status.clone(),
                            headers: handshake.headers.clone(),
                            message: text.as_str().to_owned(),
                        }));
                    }

                    Some(Ok(Message::Binary(bytes))) => {
                        let _ = events.send(SessionEvent::Frame(InboundFrame {
                            connection: id,
                            status: handshake.status.clone(),
                            headers: handshake.headers.clone(),
                            message: String::from_utf8_lossy(&bytes).into_owned(),
                        }));
                    }

                    Some(Ok(Message::Close(_))) => {
                        let _ = events.send(SessionEvent::Closed {
                            connection: id,
                            error: None,
                        });
                        debug!(connection = %id, "Relay stopped, peer closed");
                        return;
                    }

                    // Ping, Pong, raw frames
                    Some(Ok(_)) => {}

                    Some(Err(error)) if is_terminal(&error) => {
                        warn!(connection = %id, error = %error, "Relay stopped by terminal read error");
                        let _ = events.send(SessionEvent::Closed {
                            connection: id,
                            error: Some(error.to_string()),
                        });
                        return;
                    }

                    Some(Err(error)) => {
                        warn!(connection = %id, error = %error, "Discarding relay read error");
                    }

                    None => {
                        let _ = events.send(SessionEvent::Closed {
                            connection: id,
                            error: None,
                        });
                        debug!(connection = %id, "Relay stopped, stream ended");
                        return;
                    }
                }
            }
        }

        sleep(poll_interval).await;
    }
}

/// Returns `true` for read errors the relay cannot recover from.
fn is_terminal(error: &WsError) -> bool {
    matches!(
        error,
        WsError::ConnectionClosed
            | WsError::AlreadyClosed
            | WsError::Io(_)
            | WsError::Protocol(ProtocolError::ResetWithoutClosingHandshake)
    )
}

// ============================================================================
// Tests
// ============================================================================
