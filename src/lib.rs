//! Wirebench - backend bridge for an interactive API-testing workbench.
//!
//! This library issues configurable one-shot HTTP requests and maintains a
//! single live WebSocket connection on behalf of a graphical front-end,
//! streaming inbound frames back to the front-end as events.
//!
//! # Architecture
//!
//! Two loosely coupled components behind one facade:
//!
//! - **Request Builder** ([`http`]): stateless; one HTTP round-trip per
//!   call, normalized into [`HttpResult`].
//! - **Connection Session Manager** ([`session`]): owns the lifecycle of
//!   at most one active WebSocket connection and the background relay task
//!   that forwards each received frame as a [`SessionEvent`].
//!
//! Key design principles:
//!
//! - At most one live WebSocket session; a new connect replaces (and
//!   cancels) the previous one
//! - The session slot is mutex-guarded; manager and relay communicate only
//!   through channels
//! - Disconnect is a per-session cancellation flag, observed within one
//!   relay poll interval
//! - Half-filled header/query rows are skipped silently, never errors
//!
//! # Quick Start
//!
//! ```no_run
//! use wirebench::{Bridge, HeaderEntry, QueryEntry, SessionEvent};
//!
//! #[tokio::main]
//! async fn main() -> wirebench::Result<()> {
//!     let (bridge, mut events) = Bridge::new();
//!
//!     // One-shot HTTP request
//!     let result = bridge
//!         .execute(
//!             "GET",
//!             "https://example.test/api",
//!             &[HeaderEntry::new("X-Test", "1")],
//!             &[QueryEntry::new("q", "5")],
//!             "",
//!         )
//!         .await;
//!     println!("{}: {}", result.status, result.body);
//!
//!     // Live WebSocket session
//!     bridge
//!         .set_connection("wss://example.test/feed", &[], &[], true)
//!         .await?;
//!
//!     while let Some(event) = events.recv().await {
//!         if let SessionEvent::Frame(frame) = event {
//!             println!("frame: {}", frame.message);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`bridge`] | Facade the host application shell calls |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`http`] | Request Builder: one-shot HTTP execution |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`request`] | Header/query row model and target construction |
//! | [`session`] | WebSocket session lifecycle and message relay |

// ============================================================================
// Modules
// ============================================================================

/// Bridge facade.
///
/// Use [`Bridge::new()`] to create the bridge and its event receiver.
pub mod bridge;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Request Builder: one-shot HTTP execution.
pub mod http;

/// Type-safe identifiers for bridge entities.
pub mod identifiers;

/// Header/query row model shared by the HTTP and WebSocket paths.
pub mod request;

/// WebSocket session lifecycle and message relay.
pub mod session;

// ============================================================================
// Re-exports
// ============================================================================

// Facade
pub use bridge::Bridge;

// Error types
pub use error::{Error, Result};

// HTTP types
pub use http::{HttpExecutor, HttpResult};

// Identifier types
pub use identifiers::ConnectionId;

// Request model
pub use request::{HeaderEntry, QueryEntry};

// Session types
pub use session::{HandshakeInfo, InboundFrame, SessionEvent, SessionManager, SessionOptions};
