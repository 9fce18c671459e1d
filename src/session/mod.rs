//! Connection Session Manager: WebSocket lifecycle and message relay.
//!
//! This module owns the hard part of the bridge: a long-lived background
//! task per active connection, coordinated with the front-end's connect
//! commands and disconnect signals, streaming inbound frames back as
//! events.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐ set_connection  ┌────────────────┐   spawns   ┌────────────┐
//! │ Front-end  │────────────────►│ SessionManager │───────────►│ Relay task │
//! │   shell    │ set_connected   │  (session slot)│ watch flag │ (socket)   │
//! └────────────┘                 └────────────────┘            └─────┬──────┘
//!       ▲                                                           │
//!       └────────────────── SessionEvent channel ◄──────────────────┘
//! ```
//!
//! At most one session is live at any time. The manager talks to the relay
//! only through the per-session desired-connected flag; the relay talks to
//! the front-end only through the event channel.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `event` | Outbound event types (`SessionEvent`, `InboundFrame`) |
//! | `manager` | Session slot ownership and lifecycle transitions |
//! | `relay` | The per-connection read loop (internal) |

// ============================================================================
// Submodules
// ============================================================================

/// Outbound event types.
pub mod event;

/// Session slot ownership and lifecycle transitions.
pub mod manager;

/// The per-connection read loop.
mod relay;

// ============================================================================
// Re-exports
// ============================================================================

pub use event::{HandshakeInfo, InboundFrame, SessionEvent};
pub use manager::{SessionManager, SessionOptions};
