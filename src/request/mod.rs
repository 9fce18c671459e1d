//! Request-shaping model shared by the HTTP and WebSocket paths.
//!
//! The front-end describes a request as editable rows of headers and query
//! parameters; each row can be toggled without being deleted. This module
//! owns that row model and the rules for turning rows into an actual target
//! URL and header set.
//!
//! # Validation Policy
//!
//! Rows that are disabled, blank, or carry an invalid header name are
//! silently skipped, never reported as errors. This mirrors how the
//! workbench UI treats half-filled rows: they simply don't participate in
//! the request.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `entry` | Header and query row types and their validation rules |
//! | `target` | Query-string appension and header-map construction |

// ============================================================================
// Submodules
// ============================================================================

/// Header and query row types.
pub mod entry;

/// Target URL and header-map construction.
pub mod target;

// ============================================================================
// Re-exports
// ============================================================================

pub use entry::{HeaderEntry, QueryEntry};
pub use target::{append_query, header_map};
