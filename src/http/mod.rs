//! Request Builder: one-shot HTTP execution.
//!
//! The executor turns a method, URL, editable rows, and a body into a
//! single HTTP round-trip and normalizes the response into [`HttpResult`].
//! There is no timeout, no retry, and no state retained between calls
//! beyond the connection pooling internal to the shared client.
//!
//! # Failure Surfaces
//!
//! [`HttpExecutor::try_execute`] threads every failure through
//! [`Result`](crate::Result). [`HttpExecutor::execute`] is the front-end
//! parity surface: it logs the failure and returns an empty-bodied
//! [`HttpResult`] carrying only the target URL, indistinguishable from a
//! genuinely empty response.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `executor` | Request dispatch and response normalization |
//! | `format` | Response-body formatting (JSON re-indentation) |

// ============================================================================
// Submodules
// ============================================================================

/// Request dispatch and response normalization.
pub mod executor;

/// Response-body formatting.
pub mod format;

// ============================================================================
// Re-exports
// ============================================================================

pub use executor::{HttpExecutor, HttpResult};
