//! Header and query row types.
//!
//! Both row types share the `{enabled, name, value}` shape the front-end
//! edits in place. A row participates in a request only while it is enabled
//! and completely filled in.

// ============================================================================
// Imports
// ============================================================================

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Characters allowed in a header name row.
///
/// Letters, digits, and a fixed punctuation set. Names outside this class
/// are dropped without error.
static HEADER_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[A-Za-z\d\[\]{}()<>/@?=:";,-]*$"#).expect("header name pattern")
});

// ============================================================================
// HeaderEntry
// ============================================================================

/// One editable header row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEntry {
    /// Whether the row participates in the request.
    pub enabled: bool,

    /// Header name.
    pub name: String,

    /// Header value.
    pub value: String,
}

impl HeaderEntry {
    /// Creates an enabled header row.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            enabled: true,
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates a disabled header row.
    #[inline]
    #[must_use]
    pub fn disabled(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            enabled: false,
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns `true` if this row should be attached to a request.
    ///
    /// A header is sendable iff it is enabled, its name and value are
    /// non-blank after trimming, and the name matches the allowed
    /// character class. The name is matched untrimmed, so surrounding
    /// whitespace disqualifies it.
    #[must_use]
    pub fn is_sendable(&self) -> bool {
        self.enabled
            && !self.name.trim().is_empty()
            && HEADER_NAME.is_match(&self.name)
            && !self.value.trim().is_empty()
    }
}

// ============================================================================
// QueryEntry
// ============================================================================

/// One editable query-parameter row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryEntry {
    /// Whether the row participates in the request.
    pub enabled: bool,

    /// Parameter name.
    pub name: String,

    /// Parameter value.
    pub value: String,
}

impl QueryEntry {
    /// Creates an enabled query row.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            enabled: true,
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates a disabled query row.
    #[inline]
    #[must_use]
    pub fn disabled(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            enabled: false,
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns `true` if this row should be appended to the target URL.
    ///
    /// Query rows have no character-class rule; only enablement and
    /// blankness are checked.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.enabled && !self.name.trim().is_empty() && !self.value.trim().is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
