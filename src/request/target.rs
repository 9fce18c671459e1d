//! Target URL and header-map construction.
//!
//! Turns the editable rows of [`entry`](super::entry) into the concrete
//! query string and header set a request is sent with. Used identically by
//! the HTTP executor and the WebSocket handshake.

// ============================================================================
// Imports
// ============================================================================

use tokio_tungstenite::tungstenite::http::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use super::entry::{HeaderEntry, QueryEntry};

// ============================================================================
// Query Appension
// ============================================================================

/// Appends active query rows to `url`, in input order.
///
/// The first appended row uses `?` only when the URL (as extended so far)
/// contains no `?`; every later row uses `&`. Names and values are passed
/// through verbatim with no URL-encoding: the workbench treats them as
/// already wire-ready, malformed characters included.
#[must_use]
pub fn append_query(url: &str, query: &[QueryEntry]) -> String {
    let mut target = url.to_string();

    for entry in query {
        if !entry.is_active() {
            continue;
        }

        let separator = if target.contains('?') { '&' } else { '?' };
        target.push(separator);
        target.push_str(&entry.name);
        target.push('=');
        target.push_str(&entry.value);
    }

    target
}

// ============================================================================
// Header Map
// ============================================================================

/// Builds the header map from sendable header rows.
///
/// Rows that fail [`HeaderEntry::is_sendable`] are skipped, as are rows
/// whose name or value the wire layer itself rejects (characters legal in
/// the row character class but illegal in an HTTP header token). Both
/// skips are silent apart from a debug log.
#[must_use]
pub fn header_map(headers: &[HeaderEntry]) -> HeaderMap {
    let mut map = HeaderMap::new();

    for entry in headers {
        if !entry.is_sendable() {
            continue;
        }

        let name = match HeaderName::from_bytes(entry.name.as_bytes()) {
            Ok(name) => name,
            Err(_) => {
                debug!(name = %entry.name, "Skipping header with non-token name");
                continue;
            }
        };
        let value = match HeaderValue::from_str(&entry.value) {
            Ok(value) => value,
            Err(_) => {
                debug!(name = %entry.name, "Skipping header with invalid value");
                continue;
            }
        };

        map.append(name, value);
    }

    map
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn test_append_first_uses_question_mark() {
        let url = append_query("https://example.test/api", &[QueryEntry::new("q", "5")]);
        assert_eq!(url, "https://example.test/api?q=5");
    }

    #[test]
    fn test_append_uses_ampersand_after_existing_query() {
        let url = append_query("https://example.test/api?page=1", &[QueryEntry::new("q", "5")]);
        assert_eq!(url, "https://example.test/api?page=1&q=5");
    }

    #[test]
    fn test_append_multiple_in_order() {
        let query = vec![
            QueryEntry::new("a", "1"),
            QueryEntry::new("b", "2"),
            QueryEntry::new("c", "3"),
        ];
        let url = append_query("https://example.test", &query);
        assert_eq!(url, "https://example.test?a=1&b=2&c=3");
    }

    #[test]
    fn test_append_skips_inactive_rows() {
        let query = vec![
            QueryEntry::disabled("a", "1"),
            QueryEntry::new("", "2"),
            QueryEntry::new("b", ""),
            QueryEntry::new("c", "3"),
        ];
        let url = append_query("https://example.test", &query);
        assert_eq!(url, "https://example.test?c=3");
    }

    #[test]
    fn test_append_performs_no_encoding() {
        let url = append_query(
            "https://example.test",
            &[QueryEntry::new("search term", "a b&c")],
        );
        assert_eq!(url, "https://example.test?search term=a b&c");
    }

    #[test]
    fn test_header_map_keeps_sendable_rows() {
        let headers = vec![
            HeaderEntry::new("X-Test", "1"),
            HeaderEntry::disabled("X-Off", "2"),
            HeaderEntry::new("", "3"),
        ];
        let map = header_map(&headers);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("x-test").and_then(|v| v.to_str().ok()), Some("1"));
    }

    #[test]
    fn test_header_map_drops_non_token_names() {
        // Passes the row character class but is not a legal header token
        let headers = vec![HeaderEntry::new("a:b", "1"), HeaderEntry::new("X-Ok", "2")];
        let map = header_map(&headers);
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("x-ok"));
    }

    #[test]
    fn test_header_map_keeps_duplicate_names() {
        let headers = vec![
            HeaderEntry::new("X-Test", "1"),
            HeaderEntry::new("X-Test", "2"),
        ];
        let map = header_map(&headers);
        assert_eq!(map.get_all("x-test").iter().count(), 2);
    }

    proptest! {
        /// Appension order always matches input order, and `?` appears
        /// exactly once for a base URL without one.
        #[test]
        fn prop_append_preserves_order(
            names in proptest::collection::vec("[a-z]{1,8}", 1..6),
            values in proptest::collection::vec("[0-9]{1,4}", 1..6),
        ) {
            let query: Vec<QueryEntry> = names
                .iter()
                .zip(values.iter())
                .map(|(n, v)| QueryEntry::new(n.clone(), v.clone()))
                .collect();

            let url = append_query("https://example.test/api", &query);
            prop_assert_eq!(url.matches('?').count(), 1);

            let expected: Vec<String> = query
                .iter()
                .map(|e| format!("{}={}", e.name, e.value))
                .collect();
            let tail = url.split('?').nth(1).unwrap_or_default();
            prop_assert_eq!(tail.split('&').map(String::from).collect::<Vec<_>>(), expected);
        }

        /// A header row is attached iff it passes the sendable rule.
        #[test]
        fn prop_header_attached_iff_sendable(
            enabled in any::<bool>(),
            name in "[ -~]{0,12}",
            value in "[ -~]{0,12}",
        ) {
            let entry = HeaderEntry { enabled, name, value };
            let map = header_map(std::slice::from_ref(&entry));

            if map.is_empty() {
                // Dropped rows are either not sendable or rejected by the
                // wire layer; sendable rows with token names must survive.
                let token_name = HeaderName::from_bytes(entry.name.as_bytes()).is_ok();
                prop_assert!(!(entry.is_sendable() && token_name));
            } else {
                prop_assert!(entry.is_sendable());
            }
        }
    }
}
