//! Response normalization.
//!
//! Body formatting plus the status-line and header-map rendering shared by
//! the HTTP executor and the WebSocket handshake metadata. JSON bodies are
//! re-serialized with one-tab indentation so the front-end can display them
//! readably without reformatting on its side; everything else passes
//! through unchanged.

// ============================================================================
// Imports
// ============================================================================

use rustc_hash::FxHashMap;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};
use tokio_tungstenite::tungstenite::http::{HeaderMap, StatusCode};

// ============================================================================
// Body Formatting
// ============================================================================

/// Normalizes a response body for display.
///
/// If `content_type` contains `application/json`, the body is parsed and
/// re-serialized with 1-tab indentation; a body that fails to parse
/// produces an empty string. Any other content type passes the bytes
/// through as (lossy) UTF-8.
#[must_use]
pub fn format_body(content_type: Option<&str>, bytes: &[u8]) -> String {
    let is_json = content_type.is_some_and(|ct| ct.contains("application/json"));

    if is_json {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(value) => pretty_tabs(&value),
            Err(_) => String::new(),
        }
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

/// Serializes a JSON value with tab indentation.
fn pretty_tabs(value: &Value) -> String {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));

    if value.serialize(&mut ser).is_err() {
        return String::new();
    }

    String::from_utf8_lossy(&buf).into_owned()
}

// ============================================================================
// Status and Headers
// ============================================================================

/// Renders a status line like `200 OK`.
#[must_use]
pub(crate) fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

/// Collects response headers into a multi-value map.
///
/// Names come out lowercase; every value of a repeated name is kept, in
/// wire order.
#[must_use]
pub(crate) fn collect_headers(headers: &HeaderMap) -> FxHashMap<String, Vec<String>> {
    let mut map: FxHashMap<String, Vec<String>> = FxHashMap::default();

    for (name, value) in headers {
        map.entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }

    map
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use tokio_tungstenite::tungstenite::http::HeaderValue;

    #[test]
    fn test_json_body_tab_indented() {
        let body = format_body(Some("application/json"), br#"{"a":1}"#);
        assert_eq!(body, "{\n\t\"a\": 1\n}");
    }

    #[test]
    fn test_json_content_type_with_charset() {
        let body = format_body(Some("application/json; charset=utf-8"), br#"[1,2]"#);
        assert_eq!(body, "[\n\t1,\n\t2\n]");
    }

    #[test]
    fn test_json_round_trip_structurally_equal() {
        let original = br#"{"b":[1,{"c":null}],"a":"x"}"#;
        let formatted = format_body(Some("application/json"), original);

        let reparsed: Value = serde_json::from_str(&formatted).expect("formatted output is JSON");
        let source: Value = serde_json::from_slice(original).expect("source is JSON");
        assert_eq!(reparsed, source);
    }

    #[test]
    fn test_invalid_json_becomes_empty() {
        let body = format_body(Some("application/json"), b"{not json");
        assert_eq!(body, "");
    }

    #[test]
    fn test_non_json_passes_through() {
        let body = format_body(Some("text/html"), b"<p>hello</p>");
        assert_eq!(body, "<p>hello</p>");
    }

    #[test]
    fn test_missing_content_type_passes_through() {
        let body = format_body(None, b"{\"a\":1}");
        assert_eq!(body, "{\"a\":1}");
    }

    #[test]
    fn test_status_line_rendering() {
        assert_eq!(status_line(StatusCode::OK), "200 OK");
        assert_eq!(status_line(StatusCode::SWITCHING_PROTOCOLS), "101 Switching Protocols");
    }

    #[test]
    fn test_collect_headers_multi_value() {
        let mut headers = HeaderMap::new();
        headers.append("set-cookie", HeaderValue::from_static("a=1"));
        headers.append("set-cookie", HeaderValue::from_static("b=2"));
        headers.insert("content-type", HeaderValue::from_static("text/plain"));

        let map = collect_headers(&headers);
        assert_eq!(
            map.get("set-cookie"),
            Some(&vec!["a=1".to_string(), "b=2".to_string()])
        );
        assert_eq!(map.get("content-type"), Some(&vec!["text/plain".to_string()]));
    }
}
