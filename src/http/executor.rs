//! Request dispatch and response normalization.
//!
//! One [`HttpExecutor`] is shared for the life of the bridge; each call is
//! an independent round-trip with no timeout and no retry.

// ============================================================================
// Imports
// ============================================================================

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::request::{HeaderEntry, QueryEntry, append_query, header_map};

use super::format::{collect_headers, format_body, status_line};

// ============================================================================
// HttpResult
// ============================================================================

/// Normalized outcome of one HTTP round-trip.
///
/// Immutable after construction and owned by the caller. `status` is the
/// full status line text (`"200 OK"`); `headers` preserves every value of
/// repeated header names.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HttpResult {
    /// Final target URL, query rows appended.
    pub url: String,

    /// Status line text, empty on failure.
    pub status: String,

    /// Response headers, lowercase names, all values kept.
    pub headers: FxHashMap<String, Vec<String>>,

    /// Formatted response body, empty on failure.
    pub body: String,
}

impl HttpResult {
    /// Creates the empty-shell result returned when a request fails.
    ///
    /// Carries only the target URL; status, headers, and body stay empty so
    /// the front-end renders a failed call exactly like an empty response.
    #[inline]
    #[must_use]
    pub fn failed(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

// ============================================================================
// HttpExecutor
// ============================================================================

/// One-shot HTTP request executor.
///
/// Wraps a shared [`reqwest::Client`]; cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct HttpExecutor {
    /// Shared HTTP client.
    client: Client,
}

impl HttpExecutor {
    /// Creates an executor with a default client.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Creates an executor around an existing client.
    #[inline]
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Executes one request, swallowing failures.
    ///
    /// On any failure (bad method, unbuildable request, transport error)
    /// the error is logged at WARN and [`HttpResult::failed`] is returned
    /// with the query-appended URL. Callers that need to distinguish
    /// failure from an empty response use [`try_execute`](Self::try_execute).
    pub async fn execute(
        &self,
        method: &str,
        url: &str,
        headers: &[HeaderEntry],
        query: &[QueryEntry],
        body: impl Into<String>,
    ) -> HttpResult {
        let target = append_query(url, query);

        match self.dispatch(method, &target, headers, body.into()).await {
            Ok(result) => result,
            Err(error) => {
                warn!(url = %target, error = %error, "HTTP request failed");
                HttpResult::failed(target)
            }
        }
    }

    /// Executes one request, surfacing failures.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] for an unusable method
    /// - [`Error::Http`] for request-construction and transport failures
    pub async fn try_execute(
        &self,
        method: &str,
        url: &str,
        headers: &[HeaderEntry],
        query: &[QueryEntry],
        body: impl Into<String>,
    ) -> Result<HttpResult> {
        let target = append_query(url, query);
        self.dispatch(method, &target, headers, body.into()).await
    }

    /// Performs the round-trip against an already-built target URL.
    async fn dispatch(
        &self,
        method: &str,
        target: &str,
        headers: &[HeaderEntry],
        body: String,
    ) -> Result<HttpResult> {
        let method = Method::from_bytes(method.as_bytes())
            .map_err(|_| Error::invalid_argument(format!("unsupported method: {method}")))?;

        let request = self
            .client
            .request(method, target)
            .headers(header_map(headers))
            .body(body)
            .build()?;

        debug!(url = %target, "Dispatching HTTP request");

        let response = self.client.execute(request).await?;

        let status = status_line(response.status());
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let headers = collect_headers(response.headers());

        let bytes = response.bytes().await?;
        let body = format_body(content_type.as_deref(), &bytes);

        Ok(HttpResult {
            url: target.to_string(),
            status,
            headers,
            body,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
