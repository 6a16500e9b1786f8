//! Error types for page fetching

use std::error::Error as StdError;

/// Failure to retrieve a page. The `Display` text is what ends up in the
/// single diagnostic issue of an error record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The input could not be turned into a request URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),

    /// No response within the configured timeout
    #[error("Timed out after {0}s")]
    Timeout(u64),

    /// DNS, refused connection, TLS handshake and similar transport failures
    #[error("Connection error: {0}")]
    Connect(String),

    /// Any other request failure (redirect loop, protocol error)
    #[error("Request failed: {0}")]
    Request(String),

    /// The response arrived but its body could not be read
    #[error("Failed to read body: {0}")]
    Body(String),
}

impl FetchError {
    /// Classify a reqwest error, keeping its full source chain in the message
    pub fn from_reqwest(err: &reqwest::Error, timeout_secs: u64) -> Self {
        let detail = error_chain(err);
        if err.is_timeout() {
            FetchError::Timeout(timeout_secs)
        } else if err.is_connect() {
            FetchError::Connect(detail)
        } else if err.is_body() || err.is_decode() {
            FetchError::Body(detail)
        } else if err.is_builder() {
            FetchError::InvalidUrl(detail)
        } else {
            FetchError::Request(detail)
        }
    }
}

/// Join an error and all of its sources with ": "
pub fn error_chain(err: &dyn StdError) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        if !out.contains(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        source = inner.source();
    }
    out
}
