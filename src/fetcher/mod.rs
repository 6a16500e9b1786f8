//! Page fetching: URL normalization, the `PageFetcher` seam, and the one
//! HTTPS to HTTP fallback.

pub mod encoding;
pub mod http;

#[cfg(test)]
pub(crate) mod fake;

pub use http::{FetchSettings, HttpFetcher, DEFAULT_USER_AGENT};

use crate::error::FetchError;

/// A response as seen by the analyzer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// HTTP status code (non-2xx is not a failure)
    pub status: u16,
    /// Decoded body text
    pub body: String,
}

/// Network access used by the analyzer. One implementation talks HTTP, tests
/// substitute in-memory fakes.
pub trait PageFetcher {
    /// GET a page, following redirects
    fn get(&self, url: &str) -> Result<FetchedPage, FetchError>;

    /// Lightweight existence check for an asset; returns the status code
    fn probe(&self, url: &str) -> Result<u16, FetchError>;
}

/// Result of fetching one user-supplied URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    /// URL that produced the page (scheme always explicit)
    pub url: String,
    pub page: FetchedPage,
    /// True when the HTTPS attempt failed and the page came over plain HTTP
    pub https_fallback: bool,
}

/// Give a bare host or path an explicit scheme; `https://` when none is present.
pub fn normalize_url(raw_input: &str) -> String {
    let trimmed = raw_input.trim();
    for scheme in ["https://", "http://"] {
        if trimmed.len() >= scheme.len()
            && trimmed.is_char_boundary(scheme.len())
            && trimmed[..scheme.len()].eq_ignore_ascii_case(scheme)
        {
            return format!("{}{}", scheme, &trimmed[scheme.len()..]);
        }
    }
    format!("https://{}", trimmed)
}

/// Fetch `raw_input`, retrying once over `http://` if an `https://` attempt fails.
pub fn fetch_with_fallback<F: PageFetcher + ?Sized>(
    fetcher: &F,
    raw_input: &str,
) -> Result<FetchOutcome, FetchError> {
    let url = normalize_url(raw_input);

    match fetcher.get(&url) {
        Ok(page) => Ok(FetchOutcome {
            url,
            page,
            https_fallback: false,
        }),
        Err(primary) => {
            let Some(rest) = url.strip_prefix("https://") else {
                return Err(primary);
            };
            let http_url = format!("http://{}", rest);
            log::debug!("{} failed ({}), retrying as {}", url, primary, http_url);
            let page = fetcher.get(&http_url)?;
            Ok(FetchOutcome {
                url: http_url,
                page,
                https_fallback: true,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeFetcher;
    use super::*;

    #[test]
    fn bare_host_gets_https() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("  example.com/about "), "https://example.com/about");
    }

    #[test]
    fn explicit_scheme_is_kept() {
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_url("https://example.com"), "https://example.com");
    }

    #[test]
    fn scheme_case_is_normalized() {
        assert_eq!(normalize_url("HTTP://Example.com"), "http://Example.com");
        assert_eq!(normalize_url("Https://example.com"), "https://example.com");
    }

    #[test]
    fn https_success_has_no_fallback() {
        let fetcher = FakeFetcher::new().with_page("https://example.com", 200, "<p>ok</p>");
        let outcome = fetch_with_fallback(&fetcher, "example.com").unwrap();
        assert_eq!(outcome.url, "https://example.com");
        assert!(!outcome.https_fallback);
        assert_eq!(fetcher.requested(), vec!["https://example.com"]);
    }

    #[test]
    fn https_failure_falls_back_to_http_once() {
        let fetcher = FakeFetcher::new()
            .with_failure(
                "https://example.com",
                FetchError::Connect("tls handshake failed".to_string()),
            )
            .with_page("http://example.com", 200, "<p>ok</p>");
        let outcome = fetch_with_fallback(&fetcher, "https://example.com").unwrap();
        assert_eq!(outcome.url, "http://example.com");
        assert!(outcome.https_fallback);
        assert_eq!(
            fetcher.requested(),
            vec!["https://example.com", "http://example.com"]
        );
    }

    #[test]
    fn http_failure_is_not_retried() {
        let fetcher = FakeFetcher::new().with_failure(
            "http://example.com",
            FetchError::Connect("connection refused".to_string()),
        );
        let err = fetch_with_fallback(&fetcher, "http://example.com").unwrap_err();
        assert_eq!(err, FetchError::Connect("connection refused".to_string()));
        assert_eq!(fetcher.requested(), vec!["http://example.com"]);
    }

    #[test]
    fn failed_fallback_surfaces_fallback_error() {
        let fetcher = FakeFetcher::new()
            .with_failure("https://example.com", FetchError::Timeout(10))
            .with_failure(
                "http://example.com",
                FetchError::Connect("connection refused".to_string()),
            );
        let err = fetch_with_fallback(&fetcher, "example.com").unwrap_err();
        assert_eq!(err, FetchError::Connect("connection refused".to_string()));
    }

    #[test]
    fn non_200_status_is_not_a_failure() {
        let fetcher = FakeFetcher::new().with_page("https://example.com", 503, "down");
        let outcome = fetch_with_fallback(&fetcher, "example.com").unwrap();
        assert_eq!(outcome.page.status, 503);
        assert!(!outcome.https_fallback);
    }
}
