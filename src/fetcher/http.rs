//! HTTP fetcher backed by a blocking reqwest client

use super::encoding::decode_body;
use super::{FetchedPage, PageFetcher};
use crate::error::{error_chain, FetchError};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

const MAX_REDIRECTS: usize = 10;

/// Client settings for one batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    /// Fixed identifying User-Agent header
    pub user_agent: String,
    /// Page request timeout
    pub timeout: Duration,
    /// Image probe timeout
    pub probe_timeout: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(10),
            probe_timeout: Duration::from_secs(5),
        }
    }
}

/// Fetcher used for real runs. Certificate verification is off: the sites
/// being scored are often self-signed or expired.
pub struct HttpFetcher {
    client: Client,
    settings: FetchSettings,
}

impl HttpFetcher {
    /// Build the client. Keep the value scoped to one batch run.
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(settings.timeout)
            .danger_accept_invalid_certs(true)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| FetchError::Client(error_chain(&e)))?;

        Ok(Self { client, settings })
    }
}

impl PageFetcher for HttpFetcher {
    fn get(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let timeout_secs = self.settings.timeout.as_secs();
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::from_reqwest(&e, timeout_secs))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .bytes()
            .map_err(|e| FetchError::from_reqwest(&e, timeout_secs))?;
        let body = decode_body(content_type.as_deref(), &bytes);

        Ok(FetchedPage { status, body })
    }

    fn probe(&self, url: &str) -> Result<u16, FetchError> {
        let response = self
            .client
            .head(url)
            .timeout(self.settings.probe_timeout)
            .send()
            .map_err(|e| FetchError::from_reqwest(&e, self.settings.probe_timeout.as_secs()))?;
        Ok(response.status().as_u16())
    }
}
