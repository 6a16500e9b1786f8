//! In-memory fetcher for unit tests

use super::{FetchedPage, PageFetcher};
use crate::error::FetchError;
use std::cell::RefCell;
use std::collections::HashMap;

/// Serves canned pages; unknown URLs fail to connect, unknown probes return 200.
#[derive(Default)]
pub(crate) struct FakeFetcher {
    pages: HashMap<String, Result<FetchedPage, FetchError>>,
    probes: HashMap<String, Result<u16, FetchError>>,
    requests: RefCell<Vec<String>>,
    probed: RefCell<Vec<String>>,
}

impl FakeFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_page(mut self, url: &str, status: u16, body: &str) -> Self {
        self.pages.insert(
            url.to_string(),
            Ok(FetchedPage {
                status,
                body: body.to_string(),
            }),
        );
        self
    }

    pub(crate) fn with_failure(mut self, url: &str, err: FetchError) -> Self {
        self.pages.insert(url.to_string(), Err(err));
        self
    }

    pub(crate) fn with_probe(mut self, url: &str, result: Result<u16, FetchError>) -> Self {
        self.probes.insert(url.to_string(), result);
        self
    }

    pub(crate) fn requested(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub(crate) fn probed(&self) -> Vec<String> {
        self.probed.borrow().clone()
    }
}

impl PageFetcher for FakeFetcher {
    fn get(&self, url: &str) -> Result<FetchedPage, FetchError> {
        self.requests.borrow_mut().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::Connect("no route to host".to_string())))
    }

    fn probe(&self, url: &str) -> Result<u16, FetchError> {
        self.probed.borrow_mut().push(url.to_string());
        self.probes.get(url).cloned().unwrap_or(Ok(200))
    }
}
