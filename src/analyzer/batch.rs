//! Batch driver: sequential, rate-limited analysis of a URL list

use super::engine::SiteAnalyzer;
use crate::fetcher::{normalize_url, PageFetcher};
use crate::AnalysisResult;
use chrono::Local;
use std::any::Any;
use std::convert::Infallible;
use std::panic::{self, AssertUnwindSafe};
use std::thread;
use std::time::Duration;

/// Runs a [`SiteAnalyzer`] over many URLs, one request in flight at a time
pub struct BatchDriver<'a, F: PageFetcher> {
    analyzer: &'a SiteAnalyzer<F>,
    delay: Duration,
}

impl<'a, F: PageFetcher> BatchDriver<'a, F> {
    pub fn new(analyzer: &'a SiteAnalyzer<F>, delay: Duration) -> Self {
        Self { analyzer, delay }
    }

    /// Analyze every URL in order. The output is index-aligned with `urls`.
    pub fn run(&self, urls: &[String]) -> Vec<AnalysisResult> {
        self.run_with(urls, |_, _| {})
    }

    /// Like [`run`](Self::run), calling `on_record` with each record's index as
    /// soon as it is produced.
    pub fn run_with<C>(&self, urls: &[String], mut on_record: C) -> Vec<AnalysisResult>
    where
        C: FnMut(usize, &AnalysisResult),
    {
        let outcome = self.try_run_with(urls, |i, record| {
            on_record(i, record);
            Ok::<(), Infallible>(())
        });
        match outcome {
            Ok(results) => results,
            Err(never) => match never {},
        }
    }

    /// Like [`run_with`](Self::run_with), but the first error from `on_record`
    /// stops the batch before the next URL is fetched.
    pub fn try_run_with<C, E>(
        &self,
        urls: &[String],
        mut on_record: C,
    ) -> Result<Vec<AnalysisResult>, E>
    where
        C: FnMut(usize, &AnalysisResult) -> Result<(), E>,
    {
        let total = urls.len();
        let mut results = Vec::with_capacity(total);

        for (i, url) in urls.iter().enumerate() {
            log::info!("Processing {}/{}: {}", i + 1, total, url);

            let record = self.analyze_contained(url);
            on_record(i, &record)?;
            results.push(record);

            if i + 1 < total && !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
        }

        Ok(results)
    }

    /// A panic inside one analysis becomes that URL's error record.
    fn analyze_contained(&self, url: &str) -> AnalysisResult {
        match panic::catch_unwind(AssertUnwindSafe(|| self.analyzer.analyze(url))) {
            Ok(record) => record,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                log::warn!("analysis of {} panicked: {}", url, message);
                AnalysisResult::error(
                    normalize_url(url),
                    format!("Analysis error: {}", message),
                    Local::now().naive_local(),
                )
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
