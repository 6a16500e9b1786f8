//! Analysis engine - runs the single-URL pipeline

use super::contacts::extract_contacts;
use super::scoring::LeadThresholds;
use super::signals::{evaluate, SignalContext};
use crate::fetcher::{fetch_with_fallback, normalize_url, FetchOutcome, PageFetcher};
use crate::markup::{self, MarkupView};
use crate::{AnalysisResult, AnalysisStatus, Signal};
use chrono::{Datelike, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use url::Url;

/// Longest business name kept from a page title
pub const MAX_BUSINESS_NAME_CHARS: usize = 100;

/// How much of the page the analyzer looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Status check and broken-image probes included
    #[default]
    Full,
    /// Markup and text only
    Lite,
}

/// Per-run knobs for [`SiteAnalyzer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerOptions {
    pub mode: AnalysisMode,
    pub max_image_probes: usize,
    pub thresholds: LeadThresholds,
    /// Signals that are never evaluated
    pub disabled: BTreeSet<Signal>,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            mode: AnalysisMode::Full,
            max_image_probes: 5,
            thresholds: LeadThresholds::default(),
            disabled: BTreeSet::new(),
        }
    }
}

impl AnalyzerOptions {
    pub fn is_enabled(&self, signal: Signal) -> bool {
        !self.disabled.contains(&signal)
    }
}

/// Scores one site at a time through a [`PageFetcher`]
pub struct SiteAnalyzer<F: PageFetcher> {
    fetcher: F,
    options: AnalyzerOptions,
}

impl<F: PageFetcher> SiteAnalyzer<F> {
    pub fn new(fetcher: F, options: AnalyzerOptions) -> Self {
        Self { fetcher, options }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch and score `raw_input`. Never fails: an unreachable site comes
    /// back as an error record.
    pub fn analyze(&self, raw_input: &str) -> AnalysisResult {
        let now = Local::now().naive_local();
        let url = normalize_url(raw_input);
        log::info!("Analyzing: {}", url);

        match fetch_with_fallback(&self.fetcher, raw_input) {
            Ok(outcome) => self.analyze_page(&outcome, now),
            Err(err) => {
                log::warn!("{} not accessible: {}", url, err);
                AnalysisResult::error(url, format!("Site not accessible: {}", err), now)
            }
        }
    }

    /// Score an already fetched page. Deterministic apart from image probes.
    pub fn analyze_page(&self, outcome: &FetchOutcome, now: NaiveDateTime) -> AnalysisResult {
        let view = markup::extract(&outcome.page.body);
        let contacts = extract_contacts(&view.text_content);

        let (http_status, broken_images) = match self.options.mode {
            AnalysisMode::Full => {
                let broken = if self.options.is_enabled(Signal::BrokenImages) {
                    Some(self.count_broken_images(&outcome.url, &view))
                } else {
                    None
                };
                (Some(outcome.page.status), broken)
            }
            AnalysisMode::Lite => (None, None),
        };

        let ctx = SignalContext {
            markup: &view,
            url: &outcome.url,
            https_fallback: outcome.https_fallback,
            http_status,
            contacts: &contacts,
            broken_images,
            current_year: now.year(),
        };
        let evaluation = evaluate(&ctx, |signal| self.options.is_enabled(signal));
        let class = self.options.thresholds.classify(evaluation.score);

        AnalysisResult {
            url: outcome.url.clone(),
            business_name: business_name(&view),
            quality_score: evaluation.score,
            issues: evaluation.issues(),
            needs_redesign: class.needs_redesign,
            is_hot_lead: class.is_hot_lead,
            phone: contacts.phone,
            email: contacts.email,
            status: AnalysisStatus::Analyzed,
            analysis_date: now,
        }
    }

    /// Probe the sources among the first few `<img>` elements, one at a time.
    /// Elements without a `src` still use up a slot. A 404, a failed probe or
    /// an unresolvable `src` all count as broken.
    fn count_broken_images(&self, page_url: &str, view: &MarkupView) -> usize {
        let base = Url::parse(page_url).ok();

        view.images
            .iter()
            .take(self.options.max_image_probes)
            .flatten()
            .filter(|src| {
                let Some(resolved) = base.as_ref().and_then(|b| b.join(src).ok()) else {
                    log::debug!("cannot resolve image {} against {}", src, page_url);
                    return true;
                };
                match self.fetcher.probe(resolved.as_str()) {
                    Ok(404) => {
                        log::debug!("broken image {}", resolved);
                        true
                    }
                    Ok(_) => false,
                    Err(err) => {
                        log::debug!("image probe {} failed: {}", resolved, err);
                        true
                    }
                }
            })
            .count()
    }
}

/// Stripped title cut to [`MAX_BUSINESS_NAME_CHARS`], else the first heading
fn business_name(view: &MarkupView) -> String {
    let title = view.title.trim();
    if !title.is_empty() {
        return title.chars().take(MAX_BUSINESS_NAME_CHARS).collect();
    }
    view.heading.trim().to_string()
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use crate::fetcher::fake::FakeFetcher;
    use crate::fetcher::FetchedPage;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn records_respect_invariants(
            ref body in ".{0,300}",
            status in prop::sample::select(vec![200u16, 204, 404, 500]),
            https in any::<bool>(),
        ) {
            let analyzer = SiteAnalyzer::new(FakeFetcher::new(), AnalyzerOptions::default());
            let url = if https { "https://acme.test" } else { "http://acme.test" };
            let page = FetchOutcome {
                url: url.to_string(),
                page: FetchedPage { status, body: body.clone() },
                https_fallback: false,
            };
            let r = analyzer.analyze_page(&page, Local::now().naive_local());
            prop_assert!(r.quality_score <= 100);
            prop_assert!(!r.is_hot_lead || r.needs_redesign);
            prop_assert!(r.url.starts_with("http://") || r.url.starts_with("https://"));
            prop_assert_eq!(
                r.issues.iter().any(|i| i == "No contact info found"),
                r.phone.is_empty() && r.email.is_empty()
            );
        }
    }
}
