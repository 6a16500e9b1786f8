//! leadscore: website quality scoring and sales-lead classification
//!
//! This library fetches a site's homepage, checks the markup and text against
//! a fixed list of quality signals, and turns the resulting score into a
//! sales-lead classification.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod input;
pub mod markup;
pub mod reporter;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Whether scoring completed for a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Analyzed,
    Error,
}

impl std::fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisStatus::Analyzed => write!(f, "analyzed"),
            AnalysisStatus::Error => write!(f, "error"),
        }
    }
}

/// The scored record for one URL. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// URL actually fetched (explicit scheme, after normalization and fallback)
    pub url: String,
    /// Best-effort business name from the title or first heading
    pub business_name: String,
    /// 100 minus the triggered deductions, clamped to 0..=100
    pub quality_score: u8,
    /// One entry per triggered deduction, in evaluation order
    pub issues: Vec<String>,
    pub needs_redesign: bool,
    pub is_hot_lead: bool,
    /// First phone-like match, or empty
    pub phone: String,
    /// First email-like match, or empty
    pub email: String,
    pub status: AnalysisStatus,
    pub analysis_date: NaiveDateTime,
}

impl AnalysisResult {
    /// Record for a URL whose analysis could not complete: score 0 and a
    /// single diagnostic issue.
    pub fn error(url: impl Into<String>, diagnostic: impl Into<String>, at: NaiveDateTime) -> Self {
        Self {
            url: url.into(),
            business_name: String::new(),
            quality_score: 0,
            issues: vec![diagnostic.into()],
            needs_redesign: false,
            is_hot_lead: false,
            phone: String::new(),
            email: String::new(),
            status: AnalysisStatus::Error,
            analysis_date: at,
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == AnalysisStatus::Error
    }
}

/// Quality signals, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Signal {
    /// HTTPS attempt failed, page came over HTTP
    HttpsFallback,
    /// Status other than 200
    HttpStatus,
    /// Body did not decode cleanly
    ParseError,
    NoHttps,
    NoViewport,
    OutdatedCopyright,
    PlaceholderContent,
    UnderConstruction,
    /// Flash-era `<object>`/`<embed>`
    EmbeddedObjects,
    NoCharset,
    PoorTitle,
    NoContactInfo,
    BrokenImages,
}

impl Signal {
    pub const ALL: [Signal; 13] = [
        Signal::HttpsFallback,
        Signal::HttpStatus,
        Signal::ParseError,
        Signal::NoHttps,
        Signal::NoViewport,
        Signal::OutdatedCopyright,
        Signal::PlaceholderContent,
        Signal::UnderConstruction,
        Signal::EmbeddedObjects,
        Signal::NoCharset,
        Signal::PoorTitle,
        Signal::NoContactInfo,
        Signal::BrokenImages,
    ];

    /// Look up a signal by its kebab-case id
    pub fn from_id(id: &str) -> Option<Signal> {
        Signal::ALL.into_iter().find(|s| s.to_string() == id)
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signal::HttpsFallback => write!(f, "https-fallback"),
            Signal::HttpStatus => write!(f, "http-status"),
            Signal::ParseError => write!(f, "parse-error"),
            Signal::NoHttps => write!(f, "no-https"),
            Signal::NoViewport => write!(f, "no-viewport"),
            Signal::OutdatedCopyright => write!(f, "outdated-copyright"),
            Signal::PlaceholderContent => write!(f, "placeholder-content"),
            Signal::UnderConstruction => write!(f, "under-construction"),
            Signal::EmbeddedObjects => write!(f, "embedded-objects"),
            Signal::NoCharset => write!(f, "no-charset"),
            Signal::PoorTitle => write!(f, "poor-title"),
            Signal::NoContactInfo => write!(f, "no-contact-info"),
            Signal::BrokenImages => write!(f, "broken-images"),
        }
    }
}

/// Public API: analyze a single URL with default settings over the network.
pub fn analyze_url(raw_input: &str) -> Result<AnalysisResult, error::FetchError> {
    let fetcher = fetcher::HttpFetcher::new(fetcher::FetchSettings::default())?;
    let analyzer = analyzer::SiteAnalyzer::new(fetcher, analyzer::AnalyzerOptions::default());
    Ok(analyzer.analyze(raw_input))
}
