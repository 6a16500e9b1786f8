//! Signal evaluation: the fixed, ordered table of quality checks.
//!
//! Each entry pairs a [`Signal`] with a predicate that returns the deduction
//! and issue text when triggered. Every check runs independently of the
//! others, so issues stack.

use super::contacts::Contacts;
use super::scoring::final_score;
use crate::markup::MarkupView;
use crate::Signal;

/// Earliest copyright year considered when looking for stale footers
pub const COPYRIGHT_FIRST_YEAR: i32 = 2015;

/// Phrases marking an unfinished site, checked in this order
pub const CONSTRUCTION_PHRASES: [&str; 5] = [
    "under construction",
    "coming soon",
    "website under development",
    "site under construction",
    "page under construction",
];

/// Titles shorter than this (after stripping) are considered poor
pub const MIN_TITLE_CHARS: usize = 10;

/// Points deducted per broken image
pub const BROKEN_IMAGE_POINTS: u32 = 5;

/// Everything the checks look at for one page
#[derive(Debug, Clone, Copy)]
pub struct SignalContext<'a> {
    pub markup: &'a MarkupView,
    /// URL the page was fetched from
    pub url: &'a str,
    pub https_fallback: bool,
    /// `None` when the fetch path does not expose a status
    pub http_status: Option<u16>,
    pub contacts: &'a Contacts,
    /// `None` when images were not probed
    pub broken_images: Option<usize>,
    pub current_year: i32,
}

/// One triggered check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deduction {
    pub signal: Signal,
    pub points: u32,
    pub message: String,
}

type Check = fn(&SignalContext<'_>) -> Option<(u32, String)>;

/// A row of the deduction table
pub struct SignalRule {
    pub signal: Signal,
    check: Check,
}

impl SignalRule {
    /// Run this check alone
    pub fn check(&self, ctx: &SignalContext<'_>) -> Option<Deduction> {
        (self.check)(ctx).map(|(points, message)| Deduction {
            signal: self.signal,
            points,
            message,
        })
    }
}

/// The deduction table, in evaluation order
pub const SIGNAL_RULES: [SignalRule; 13] = [
    SignalRule { signal: Signal::HttpsFallback, check: https_fallback },
    SignalRule { signal: Signal::HttpStatus, check: http_status },
    SignalRule { signal: Signal::ParseError, check: parse_error },
    SignalRule { signal: Signal::NoHttps, check: no_https },
    SignalRule { signal: Signal::NoViewport, check: no_viewport },
    SignalRule { signal: Signal::OutdatedCopyright, check: outdated_copyright },
    SignalRule { signal: Signal::PlaceholderContent, check: placeholder_content },
    SignalRule { signal: Signal::UnderConstruction, check: under_construction },
    SignalRule { signal: Signal::EmbeddedObjects, check: embedded_objects },
    SignalRule { signal: Signal::NoCharset, check: no_charset },
    SignalRule { signal: Signal::PoorTitle, check: poor_title },
    SignalRule { signal: Signal::NoContactInfo, check: no_contact_info },
    SignalRule { signal: Signal::BrokenImages, check: broken_images },
];

/// Score and the deductions that explain it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub score: u8,
    pub deductions: Vec<Deduction>,
}

impl Evaluation {
    /// Issue strings in evaluation order
    pub fn issues(&self) -> Vec<String> {
        self.deductions.iter().map(|d| d.message.clone()).collect()
    }
}

/// Run every enabled check in table order.
pub fn evaluate(ctx: &SignalContext<'_>, enabled: impl Fn(Signal) -> bool) -> Evaluation {
    let deductions: Vec<Deduction> = SIGNAL_RULES
        .iter()
        .filter(|rule| enabled(rule.signal))
        .filter_map(|rule| rule.check(ctx))
        .collect();
    Evaluation {
        score: final_score(&deductions),
        deductions,
    }
}

fn https_fallback(ctx: &SignalContext<'_>) -> Option<(u32, String)> {
    ctx.https_fallback
        .then(|| (20, "HTTPS not available".to_string()))
}

fn http_status(ctx: &SignalContext<'_>) -> Option<(u32, String)> {
    match ctx.http_status {
        Some(status) if status != 200 => Some((30, format!("HTTP {}", status))),
        _ => None,
    }
}

fn parse_error(ctx: &SignalContext<'_>) -> Option<(u32, String)> {
    ctx.markup
        .parse_error
        .as_ref()
        .map(|detail| (10, format!("HTML parsing error: {}", detail)))
}

fn no_https(ctx: &SignalContext<'_>) -> Option<(u32, String)> {
    (!ctx.url.starts_with("https://")).then(|| (20, "No HTTPS".to_string()))
}

fn no_viewport(ctx: &SignalContext<'_>) -> Option<(u32, String)> {
    (!ctx.markup.has_meta_named("viewport")).then(|| (15, "No mobile viewport".to_string()))
}

fn outdated_copyright(ctx: &SignalContext<'_>) -> Option<(u32, String)> {
    let text = &ctx.markup.text_content;
    (COPYRIGHT_FIRST_YEAR..=ctx.current_year - 2)
        .find(|year| {
            text.contains(&format!("© {}", year)) || text.contains(&format!("copyright {}", year))
        })
        .map(|year| (10, format!("Outdated copyright: {}", year)))
}

fn placeholder_content(ctx: &SignalContext<'_>) -> Option<(u32, String)> {
    ctx.markup
        .text_content
        .contains("lorem ipsum")
        .then(|| (25, "Contains Lorem ipsum".to_string()))
}

fn under_construction(ctx: &SignalContext<'_>) -> Option<(u32, String)> {
    CONSTRUCTION_PHRASES
        .iter()
        .any(|phrase| ctx.markup.text_content.contains(phrase))
        .then(|| (30, "Under construction".to_string()))
}

fn embedded_objects(ctx: &SignalContext<'_>) -> Option<(u32, String)> {
    ctx.markup
        .has_embedded_objects
        .then(|| (25, "Uses Flash/embedded objects".to_string()))
}

fn no_charset(ctx: &SignalContext<'_>) -> Option<(u32, String)> {
    (!ctx.markup.declares_charset()).then(|| (5, "No charset declaration".to_string()))
}

fn poor_title(ctx: &SignalContext<'_>) -> Option<(u32, String)> {
    (ctx.markup.title.trim().chars().count() < MIN_TITLE_CHARS)
        .then(|| (15, "Poor/missing page title".to_string()))
}

fn no_contact_info(ctx: &SignalContext<'_>) -> Option<(u32, String)> {
    ctx.contacts
        .is_empty()
        .then(|| (20, "No contact info found".to_string()))
}

fn broken_images(ctx: &SignalContext<'_>) -> Option<(u32, String)> {
    match ctx.broken_images {
        Some(count) if count > 0 => Some((
            BROKEN_IMAGE_POINTS * count as u32,
            format!("{} broken images", count),
        )),
        _ => None,
    }
}
