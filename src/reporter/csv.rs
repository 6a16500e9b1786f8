//! CSV export, written incrementally so an interrupted batch keeps its rows

use crate::{AnalysisResult, AnalysisStatus};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub const CSV_HEADERS: [&str; 10] = [
    "url",
    "business_name",
    "quality_score",
    "issues",
    "needs_redesign",
    "is_hot_lead",
    "phone",
    "email",
    "status",
    "analysis_date",
];

pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Serialize)]
struct CsvRow<'a> {
    url: &'a str,
    business_name: &'a str,
    quality_score: u8,
    issues: String,
    needs_redesign: bool,
    is_hot_lead: bool,
    phone: &'a str,
    email: &'a str,
    status: AnalysisStatus,
    analysis_date: String,
}

impl<'a> From<&'a AnalysisResult> for CsvRow<'a> {
    fn from(r: &'a AnalysisResult) -> Self {
        Self {
            url: &r.url,
            business_name: &r.business_name,
            quality_score: r.quality_score,
            issues: r.issues.join("; "),
            needs_redesign: r.needs_redesign,
            is_hot_lead: r.is_hot_lead,
            phone: &r.phone,
            email: &r.email,
            status: r.status,
            analysis_date: r.analysis_date.format(DATE_FORMAT).to_string(),
        }
    }
}

/// Appends one row per record, flushing after each
pub struct CsvSink<W: Write> {
    writer: ::csv::Writer<W>,
    hot_leads_only: bool,
    written: usize,
}

impl CsvSink<File> {
    /// Create (or truncate) `path` and write the header row
    pub fn create(path: &Path, hot_leads_only: bool) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Self::from_writer(file, hot_leads_only)
    }
}

impl<W: Write> CsvSink<W> {
    pub fn from_writer(inner: W, hot_leads_only: bool) -> Result<Self> {
        let mut writer = ::csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(inner);
        writer
            .write_record(CSV_HEADERS)
            .context("Failed to write CSV header")?;
        writer.flush().context("Failed to flush CSV output")?;
        Ok(Self {
            writer,
            hot_leads_only,
            written: 0,
        })
    }

    /// Write `record` unless filtered out. Returns whether a row was written.
    pub fn append(&mut self, record: &AnalysisResult) -> Result<bool> {
        if self.hot_leads_only && !record.is_hot_lead {
            return Ok(false);
        }
        self.writer
            .serialize(CsvRow::from(record))
            .with_context(|| format!("Failed to write CSV row for {}", record.url))?;
        self.writer.flush().context("Failed to flush CSV output")?;
        self.written += 1;
        Ok(true)
    }

    /// Rows written so far, header excluded
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to finish CSV output: {}", e.error()))
    }
}
