//! Console reporter with colored output

use crate::analyzer::{BatchSummary, LeadThresholds};
use crate::AnalysisResult;
use colored::{ColoredString, Colorize};
use std::path::Path;

const RULE_WIDTH: usize = 50;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to list issues under each record
    verbose: bool,
    thresholds: LeadThresholds,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
            thresholds: LeadThresholds::default(),
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Thresholds quoted in the summary labels
    pub fn with_thresholds(mut self, thresholds: LeadThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Print one line for a record as it completes
    pub fn report_record(&self, index: usize, total: usize, result: &AnalysisResult) {
        print!("{}", self.render_record(index, total, result));
    }

    /// Print the summary block followed by the hot-lead listing
    pub fn report_summary(
        &self,
        results: &[AnalysisResult],
        summary: &BatchSummary,
        exported_to: Option<&Path>,
    ) {
        print!("{}", self.render_summary(summary, exported_to));
        print!("{}", self.render_hot_leads(results));
    }

    pub fn render_record(&self, index: usize, total: usize, result: &AnalysisResult) -> String {
        let position = format!("[{}/{}]", index + 1, total);
        let score = format!("{:>3}", result.quality_score);
        let score = if result.is_error() {
            self.paint(&score, |s| s.red())
        } else {
            self.paint(&score, |s| self.score_color(result.quality_score, s))
        };

        let label = if result.is_error() {
            self.paint("error", |s| s.red())
        } else if result.is_hot_lead {
            self.paint("HOT LEAD", |s| s.red().bold())
        } else if result.needs_redesign {
            self.paint("needs redesign", |s| s.yellow())
        } else {
            self.paint("ok", |s| s.green())
        };

        let mut out = format!(
            "{} {} {} {}",
            self.paint(&position, |s| s.dimmed()),
            score,
            result.url,
            label
        );
        if !result.business_name.is_empty() {
            out.push_str(&format!(" - {}", result.business_name));
        }
        out.push('\n');

        if self.verbose || result.is_error() {
            for issue in &result.issues {
                out.push_str(&format!("      {} {}\n", self.paint("-", |s| s.dimmed()), issue));
            }
        }
        out
    }

    pub fn render_summary(&self, summary: &BatchSummary, exported_to: Option<&Path>) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut out = String::new();
        out.push('\n');
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!("{}\n", self.paint("ANALYSIS SUMMARY", |s| s.bold())));
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!("Total websites analyzed: {}\n", summary.total));
        out.push_str(&format!("Successful analyses: {}\n", summary.successful));

        let hot = format!(
            "{} ({:.1}%)",
            summary.hot_leads, summary.hot_lead_percentage
        );
        out.push_str(&format!(
            "Hot leads (score < {}): {}\n",
            self.thresholds.hot_lead,
            if summary.hot_leads > 0 {
                self.paint(&hot, |s| s.red().bold())
            } else {
                hot
            }
        ));
        out.push_str(&format!(
            "Need redesign (score < {}): {}\n",
            self.thresholds.needs_redesign, summary.needs_redesign
        ));
        out.push_str(&format!("Average quality score: {:.1}\n", summary.average_score));

        if let Some(path) = exported_to {
            out.push_str(&format!("\nResults exported to: {}\n", path.display()));
        }
        out
    }

    /// `url - Score: N - name` for every hot lead; empty when there are none
    pub fn render_hot_leads(&self, results: &[AnalysisResult]) -> String {
        let hot: Vec<&AnalysisResult> = results.iter().filter(|r| r.is_hot_lead).collect();
        if hot.is_empty() {
            return String::new();
        }

        let mut out = format!("\n{}\n", self.paint("HOT LEADS", |s| s.red().bold()));
        for lead in hot {
            out.push_str(&format!(
                "{} - Score: {} - {}\n",
                lead.url, lead.quality_score, lead.business_name
            ));
        }
        out
    }

    fn score_color(&self, score: u8, text: &str) -> ColoredString {
        if score < self.thresholds.hot_lead {
            text.red()
        } else if score < self.thresholds.needs_redesign {
            text.yellow()
        } else {
            text.green()
        }
    }

    fn paint<F>(&self, text: &str, style: F) -> String
    where
        F: Fn(&str) -> ColoredString,
    {
        if self.use_colors {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AnalysisStatus;
    use chrono::NaiveDateTime;

    fn at() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2026, 6, 1)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .unwrap()
    }

    fn record(url: &str, name: &str, score: u8) -> AnalysisResult {
        AnalysisResult {
            url: url.to_string(),
            business_name: name.to_string(),
            quality_score: score,
            issues: vec!["No HTTPS".to_string()],
            needs_redesign: score < 50,
            is_hot_lead: score < 30,
            phone: String::new(),
            email: String::new(),
            status: AnalysisStatus::Analyzed,
            analysis_date: at(),
        }
    }

    #[test]
    fn summary_block_matches_layout() {
        let results = vec![
            record("https://a.test", "Alpha", 90),
            record("http://b.test", "Bravo", 20),
        ];
        let summary = BatchSummary::from_results(&results);
        let out = ConsoleReporter::new()
            .without_colors()
            .render_summary(&summary, Some(Path::new("leads.csv")));

        assert!(out.contains("ANALYSIS SUMMARY"));
        assert!(out.contains("Total websites analyzed: 2\n"));
        assert!(out.contains("Successful analyses: 2\n"));
        assert!(out.contains("Hot leads (score < 30): 1 (50.0%)\n"));
        assert!(out.contains("Need redesign (score < 50): 1\n"));
        assert!(out.contains("Average quality score: 55.0\n"));
        assert!(out.contains("Results exported to: leads.csv"));
    }

    #[test]
    fn summary_quotes_configured_thresholds() {
        let out = ConsoleReporter::new()
            .without_colors()
            .with_thresholds(LeadThresholds { needs_redesign: 60, hot_lead: 40 })
            .render_summary(&BatchSummary::default(), None);
        assert!(out.contains("Hot leads (score < 40): 0 (0.0%)"));
        assert!(out.contains("Need redesign (score < 60): 0"));
        assert!(!out.contains("exported"));
    }

    #[test]
    fn hot_leads_are_listed() {
        let results = vec![
            record("https://a.test", "Alpha", 90),
            record("http://b.test", "Bravo Roofing", 15),
        ];
        let out = ConsoleReporter::new().without_colors().render_hot_leads(&results);
        assert!(out.contains("HOT LEADS"));
        assert!(out.contains("http://b.test - Score: 15 - Bravo Roofing\n"));
        assert!(!out.contains("a.test"));
    }

    #[test]
    fn no_hot_leads_prints_nothing() {
        let out = ConsoleReporter::new()
            .without_colors()
            .render_hot_leads(&[record("https://a.test", "Alpha", 90)]);
        assert!(out.is_empty());
    }

    #[test]
    fn record_line_shows_position_score_and_label() {
        let reporter = ConsoleReporter::new().without_colors();
        let line = reporter.render_record(0, 3, &record("http://b.test", "Bravo", 15));
        assert_eq!(line, "[1/3]  15 http://b.test HOT LEAD - Bravo\n");

        let line = reporter.render_record(1, 3, &record("https://c.test", "", 45));
        assert_eq!(line, "[2/3]  45 https://c.test needs redesign\n");
    }

    #[test]
    fn error_record_lists_its_diagnostic() {
        let err = AnalysisResult::error("https://gone.test", "Site not accessible: refused", at());
        let line = ConsoleReporter::new().without_colors().render_record(0, 1, &err);
        assert!(line.starts_with("[1/1]   0 https://gone.test error\n"));
        assert!(line.contains("- Site not accessible: refused"));
    }

    #[test]
    fn verbose_lists_issues() {
        let reporter = ConsoleReporter::new().without_colors().verbose();
        let line = reporter.render_record(0, 1, &record("https://a.test", "Alpha", 80));
        assert!(line.contains("- No HTTPS"));
    }
}
