//! JSON reporter for machine-readable output

use crate::analyzer::BatchSummary;
use crate::AnalysisResult;
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Report a batch as `{results, summary}`
    pub fn report_with_summary(&self, results: &[AnalysisResult], summary: &BatchSummary) -> String {
        let output = JsonOutput { results, summary };

        if self.pretty {
            serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
        } else {
            serde_json::to_string(&output).unwrap_or_else(|_| "{}".to_string())
        }
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    results: &'a [AnalysisResult],
    summary: &'a BatchSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AnalysisStatus;

    fn make_result(url: &str, score: u8) -> AnalysisResult {
        AnalysisResult {
            url: url.to_string(),
            business_name: "Acme".to_string(),
            quality_score: score,
            issues: vec!["No HTTPS".to_string()],
            needs_redesign: score < 50,
            is_hot_lead: score < 30,
            phone: String::new(),
            email: "info@acme.test".to_string(),
            status: AnalysisStatus::Analyzed,
            analysis_date: chrono::NaiveDate::from_ymd_opt(2026, 2, 3)
                .and_then(|d| d.and_hms_opt(4, 5, 6))
                .unwrap(),
        }
    }

    #[test]
    fn report_contains_results_and_summary() {
        let results = vec![make_result("http://a.test", 20), make_result("https://b.test", 80)];
        let summary = BatchSummary::from_results(&results);
        let json = JsonReporter::new().report_with_summary(&results, &summary);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["results"].as_array().unwrap().len(), 2);
        assert_eq!(value["results"][0]["url"], "http://a.test");
        assert_eq!(value["results"][0]["status"], "analyzed");
        assert_eq!(value["results"][0]["is_hot_lead"], true);
        assert_eq!(value["results"][0]["analysis_date"], "2026-02-03T04:05:06");
        assert_eq!(value["summary"]["total"], 2);
        assert_eq!(value["summary"]["hot_leads"], 1);
        assert_eq!(value["summary"]["average_score"], 50.0);
    }

    #[test]
    fn pretty_output_parses_back() {
        let results = vec![make_result("http://a.test", 20)];
        let json = JsonReporter::new()
            .pretty()
            .report_with_summary(&results, &BatchSummary::from_results(&results));
        assert!(json.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["results"][0]["issues"][0], "No HTTPS");
    }

    #[test]
    fn records_deserialize_from_report() {
        let results = vec![make_result("http://a.test", 20)];
        let json = JsonReporter::new().report_with_summary(&results, &BatchSummary::default());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let back: Vec<AnalysisResult> = serde_json::from_value(value["results"].clone()).unwrap();
        assert_eq!(back, results);
    }
}
