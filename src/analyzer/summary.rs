//! Aggregate statistics over a batch

use crate::{AnalysisResult, AnalysisStatus};
use serde::{Deserialize, Serialize};

/// Summary counts for a batch. Error records count as score 0 in the average.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    /// Records with `status = analyzed`
    pub successful: usize,
    pub hot_leads: usize,
    pub needs_redesign: usize,
    /// Mean score over all records, one decimal
    pub average_score: f64,
    /// Hot leads as a percentage of all records, one decimal
    pub hot_lead_percentage: f64,
}

impl BatchSummary {
    pub fn from_results(results: &[AnalysisResult]) -> Self {
        let total = results.len();
        if total == 0 {
            return Self::default();
        }

        let successful = results
            .iter()
            .filter(|r| r.status == AnalysisStatus::Analyzed)
            .count();
        let hot_leads = results.iter().filter(|r| r.is_hot_lead).count();
        let needs_redesign = results.iter().filter(|r| r.needs_redesign).count();
        let score_sum: u64 = results.iter().map(|r| u64::from(r.quality_score)).sum();

        Self {
            total,
            successful,
            hot_leads,
            needs_redesign,
            average_score: round1(score_sum as f64 / total as f64),
            hot_lead_percentage: round1(hot_leads as f64 * 100.0 / total as f64),
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
