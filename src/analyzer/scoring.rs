//! Score calculation and lead classification

use super::signals::Deduction;
use serde::{Deserialize, Serialize};

/// Score every site starts from before deductions
pub const STARTING_SCORE: u32 = 100;

/// Sum the triggered deductions and clamp the result at zero.
pub fn final_score(deductions: &[Deduction]) -> u8 {
    let total: u32 = deductions.iter().map(|d| d.points).sum();
    STARTING_SCORE.saturating_sub(total) as u8
}

/// Score cut-offs for the two lead flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadThresholds {
    /// Scores strictly below this need a redesign
    pub needs_redesign: u8,
    /// Scores strictly below this are hot leads
    pub hot_lead: u8,
}

impl Default for LeadThresholds {
    fn default() -> Self {
        Self {
            needs_redesign: 50,
            hot_lead: 30,
        }
    }
}

/// The two lead flags derived from a score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadClass {
    pub needs_redesign: bool,
    pub is_hot_lead: bool,
}

impl LeadThresholds {
    /// Classify a score. A hot lead always also needs a redesign.
    pub fn classify(&self, score: u8) -> LeadClass {
        let needs_redesign = score < self.needs_redesign;
        LeadClass {
            needs_redesign,
            is_hot_lead: needs_redesign && score < self.hot_lead,
        }
    }
}
