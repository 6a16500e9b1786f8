//! Config schema and deserialization

use crate::analyzer::{AnalysisMode, AnalyzerOptions, LeadThresholds};
use crate::fetcher::{FetchSettings, DEFAULT_USER_AGENT};
use crate::Signal;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_DELAY_SECONDS: f64 = 2.0;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_PROBE_TIMEOUT_SECONDS: u64 = 5;
pub const DEFAULT_OUTPUT: &str = "leads.csv";

/// Longest accepted pause between requests (one day)
pub const MAX_DELAY_SECONDS: f64 = 86_400.0;

/// Rule switch (on, off)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleToggle {
    On,
    /// Disable the signal entirely
    Off,
}

/// Lead classifier cut-offs; unset values keep the defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_redesign: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hot_lead: Option<u8>,
}

/// Root config structure for .leadscorerc.json
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Pause between consecutive requests. Default: 2
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_seconds: Option<f64>,

    /// Page request timeout. Default: 10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,

    /// Per-image probe timeout. Default: 5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_probe_timeout_seconds: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// full (default) or lite
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<AnalysisMode>,

    /// Number of images probed per page. Default: 5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_image_probes: Option<usize>,

    #[serde(default)]
    pub thresholds: ThresholdsConfig,

    /// Per-signal switches. Key is the signal id in kebab-case.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleToggle>,

    /// CSV output path. Default: leads.csv
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Export only hot leads
    #[serde(default)]
    pub hot_leads_only: bool,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(
        mut self,
        cli_delay: Option<f64>,
        cli_output: Option<&Path>,
        cli_lite: bool,
        cli_hot_leads_only: bool,
    ) -> Self {
        if cli_delay.is_some() {
            self.delay_seconds = cli_delay;
        }
        if let Some(output) = cli_output {
            self.output = Some(output.to_path_buf());
        }
        if cli_lite {
            self.mode = Some(AnalysisMode::Lite);
        }
        if cli_hot_leads_only {
            self.hot_leads_only = true;
        }
        self
    }

    /// Starter config written by `leadscore init`
    pub fn starter(delay_seconds: Option<f64>) -> Self {
        Self {
            delay_seconds: Some(delay_seconds.unwrap_or(DEFAULT_DELAY_SECONDS)),
            timeout_seconds: Some(DEFAULT_TIMEOUT_SECONDS),
            image_probe_timeout_seconds: Some(DEFAULT_PROBE_TIMEOUT_SECONDS),
            user_agent: None,
            mode: Some(AnalysisMode::Full),
            max_image_probes: Some(5),
            thresholds: ThresholdsConfig {
                needs_redesign: Some(50),
                hot_lead: Some(30),
            },
            rules: BTreeMap::new(),
            output: Some(PathBuf::from(DEFAULT_OUTPUT)),
            hot_leads_only: false,
        }
    }

    /// Reject values the analyzer cannot run with
    pub fn validate(&self) -> Result<()> {
        if let Some(delay) = self.delay_seconds {
            if !delay.is_finite() || delay < 0.0 {
                bail!("delaySeconds must be a non-negative number, got {}", delay);
            }
            if delay > MAX_DELAY_SECONDS {
                bail!("delaySeconds must be at most {}, got {}", MAX_DELAY_SECONDS, delay);
            }
        }
        if self.timeout_seconds == Some(0) {
            bail!("timeoutSeconds must be greater than 0");
        }
        if self.image_probe_timeout_seconds == Some(0) {
            bail!("imageProbeTimeoutSeconds must be greater than 0");
        }
        let thresholds = self.thresholds();
        if thresholds.needs_redesign > 100 || thresholds.hot_lead > 100 {
            bail!("thresholds must be between 0 and 100");
        }
        if thresholds.hot_lead > thresholds.needs_redesign {
            bail!(
                "thresholds.hotLead ({}) must not exceed thresholds.needsRedesign ({})",
                thresholds.hot_lead,
                thresholds.needs_redesign
            );
        }
        for id in self.rules.keys() {
            if Signal::from_id(id).is_none() {
                bail!("Unknown rule in config: {}", id);
            }
        }
        Ok(())
    }

    pub fn delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.delay_seconds.unwrap_or(DEFAULT_DELAY_SECONDS))
            .unwrap_or(Duration::ZERO)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    pub fn thresholds(&self) -> LeadThresholds {
        let defaults = LeadThresholds::default();
        LeadThresholds {
            needs_redesign: self
                .thresholds
                .needs_redesign
                .unwrap_or(defaults.needs_redesign),
            hot_lead: self.thresholds.hot_lead.unwrap_or(defaults.hot_lead),
        }
    }

    /// Signals switched off in `rules`
    pub fn disabled_signals(&self) -> BTreeSet<Signal> {
        self.rules
            .iter()
            .filter(|(_, toggle)| **toggle == RuleToggle::Off)
            .filter_map(|(id, _)| Signal::from_id(id))
            .collect()
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            user_agent: self
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            timeout: Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)),
            probe_timeout: Duration::from_secs(
                self.image_probe_timeout_seconds
                    .unwrap_or(DEFAULT_PROBE_TIMEOUT_SECONDS),
            ),
        }
    }

    pub fn analyzer_options(&self) -> AnalyzerOptions {
        let defaults = AnalyzerOptions::default();
        AnalyzerOptions {
            mode: self.mode.unwrap_or(defaults.mode),
            max_image_probes: self.max_image_probes.unwrap_or(defaults.max_image_probes),
            thresholds: self.thresholds(),
            disabled: self.disabled_signals(),
        }
    }
}
