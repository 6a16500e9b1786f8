//! Configuration loading for leadscore

mod schema;

pub use schema::{
    Config, RuleToggle, ThresholdsConfig, DEFAULT_DELAY_SECONDS, DEFAULT_OUTPUT,
    DEFAULT_PROBE_TIMEOUT_SECONDS, DEFAULT_TIMEOUT_SECONDS,
};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = ".leadscorerc.json";

/// Find and load the config file. Searches current directory then parents;
/// an explicit path must exist.
pub fn load_config(work_dir: &Path, custom_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(p) = custom_path {
        let path = if p.is_absolute() {
            p.to_path_buf()
        } else {
            work_dir.join(p)
        };
        if path.exists() {
            Some(path)
        } else {
            anyhow::bail!("Config file not found: {}", path.display());
        }
    } else {
        find_config_in_parents(work_dir)
    };

    match path {
        Some(path) => {
            log::debug!("using config {}", path.display());
            read_config(&path)
        }
        None => Ok(Config::default()),
    }
}

fn read_config(config_path: &Path) -> Result<Config> {
    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in config: {}", config_path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config: {}", config_path.display()))?;
    Ok(config)
}

/// Search for .leadscorerc.json in directory and its parents
pub fn find_config_in_parents(mut dir: &Path) -> Option<PathBuf> {
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Write a starter config into `dir`. Returns `Ok(None)` when one already exists.
pub fn write_starter(dir: &Path, delay_seconds: Option<f64>) -> Result<Option<PathBuf>> {
    let config_path = dir.join(CONFIG_FILENAME);
    if config_path.exists() {
        return Ok(None);
    }

    let starter = Config::starter(delay_seconds);
    starter.validate()?;
    let mut json = serde_json::to_string_pretty(&starter)?;
    json.push('\n');

    fs::write(&config_path, json)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    Ok(Some(config_path))
}
