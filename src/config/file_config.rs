//! TOML file configuration.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Optional TOML config file. Every field is optional; present values
/// override CLI arguments during resolution.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub gateway_url: Option<String>,
    pub port: Option<u16>,
    pub request_timeout_sec: Option<u64>,
    pub logging_level: Option<String>,

    pub refresh: Option<RefreshFileConfig>,
    pub eligibility: Option<EligibilityFileConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefreshFileConfig {
    pub enabled: Option<bool>,
    pub interval_minutes: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EligibilityFileConfig {
    pub small_corpus_threshold: Option<usize>,
    pub min_reviews_small: Option<usize>,
    pub min_reviews_large: Option<usize>,
}

impl FileConfig {
    /// Load and parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", path))
    }
}
