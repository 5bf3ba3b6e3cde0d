mod file_config;

pub use file_config::{EligibilityFileConfig, FileConfig, RefreshFileConfig};

use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub gateway_url: Option<String>,
    pub port: u16,
    pub request_timeout_sec: u64,
    pub logging_level: RequestsLoggingLevel,
    pub refresh_interval_minutes: u64,
    pub no_refresh: bool,
}

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gateway_url: String,
    pub port: u16,
    pub request_timeout_sec: u64,
    pub logging_level: RequestsLoggingLevel,

    pub refresh: RefreshSettings,
    pub eligibility: EligibilitySettings,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let gateway_url = file
            .gateway_url
            .or_else(|| cli.gateway_url.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("gateway_url must be specified via --gateway-url or in config file")
            })?;

        if !gateway_url.starts_with("http://") && !gateway_url.starts_with("https://") {
            bail!("gateway_url must be an http(s) URL, got: {}", gateway_url);
        }

        let port = file.port.unwrap_or(cli.port);
        let request_timeout_sec = file.request_timeout_sec.unwrap_or(cli.request_timeout_sec);
        if request_timeout_sec == 0 {
            bail!("request_timeout_sec must be greater than zero");
        }

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let refresh_file = file.refresh.unwrap_or_default();
        let refresh = RefreshSettings {
            enabled: refresh_file.enabled.unwrap_or(!cli.no_refresh),
            interval_minutes: refresh_file
                .interval_minutes
                .unwrap_or(cli.refresh_interval_minutes),
        };
        if refresh.enabled && refresh.interval_minutes == 0 {
            bail!("refresh interval_minutes must be greater than zero");
        }

        let eligibility_file = file.eligibility.unwrap_or_default();
        let defaults = EligibilitySettings::default();
        let eligibility = EligibilitySettings {
            small_corpus_threshold: eligibility_file
                .small_corpus_threshold
                .unwrap_or(defaults.small_corpus_threshold),
            min_reviews_small: eligibility_file
                .min_reviews_small
                .unwrap_or(defaults.min_reviews_small),
            min_reviews_large: eligibility_file
                .min_reviews_large
                .unwrap_or(defaults.min_reviews_large),
        };

        Ok(Self {
            gateway_url,
            port,
            request_timeout_sec,
            logging_level,
            refresh,
            eligibility,
        })
    }
}

/// Settings for the periodic leaderboard refresh.
#[derive(Debug, Clone)]
pub struct RefreshSettings {
    pub enabled: bool,
    pub interval_minutes: u64,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_minutes: 15,
        }
    }
}

/// Adaptive eligibility threshold for the most-recommended policy.
///
/// With a small overall corpus a strict minimum would return nothing useful,
/// so the threshold adapts to corpus size. A deliberate UX compromise, not a
/// statistical ideal.
#[derive(Debug, Clone)]
pub struct EligibilitySettings {
    /// Corpora smaller than this use the small minimum.
    pub small_corpus_threshold: usize,
    pub min_reviews_small: usize,
    pub min_reviews_large: usize,
}

impl EligibilitySettings {
    pub fn min_reviews_for(&self, corpus_size: usize) -> usize {
        if corpus_size < self.small_corpus_threshold {
            self.min_reviews_small
        } else {
            self.min_reviews_large
        }
    }
}

impl Default for EligibilitySettings {
    fn default() -> Self {
        Self {
            small_corpus_threshold: 50,
            min_reviews_small: 1,
            min_reviews_large: 10,
        }
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
