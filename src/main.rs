use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use review_ranking_server::backend::{GatewayContentClient, GatewayReviewClient};
use review_ranking_server::config::{AppConfig, CliConfig, FileConfig};
use review_ranking_server::ranking::InMemoryMetadataCache;
use review_ranking_server::refresh::{spawn_refresh_loop, LeaderboardCache};
use review_ranking_server::server::{run_server, RequestsLoggingLevel};
use review_ranking_server::RankingEngine;
use tokio_util::sync::CancellationToken;

#[derive(Parser, Debug)]
struct CliArgs {
    /// Base URL of the backend gateway fronting the review/content services.
    #[clap(long)]
    pub gateway_url: Option<String>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// Timeout in seconds for gateway requests.
    #[clap(long, default_value_t = 30)]
    pub request_timeout_sec: u64,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Interval in minutes between leaderboard refreshes.
    #[clap(long, default_value_t = 15)]
    pub refresh_interval_minutes: u64,

    /// Disable the periodic leaderboard refresh; rankings are then computed
    /// on demand per request.
    #[clap(long)]
    pub no_refresh: bool,

    /// Path to a TOML config file. File values override CLI arguments.
    #[clap(long)]
    pub config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = cli_args
        .config
        .as_deref()
        .map(FileConfig::load)
        .transpose()
        .context("Failed to load config file")?;

    let cli_config = CliConfig {
        gateway_url: cli_args.gateway_url,
        port: cli_args.port,
        request_timeout_sec: cli_args.request_timeout_sec,
        logging_level: cli_args.logging_level,
        refresh_interval_minutes: cli_args.refresh_interval_minutes,
        no_refresh: cli_args.no_refresh,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    info!("Gateway configured at {}", config.gateway_url);
    let review_client = Arc::new(GatewayReviewClient::new(
        config.gateway_url.clone(),
        config.request_timeout_sec,
    )?);
    let content_client = Arc::new(GatewayContentClient::new(
        config.gateway_url.clone(),
        config.request_timeout_sec,
    )?);

    let metadata_cache = Arc::new(InMemoryMetadataCache::new());
    let engine = Arc::new(RankingEngine::new(
        review_client,
        content_client,
        metadata_cache,
        config.eligibility.clone(),
    ));
    let leaderboards = Arc::new(LeaderboardCache::new());

    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("Shutdown requested");
            shutdown.cancel();
        })
        .context("Failed to install shutdown handler")?;
    }

    if config.refresh.enabled {
        spawn_refresh_loop(
            engine.clone(),
            leaderboards.clone(),
            config.refresh.clone(),
            shutdown.clone(),
        );
    } else {
        info!("Periodic refresh disabled, rankings computed on demand");
    }

    info!("Ready to serve at port {}!", config.port);
    run_server(
        engine,
        leaderboards,
        config.logging_level,
        config.port,
        shutdown,
    )
    .await
}
