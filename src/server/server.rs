use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::ranking::RankingEngine;
use crate::refresh::LeaderboardCache;
use tokio_util::sync::CancellationToken;

use axum::{
    extract::State,
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::http_layers::{log_requests, RequestsLoggingLevel};
use super::rankings::{get_ranking, list_rankings};
use super::state::ServerState;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub requests_logging_level: RequestsLoggingLevel,
}

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
    pub cached_leaderboards: usize,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn get_stats(State(state): State<ServerState>) -> impl IntoResponse {
    Json(ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
        cached_leaderboards: state.leaderboards.all().len(),
    })
}

pub fn make_app(
    config: ServerConfig,
    engine: Arc<RankingEngine>,
    leaderboards: Arc<LeaderboardCache>,
) -> Router {
    let state = ServerState::new(config, engine, leaderboards);

    let ranking_routes: Router = Router::new()
        .route("/rankings", get(list_rankings))
        .route("/rankings/{policy}", get(get_ranking))
        .with_state(state.clone());

    let app: Router = Router::new()
        .route("/health", get(health))
        .route("/stats", get(get_stats))
        .with_state(state.clone())
        .nest("/v1", ranking_routes);

    app.layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server(
    engine: Arc<RankingEngine>,
    leaderboards: Arc<LeaderboardCache>,
    requests_logging_level: RequestsLoggingLevel,
    port: u16,
    shutdown: CancellationToken,
) -> Result<()> {
    let config = ServerConfig {
        port,
        requests_logging_level,
    };
    let app = make_app(config, engine, leaderboards);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;
    Ok(())
}
