//! Ranking API routes

use super::state::ServerState;
use crate::ranking::RankingPolicy;
use crate::refresh::LeaderboardSnapshot;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;
use std::time::Instant;
use tracing::debug;

/// One leaderboard, served from the snapshot cache when warm.
///
/// A cold policy is computed live and the snapshot stored, so the first
/// request after startup pays the gateway round trips and later ones don't.
pub async fn get_ranking(
    Path(policy_name): Path<String>,
    State(state): State<ServerState>,
) -> Response {
    let Some(policy) = RankingPolicy::parse(&policy_name) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Unknown ranking policy: {}", policy_name) })),
        )
            .into_response();
    };

    if let Some(snapshot) = state.leaderboards.get(policy) {
        return Json(snapshot).into_response();
    }

    debug!("No cached snapshot for {}, computing live", policy);
    let started = Instant::now();
    let outcome = state.engine.ranked_leaderboard(policy).await;
    let snapshot = LeaderboardSnapshot {
        policy,
        computed_at: Utc::now().to_rfc3339(),
        duration_ms: started.elapsed().as_millis() as u64,
        outcome,
    };
    state.leaderboards.set(snapshot.clone());
    Json(snapshot).into_response()
}

/// Every cached leaderboard, in policy order.
pub async fn list_rankings(State(state): State<ServerState>) -> Json<Vec<LeaderboardSnapshot>> {
    Json(state.leaderboards.all())
}
