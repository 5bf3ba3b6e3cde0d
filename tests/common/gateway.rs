//! Stub backend gateway.
//!
//! A small axum app that serves the fixture data over the same endpoints the
//! real gateway exposes, so end-to-end tests exercise the actual HTTP
//! clients, wire models, and failure recovery.

use super::fixtures::GatewayFixtures;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

async fn list_reviews(State(fixtures): State<Arc<GatewayFixtures>>) -> Response {
    Json(fixtures.reviews.clone()).into_response()
}

async fn comment_count(
    Path(review_id): Path<String>,
    State(fixtures): State<Arc<GatewayFixtures>>,
) -> Response {
    if fixtures.failing_comment_counts.contains(&review_id) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "social service error").into_response();
    }
    let count = fixtures.comment_counts.get(&review_id).copied().unwrap_or(0);
    Json(json!({ "count": count })).into_response()
}

async fn reaction_count(
    Path(review_id): Path<String>,
    State(fixtures): State<Arc<GatewayFixtures>>,
) -> Response {
    let count = fixtures
        .reaction_counts
        .get(&review_id)
        .copied()
        .unwrap_or(0);
    // The social service spells this one "total".
    Json(json!({ "total": count })).into_response()
}

async fn content(
    Path((kind, id)): Path<(String, String)>,
    State(fixtures): State<Arc<GatewayFixtures>>,
) -> Response {
    match fixtures.content.get(&(kind, id)) {
        Some(body) => Json(body.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "no such content").into_response(),
    }
}

/// Serve the fixtures on an ephemeral port and return the base URL.
pub async fn spawn_gateway(fixtures: GatewayFixtures) -> String {
    let app = Router::new()
        .route("/reviews", get(list_reviews))
        .route("/reviews/{id}/comments/count", get(comment_count))
        .route("/reviews/{id}/reactions/count", get(reaction_count))
        .route("/content/{kind}/{id}", get(content))
        .with_state(Arc::new(fixtures));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub gateway");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Stub gateway crashed");
    });

    format!("http://{}", addr)
}
