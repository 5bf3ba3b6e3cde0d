//! Test server lifecycle management
//!
//! This module spawns the real ranking server on an ephemeral port, wired to
//! a stub gateway serving the given fixtures. Each test gets an isolated
//! server and gateway pair.

use super::fixtures::GatewayFixtures;
use super::gateway::spawn_gateway;
use review_ranking_server::backend::{GatewayContentClient, GatewayReviewClient};
use review_ranking_server::config::EligibilitySettings;
use review_ranking_server::ranking::InMemoryMetadataCache;
use review_ranking_server::refresh::LeaderboardCache;
use review_ranking_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use review_ranking_server::RankingEngine;
use std::sync::Arc;

pub struct TestServer {
    pub base_url: String,
    pub gateway_url: String,
}

impl TestServer {
    /// Spawn a gateway serving `fixtures` and a ranking server against it.
    ///
    /// The server starts with a cold leaderboard cache; rankings are
    /// computed live per request, which is what the e2e tests want to
    /// exercise.
    pub async fn spawn(fixtures: GatewayFixtures) -> Self {
        let gateway_url = spawn_gateway(fixtures).await;
        Self::spawn_against(gateway_url).await
    }

    /// Spawn a ranking server wired to a gateway address nothing listens on.
    pub async fn spawn_with_unreachable_gateway() -> Self {
        // Bind and immediately drop a listener so the port is closed.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to reserve a port");
        let addr = listener.local_addr().unwrap();
        drop(listener);
        Self::spawn_against(format!("http://{}", addr)).await
    }

    async fn spawn_against(gateway_url: String) -> Self {
        let review_client = Arc::new(
            GatewayReviewClient::new(gateway_url.clone(), 10).expect("review client"),
        );
        let content_client = Arc::new(
            GatewayContentClient::new(gateway_url.clone(), 10).expect("content client"),
        );
        let engine = Arc::new(RankingEngine::new(
            review_client,
            content_client,
            Arc::new(InMemoryMetadataCache::new()),
            EligibilitySettings::default(),
        ));

        let app = make_app(
            ServerConfig {
                port: 0,
                requests_logging_level: RequestsLoggingLevel::None,
            },
            engine,
            Arc::new(LeaderboardCache::new()),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test server");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server crashed");
        });

        Self {
            base_url: format!("http://{}", addr),
            gateway_url,
        }
    }
}
