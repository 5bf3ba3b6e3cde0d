//! HTTP client for end-to-end tests
//!
//! This module provides a high-level HTTP client that wraps reqwest
//! and provides methods for the ranking-server endpoints.
//!
//! When API routes or request formats change, update only this file.

use super::constants::REQUEST_TIMEOUT_SECS;
use reqwest::Response;
use serde_json::Value;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    pub async fn get_ranking(&self, policy: &str) -> Response {
        self.client
            .get(format!("{}/v1/rankings/{}", self.base_url, policy))
            .send()
            .await
            .expect("ranking request failed")
    }

    /// Fetch a ranking, asserting 200, and return the snapshot body.
    pub async fn get_ranking_json(&self, policy: &str) -> Value {
        let response = self.get_ranking(policy).await;
        assert_eq!(
            response.status(),
            reqwest::StatusCode::OK,
            "ranking request for {} failed",
            policy
        );
        response.json().await.expect("invalid ranking body")
    }

    pub async fn list_rankings(&self) -> Response {
        self.client
            .get(format!("{}/v1/rankings", self.base_url))
            .send()
            .await
            .expect("rankings listing failed")
    }

    pub async fn health(&self) -> Response {
        self.client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .expect("health request failed")
    }

    pub async fn stats(&self) -> Response {
        self.client
            .get(format!("{}/stats", self.base_url))
            .send()
            .await
            .expect("stats request failed")
    }
}
