//! HTTP client for the review/social side of the gateway.

use super::models::{CountResponse, ReviewRecord};
use super::ReviewService;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Client for the review service endpoints exposed by the gateway.
pub struct GatewayReviewClient {
    client: reqwest::Client,
    base_url: String,
}

impl GatewayReviewClient {
    /// Create a new review client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the gateway (e.g., "http://localhost:8080")
    /// * `timeout_sec` - Request timeout in seconds
    pub fn new(base_url: String, timeout_sec: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()
            .context("Failed to create HTTP client")?;

        // Ensure base_url doesn't have trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_count(&self, url: &str) -> Result<u32> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to connect to review service")?;

        if !response.status().is_success() {
            anyhow::bail!("Count request {} failed: status {}", url, response.status());
        }

        let body: CountResponse = response
            .json()
            .await
            .context("Failed to parse count response")?;
        Ok(body.count)
    }
}

#[async_trait]
impl ReviewService for GatewayReviewClient {
    async fn list_reviews(&self) -> Result<Vec<ReviewRecord>> {
        let url = format!("{}/reviews", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to fetch reviews from gateway")?;

        if !response.status().is_success() {
            anyhow::bail!("Failed to fetch reviews: status {}", response.status());
        }

        response
            .json()
            .await
            .context("Failed to parse reviews response")
    }

    async fn count_comments(&self, review_id: &str) -> Result<u32> {
        let url = format!("{}/reviews/{}/comments/count", self.base_url, review_id);
        self.get_count(&url)
            .await
            .with_context(|| format!("Failed to count comments for review {}", review_id))
    }

    async fn count_reactions(&self, review_id: &str) -> Result<u32> {
        let url = format!("{}/reviews/{}/reactions/count", self.base_url, review_id);
        self.get_count(&url)
            .await
            .with_context(|| format!("Failed to count reactions for review {}", review_id))
    }
}
