//! HTTP client for the content side of the gateway.

use super::models::ContentSnapshot;
use super::ContentLookup;
use crate::ranking::models::{ContentKey, ContentMetadata};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

/// Client for the content service metadata endpoints.
pub struct GatewayContentClient {
    client: reqwest::Client,
    base_url: String,
}

impl GatewayContentClient {
    pub fn new(base_url: String, timeout_sec: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ContentLookup for GatewayContentClient {
    async fn lookup_content(&self, key: &ContentKey) -> Result<Option<ContentMetadata>> {
        let url = format!("{}/content/{}/{}", self.base_url, key.kind, key.id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to connect to content service")?;

        // An unknown entity is an answer, not an error.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            anyhow::bail!(
                "Failed to look up {}: status {}",
                key,
                response.status()
            );
        }

        let snapshot: ContentSnapshot = response
            .json()
            .await
            .context("Failed to parse content response")?;
        Ok(Some(snapshot.into_metadata()))
    }
}
