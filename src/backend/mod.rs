//! Backend gateway collaborators.
//!
//! The gateway fronts separate user/content/social microservices; this
//! module owns the HTTP clients for the two services the ranking engine
//! consumes and the trait seams that keep the engine testable without a
//! network.

mod content_client;
mod models;
mod review_client;

pub use content_client::GatewayContentClient;
pub use models::{ContentSnapshot, CountResponse, ReviewRecord};
pub use review_client::GatewayReviewClient;

use crate::ranking::models::{ContentKey, ContentMetadata};
use anyhow::Result;
use async_trait::async_trait;

/// Review service operations the engine consumes.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait ReviewService: Send + Sync {
    /// Fetch the full review corpus.
    async fn list_reviews(&self) -> Result<Vec<ReviewRecord>>;

    /// Number of comments on one review.
    async fn count_comments(&self, review_id: &str) -> Result<u32>;

    /// Number of reactions (likes) on one review.
    async fn count_reactions(&self, review_id: &str) -> Result<u32>;
}

/// Content service metadata resolution.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait ContentLookup: Send + Sync {
    /// Canonical title/artist/image for a content entity, `None` when the
    /// service does not know the entity.
    async fn lookup_content(&self, key: &ContentKey) -> Result<Option<ContentMetadata>>;
}
