//! The ranking engine: corpus loading, policy application, assembly.
//!
//! All collaborators arrive by injection; the engine holds no ambient state
//! and every computation rebuilds its aggregates from the corpus it is
//! given.

use super::assembler::assemble;
use super::cache::MetadataCache;
use super::models::{RankingOutcome, RankingPolicy, Review};
use super::policy::{rank, PolicyOutcome};
use super::resolve::ResolverChain;
use crate::backend::{ContentLookup, ReviewService};
use crate::config::EligibilitySettings;
use chrono::{DateTime, Utc};
use futures::future;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct RankingEngine {
    reviews: Arc<dyn ReviewService>,
    cache: Arc<dyn MetadataCache>,
    resolver: ResolverChain,
    eligibility: EligibilitySettings,
}

impl RankingEngine {
    pub fn new(
        reviews: Arc<dyn ReviewService>,
        lookup: Arc<dyn ContentLookup>,
        cache: Arc<dyn MetadataCache>,
        eligibility: EligibilitySettings,
    ) -> Self {
        let resolver = ResolverChain::standard(cache.clone(), lookup);
        Self {
            reviews,
            cache,
            resolver,
            eligibility,
        }
    }

    /// Fetch the review corpus with derived counts attached.
    ///
    /// The per-review count requests run as independent concurrent futures
    /// joined before aggregation; each result lands in its own
    /// position-indexed slot. A failed count is replaced by zero so one bad
    /// record never aborts the load. A failed corpus listing degrades to an
    /// empty corpus, which downstream policies report as an explicit
    /// no-data outcome.
    pub async fn load_corpus(&self) -> Vec<Review> {
        let records = match self.reviews.list_reviews().await {
            Ok(records) => records,
            Err(e) => {
                warn!("Failed to list reviews, treating corpus as empty: {:#}", e);
                return Vec::new();
            }
        };

        let counts = future::join_all(
            records
                .iter()
                .map(|record| self.fetch_counts(record.id.clone())),
        )
        .await;

        let corpus: Vec<Review> = records
            .into_iter()
            .zip(counts)
            .map(|(record, (comments, likes))| record.into_review(comments, likes))
            .collect();

        self.prime_cache(&corpus);
        debug!("Loaded review corpus of {} records", corpus.len());
        corpus
    }

    /// Fetch both derived counts for one review, substituting zero on
    /// failure.
    async fn fetch_counts(&self, review_id: String) -> (u32, u32) {
        let (comments, reactions) = future::join(
            self.reviews.count_comments(&review_id),
            self.reviews.count_reactions(&review_id),
        )
        .await;

        let comments = comments.unwrap_or_else(|e| {
            warn!("Comment count failed for review {}: {:#}", review_id, e);
            0
        });
        let reactions = reactions.unwrap_or_else(|e| {
            warn!("Reaction count failed for review {}: {:#}", review_id, e);
            0
        });
        (comments, reactions)
    }

    /// Remember content snapshots embedded in review payloads so the
    /// assembler can resolve those entities without a lookup round trip.
    fn prime_cache(&self, corpus: &[Review]) {
        for review in corpus {
            let (Some(key), Some(snapshot)) = (review.content_key(), &review.content_snapshot)
            else {
                continue;
            };
            if self.cache.get(&key).is_none() {
                self.cache.set(key, snapshot.clone());
            }
        }
    }

    /// Apply a policy to an already-loaded corpus and assemble the
    /// display-ready leaderboard. Never fails; an ineligible or empty
    /// corpus produces a no-data outcome.
    pub async fn compute_ranking(&self, policy: RankingPolicy, reviews: &[Review]) -> RankingOutcome {
        self.compute_ranking_at(policy, reviews, Utc::now()).await
    }

    /// As `compute_ranking`, with the clock injected for deterministic
    /// period windows.
    pub async fn compute_ranking_at(
        &self,
        policy: RankingPolicy,
        reviews: &[Review],
        now: DateTime<Utc>,
    ) -> RankingOutcome {
        match rank(policy, reviews, now, &self.eligibility) {
            PolicyOutcome::NoData { message } => RankingOutcome::NoData { message },
            PolicyOutcome::Scored(scored) => RankingOutcome::Ranked {
                entries: assemble(scored, &self.resolver).await,
            },
        }
    }

    /// Load the corpus and compute one leaderboard end to end.
    pub async fn ranked_leaderboard(&self, policy: RankingPolicy) -> RankingOutcome {
        let corpus = self.load_corpus().await;
        if corpus.is_empty() {
            return RankingOutcome::no_data("No reviews available yet");
        }
        self.compute_ranking(policy, &corpus).await
    }
}
