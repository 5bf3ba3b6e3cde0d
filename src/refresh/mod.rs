//! Periodic leaderboard refresh.
//!
//! Recomputes every policy's leaderboard from a fresh corpus load and keeps
//! the finished snapshots in memory for the HTTP surface. The loop is
//! cancellable: shutdown makes an in-flight refresh resolve to a neutral
//! cancelled outcome instead of an error.

use crate::config::RefreshSettings;
use crate::ranking::{RankingEngine, RankingOutcome, RankingPolicy};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RefreshError {
    #[error("Leaderboard refresh was cancelled")]
    Cancelled,
}

/// One finished leaderboard with provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardSnapshot {
    pub policy: RankingPolicy,
    pub computed_at: String,
    pub duration_ms: u64,
    pub outcome: RankingOutcome,
}

/// In-memory store of the latest snapshot per policy.
#[derive(Default)]
pub struct LeaderboardCache {
    snapshots: RwLock<HashMap<RankingPolicy, LeaderboardSnapshot>>,
}

impl LeaderboardCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, policy: RankingPolicy) -> Option<LeaderboardSnapshot> {
        self.snapshots.read().unwrap().get(&policy).cloned()
    }

    pub fn set(&self, snapshot: LeaderboardSnapshot) {
        self.snapshots
            .write()
            .unwrap()
            .insert(snapshot.policy, snapshot);
    }

    /// All cached snapshots in policy order.
    pub fn all(&self) -> Vec<LeaderboardSnapshot> {
        let snapshots = self.snapshots.read().unwrap();
        RankingPolicy::ALL
            .iter()
            .filter_map(|policy| snapshots.get(policy).cloned())
            .collect()
    }
}

/// Recompute every leaderboard once.
///
/// The corpus is loaded a single time and shared across policies. Checks the
/// token between policies so shutdown never waits on a full sweep.
pub async fn refresh_all(
    engine: &RankingEngine,
    cache: &LeaderboardCache,
    token: &CancellationToken,
) -> Result<usize, RefreshError> {
    if token.is_cancelled() {
        return Err(RefreshError::Cancelled);
    }

    let corpus = engine.load_corpus().await;

    for policy in RankingPolicy::ALL {
        if token.is_cancelled() {
            return Err(RefreshError::Cancelled);
        }

        let started = Instant::now();
        let outcome = if corpus.is_empty() {
            RankingOutcome::no_data("No reviews available yet")
        } else {
            engine.compute_ranking(policy, &corpus).await
        };

        if let RankingOutcome::NoData { message } = &outcome {
            warn!("Leaderboard {} has no data: {}", policy, message);
        }

        cache.set(LeaderboardSnapshot {
            policy,
            computed_at: Utc::now().to_rfc3339(),
            duration_ms: started.elapsed().as_millis() as u64,
            outcome,
        });
    }

    Ok(RankingPolicy::ALL.len())
}

/// Spawn the periodic refresh loop.
///
/// The first tick fires immediately so the cache is warm at startup; after
/// that the loop runs on the configured interval until the token is
/// cancelled.
pub fn spawn_refresh_loop(
    engine: Arc<RankingEngine>,
    cache: Arc<LeaderboardCache>,
    settings: RefreshSettings,
    token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let interval = Duration::from_secs(settings.interval_minutes * 60);
        let mut ticker = tokio::time::interval(interval);

        info!(
            "Leaderboard refresh every {} minutes",
            settings.interval_minutes
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let started = Instant::now();
                    match refresh_all(&engine, &cache, &token).await {
                        Ok(count) => {
                            info!(
                                "Refreshed {} leaderboards in {:?}",
                                count,
                                started.elapsed()
                            );
                        }
                        Err(RefreshError::Cancelled) => {
                            info!("Leaderboard refresh cancelled");
                            break;
                        }
                    }
                }
                _ = token.cancelled() => {
                    info!("Refresh loop shutting down");
                    break;
                }
            }
        }
    })
}
