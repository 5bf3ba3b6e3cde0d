use axum::extract::FromRef;

use crate::ranking::RankingEngine;
use crate::refresh::LeaderboardCache;
use std::sync::Arc;
use std::time::Instant;

use super::server::ServerConfig;

pub type GuardedRankingEngine = Arc<RankingEngine>;
pub type GuardedLeaderboardCache = Arc<LeaderboardCache>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub engine: GuardedRankingEngine,
    pub leaderboards: GuardedLeaderboardCache,
    pub hash: String,
}

impl ServerState {
    pub fn new(
        config: ServerConfig,
        engine: GuardedRankingEngine,
        leaderboards: GuardedLeaderboardCache,
    ) -> Self {
        Self {
            config,
            start_time: Instant::now(),
            engine,
            leaderboards,
            hash: env!("GIT_HASH").to_string(),
        }
    }
}

impl FromRef<ServerState> for GuardedRankingEngine {
    fn from_ref(input: &ServerState) -> Self {
        input.engine.clone()
    }
}

impl FromRef<ServerState> for GuardedLeaderboardCache {
    fn from_ref(input: &ServerState) -> Self {
        input.leaderboards.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
