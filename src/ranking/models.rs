//! Core domain types for the ranking engine.
//!
//! Everything here is ephemeral: aggregates are rebuilt from the full review
//! corpus on every computation and never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of content entity a review targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Song,
    Album,
}

impl ContentKind {
    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::Song => "Song",
            ContentKind::Album => "Album",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentKind::Song => write!(f, "song"),
            ContentKind::Album => write!(f, "album"),
        }
    }
}

/// Identity of a content entity.
///
/// The kind is part of the key: a song and an album whose id strings collide
/// are still distinct entities and must never share an aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentKey {
    pub kind: ContentKind,
    pub id: String,
}

impl ContentKey {
    pub fn song(id: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Song,
            id: id.into(),
        }
    }

    pub fn album(id: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Album,
            id: id.into(),
        }
    }
}

impl std::fmt::Display for ContentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Display metadata for a ranked content entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentMetadata {
    pub title: String,
    pub artist: Option<String>,
    pub image: Option<String>,
}

/// A review in canonical form.
///
/// All gateway field-name tolerance lives in `backend::models`; by the time a
/// review reaches this type it has exactly one spelling per field and the
/// derived counts already attached.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: String,
    pub song_id: Option<String>,
    pub album_id: Option<String>,
    pub rating: u8,
    pub created_at: DateTime<Utc>,
    pub comment_count: u32,
    pub like_count: u32,
    /// Content metadata some gateway payloads embed alongside the review.
    /// Used only to prime the metadata cache, never for scoring.
    pub content_snapshot: Option<ContentMetadata>,
}

impl Review {
    /// The content entity this review targets, if any.
    ///
    /// A review carrying both ids is bad data; the song reference wins, which
    /// keeps the partitions disjoint. A review carrying neither cannot be
    /// attributed and returns `None`.
    pub fn content_key(&self) -> Option<ContentKey> {
        if let Some(id) = &self.song_id {
            return Some(ContentKey::song(id.clone()));
        }
        self.album_id
            .as_ref()
            .map(|id| ContentKey::album(id.clone()))
    }
}

/// Per-entity aggregate built from every review targeting that entity.
///
/// Exists only for the duration of one ranking computation.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentAggregate {
    pub key: ContentKey,
    /// Ratings in corpus order.
    pub ratings: Vec<u8>,
    pub total_comments: u64,
    pub total_likes: u64,
    /// Contributing review ids; used for metadata resolution, never scoring.
    pub review_ids: Vec<String>,
}

impl ContentAggregate {
    pub fn new(key: ContentKey) -> Self {
        Self {
            key,
            ratings: Vec::new(),
            total_comments: 0,
            total_likes: 0,
            review_ids: Vec::new(),
        }
    }

    pub fn total_reviews(&self) -> usize {
        self.ratings.len()
    }

    pub fn average_rating(&self) -> f64 {
        if self.ratings.is_empty() {
            return 0.0;
        }
        let sum: u64 = self.ratings.iter().map(|r| *r as u64).sum();
        sum as f64 / self.ratings.len() as f64
    }
}

/// The five supported ranking policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RankingPolicy {
    MostRecommended,
    MostCommented,
    TopWeek,
    TopMonth,
    Trending,
}

impl RankingPolicy {
    pub const ALL: [RankingPolicy; 5] = [
        RankingPolicy::MostRecommended,
        RankingPolicy::MostCommented,
        RankingPolicy::TopWeek,
        RankingPolicy::TopMonth,
        RankingPolicy::Trending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RankingPolicy::MostRecommended => "mostRecommended",
            RankingPolicy::MostCommented => "mostCommented",
            RankingPolicy::TopWeek => "topWeek",
            RankingPolicy::TopMonth => "topMonth",
            RankingPolicy::Trending => "trending",
        }
    }

    /// Parse the route/serialized spelling of a policy name.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.as_str() == s)
    }
}

impl std::fmt::Display for RankingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The policy-specific metric that justified an entry's rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RankingMetric {
    AverageRating(f64),
    CommentCount(u64),
    WeightedScore(f64),
    GrowthRate(f64),
}

/// One entry of a finished leaderboard, display-ready.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    pub content_id: String,
    pub content_kind: ContentKind,
    pub title: String,
    pub artist: Option<String>,
    pub image: Option<String>,
    pub total_reviews: usize,
    pub metric: RankingMetric,
}

/// The result of one ranking computation.
///
/// A computation never fails: an empty or ineligible corpus produces an
/// explicit no-data outcome with a human-readable explanation, distinct from
/// a populated ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum RankingOutcome {
    Ranked { entries: Vec<RankedEntry> },
    NoData { message: String },
}

impl RankingOutcome {
    pub fn no_data(message: impl Into<String>) -> Self {
        RankingOutcome::NoData {
            message: message.into(),
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, RankingOutcome::NoData { .. })
    }

    /// The ranked entries, empty for a no-data outcome.
    pub fn entries(&self) -> &[RankedEntry] {
        match self {
            RankingOutcome::Ranked { entries } => entries,
            RankingOutcome::NoData { .. } => &[],
        }
    }
}
