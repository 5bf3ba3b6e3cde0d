//! Scoring policies.
//!
//! Each policy consumes per-entity aggregates (optionally built from a
//! time-filtered corpus) and produces a sorted, truncated sequence of scored
//! aggregates. Weights and limits are policy constants, not derived.

use super::grouper::group_by_content;
use super::models::{ContentAggregate, RankingMetric, RankingPolicy, Review};
use crate::config::EligibilitySettings;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tracing::{debug, info};

/// Weights for the weighted-recent score blend.
const RATING_WEIGHT: f64 = 2.0;
const COMMENT_WEIGHT: f64 = 0.5;
const LIKE_WEIGHT: f64 = 0.3;

/// Two averages closer than this are treated as a near-tie and resolved by
/// review volume instead.
const NEAR_TIE_BAND: f64 = 0.1;

/// Window sizes for the period policies.
const WEEK_DAYS: i64 = 7;
const MONTH_DAYS: i64 = 30;

/// Each of the two adjacent trending windows spans this many hours.
const TRENDING_WINDOW_HOURS: i64 = 48;

/// Output limits per policy.
const MOST_RECOMMENDED_LIMIT: usize = 10;
const MOST_COMMENTED_LIMIT: usize = 10;
const TOP_WEEK_LIMIT: usize = 10;
const TOP_MONTH_LIMIT: usize = 50;
const TRENDING_LIMIT: usize = 10;

/// An aggregate together with the metric a policy scored it by.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredAggregate {
    pub aggregate: ContentAggregate,
    pub metric: RankingMetric,
}

/// Result of applying a policy: a ranked sequence, or an explicit
/// explanation of why there is nothing to rank.
#[derive(Debug, Clone, PartialEq)]
pub enum PolicyOutcome {
    Scored(Vec<ScoredAggregate>),
    NoData { message: String },
}

impl PolicyOutcome {
    fn no_data(message: impl Into<String>) -> Self {
        PolicyOutcome::NoData {
            message: message.into(),
        }
    }
}

/// Apply a ranking policy to the review corpus.
///
/// `now` is injected so period windows are deterministic under test; callers
/// outside tests pass `Utc::now()`.
pub fn rank(
    policy: RankingPolicy,
    reviews: &[Review],
    now: DateTime<Utc>,
    eligibility: &EligibilitySettings,
) -> PolicyOutcome {
    match policy {
        RankingPolicy::MostRecommended => {
            most_recommended(sorted_aggregates(reviews), reviews.len(), eligibility)
        }
        RankingPolicy::MostCommented => most_commented(sorted_aggregates(reviews)),
        RankingPolicy::TopWeek => top_period(reviews, WEEK_DAYS, TOP_WEEK_LIMIT, now),
        RankingPolicy::TopMonth => top_period(reviews, MONTH_DAYS, TOP_MONTH_LIMIT, now),
        RankingPolicy::Trending => trending(reviews, now),
    }
}

/// Group a corpus and return its aggregates in deterministic (key) order.
///
/// The map itself has no iteration order; pre-sorting by key makes every
/// later stable sort reproducible across runs.
fn sorted_aggregates(reviews: &[Review]) -> Vec<ContentAggregate> {
    let mut aggregates: Vec<ContentAggregate> = group_by_content(reviews).into_values().collect();
    aggregates.sort_by(|a, b| a.key.cmp(&b.key));
    aggregates
}

/// True when `a` outranks `b` under the average-rating policy.
///
/// Averages within `NEAR_TIE_BAND` are resolved by review volume, which
/// rewards volume over noise. The relation is intentionally not a total
/// order (4.0 / 4.05 / 4.1 chains are intransitive), so callers must not
/// feed it to a comparison sort.
fn outranks_by_average(a: &ContentAggregate, b: &ContentAggregate) -> bool {
    let (avg_a, avg_b) = (a.average_rating(), b.average_rating());
    if (avg_a - avg_b).abs() < NEAR_TIE_BAND {
        a.total_reviews() > b.total_reviews()
    } else {
        avg_a > avg_b
    }
}

/// Select the top `limit` aggregates by repeated pairwise scan.
///
/// O(n * limit), fine at leaderboard sizes, and well-defined for the
/// near-tie relation where a comparison sort is not.
fn select_top_by_average(
    mut candidates: Vec<ContentAggregate>,
    limit: usize,
) -> Vec<ContentAggregate> {
    let mut selected = Vec::with_capacity(limit.min(candidates.len()));
    while selected.len() < limit && !candidates.is_empty() {
        let mut best = 0;
        for i in 1..candidates.len() {
            if outranks_by_average(&candidates[i], &candidates[best]) {
                best = i;
            }
        }
        selected.push(candidates.remove(best));
    }
    selected
}

/// "Most recommended": best average rating among entities with enough
/// reviews to be meaningful.
fn most_recommended(
    aggregates: Vec<ContentAggregate>,
    corpus_size: usize,
    eligibility: &EligibilitySettings,
) -> PolicyOutcome {
    let min_reviews = eligibility.min_reviews_for(corpus_size);
    let eligible: Vec<ContentAggregate> = aggregates
        .into_iter()
        .filter(|agg| agg.total_reviews() >= min_reviews)
        .collect();

    debug!(
        "Most-recommended eligibility: min {} reviews over a corpus of {}, {} entities eligible",
        min_reviews,
        corpus_size,
        eligible.len()
    );

    if eligible.is_empty() {
        return PolicyOutcome::no_data(format!(
            "No content has at least {} reviews yet",
            min_reviews
        ));
    }

    let scored = select_top_by_average(eligible, MOST_RECOMMENDED_LIMIT)
        .into_iter()
        .map(|aggregate| {
            let metric = RankingMetric::AverageRating(aggregate.average_rating());
            ScoredAggregate { aggregate, metric }
        })
        .collect();
    PolicyOutcome::Scored(scored)
}

/// "Most commented": raw comment volume, no eligibility filter.
fn most_commented(mut aggregates: Vec<ContentAggregate>) -> PolicyOutcome {
    if aggregates.is_empty() {
        return PolicyOutcome::no_data("No reviews to rank yet");
    }

    // Stable sort over key-ordered input keeps ties deterministic.
    aggregates.sort_by(|a, b| b.total_comments.cmp(&a.total_comments));
    aggregates.truncate(MOST_COMMENTED_LIMIT);

    let scored = aggregates
        .into_iter()
        .map(|aggregate| {
            let metric = RankingMetric::CommentCount(aggregate.total_comments);
            ScoredAggregate { aggregate, metric }
        })
        .collect();
    PolicyOutcome::Scored(scored)
}

/// Fixed linear blend of rating, comment and like volume.
fn weighted_score(aggregate: &ContentAggregate) -> f64 {
    aggregate.average_rating() * RATING_WEIGHT
        + aggregate.total_comments as f64 * COMMENT_WEIGHT
        + aggregate.total_likes as f64 * LIKE_WEIGHT
}

/// "Top of period": weighted score over reviews created within the window.
///
/// An empty window falls back to the entire corpus; slightly-stale global
/// data beats an empty leaderboard.
fn top_period(
    reviews: &[Review],
    period_days: i64,
    limit: usize,
    now: DateTime<Utc>,
) -> PolicyOutcome {
    if reviews.is_empty() {
        return PolicyOutcome::no_data("No reviews to rank yet");
    }

    let period_start = now - Duration::days(period_days);
    let recent: Vec<Review> = reviews
        .iter()
        .filter(|r| r.created_at >= period_start)
        .cloned()
        .collect();

    let corpus: &[Review] = if recent.is_empty() {
        info!(
            "No reviews in the last {} days, ranking the full corpus instead",
            period_days
        );
        reviews
    } else {
        &recent
    };

    let mut aggregates = sorted_aggregates(corpus);
    aggregates.sort_by(|a, b| {
        weighted_score(b)
            .partial_cmp(&weighted_score(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    aggregates.truncate(limit);

    let scored = aggregates
        .into_iter()
        .map(|aggregate| {
            let metric = RankingMetric::WeightedScore(weighted_score(&aggregate));
            ScoredAggregate { aggregate, metric }
        })
        .collect();
    PolicyOutcome::Scored(scored)
}

/// Percent growth between two adjacent activity counts.
///
/// Brand-new activity is capped at +100% instead of dividing by zero.
fn growth_rate(recent: u32, previous: u32) -> f64 {
    if previous == 0 {
        if recent > 0 {
            100.0
        } else {
            0.0
        }
    } else {
        (recent as f64 - previous as f64) / previous as f64 * 100.0
    }
}

/// "Trending": growth in review-creation activity between two adjacent
/// windows. Comments and likes deliberately do not feed the activity count;
/// only review creation drives the trending signal.
fn trending(reviews: &[Review], now: DateTime<Utc>) -> PolicyOutcome {
    let recent_start = now - Duration::hours(TRENDING_WINDOW_HOURS);
    let previous_start = now - Duration::hours(2 * TRENDING_WINDOW_HOURS);

    let mut windows: HashMap<_, (u32, u32)> = HashMap::new();
    for review in reviews {
        let Some(key) = review.content_key() else {
            continue;
        };
        let (recent, previous) = windows.entry(key).or_insert((0, 0));
        if review.created_at >= recent_start {
            *recent += 1;
        } else if review.created_at >= previous_start {
            *previous += 1;
        }
    }

    // An entity with no recent activity cannot be trending, regardless of
    // how busy its previous window was.
    let mut scored: Vec<ScoredAggregate> = sorted_aggregates(reviews)
        .into_iter()
        .filter_map(|aggregate| {
            let (recent, previous) = windows.get(&aggregate.key).copied().unwrap_or((0, 0));
            if recent == 0 {
                return None;
            }
            let metric = RankingMetric::GrowthRate(growth_rate(recent, previous));
            Some(ScoredAggregate { aggregate, metric })
        })
        .collect();

    if scored.is_empty() {
        return PolicyOutcome::no_data(format!(
            "No review activity in the last {} hours",
            TRENDING_WINDOW_HOURS
        ));
    }

    scored.sort_by(|a, b| {
        let (RankingMetric::GrowthRate(ga), RankingMetric::GrowthRate(gb)) =
            (&a.metric, &b.metric)
        else {
            return std::cmp::Ordering::Equal;
        };
        gb.partial_cmp(ga).unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(TRENDING_LIMIT);

    PolicyOutcome::Scored(scored)
}
