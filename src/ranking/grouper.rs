//! Content grouper: collapses the review corpus into per-entity aggregates.

use super::models::{ContentAggregate, ContentKey, Review};
use std::collections::HashMap;
use tracing::debug;

/// Group reviews by the content entity they target.
///
/// Reviews with no content reference cannot be attributed to any ranked
/// entity and are silently dropped. Song and album partitions are disjoint
/// even when id strings collide, because the kind is part of the key.
///
/// Pure function; iteration order of the returned map is unspecified.
pub fn group_by_content(reviews: &[Review]) -> HashMap<ContentKey, ContentAggregate> {
    let mut groups: HashMap<ContentKey, ContentAggregate> = HashMap::new();
    let mut dropped = 0usize;

    for review in reviews {
        let Some(key) = review.content_key() else {
            dropped += 1;
            continue;
        };

        let aggregate = groups
            .entry(key.clone())
            .or_insert_with(|| ContentAggregate::new(key));
        aggregate.ratings.push(review.rating);
        aggregate.total_comments += review.comment_count as u64;
        aggregate.total_likes += review.like_count as u64;
        aggregate.review_ids.push(review.id.clone());
    }

    if dropped > 0 {
        debug!("Dropped {} reviews without a content reference", dropped);
    }

    groups
}
