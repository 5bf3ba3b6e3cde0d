//! Ranking assembler: turns scored aggregates into display-ready entries.

use super::models::{ContentAggregate, ContentMetadata, RankedEntry};
use super::policy::ScoredAggregate;
use super::resolve::ResolverChain;
use futures::future;
use tracing::debug;

/// Resolve display metadata for each scored aggregate and build the final
/// leaderboard entries, preserving policy order.
///
/// Metadata lookups run concurrently, one independent future per entry, each
/// landing in its own position-indexed slot. This function never fails: an
/// entity with no resolvable metadata gets a placeholder synthesized from
/// its own numbers.
pub async fn assemble(scored: Vec<ScoredAggregate>, resolver: &ResolverChain) -> Vec<RankedEntry> {
    let lookups = scored
        .iter()
        .map(|s| resolver.resolve(&s.aggregate.key))
        .collect::<Vec<_>>();
    let resolved = future::join_all(lookups).await;

    scored
        .into_iter()
        .zip(resolved)
        .map(|(s, metadata)| {
            let metadata = metadata.unwrap_or_else(|| {
                debug!("No metadata for {}, synthesizing placeholder", s.aggregate.key);
                placeholder_metadata(&s.aggregate)
            });
            RankedEntry {
                content_id: s.aggregate.key.id.clone(),
                content_kind: s.aggregate.key.kind,
                title: metadata.title,
                artist: metadata.artist,
                image: metadata.image,
                total_reviews: s.aggregate.total_reviews(),
                metric: s.metric,
            }
        })
        .collect()
}

/// Last-resort display metadata built from the aggregate itself.
fn placeholder_metadata(aggregate: &ContentAggregate) -> ContentMetadata {
    ContentMetadata {
        title: format!(
            "{} with {} reviews",
            aggregate.key.kind.label(),
            aggregate.total_reviews()
        ),
        artist: None,
        image: None,
    }
}
