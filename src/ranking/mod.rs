//! Ranking aggregation engine.
//!
//! A pure, stateless transformation from the review corpus into ranked
//! leaderboards under five scoring policies, plus the metadata resolution
//! that makes the winners display-ready.

mod assembler;
pub mod cache;
mod engine;
mod grouper;
pub mod models;
pub mod policy;
pub mod resolve;

pub use assembler::assemble;
pub use cache::{InMemoryMetadataCache, MetadataCache};
pub use engine::RankingEngine;
pub use grouper::group_by_content;
pub use models::{
    ContentAggregate, ContentKey, ContentKind, ContentMetadata, RankedEntry, RankingMetric,
    RankingOutcome, RankingPolicy, Review,
};
pub use policy::{rank, PolicyOutcome, ScoredAggregate};
pub use resolve::{CacheSource, LookupSource, ResolveSource, ResolverChain};
