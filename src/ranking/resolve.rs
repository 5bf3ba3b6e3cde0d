//! Display-metadata resolution.
//!
//! Resolution is an explicit ordered list of sources composed
//! first-success-wins: the cache (primed from review payload snapshots),
//! then the content service. A source that fails resolves to `None` so the
//! chain can keep going; the assembler synthesizes a placeholder when every
//! source comes up empty.

use super::cache::MetadataCache;
use super::models::{ContentKey, ContentMetadata};
use crate::backend::ContentLookup;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

#[async_trait]
pub trait ResolveSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Resolve metadata for a content entity. `None` means "not found here",
    /// including lookup failures; sources never error.
    async fn resolve(&self, key: &ContentKey) -> Option<ContentMetadata>;
}

/// Source backed by the metadata cache.
pub struct CacheSource {
    cache: Arc<dyn MetadataCache>,
}

impl CacheSource {
    pub fn new(cache: Arc<dyn MetadataCache>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl ResolveSource for CacheSource {
    fn name(&self) -> &'static str {
        "cache"
    }

    async fn resolve(&self, key: &ContentKey) -> Option<ContentMetadata> {
        self.cache.get(key)
    }
}

/// Source backed by the content service. Caches what it finds so repeat
/// winners skip the round trip next time.
pub struct LookupSource {
    lookup: Arc<dyn ContentLookup>,
    cache: Arc<dyn MetadataCache>,
}

impl LookupSource {
    pub fn new(lookup: Arc<dyn ContentLookup>, cache: Arc<dyn MetadataCache>) -> Self {
        Self { lookup, cache }
    }
}

#[async_trait]
impl ResolveSource for LookupSource {
    fn name(&self) -> &'static str {
        "content-service"
    }

    async fn resolve(&self, key: &ContentKey) -> Option<ContentMetadata> {
        match self.lookup.lookup_content(key).await {
            Ok(Some(metadata)) => {
                self.cache.set(key.clone(), metadata.clone());
                Some(metadata)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Content lookup failed for {}: {:#}", key, e);
                None
            }
        }
    }
}

/// Ordered resolver sources, first success wins.
pub struct ResolverChain {
    sources: Vec<Box<dyn ResolveSource>>,
}

impl ResolverChain {
    pub fn new(sources: Vec<Box<dyn ResolveSource>>) -> Self {
        Self { sources }
    }

    /// The standard chain: cache first, then the content service.
    pub fn standard(cache: Arc<dyn MetadataCache>, lookup: Arc<dyn ContentLookup>) -> Self {
        Self::new(vec![
            Box::new(CacheSource::new(cache.clone())),
            Box::new(LookupSource::new(lookup, cache)),
        ])
    }

    pub async fn resolve(&self, key: &ContentKey) -> Option<ContentMetadata> {
        for source in &self.sources {
            if let Some(found) = source.resolve(key).await {
                debug!("Resolved {} via {}", key, source.name());
                return Some(found);
            }
        }
        None
    }
}
