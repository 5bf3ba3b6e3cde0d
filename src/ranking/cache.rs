//! Typed metadata cache.
//!
//! The cache remembers content display metadata seen earlier (review payload
//! snapshots, successful lookups) so the assembler can avoid a round trip to
//! the content service. Backing store is pluggable behind the trait.

use super::models::{ContentKey, ContentMetadata};
use std::collections::HashMap;
use std::sync::RwLock;

pub trait MetadataCache: Send + Sync {
    fn get(&self, key: &ContentKey) -> Option<ContentMetadata>;
    fn set(&self, key: ContentKey, value: ContentMetadata);
}

/// Process-local cache. Unbounded; entries are tiny and the content space
/// is the catalog itself.
#[derive(Default)]
pub struct InMemoryMetadataCache {
    entries: RwLock<HashMap<ContentKey, ContentMetadata>>,
}

impl InMemoryMetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }
}

impl MetadataCache for InMemoryMetadataCache {
    fn get(&self, key: &ContentKey) -> Option<ContentMetadata> {
        self.entries.read().unwrap().get(key).cloned()
    }

    fn set(&self, key: ContentKey, value: ContentMetadata) {
        self.entries.write().unwrap().insert(key, value);
    }
}
