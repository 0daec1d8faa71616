use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use ptab_types::{VersionId, VersionMeta};

use crate::document::{SaveRequest, VersionDocument};
use crate::error::StoreResult;
use crate::traits::{sort_newest_first, RowStore};

/// In-memory, HashMap-based version store.
///
/// Intended for tests and embedding. Documents are held behind a `RwLock`
/// and cloned on read/write.
pub struct InMemoryRowStore {
    versions: RwLock<HashMap<VersionId, VersionDocument>>,
}

impl InMemoryRowStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            versions: RwLock::new(HashMap::new()),
        }
    }

    /// Number of versions currently stored.
    pub fn len(&self) -> usize {
        self.versions.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.versions.read().expect("lock poisoned").is_empty()
    }

    /// Insert a fully-formed document as-is, keeping its timestamp.
    pub fn insert(&self, document: VersionDocument) {
        let mut map = self.versions.write().expect("lock poisoned");
        map.insert(document.meta.id.clone(), document);
    }
}

impl Default for InMemoryRowStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RowStore for InMemoryRowStore {
    async fn get(&self, id: &VersionId) -> StoreResult<Option<VersionDocument>> {
        let map = self.versions.read().expect("lock poisoned");
        Ok(map.get(id).cloned())
    }

    async fn put(&self, request: SaveRequest) -> StoreResult<VersionId> {
        let document = request.into_document(Utc::now())?;
        let id = document.meta.id.clone();
        debug!(id = %id, rows = document.rows.len(), "version stored in memory");
        self.insert(document);
        Ok(id)
    }

    async fn list(&self) -> StoreResult<Vec<VersionMeta>> {
        let map = self.versions.read().expect("lock poisoned");
        let mut metas: Vec<VersionMeta> = map.values().map(|doc| doc.meta.clone()).collect();
        sort_newest_first(&mut metas);
        Ok(metas)
    }

    async fn delete(&self, id: &VersionId) -> StoreResult<bool> {
        let mut map = self.versions.write().expect("lock poisoned");
        Ok(map.remove(id).is_some())
    }
}

impl std::fmt::Debug for InMemoryRowStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRowStore")
            .field("version_count", &self.len())
            .finish()
    }
}
