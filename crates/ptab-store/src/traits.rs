use async_trait::async_trait;

use ptab_types::{Row, VersionId, VersionMeta};

use crate::document::{SaveRequest, VersionDocument};
use crate::error::StoreResult;

/// Keyed document store holding price-table versions.
///
/// All implementations must satisfy these invariants:
/// - `put` replaces the whole document stored under the resolved id.
/// - Reads of a missing version return `Ok(None)`, not an error.
/// - Concurrent reads are safe; the engine never writes while diffing.
/// - All I/O errors are propagated, never silently ignored.
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Read a version by id.
    ///
    /// Returns `Ok(None)` if the version does not exist.
    async fn get(&self, id: &VersionId) -> StoreResult<Option<VersionDocument>>;

    /// Save a version and return the id it was stored under.
    async fn put(&self, request: SaveRequest) -> StoreResult<VersionId>;

    /// Metadata of every stored version, most recently updated first.
    async fn list(&self) -> StoreResult<Vec<VersionMeta>>;

    /// Delete a version. Returns `true` if it existed.
    async fn delete(&self, id: &VersionId) -> StoreResult<bool>;

    /// Check whether a version exists.
    async fn exists(&self, id: &VersionId) -> StoreResult<bool> {
        Ok(self.get(id).await?.is_some())
    }

    /// Rows of a version; empty when the version does not exist.
    async fn fetch_rows(&self, id: &VersionId) -> StoreResult<Vec<Row>> {
        Ok(self.get(id).await?.map(|doc| doc.rows).unwrap_or_default())
    }
}

/// Sort metadata most recently updated first; versions without a timestamp last.
pub(crate) fn sort_newest_first(metas: &mut [VersionMeta]) {
    metas.sort_by(|a, b| {
        b.updated_at
            .cmp(&a.updated_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}
