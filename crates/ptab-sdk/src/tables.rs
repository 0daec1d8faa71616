use std::sync::Arc;

use tracing::{debug, info, warn};

use ptab_diff::DiffEngine;
use ptab_ingest::rows_from_json;
use ptab_store::{InMemoryRowStore, RowStore, SaveRequest, VersionDocument};
use ptab_types::{Row, VersionId, VersionMeta};

use crate::compare::{CompareRequest, Comparison, VersionSide};
use crate::config::SdkConfig;
use crate::error::{SdkError, SdkResult};

/// High-level price-table API over a [`RowStore`].
pub struct PriceTables {
    store: Arc<dyn RowStore>,
    config: SdkConfig,
    engine: DiffEngine,
}

impl PriceTables {
    pub fn new(store: Arc<dyn RowStore>, config: SdkConfig) -> Self {
        let engine = DiffEngine::new(config.diff.clone());
        Self { store, config, engine }
    }

    /// An API backed by a fresh in-memory store with default configuration.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryRowStore::new()), SdkConfig::default())
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn RowStore> {
        &self.store
    }

    // ---- Version operations ----

    pub async fn save_version(&self, request: SaveRequest) -> SdkResult<VersionId> {
        let rows = request.rows.len();
        let id = self.store.put(request).await?;
        info!(id = %id, rows, "version saved");
        Ok(id)
    }

    /// Parse rows from JSON (records or a sheet grid) and save them.
    ///
    /// Rows already present on `request` are replaced by the parsed rows.
    pub async fn import_json(&self, mut request: SaveRequest, text: &str) -> SdkResult<VersionId> {
        request.rows = rows_from_json(text, &self.config.ingest)?;
        self.save_version(request).await
    }

    pub async fn list_versions(&self) -> SdkResult<Vec<VersionMeta>> {
        Ok(self.store.list().await?)
    }

    pub async fn load_version(&self, id: &VersionId) -> SdkResult<VersionDocument> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| SdkError::NotFound(id.clone()))
    }

    pub async fn delete_version(&self, id: &VersionId) -> SdkResult<bool> {
        Ok(self.store.delete(id).await?)
    }

    // ---- Comparison ----

    /// Load both versions concurrently and diff them.
    ///
    /// Fails without a partial result if either load fails or the pair does
    /// not finish within the configured timeout. A version that does not
    /// exist compares as an empty table.
    pub async fn compare(&self, request: &CompareRequest) -> SdkResult<Comparison> {
        let timeout = self.config.fetch_timeout();
        let loads = async {
            tokio::try_join!(self.fetch(&request.left), self.fetch(&request.right))
        };
        let (left, right) = tokio::time::timeout(timeout, loads)
            .await
            .map_err(|_| {
                warn!(
                    left = %request.left,
                    right = %request.right,
                    ?timeout,
                    "version load timed out"
                );
                SdkError::Timeout(timeout)
            })??;

        let (left_side, left_rows) = split(&request.left, left);
        let (right_side, right_rows) = split(&request.right, right);

        let diff = self.engine.diff(&left_rows, &right_rows);
        let summary = diff.summary();
        debug!(left = %request.left, right = %request.right, rows = diff.len(), "comparison ready");

        Ok(Comparison {
            left: left_side,
            right: right_side,
            summary,
            diff,
        })
    }

    async fn fetch(&self, id: &VersionId) -> SdkResult<Option<VersionDocument>> {
        let doc = self.store.get(id).await.map_err(|source| SdkError::Fetch {
            id: id.clone(),
            source,
        })?;
        if doc.is_none() {
            warn!(id = %id, "version not found; comparing as empty");
        }
        Ok(doc)
    }
}

fn split(id: &VersionId, doc: Option<VersionDocument>) -> (VersionSide, Vec<Row>) {
    match doc {
        Some(doc) => (
            VersionSide {
                id: id.clone(),
                meta: Some(doc.meta),
                row_count: doc.rows.len(),
            },
            doc.rows,
        ),
        None => (
            VersionSide {
                id: id.clone(),
                meta: None,
                row_count: 0,
            },
            Vec::new(),
        ),
    }
}

impl std::fmt::Debug for PriceTables {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceTables")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
