//! File-backed version store: one pretty-printed JSON document per version.
//!
//! Layout: `<root>/<version-id>.json`. Writes go to a temporary sibling
//! file first and are renamed into place.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use tracing::{debug, info, warn};

use ptab_types::{VersionId, VersionMeta};

use crate::document::{SaveRequest, VersionDocument};
use crate::error::{StoreError, StoreResult};
use crate::traits::{sort_newest_first, RowStore};

const EXTENSION: &str = "json";

/// Version store rooted at a directory.
#[derive(Clone, Debug)]
pub struct FsRowStore {
    root: PathBuf,
}

impl FsRowStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        info!(root = %root.display(), "opened version store");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &VersionId) -> StoreResult<PathBuf> {
        let key = id.as_str();
        if key.is_empty()
            || key == "."
            || key == ".."
            || key.contains(['/', '\\'])
        {
            return Err(StoreError::InvalidVersionName(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.{EXTENSION}")))
    }

    async fn read_document(path: &Path) -> StoreResult<Option<VersionDocument>> {
        match fs::read(path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl RowStore for FsRowStore {
    async fn get(&self, id: &VersionId) -> StoreResult<Option<VersionDocument>> {
        let path = self.path_for(id)?;
        Self::read_document(&path).await
    }

    async fn put(&self, request: SaveRequest) -> StoreResult<VersionId> {
        let document = request.into_document(Utc::now())?;
        let id = document.meta.id.clone();
        let path = self.path_for(&id)?;
        let tmp = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(&document)?;
        fs::write(&tmp, &bytes).await?;
        fs::rename(&tmp, &path).await?;

        debug!(id = %id, rows = document.rows.len(), bytes = bytes.len(), "version written");
        Ok(id)
    }

    async fn list(&self) -> StoreResult<Vec<VersionMeta>> {
        let mut metas = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            match Self::read_document(&path).await {
                Ok(Some(doc)) => metas.push(doc.meta),
                Ok(None) => {}
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable version"),
            }
        }
        sort_newest_first(&mut metas);
        Ok(metas)
    }

    async fn delete(&self, id: &VersionId) -> StoreResult<bool> {
        let path = self.path_for(id)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                info!(id = %id, "version deleted");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ptab_types::fields::{CODE, MODEL};
    use ptab_types::{FieldValue, Row};

    fn request(name: &str) -> SaveRequest {
        SaveRequest::new(
            name,
            vec![
                Row::new().with(CODE, "X1").with(MODEL, "M1").with("단가", 100),
                Row::new().with(CODE, "X2").with("단가", FieldValue::Null),
            ],
        )
        .with_category("galaxy")
        .with_region("kr")
    }

    #[tokio::test]
    async fn roundtrip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsRowStore::open(dir.path()).await.unwrap();
        let id = store.put(request("v 1.0")).await.unwrap();
        assert_eq!(id.as_str(), "v_1_0");
        assert!(dir.path().join("v_1_0.json").exists());

        let doc = store.get(&id).await.unwrap().unwrap();
        assert_eq!(doc.meta.category, "galaxy");
        assert_eq!(doc.rows[1].get("단가"), Some(&FieldValue::Null));
        assert_eq!(doc.rows[1].get(MODEL), None);
    }

    #[tokio::test]
    async fn missing_version() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsRowStore::open(dir.path()).await.unwrap();
        let id = VersionId::new("absent");
        assert!(store.get(&id).await.unwrap().is_none());
        assert!(store.fetch_rows(&id).await.unwrap().is_empty());
        assert!(!store.delete(&id).await.unwrap());
    }

    #[tokio::test]
    async fn list_skips_foreign_and_corrupt_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsRowStore::open(dir.path()).await.unwrap();
        store.put(request("a")).await.unwrap();
        store.put(request("b")).await.unwrap();
        std::fs::write(dir.path().join("notes.txt"), "hi").unwrap();
        std::fs::write(dir.path().join("broken.json"), "{").unwrap();

        let metas = store.list().await.unwrap();
        assert_eq!(metas.len(), 2);
    }

    #[tokio::test]
    async fn path_traversal_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsRowStore::open(dir.path()).await.unwrap();
        let err = store.get(&VersionId::new("../etc")).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidVersionName(_)));
    }

    #[tokio::test]
    async fn delete_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsRowStore::open(dir.path()).await.unwrap();
        let id = store.put(request("gone")).await.unwrap();
        assert!(store.delete(&id).await.unwrap());
        assert!(store.get(&id).await.unwrap().is_none());
    }
}
