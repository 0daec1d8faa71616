use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ptab_types::{Row, VersionId, VersionMeta};

use crate::error::{StoreError, StoreResult};

/// A stored version: metadata plus its rows.
///
/// Serialized as a flat document with the rows under `data`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VersionDocument {
    #[serde(flatten)]
    pub meta: VersionMeta,
    #[serde(rename = "data", default)]
    pub rows: Vec<Row>,
}

/// Input to [`RowStore::put`](crate::RowStore::put).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SaveRequest {
    /// Explicit id when updating an existing version. Derived from
    /// `version_name` when absent.
    pub id: Option<VersionId>,
    pub version_name: String,
    pub category: String,
    pub partner: String,
    pub region: String,
    pub rows: Vec<Row>,
}

impl SaveRequest {
    pub fn new(version_name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            version_name: version_name.into(),
            rows,
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: VersionId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_partner(mut self, partner: impl Into<String>) -> Self {
        self.partner = partner.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// The id this request will be stored under.
    pub fn resolve_id(&self) -> StoreResult<VersionId> {
        match &self.id {
            Some(id) => Ok(id.clone()),
            None => Ok(VersionId::from_name(&self.version_name)?),
        }
    }

    /// Validate and stamp the request into a storable document.
    pub fn into_document(self, now: DateTime<Utc>) -> StoreResult<VersionDocument> {
        let id = self.resolve_id()?;
        if self.rows.is_empty() {
            return Err(StoreError::EmptyRows(id));
        }
        let rows = self.rows.iter().map(Row::without_transient).collect();
        Ok(VersionDocument {
            meta: VersionMeta {
                id,
                version_name: self.version_name,
                category: self.category,
                partner: self.partner,
                region: self.region,
                updated_at: Some(now),
            },
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ptab_types::fields::{CODE, SORT_INDEX};

    fn rows() -> Vec<Row> {
        vec![Row::new().with(CODE, "X1").with("단가", 100)]
    }

    #[test]
    fn id_derived_from_name() {
        let req = SaveRequest::new("galaxy list v1.2", rows());
        assert_eq!(req.resolve_id().unwrap().as_str(), "galaxy_list_v1_2");
    }

    #[test]
    fn explicit_id_wins() {
        let req = SaveRequest::new("renamed", rows()).with_id(VersionId::new("orig"));
        assert_eq!(req.resolve_id().unwrap().as_str(), "orig");
    }

    #[test]
    fn empty_rows_rejected() {
        let err = SaveRequest::new("v", vec![]).into_document(Utc::now()).unwrap_err();
        assert!(matches!(err, StoreError::EmptyRows(_)));
    }

    #[test]
    fn blank_name_rejected() {
        let err = SaveRequest::new(" ", rows()).into_document(Utc::now()).unwrap_err();
        assert!(matches!(err, StoreError::InvalidVersionName(_)));
    }

    #[test]
    fn transient_fields_not_persisted() {
        let rows = vec![Row::new().with(CODE, "X1").with(SORT_INDEX, 4)];
        let doc = SaveRequest::new("v", rows).into_document(Utc::now()).unwrap();
        assert!(!doc.rows[0].contains(SORT_INDEX));
    }

    #[test]
    fn document_layout() {
        let doc = SaveRequest::new("v", rows())
            .with_category("galaxy")
            .with_partner("p")
            .with_region("kr")
            .into_document(Utc::now())
            .unwrap();
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["versionName"], "v");
        assert_eq!(json["category"], "galaxy");
        assert_eq!(json["data"][0]["코드"], "X1");
        let back: VersionDocument = serde_json::from_value(json).unwrap();
        assert_eq!(back, doc);
    }
}
