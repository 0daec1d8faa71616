use serde::Serialize;

use ptab_diff::{DiffSummary, RowDiff, TableDiff, ViewFilter};
use ptab_types::{VersionId, VersionMeta};

use crate::error::{SdkError, SdkResult};

/// A validated request to compare two different versions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompareRequest {
    /// The older version; rows only here are `deleted`.
    pub left: VersionId,
    /// The newer version; rows only here are `added`.
    pub right: VersionId,
}

impl CompareRequest {
    /// Validate a pair of selections.
    ///
    /// Both must be set (an empty id counts as unset) and they must differ.
    pub fn new(left: Option<VersionId>, right: Option<VersionId>) -> SdkResult<Self> {
        let selected = |id: Option<VersionId>| id.filter(|id| !id.as_str().is_empty());
        let (Some(left), Some(right)) = (selected(left), selected(right)) else {
            return Err(SdkError::MissingVersion);
        };
        if left == right {
            return Err(SdkError::SameVersion(left));
        }
        Ok(Self { left, right })
    }
}

/// One side of a comparison as it was loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VersionSide {
    pub id: VersionId,
    /// `None` when the version does not exist; it then compares as empty.
    pub meta: Option<VersionMeta>,
    pub row_count: usize,
}

impl VersionSide {
    pub fn label(&self) -> String {
        match &self.meta {
            Some(meta) => meta.label(),
            None => self.id.to_string(),
        }
    }
}

/// The result handed to the rendering layer: the diff plus its counts.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Comparison {
    pub left: VersionSide,
    pub right: VersionSide,
    pub summary: DiffSummary,
    pub diff: TableDiff,
}

impl Comparison {
    pub fn visible_rows(&self, filter: ViewFilter, include_unchanged: bool) -> Vec<&RowDiff> {
        self.diff.filter(filter, include_unchanged)
    }
}
