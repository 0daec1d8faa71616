//! Row- and cell-level diff between two versions of a price table.
//!
//! Every identity key present on either side yields exactly one [`RowDiff`]:
//! - key only in the new version: `added`, every cell `added`;
//! - key only in the old version: `deleted`, every cell `deleted`;
//! - key in both: each schema field is compared with strict equality, and the
//!   row is `changed` if any cell is, `same` otherwise.
//!
//! The result is sorted by identity key using the configured [`KeyOrder`].
//!
//! [`KeyOrder`]: crate::KeyOrder

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use ptab_types::{FieldValue, Row};

use crate::collate::compare_keys;
use crate::config::DiffConfig;
use crate::error::DiffError;
use crate::index::{IndexReport, RowIndex};
use crate::schema::{build_schema, FieldSchema};
use crate::summary::{filter_rows, DiffSummary, ViewFilter};

/// Outcome of comparing one row or one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Added,
    Deleted,
    Changed,
    Same,
}

impl Classification {
    pub const ALL: [Classification; 4] = [Self::Added, Self::Deleted, Self::Changed, Self::Same];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Deleted => "deleted",
            Self::Changed => "changed",
            Self::Same => "same",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Classification {
    type Err = DiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DiffError::UnknownClassification(s.to_string()))
    }
}

/// One field's comparison result for one identity key.
///
/// `before` is `None` when the field is absent from the old row (always the
/// case for `added` cells); `after` likewise for the new row.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CellDiff {
    pub field: String,
    pub kind: Classification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<FieldValue>,
    /// Signed, rounded percentage change for numeric `changed` cells.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<i64>,
}

impl CellDiff {
    pub fn is_changed(&self) -> bool {
        self.kind == Classification::Changed
    }

    /// The value to show for an unchanged cell.
    pub fn value(&self) -> Option<&FieldValue> {
        self.before.as_ref().or(self.after.as_ref())
    }

    /// Percent badge text, e.g. `+20%` or `-5%`.
    pub fn change_label(&self) -> Option<String> {
        self.change_percent.map(|p| {
            if p > 0 {
                format!("+{p}%")
            } else {
                format!("{p}%")
            }
        })
    }
}

/// Comparison result for one identity key.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RowDiff {
    pub key: String,
    pub display_name: String,
    pub kind: Classification,
    /// One cell per schema field, in schema order.
    pub cells: Vec<CellDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Row>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<Row>,
}

impl RowDiff {
    pub fn cell(&self, field: &str) -> Option<&CellDiff> {
        self.cells.iter().find(|c| c.field == field)
    }

    pub fn changed_cells(&self) -> impl Iterator<Item = &CellDiff> {
        self.cells.iter().filter(|c| c.is_changed())
    }
}

/// The full diff report between two versions.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableDiff {
    schema: FieldSchema,
    rows: Vec<RowDiff>,
    left: IndexReport,
    right: IndexReport,
    #[serde(skip)]
    identity_field: String,
    #[serde(skip)]
    display_field: String,
}

impl TableDiff {
    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    /// Row diffs sorted by identity key.
    pub fn rows(&self) -> &[RowDiff] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<RowDiff> {
        self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &RowDiff> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&RowDiff> {
        self.rows.iter().find(|r| r.key == key)
    }

    /// Index bookkeeping for the old (`left`) version.
    pub fn left_report(&self) -> IndexReport {
        self.left
    }

    /// Index bookkeeping for the new (`right`) version.
    pub fn right_report(&self) -> IndexReport {
        self.right
    }

    pub fn summary(&self) -> DiffSummary {
        DiffSummary::from_rows(&self.rows)
    }

    pub fn filter(&self, filter: ViewFilter, include_unchanged: bool) -> Vec<&RowDiff> {
        filter_rows(&self.rows, filter, include_unchanged)
    }

    /// Schema columns other than the identity and display fields, which a
    /// grid shows in dedicated leading columns.
    pub fn detail_fields(&self) -> Vec<&str> {
        self.schema
            .iter()
            .filter(|f| *f != self.identity_field && *f != self.display_field)
            .collect()
    }
}

/// Percentage change from `before` to `after`, rounded to the nearest integer
/// with ties away from zero.
///
/// Only defined when both values are numbers and `before` is non-zero.
pub fn change_percent(before: &FieldValue, after: &FieldValue) -> Option<i64> {
    let (FieldValue::Number(b), FieldValue::Number(a)) = (before, after) else {
        return None;
    };
    if *b == 0.0 {
        return None;
    }
    let pct = ((a - b) / b * 100.0).round();
    pct.is_finite().then_some(pct as i64)
}

/// Diff engine bound to a configuration.
#[derive(Clone, Debug, Default)]
pub struct DiffEngine {
    config: DiffConfig,
}

impl DiffEngine {
    pub fn new(config: DiffConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Compare the old collection `left` against the new collection `right`.
    pub fn diff(&self, left: &[Row], right: &[Row]) -> TableDiff {
        let schema_config = &self.config.schema;
        let identity = schema_config.identity_field.as_str();
        let display = schema_config.display_field.as_str();

        let schema = build_schema(left, right, schema_config);
        let left_index = RowIndex::build(left, identity);
        let right_index = RowIndex::build(right, identity);

        let mut rows = Vec::with_capacity(left_index.len() + right_index.len());
        for (key, before) in left_index.entries() {
            let row = match right_index.get(key) {
                Some(after) => compare_rows(key, before, after, &schema, display),
                None => one_sided(key, before, Classification::Deleted, &schema, display),
            };
            rows.push(row);
        }
        for (key, after) in right_index.entries() {
            if !left_index.contains(key) {
                rows.push(one_sided(key, after, Classification::Added, &schema, display));
            }
        }

        let order = self.config.key_order;
        rows.sort_by(|a, b| compare_keys(&a.key, &b.key, order));

        let diff = TableDiff {
            schema,
            rows,
            left: left_index.report(),
            right: right_index.report(),
            identity_field: identity.to_string(),
            display_field: display.to_string(),
        };
        let summary = diff.summary();
        debug!(
            fields = diff.schema.len(),
            added = summary.added,
            deleted = summary.deleted,
            changed = summary.changed,
            same = summary.same,
            "diff computed"
        );
        diff
    }
}

/// Compare two collections with the default configuration.
pub fn diff_rows(left: &[Row], right: &[Row]) -> TableDiff {
    DiffEngine::default().diff(left, right)
}

/// Row present on one side only. `kind` is `Added` or `Deleted`.
fn one_sided(
    key: &str,
    row: &Row,
    kind: Classification,
    schema: &FieldSchema,
    display: &str,
) -> RowDiff {
    let added = kind == Classification::Added;
    let cells = schema
        .iter()
        .map(|field| {
            let value = row.get(field).cloned();
            CellDiff {
                field: field.to_string(),
                kind,
                before: if added { None } else { value.clone() },
                after: if added { value } else { None },
                change_percent: None,
            }
        })
        .collect();

    RowDiff {
        key: key.to_string(),
        display_name: row.label(display).unwrap_or_default(),
        kind,
        cells,
        before: (!added).then(|| row.clone()),
        after: added.then(|| row.clone()),
    }
}

fn compare_rows(
    key: &str,
    before: &Row,
    after: &Row,
    schema: &FieldSchema,
    display: &str,
) -> RowDiff {
    let cells: Vec<CellDiff> = schema
        .iter()
        .map(|field| {
            let old = before.get(field);
            let new = after.get(field);
            if old == new {
                CellDiff {
                    field: field.to_string(),
                    kind: Classification::Same,
                    before: old.cloned(),
                    after: new.cloned(),
                    change_percent: None,
                }
            } else {
                CellDiff {
                    field: field.to_string(),
                    kind: Classification::Changed,
                    before: old.cloned(),
                    after: new.cloned(),
                    change_percent: old.zip(new).and_then(|(o, n)| change_percent(o, n)),
                }
            }
        })
        .collect();

    let kind = if cells.iter().any(CellDiff::is_changed) {
        Classification::Changed
    } else {
        Classification::Same
    };

    RowDiff {
        key: key.to_string(),
        display_name: before
            .label(display)
            .or_else(|| after.label(display))
            .unwrap_or_default(),
        kind,
        cells,
        before: Some(before.clone()),
        after: Some(after.clone()),
    }
}
