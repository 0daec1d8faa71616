//! Summary counts and filtered views over a diff result.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::{Classification, RowDiff};
use crate::error::DiffError;

/// Row counts per classification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub added: usize,
    pub deleted: usize,
    pub changed: usize,
    pub same: usize,
}

impl DiffSummary {
    pub fn from_rows(rows: &[RowDiff]) -> Self {
        let mut summary = Self::default();
        for row in rows {
            match row.kind {
                Classification::Added => summary.added += 1,
                Classification::Deleted => summary.deleted += 1,
                Classification::Changed => summary.changed += 1,
                Classification::Same => summary.same += 1,
            }
        }
        summary
    }

    pub fn get(&self, kind: Classification) -> usize {
        match kind {
            Classification::Added => self.added,
            Classification::Deleted => self.deleted,
            Classification::Changed => self.changed,
            Classification::Same => self.same,
        }
    }

    /// Total number of rows; equals the diff length.
    pub fn total(&self) -> usize {
        self.added + self.deleted + self.changed + self.same
    }

    /// Count shown on a filter tab. `All` counts every row.
    pub fn count(&self, filter: ViewFilter) -> usize {
        match filter {
            ViewFilter::All => self.total(),
            ViewFilter::Only(kind) => self.get(kind),
        }
    }

    /// Returns `true` if the two versions hold the same rows.
    pub fn is_identical(&self) -> bool {
        self.added == 0 && self.deleted == 0 && self.changed == 0
    }
}

/// Which rows a view shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewFilter {
    /// Every row that differs; unchanged rows only when explicitly included.
    #[default]
    All,
    /// Rows of exactly one classification.
    Only(Classification),
}

impl ViewFilter {
    pub const TABS: [ViewFilter; 5] = [
        Self::All,
        Self::Only(Classification::Added),
        Self::Only(Classification::Deleted),
        Self::Only(Classification::Changed),
        Self::Only(Classification::Same),
    ];

    /// Whether `row` is visible. The unchanged toggle only applies to `All`.
    pub fn matches(&self, row: &RowDiff, include_unchanged: bool) -> bool {
        match self {
            Self::All => include_unchanged || row.kind != Classification::Same,
            Self::Only(kind) => row.kind == *kind,
        }
    }
}

impl fmt::Display for ViewFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(kind) => write!(f, "{kind}"),
        }
    }
}

impl FromStr for ViewFilter {
    type Err = DiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

impl From<Classification> for ViewFilter {
    fn from(kind: Classification) -> Self {
        Self::Only(kind)
    }
}

/// Subset of `rows` visible under `filter`, preserving order.
pub fn filter_rows(rows: &[RowDiff], filter: ViewFilter, include_unchanged: bool) -> Vec<&RowDiff> {
    rows.iter()
        .filter(|row| filter.matches(row, include_unchanged))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::diff_rows;
    use ptab_types::fields::CODE;
    use ptab_types::Row;

    fn priced(code: &str, price: i32) -> Row {
        Row::new().with(CODE, code).with("단가", price)
    }

    fn sample() -> Vec<RowDiff> {
        let left = vec![priced("A", 1), priced("B", 1), priced("C", 1), priced("D", 1)];
        let right = vec![priced("B", 2), priced("C", 1), priced("E", 1), priced("D", 3)];
        diff_rows(&left, &right).into_rows()
    }

    fn keys(rows: &[&RowDiff]) -> Vec<String> {
        rows.iter().map(|r| r.key.clone()).collect()
    }

    #[test]
    fn counts_per_classification() {
        let summary = DiffSummary::from_rows(&sample());
        assert_eq!(
            summary,
            DiffSummary { added: 1, deleted: 1, changed: 2, same: 1 }
        );
        assert_eq!(summary.total(), 5);
        assert_eq!(summary.count(ViewFilter::All), 5);
        assert_eq!(summary.count(ViewFilter::Only(Classification::Changed)), 2);
        assert!(!summary.is_identical());
    }

    #[test]
    fn all_hides_unchanged_by_default() {
        let rows = sample();
        assert_eq!(keys(&filter_rows(&rows, ViewFilter::All, false)), ["A", "B", "D", "E"]);
        assert_eq!(keys(&filter_rows(&rows, ViewFilter::All, true)), ["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn specific_filter_ignores_toggle() {
        let rows = sample();
        let changed = ViewFilter::Only(Classification::Changed);
        assert_eq!(keys(&filter_rows(&rows, changed, false)), ["B", "D"]);
        assert_eq!(keys(&filter_rows(&rows, changed, true)), ["B", "D"]);

        let same = ViewFilter::Only(Classification::Same);
        assert_eq!(keys(&filter_rows(&rows, same, false)), ["C"]);
    }

    #[test]
    fn empty_diff() {
        let summary = DiffSummary::from_rows(&[]);
        assert_eq!(summary.total(), 0);
        assert!(summary.is_identical());
        assert!(filter_rows(&[], ViewFilter::All, true).is_empty());
    }

    #[test]
    fn filter_parsing() {
        assert_eq!("all".parse::<ViewFilter>().unwrap(), ViewFilter::All);
        assert_eq!(
            "deleted".parse::<ViewFilter>().unwrap(),
            ViewFilter::Only(Classification::Deleted)
        );
        assert!("everything".parse::<ViewFilter>().is_err());
        assert_eq!(ViewFilter::Only(Classification::Added).to_string(), "added");
        assert_eq!(ViewFilter::TABS.len(), 5);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn table() -> impl Strategy<Value = Vec<Row>> {
            proptest::collection::btree_map("[A-Z][0-9]", 0i32..3, 0..16)
                .prop_map(|m| m.into_iter().map(|(k, v)| priced(&k, v)).collect())
        }

        proptest! {
            #[test]
            fn summary_sums_to_length(a in table(), b in table()) {
                let diff = diff_rows(&a, &b);
                prop_assert_eq!(diff.summary().total(), diff.len());
            }

            #[test]
            fn filter_is_ordered_subsequence(a in table(), b in table()) {
                let diff = diff_rows(&a, &b);
                for kind in Classification::ALL {
                    let filtered = diff.filter(ViewFilter::Only(kind), false);
                    let expected: Vec<&RowDiff> =
                        diff.iter().filter(|r| r.kind == kind).collect();
                    prop_assert_eq!(filtered.len(), diff.summary().get(kind));
                    prop_assert_eq!(filtered, expected);
                }
            }
        }
    }
}
