//! Identity-key index over one row collection.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use ptab_types::Row;

/// Bookkeeping from building one [`RowIndex`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexReport {
    /// Rows indexed under a distinct key.
    pub indexed: usize,
    /// Rows dropped because they carry no usable identity key.
    pub keyless: usize,
    /// Rows that replaced an earlier row with the same key.
    pub overwritten: usize,
}

/// Lookup from identity key to row, borrowed from the source collection.
///
/// Duplicate keys resolve last-write-wins: a later row replaces an earlier
/// one with the same key. Rows without an identity key are not indexed.
#[derive(Debug, Default)]
pub struct RowIndex<'a> {
    rows: HashMap<String, &'a Row>,
    order: Vec<String>,
    report: IndexReport,
}

impl<'a> RowIndex<'a> {
    /// Index `rows` by the value of `identity_field`.
    pub fn build(rows: &'a [Row], identity_field: &str) -> Self {
        let mut index = Self {
            rows: HashMap::with_capacity(rows.len()),
            order: Vec::with_capacity(rows.len()),
            report: IndexReport::default(),
        };

        for (position, row) in rows.iter().enumerate() {
            let Some(key) = row.key(identity_field) else {
                index.report.keyless += 1;
                continue;
            };
            match index.rows.insert(key.clone(), row) {
                Some(_) => {
                    debug!(key = %key, position, "duplicate identity key; keeping later row");
                    index.report.overwritten += 1;
                }
                None => index.order.push(key),
            }
        }

        if index.report.keyless > 0 {
            warn!(
                keyless = index.report.keyless,
                field = identity_field,
                "rows without identity key were skipped"
            );
        }
        index.report.indexed = index.rows.len();
        index
    }

    pub fn get(&self, key: &str) -> Option<&'a Row> {
        self.rows.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.rows.contains_key(key)
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// `(key, row)` pairs in first-seen order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &'a Row)> + '_ {
        self.order
            .iter()
            .filter_map(|k| self.rows.get(k).map(|row| (k.as_str(), *row)))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn report(&self) -> IndexReport {
        self.report
    }
}
