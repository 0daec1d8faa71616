//! Field schema: the ordered, de-duplicated list of comparable fields.
//!
//! Built once per comparison from the union of field names on both sides.
//! Priority fields come first in their configured order, followed by every
//! other field in ascending code-point order, so the result does not depend
//! on row order.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use ptab_types::Row;

use crate::config::SchemaConfig;

/// Ordered column list used for comparison and rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSchema {
    fields: Vec<String>,
}

impl FieldSchema {
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Column position of `field`, if it is part of the schema.
    pub fn position(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.position(field).is_some()
    }
}

/// Build the schema for comparing `left` against `right`.
///
/// Returns an empty schema when both collections are empty.
pub fn build_schema(left: &[Row], right: &[Row], config: &SchemaConfig) -> FieldSchema {
    let union: BTreeSet<&str> = left
        .iter()
        .chain(right)
        .flat_map(Row::field_names)
        .filter(|f| !config.is_ignored(f))
        .collect();

    let mut fields: Vec<String> = Vec::with_capacity(union.len());
    for priority in &config.priority_fields {
        if union.contains(priority.as_str()) && !fields.contains(priority) {
            fields.push(priority.clone());
        }
    }
    // BTreeSet iteration is already ascending by code point.
    fields.extend(
        union
            .into_iter()
            .filter(|f| !config.is_priority(f))
            .map(str::to_string),
    );

    FieldSchema { fields }
}
