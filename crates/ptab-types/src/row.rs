use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TypeError;
use crate::fields;
use crate::value::{format_number, FieldValue};

/// One priced item: a flat record mapping field names to values.
///
/// Serialized as a plain JSON object. Field iteration order is by name; the
/// column order used for display comes from the diff schema, not the row.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: BTreeMap<String, FieldValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(
        &mut self,
        field: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.fields.insert(field.into(), value.into())
    }

    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.fields.remove(field)
    }

    /// Look up a field. `None` means the field is absent from this row.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The identity key stored under `field`.
    ///
    /// Text is used as-is and numbers are rendered as a spreadsheet shows
    /// them. Any other value, or absence, yields `None`.
    ///
    /// A code stored as the number `1001` and one stored as the text `"1001"`
    /// therefore share the key `1001`: the two rows are matched, and the code
    /// cell itself reports the type change.
    pub fn key(&self, field: &str) -> Option<String> {
        match self.get(field)? {
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Number(n) => Some(format_number(*n)),
            _ => None,
        }
    }

    /// The item code of this row.
    pub fn code(&self) -> Option<String> {
        self.key(fields::CODE)
    }

    /// Display label stored under `field`.
    ///
    /// Null, empty text, `0`, `NaN` and `false` count as no label, so a
    /// caller can fall back to another row. Whitespace-only text is kept.
    pub fn label(&self, field: &str) -> Option<String> {
        self.get(field)
            .filter(|v| !is_empty_label(v))
            .map(FieldValue::display)
    }

    /// Copy of this row with the transient cache fields removed.
    pub fn without_transient(&self) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .filter(|(k, _)| !fields::is_transient(k))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// `true` when every value is null or blank text.
    pub fn is_blank(&self) -> bool {
        self.fields.values().all(FieldValue::is_blank)
    }

    /// Build a row from a JSON object.
    pub fn from_json(value: Value) -> Result<Self, TypeError> {
        match value {
            Value::Object(map) => Ok(map
                .into_iter()
                .map(|(k, v)| (k, FieldValue::from(v)))
                .collect()),
            other => Err(TypeError::NotAnObject(other.to_string())),
        }
    }
}

fn is_empty_label(value: &FieldValue) -> bool {
    match value {
        FieldValue::Null => true,
        FieldValue::Bool(b) => !b,
        FieldValue::Number(n) => *n == 0.0 || n.is_nan(),
        FieldValue::Text(s) => s.is_empty(),
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
