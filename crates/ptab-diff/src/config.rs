use serde::{Deserialize, Serialize};

use ptab_types::fields;

use crate::error::DiffResult;

/// Named configuration for the field schema builder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Field holding the unique item code.
    pub identity_field: String,
    /// Field holding the human-readable model name.
    pub display_field: String,
    /// Fields emitted first, in this order, when present.
    pub priority_fields: Vec<String>,
    /// Fields excluded from the schema and from comparison.
    pub ignored_fields: Vec<String>,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            identity_field: fields::CODE.into(),
            display_field: fields::MODEL.into(),
            priority_fields: fields::PRIORITY_FIELDS.iter().map(|f| f.to_string()).collect(),
            ignored_fields: fields::TRANSIENT_FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl SchemaConfig {
    pub fn is_ignored(&self, field: &str) -> bool {
        self.ignored_fields.iter().any(|f| f == field)
    }

    pub fn is_priority(&self, field: &str) -> bool {
        self.priority_fields.iter().any(|f| f == field)
    }
}

/// Ordering applied to identity keys in the final report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyOrder {
    /// Human-expected order for mixed alphanumeric codes (see [`crate::locale_cmp`]).
    #[default]
    Locale,
    /// Plain code-point order.
    Ordinal,
}

/// Full configuration of the diff engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    pub key_order: KeyOrder,
    pub schema: SchemaConfig,
}

impl DiffConfig {
    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> DiffResult<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> DiffResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
