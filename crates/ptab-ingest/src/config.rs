use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use ptab_types::fields;

/// Header aliases applied after whitespace removal.
const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("LCD점멍(미파손)", "LCD점멍_미파손"),
    ("내/외부LCD", "내_외부LCD"),
    ("검불차감(내부)", "검불차감"),
    ("내부잔상차감(중)", "내부잔상차감_중"),
    ("내부잔상차감(강)", "내부잔상차감_강"),
    ("내부잔상차감(대)", "내부잔상차감_대"),
    ("서브잔상차감(중)", "서브잔상차감_중"),
    ("서브잔상차감(강)", "서브잔상차감_강"),
    ("서브잔상차감(대)", "서브잔상차감_대"),
];

/// How sheet headers and values are mapped onto row fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Whether to apply numeric coercion at all.
    pub coerce_numeric: bool,
    /// Fields whose numeric-looking text is converted to numbers.
    pub numeric_fields: Vec<String>,
    /// Cleaned header text → field name.
    pub aliases: BTreeMap<String, String>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            coerce_numeric: true,
            numeric_fields: fields::PRICE_FIELDS.iter().map(|f| f.to_string()).collect(),
            aliases: DEFAULT_ALIASES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }
}

impl IngestConfig {
    pub fn is_numeric(&self, field: &str) -> bool {
        self.numeric_fields.iter().any(|f| f == field)
    }
}
