use ptab_types::FieldValue;

use crate::config::IngestConfig;

/// Map a raw header cell to a field name.
///
/// All whitespace is removed (so `LCD점멍 (미파손)` and `LCD점멍(미파손)`
/// match), then the alias table is consulted. An empty result means the
/// column is dropped.
pub fn normalize_header(raw: &FieldValue, config: &IngestConfig) -> String {
    let clean: String = raw.display().chars().filter(|c| !c.is_whitespace()).collect();
    match config.aliases.get(&clean) {
        Some(alias) => alias.clone(),
        None => clean,
    }
}
