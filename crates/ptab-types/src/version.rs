use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Characters that cannot appear in a stored version key.
const UNSAFE_CHARS: &[char] = &['.', '#', '$', '/', '[', ']'];

/// Storage key of a saved version.
///
/// Derived deterministically from the human-supplied version name by
/// replacing path-unsafe characters and whitespace with `_`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionId(String);

impl VersionId {
    /// Wrap an existing key verbatim.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive the key for a version name.
    ///
    /// ```
    /// use ptab_types::VersionId;
    ///
    /// let id = VersionId::from_name("galaxy_partner_kr_(2024.05.01)").unwrap();
    /// assert_eq!(id.as_str(), "galaxy_partner_kr_(2024_05_01)");
    /// ```
    pub fn from_name(name: &str) -> Result<Self, TypeError> {
        if name.trim().is_empty() {
            return Err(TypeError::InvalidVersionName(name.to_string()));
        }
        let id = name
            .chars()
            .map(|c| {
                if c.is_whitespace() || UNSAFE_CHARS.contains(&c) {
                    '_'
                } else {
                    c
                }
            })
            .collect();
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VersionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Descriptive metadata stored alongside a version's rows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionMeta {
    pub id: VersionId,
    pub version_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub partner: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl VersionMeta {
    /// Human-readable label for version pickers.
    ///
    /// Names that already start with `category_partner_region` are shown
    /// as-is; anything else is prefixed with the localized category and
    /// region labels.
    pub fn label(&self) -> String {
        let base = format!("{}_{}_{}", self.category, self.partner, self.region);
        if self.version_name.starts_with(&base) {
            return self.version_name.clone();
        }
        let name = if self.version_name.is_empty() {
            self.id.as_str()
        } else {
            &self.version_name
        };
        format!(
            "[{}]_{}_{}_{}",
            category_label(&self.category),
            self.partner,
            region_label(&self.region),
            name
        )
    }
}

/// Localized label for a category code. Unknown codes pass through.
pub fn category_label(category: &str) -> &str {
    match category {
        "galaxyfold" => "갤럭시 폴드/플립",
        "galaxy" => "갤럭시",
        "apple" => "애플",
        "ipad" => "아이패드",
        other => other,
    }
}

/// Localized label for a region code. Unknown codes pass through.
pub fn region_label(region: &str) -> &str {
    match region {
        "kr" => "국내",
        "global" => "국외",
        other => other,
    }
}

/// Name proposed when saving a new version: `category_partner_region_(YYYY_MM_DD)`.
pub fn default_version_name(
    category: &str,
    partner: &str,
    region: &str,
    date: NaiveDate,
) -> String {
    format!("{category}_{partner}_{region}_({})", date.format("%Y_%m_%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(name: &str) -> VersionMeta {
        VersionMeta {
            id: VersionId::from_name(name).unwrap(),
            version_name: name.into(),
            category: "galaxy".into(),
            partner: "다원트레이드".into(),
            region: "kr".into(),
            updated_at: None,
        }
    }

    #[test]
    fn unsafe_characters_replaced() {
        let id = VersionId::from_name("a.b#c$d/e[f]g h\ti").unwrap();
        assert_eq!(id.as_str(), "a_b_c_d_e_f_g_h_i");
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = VersionId::from_name("spring list 2024").unwrap();
        let b = VersionId::from_name("spring list 2024").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn blank_name_rejected() {
        assert!(VersionId::from_name("").is_err());
        assert!(VersionId::from_name("   ").is_err());
    }

    #[test]
    fn label_keeps_conventional_names() {
        let m = meta("galaxy_다원트레이드_kr_(2024_05_01)");
        assert_eq!(m.label(), "galaxy_다원트레이드_kr_(2024_05_01)");
    }

    #[test]
    fn label_prefixes_other_names() {
        let m = meta("spring");
        assert_eq!(m.label(), "[갤럭시]_다원트레이드_국내_spring");
    }

    #[test]
    fn unknown_codes_pass_through() {
        assert_eq!(category_label("pixel"), "pixel");
        assert_eq!(region_label("jp"), "jp");
    }

    #[test]
    fn default_name_format() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(
            default_version_name("apple", "p", "global", date),
            "apple_p_global_(2024_05_01)"
        );
    }

    #[test]
    fn meta_json_uses_camel_case() {
        let json = serde_json::to_value(meta("x")).unwrap();
        assert!(json.get("versionName").is_some());
        assert!(json.get("updatedAt").is_some());
    }
}
