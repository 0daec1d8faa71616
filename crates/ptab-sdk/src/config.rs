use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use ptab_diff::DiffConfig;
use ptab_ingest::IngestConfig;

use crate::error::SdkResult;

/// Configuration for [`PriceTables`](crate::PriceTables).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SdkConfig {
    /// Upper bound on loading both versions of a comparison.
    pub fetch_timeout_ms: u64,
    pub diff: DiffConfig,
    pub ingest: IngestConfig,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: 10_000,
            diff: DiffConfig::default(),
            ingest: IngestConfig::default(),
        }
    }
}

impl SdkConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn from_toml_str(s: &str) -> SdkResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file; a missing file yields the defaults.
    pub fn load(path: &Path) -> SdkResult<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn to_toml_string(&self) -> SdkResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
