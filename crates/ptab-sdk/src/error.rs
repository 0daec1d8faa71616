use std::time::Duration;

use thiserror::Error;

use ptab_types::VersionId;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("two versions must be selected to compare")]
    MissingVersion,

    #[error("cannot compare version {0} with itself; select two different versions")]
    SameVersion(VersionId),

    #[error("failed to load version {id}: {source}")]
    Fetch {
        id: VersionId,
        #[source]
        source: ptab_store::StoreError,
    },

    #[error("loading versions timed out after {0:?}")]
    Timeout(Duration),

    #[error("version not found: {0}")]
    NotFound(VersionId),

    #[error("store error: {0}")]
    Store(#[from] ptab_store::StoreError),

    #[error("ingest error: {0}")]
    Ingest(#[from] ptab_ingest::IngestError),

    #[error("diff error: {0}")]
    Diff(#[from] ptab_diff::DiffError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("cannot render configuration: {0}")]
    RenderConfig(#[from] toml::ser::Error),
}

impl SdkError {
    /// Failures the user can resolve by triggering the comparison again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::Timeout(_))
    }

    /// Requests rejected before any data was loaded.
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, Self::MissingVersion | Self::SameVersion(_))
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
