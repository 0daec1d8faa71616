use ptab_types::{TypeError, VersionId};

/// Errors from version store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The version name or id cannot be used as a storage key.
    #[error("invalid version name: {0:?}")]
    InvalidVersionName(String),

    /// A save was attempted without any rows.
    #[error("refusing to save version {0} with no rows")]
    EmptyRows(VersionId),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<TypeError> for StoreError {
    fn from(e: TypeError) -> Self {
        match e {
            TypeError::InvalidVersionName(name) => Self::InvalidVersionName(name),
            other => Self::InvalidVersionName(other.to_string()),
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
