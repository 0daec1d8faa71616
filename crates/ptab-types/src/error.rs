use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid version name: {0:?}")]
    InvalidVersionName(String),

    #[error("row is not a JSON object: {0}")]
    NotAnObject(String),
}
