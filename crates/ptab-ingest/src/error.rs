use thiserror::Error;

/// Errors raised while turning sheet data into rows.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("sheet has no header row")]
    MissingHeader,

    #[error("expected an array of records or an array of rows, found {0}")]
    NotTabular(&'static str),

    #[error("record {index} is not an object")]
    BadRecord { index: usize },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type IngestResult<T> = Result<T, IngestError>;
