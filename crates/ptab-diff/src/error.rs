//! Error types for the diff crate.

/// Errors that can occur while configuring the diff engine.
///
/// Diffing itself is infallible; only configuration and parsing of
/// user-supplied filter names can fail.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// The configuration document could not be parsed.
    #[error("invalid diff configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// The configuration could not be rendered back to TOML.
    #[error("cannot render diff configuration: {0}")]
    Render(#[from] toml::ser::Error),

    /// A classification or filter name was not recognized.
    #[error("unknown classification: {0:?}")]
    UnknownClassification(String),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
