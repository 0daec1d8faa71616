//! High-level API for versioned price tables.
//!
//! Ties the store, ingestion and diff crates together. This is the main
//! entry point for applications embedding price-table comparison.

pub mod compare;
pub mod config;
pub mod error;
pub mod session;
pub mod tables;

pub use compare::{CompareRequest, Comparison, VersionSide};
pub use config::SdkConfig;
pub use error::{SdkError, SdkResult};
pub use session::{CompareOutcome, CompareSession};
pub use tables::PriceTables;

// Re-export key types
pub use ptab_diff::{CellDiff, Classification, DiffSummary, RowDiff, TableDiff, ViewFilter};
pub use ptab_store::{FsRowStore, InMemoryRowStore, RowStore, SaveRequest, VersionDocument};
pub use ptab_types::{FieldValue, Row, VersionId, VersionMeta};
