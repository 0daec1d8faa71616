//! Version diff engine for price tables.
//!
//! Compares two versions of a price table (each a collection of keyed rows)
//! and produces a field-level difference report ready for rendering,
//! filtering and statistics. The engine is a pure function of its two inputs:
//! it performs no I/O and never fails on malformed rows.
//!
//! # Pipeline
//!
//! 1. [`build_schema`] -- ordered column list from the union of both sides
//! 2. [`RowIndex`] -- identity key → row lookup per side
//! 3. [`diff_rows`] / [`DiffEngine`] -- per-key classification and cell diffs
//! 4. [`DiffSummary`] / [`filter_rows`] -- counts and filtered views
//!
//! # Key Types
//!
//! - [`TableDiff`] / [`RowDiff`] / [`CellDiff`] -- the diff report
//! - [`Classification`] -- `added`, `deleted`, `changed`, `same`
//! - [`DiffConfig`] / [`SchemaConfig`] / [`KeyOrder`] -- engine configuration

pub mod collate;
pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod schema;
pub mod summary;

pub use collate::{compare_keys, locale_cmp};
pub use config::{DiffConfig, KeyOrder, SchemaConfig};
pub use engine::{
    change_percent, diff_rows, CellDiff, Classification, DiffEngine, RowDiff, TableDiff,
};
pub use error::{DiffError, DiffResult};
pub use index::{IndexReport, RowIndex};
pub use schema::{build_schema, FieldSchema};
pub use summary::{filter_rows, DiffSummary, ViewFilter};
