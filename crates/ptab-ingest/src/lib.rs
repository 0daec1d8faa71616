//! Sheet ingestion for price tables.
//!
//! Turns the output of a spreadsheet reader (a grid whose first row holds the
//! headers) or an exported JSON document into [`Row`]s ready to be saved as a
//! version. Reading the binary workbook itself is left to the caller.
//!
//! [`Row`]: ptab_types::Row

pub mod config;
pub mod error;
pub mod header;
pub mod sheet;

pub use config::IngestConfig;
pub use error::{IngestError, IngestResult};
pub use header::normalize_header;
pub use sheet::{coerce_numeric, rows_from_grid, rows_from_json};
