//! Foundation types for versioned price tables.
//!
//! A price table is a collection of flat rows, one per priced device model,
//! saved as named versions. Every other `ptab` crate depends on these types.
//!
//! # Key Types
//!
//! - [`FieldValue`] -- A single cell value (null, bool, number, text)
//! - [`Row`] -- A flat record keyed by field name
//! - [`VersionId`] -- Storage key derived from a human-supplied version name
//! - [`VersionMeta`] -- Category/partner/region/name/timestamp of a version

pub mod error;
pub mod fields;
pub mod row;
pub mod value;
pub mod version;

pub use error::TypeError;
pub use row::Row;
pub use value::FieldValue;
pub use version::{default_version_name, VersionId, VersionMeta};
