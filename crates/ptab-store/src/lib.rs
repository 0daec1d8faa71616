//! Version storage for price tables.
//!
//! A version is one document: descriptive metadata plus the full row
//! collection, keyed by a [`VersionId`] derived from the version name.
//!
//! # Storage Backends
//!
//! All backends implement the async [`RowStore`] trait:
//!
//! - [`InMemoryRowStore`] -- `HashMap`-based store for tests and embedding
//! - [`FsRowStore`] -- one JSON document per version under a root directory
//!
//! # Design Rules
//!
//! 1. A save overwrites the whole document; rows are never merged.
//! 2. Reading a missing version is not an error: [`RowStore::get`] returns
//!    `None` and [`RowStore::fetch_rows`] returns no rows.
//! 3. All I/O errors are propagated, never silently ignored.
//!
//! [`VersionId`]: ptab_types::VersionId

pub mod document;
pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;

pub use document::{SaveRequest, VersionDocument};
pub use error::{StoreError, StoreResult};
pub use fs::FsRowStore;
pub use memory::InMemoryRowStore;
pub use traits::RowStore;
