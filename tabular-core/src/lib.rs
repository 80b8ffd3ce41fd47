//! Core data structures for in-memory tabular data
//!
//! This crate provides the row-oriented [`RowStore`] with its filter/map
//! semantics, the [`SplitCollection`] that lifts those operations across
//! named subsets, and the columnar [`ColumnFrame`] used for reporting.
//! Every transformation is persistent: the receiver is read, never mutated,
//! and a newly allocated result is returned.

#[macro_use]
mod macros;

pub mod column;
pub mod config;
pub mod error;
pub mod frame;
pub mod row_store;
pub mod slice;
pub mod split;
pub mod transform;
pub mod value;

// Re-export key types for convenience
pub use column::Column;
pub use config::Options;
pub use error::{Error, Result};
pub use frame::ColumnFrame;
pub use row_store::RowStore;
pub use slice::SliceRange;
pub use split::SplitCollection;
pub use transform::{Batch, BatchTransform, RowTransform};
pub use value::{Row, Value};
