//! Row-oriented store with filter and map operations

use std::fmt;

use tracing::debug;

use crate::error::{Error, Result};
use crate::slice::SliceRange;
use crate::transform::{batch_from_rows, rows_from_batch, BatchTransform, RowTransform};
use crate::value::Row;

/// An ordered, fully materialized sequence of rows
///
/// Every operation returns a new store and leaves the receiver untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowStore {
    /// The rows, in stored order
    rows: Vec<Row>,

    /// Keys of the first row, captured at construction
    column_names: Vec<String>,
}

impl RowStore {
    /// Create a new store from rows
    ///
    /// The column names are taken from the first row. Later rows are not
    /// checked against them.
    pub fn new(rows: Vec<Row>) -> Self {
        let column_names = rows
            .first()
            .map(|row| row.keys().map(str::to_string).collect())
            .unwrap_or_default();

        Self { rows, column_names }
    }

    /// Create an empty store
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get the number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if this store has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names captured from the first row at construction
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Get all rows
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get a row by position; negative positions count from the end
    pub fn get(&self, index: isize) -> Result<&Row> {
        let len = self.rows.len();
        let out_of_range = || Error::IndexOutOfRange { index, len };

        let position = if index < 0 {
            len.checked_sub(index.unsigned_abs()).ok_or_else(out_of_range)?
        } else {
            index.unsigned_abs()
        };

        self.rows.get(position).ok_or_else(out_of_range)
    }

    /// Get the rows covered by a start/stop/step range
    ///
    /// Out-of-range bounds are clipped, never rejected.
    pub fn slice(&self, range: impl Into<SliceRange>) -> Result<Vec<&Row>> {
        let positions = range.into().indices(self.rows.len())?;
        Ok(positions.into_iter().map(|i| &self.rows[i]).collect())
    }

    /// Iterate over rows in stored order
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Keep the rows for which `predicate` returns true, in original order
    pub fn filter<P>(&self, mut predicate: P) -> RowStore
    where
        P: FnMut(&Row) -> bool,
    {
        let rows: Vec<Row> = self.rows.iter().filter(|&row| predicate(row)).cloned().collect();

        debug!(input = self.rows.len(), output = rows.len(), "filtered rows");
        RowStore::new(rows)
    }

    /// Apply `transform` to every row, then drop `remove_columns` from the output
    ///
    /// The output has exactly as many rows as the input. Names in
    /// `remove_columns` that a row lacks are ignored.
    pub fn map<T>(&self, mut transform: T, remove_columns: &[&str]) -> RowStore
    where
        T: RowTransform,
    {
        let mut rows: Vec<Row> = self.rows.iter().map(|row| transform.transform(row)).collect();
        remove_from(&mut rows, remove_columns);

        debug!(rows = rows.len(), removed = remove_columns.len(), "mapped rows");
        RowStore::new(rows)
    }

    /// Apply `transform` once to the whole store as a batch
    ///
    /// The batch holds, for each of [`column_names`](Self::column_names),
    /// that field's values across all rows. The returned batch is split back
    /// into rows: its first column sets the row count, and an empty batch
    /// yields an empty store. `remove_columns` is applied to the new rows.
    ///
    /// Fails with [`Error::ShapeMismatch`] if a row lacks one of the column
    /// names, or if the returned columns differ in length.
    pub fn map_batched<T>(&self, mut transform: T, remove_columns: &[&str]) -> Result<RowStore>
    where
        T: BatchTransform,
    {
        let batch = batch_from_rows(&self.rows, &self.column_names)?;
        let mut rows = rows_from_batch(transform.transform(batch))?;
        remove_from(&mut rows, remove_columns);

        debug!(input = self.rows.len(), output = rows.len(), "mapped batch");
        Ok(RowStore::new(rows))
    }
}

/// Drop the named fields from freshly built rows
fn remove_from(rows: &mut [Row], remove_columns: &[&str]) {
    if remove_columns.is_empty() {
        return;
    }

    for row in rows {
        for name in remove_columns {
            row.remove(name);
        }
    }
}

impl From<Vec<Row>> for RowStore {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

impl FromIterator<Row> for RowStore {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RowStore {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl IntoIterator for RowStore {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl fmt::Display for RowStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RowStore(num_rows={})", self.rows.len())
    }
}
