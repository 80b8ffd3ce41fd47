//! Transform contracts for row stores
//!
//! A [`RowTransform`] turns one borrowed row into a freshly built row. A
//! [`BatchTransform`] receives the whole store re-packaged as a [`Batch`]
//! (one value sequence per column) and returns a batch of the same shape.
//! Both are implemented for matching closures.

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::value::{Row, Value};

/// Columnar re-packaging of rows: column name to the values of that column
pub type Batch = IndexMap<String, Vec<Value>>;

/// A transformation applied to each row independently
pub trait RowTransform {
    /// Build the output row for `row`
    ///
    /// The input is borrowed, so the output is always a distinct row.
    fn transform(&mut self, row: &Row) -> Row;
}

impl<F> RowTransform for F
where
    F: FnMut(&Row) -> Row,
{
    fn transform(&mut self, row: &Row) -> Row {
        self(row)
    }
}

/// A transformation applied once to a whole batch
pub trait BatchTransform {
    /// Build the output batch for `batch`
    ///
    /// Every returned sequence must have the same length; that length
    /// becomes the number of output rows.
    fn transform(&mut self, batch: Batch) -> Batch;
}

impl<F> BatchTransform for F
where
    F: FnMut(Batch) -> Batch,
{
    fn transform(&mut self, batch: Batch) -> Batch {
        self(batch)
    }
}

/// Gather the values of `column_names` across `rows`, in row order
pub(crate) fn batch_from_rows(rows: &[Row], column_names: &[String]) -> Result<Batch> {
    let mut batch = Batch::with_capacity(column_names.len());

    for name in column_names {
        let values = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                row.get(name).cloned().ok_or_else(|| {
                    Error::ShapeMismatch(format!("row {i} is missing column '{name}'"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        batch.insert(name.clone(), values);
    }

    Ok(batch)
}

/// Split a batch back into rows
///
/// The row count comes from the first column; every other column must
/// match it.
pub(crate) fn rows_from_batch(batch: Batch) -> Result<Vec<Row>> {
    let Some(length) = batch.values().next().map(Vec::len) else {
        return Ok(Vec::new());
    };

    if let Some((name, values)) = batch.iter().find(|(_, values)| values.len() != length) {
        return Err(Error::ShapeMismatch(format!(
            "batch column '{name}' has {} values, expected {length}",
            values.len()
        )));
    }

    let width = batch.len();
    let mut rows: Vec<Row> = (0..length).map(|_| Row::with_capacity(width)).collect();

    for (name, values) in batch {
        for (row, value) in rows.iter_mut().zip(values) {
            row.insert(name.clone(), value);
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_from_rows_follows_column_names() {
        let rows = vec![row! { "a" => 1, "b" => "x" }, row! { "b" => "y", "a" => 2 }];
        let names = vec!["b".to_string(), "a".to_string()];

        let batch = batch_from_rows(&rows, &names).unwrap();
        assert_eq!(batch.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(batch["a"], vec![value!(1), value!(2)]);
        assert_eq!(batch["b"], vec![value!("x"), value!("y")]);
    }

    #[test]
    fn test_batch_from_rows_missing_field() {
        let rows = vec![row! { "a" => 1 }, row! { "c" => 2 }];
        let err = batch_from_rows(&rows, &["a".to_string()]).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch(_)));
    }

    #[test]
    fn test_rows_from_batch() {
        let mut batch = Batch::new();
        batch.insert("x".into(), vec![value!(1), value!(2)]);
        batch.insert("y".into(), vec![value!("a"), value!("b")]);

        let rows = rows_from_batch(batch).unwrap();
        assert_eq!(rows, vec![row! { "x" => 1, "y" => "a" }, row! { "x" => 2, "y" => "b" }]);
    }

    #[test]
    fn test_rows_from_empty_batch() {
        assert!(rows_from_batch(Batch::new()).unwrap().is_empty());

        let mut batch = Batch::new();
        batch.insert("x".into(), Vec::new());
        assert!(rows_from_batch(batch).unwrap().is_empty());
    }

    #[test]
    fn test_rows_from_ragged_batch() {
        let mut batch = Batch::new();
        batch.insert("x".into(), vec![value!(1), value!(2)]);
        batch.insert("y".into(), vec![value!(1)]);

        let err = rows_from_batch(batch).unwrap_err();
        assert_eq!(
            err,
            Error::ShapeMismatch("batch column 'y' has 1 values, expected 2".into())
        );
    }
}
