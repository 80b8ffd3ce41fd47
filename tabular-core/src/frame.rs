//! Column frame: a small columnar table for reporting
//!
//! A [`ColumnFrame`] holds an ordered list of column names and a row-major
//! matrix of values where every record has one value per column. Projection,
//! sorting and truncation all build a new frame.

use std::fmt;

use indexmap::IndexMap;

use crate::column::Column;
use crate::error::{Error, Result};
use crate::value::Value;

/// An ordered collection of equal-length columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnFrame {
    /// Column names, in display order
    columns: Vec<String>,

    /// Records, one value per column each
    data: Vec<Vec<Value>>,
}

impl ColumnFrame {
    /// Create a frame with no columns and no rows
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a frame from `(name, values)` pairs
    ///
    /// Columns keep the order of the pairs. All value sequences must have
    /// the same length.
    pub fn from_columns<I, K, V>(data: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Vec<V>)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let data = collect_columns(data);
        let order: Vec<String> = data.keys().cloned().collect();
        Self::assemble(data, order)
    }

    /// Build a frame from `(name, values)` pairs, with an explicit column order
    ///
    /// Only the listed columns are kept. A listed name that is not among the
    /// pairs fails with [`Error::UnknownColumn`].
    pub fn from_columns_ordered<I, K, V>(data: I, columns: &[&str]) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Vec<V>)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let data = collect_columns(data);
        let order = columns.iter().map(|name| (*name).to_string()).collect();
        Self::assemble(data, order)
    }

    fn assemble(mut data: IndexMap<String, Vec<Value>>, columns: Vec<String>) -> Result<Self> {
        // Validate names and lengths before transposing
        let mut row_count = None;
        for name in &columns {
            let values = data
                .get(name)
                .ok_or_else(|| Error::UnknownColumn(name.clone()))?;
            match row_count {
                None => row_count = Some(values.len()),
                Some(expected) if expected != values.len() => {
                    return Err(Error::ShapeMismatch(format!(
                        "column '{name}' has {} values, expected {expected}",
                        values.len()
                    )));
                }
                Some(_) => {}
            }
        }
        let row_count = row_count.unwrap_or(0);

        let mut records: Vec<Vec<Value>> = (0..row_count)
            .map(|_| Vec::with_capacity(columns.len()))
            .collect();

        for (position, name) in columns.iter().enumerate() {
            // A column listed twice is copied rather than moved out
            let repeated = columns[position + 1..].contains(name);
            let values = if repeated {
                data.get(name).cloned().unwrap_or_default()
            } else {
                data.swap_remove(name).unwrap_or_default()
            };

            for (record, value) in records.iter_mut().zip(values) {
                record.push(value);
            }
        }

        Ok(Self {
            columns,
            data: records,
        })
    }

    /// Build a frame from positional records with placeholder column names
    ///
    /// The columns are called `col_0`, `col_1`, ..., sized to the first
    /// record. Every record must have that many values.
    pub fn from_records<I, R, V>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let data = collect_records(records);
        let columns = data
            .first()
            .map(|record| (0..record.len()).map(|i| format!("col_{i}")).collect())
            .unwrap_or_default();
        Self::checked(columns, data)
    }

    /// Build a frame from positional records with the given column names
    ///
    /// Every record must have one value per column.
    pub fn from_records_named<I, R, V>(records: I, columns: &[&str]) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let data = collect_records(records);
        let columns = columns.iter().map(|name| (*name).to_string()).collect();
        Self::checked(columns, data)
    }

    fn checked(columns: Vec<String>, data: Vec<Vec<Value>>) -> Result<Self> {
        if let Some((i, record)) = data
            .iter()
            .enumerate()
            .find(|(_, record)| record.len() != columns.len())
        {
            return Err(Error::ShapeMismatch(format!(
                "record {i} has {} values, expected {}",
                record.len(),
                columns.len()
            )));
        }

        Ok(Self { columns, data })
    }

    /// Column names in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Records in row order
    pub fn records(&self) -> &[Vec<Value>] {
        &self.data
    }

    /// Get the number of rows
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if this frame has no rows
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Position of a column by name
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|column| column == name)
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))
    }

    /// Create a projection with only the named columns, in the given order
    pub fn select(&self, names: &[&str]) -> Result<ColumnFrame> {
        let indices = names
            .iter()
            .map(|name| self.index_of(name))
            .collect::<Result<Vec<_>>>()?;

        let data = self
            .data
            .iter()
            .map(|record| indices.iter().map(|&i| record[i].clone()).collect())
            .collect();

        Ok(ColumnFrame {
            columns: names.iter().map(|name| (*name).to_string()).collect(),
            data,
        })
    }

    /// Get one column's values across all rows
    pub fn select_one(&self, name: &str) -> Result<Column> {
        let index = self.index_of(name)?;
        let values = self.data.iter().map(|record| record[index].clone()).collect();
        Ok(Column::new(name, values))
    }

    /// Stable sort of all rows by one column
    ///
    /// Rows with equal keys keep their original relative order, in both
    /// directions.
    pub fn sort_values(&self, name: &str, ascending: bool) -> Result<ColumnFrame> {
        let index = self.index_of(name)?;

        let mut data = self.data.clone();
        data.sort_by(|a, b| {
            let ordering = a[index].compare(&b[index]);
            if ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });

        Ok(ColumnFrame {
            columns: self.columns.clone(),
            data,
        })
    }

    /// The first `n` rows, or the whole frame if it is shorter
    pub fn head(&self, n: usize) -> ColumnFrame {
        ColumnFrame {
            columns: self.columns.clone(),
            data: self.data.iter().take(n).cloned().collect(),
        }
    }
}

fn collect_records<I, R, V>(records: I) -> Vec<Vec<Value>>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = V>,
    V: Into<Value>,
{
    records
        .into_iter()
        .map(|record| record.into_iter().map(Into::into).collect())
        .collect()
}

fn collect_columns<I, K, V>(data: I) -> IndexMap<String, Vec<Value>>
where
    I: IntoIterator<Item = (K, Vec<V>)>,
    K: Into<String>,
    V: Into<Value>,
{
    data.into_iter()
        .map(|(name, values)| (name.into(), values.into_iter().map(Into::into).collect()))
        .collect()
}

impl fmt::Display for ColumnFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.columns.join(" | "))?;

        for record in &self.data {
            writeln!(f)?;
            for (i, value) in record.iter().enumerate() {
                if i > 0 {
                    write!(f, " | ")?;
                }
                write!(f, "{value}")?;
            }
        }

        Ok(())
    }
}
