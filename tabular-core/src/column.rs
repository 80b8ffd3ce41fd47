//! Named, read-only column of values

use std::fmt;

use crate::error::{Error, Result};
use crate::value::Value;

/// A column of values taken from a [`ColumnFrame`](crate::ColumnFrame)
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Name of the column
    name: String,

    /// Values in row order
    values: Vec<Value>,
}

impl Column {
    /// Create a new column with the given name and values
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Get the name of this column
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the length of this column (number of values)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if this column is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a value by position
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Get all values
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Iterate over values in row order
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Sum of a numeric column
    ///
    /// Integer columns sum to an integer, anything with a float sums to a
    /// float, and an empty column sums to `0`.
    #[allow(clippy::cast_precision_loss)]
    pub fn sum(&self) -> Result<Value> {
        let mut int_total: i64 = 0;
        let mut float_total: Option<f64> = None;

        for value in &self.values {
            match (value, float_total.as_mut()) {
                (Value::Int(i), Some(total)) => *total += *i as f64,
                (Value::Int(i), None) => {
                    int_total = int_total.checked_add(*i).ok_or_else(|| {
                        Error::InvalidArgument(format!("integer overflow summing '{}'", self.name))
                    })?;
                }
                (Value::Float(f), Some(total)) => *total += f,
                (Value::Float(f), None) => float_total = Some(int_total as f64 + f),
                (other, _) => {
                    return Err(Error::TypeMismatch(format!(
                        "cannot sum {} value in column '{}'",
                        other.type_name(),
                        self.name
                    )));
                }
            }
        }

        Ok(float_total.map_or(Value::Int(int_total), Value::Float))
    }
}

impl<'a> IntoIterator for &'a Column {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::List(self.values.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_ints() {
        let column = Column::new("x", vec![value!(1), value!(2), value!(3)]);
        assert_eq!(column.sum().unwrap(), Value::Int(6));
        assert_eq!(Column::new("empty", Vec::new()).sum().unwrap(), Value::Int(0));
    }

    #[test]
    fn test_sum_mixed_promotes_to_float() {
        let column = Column::new("x", vec![value!(1), value!(0.5), value!(2)]);
        assert_eq!(column.sum().unwrap(), Value::Float(3.5));
    }

    #[test]
    fn test_sum_rejects_text() {
        let column = Column::new("x", vec![value!(1), value!("two")]);
        assert!(matches!(column.sum().unwrap_err(), Error::TypeMismatch(_)));
    }

    #[test]
    fn test_display() {
        let column = Column::new("x", vec![value!(1), value!("a")]);
        assert_eq!(column.to_string(), "[1, a]");
        assert_eq!(column.name(), "x");
        assert_eq!(column.len(), 2);
    }
}
