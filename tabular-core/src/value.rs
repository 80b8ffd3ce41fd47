//! Dynamic values and rows
//!
//! A [`Row`] maps field names to [`Value`]s and keeps its keys in insertion
//! order, which is what [`RowStore::column_names`](crate::RowStore::column_names)
//! is derived from. No schema is attached to either type.

use std::cmp::Ordering;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A dynamically typed cell value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing value
    #[default]
    Null,

    /// Boolean
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit floating point
    Float(f64),

    /// UTF-8 text
    Str(String),

    /// Ordered sequence of values
    List(Vec<Value>),

    /// Ordered mapping of name to value
    Map(IndexMap<String, Value>),
}

impl Value {
    /// Name of the variant, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value is an integer or a float
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Borrow the text of a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get the boolean of a boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the integer of an integer value
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get a numeric value widened to `f64`
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Borrow the elements of a list value
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the entries of a map value
    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    // Cross-type ordering: Null < Bool < numbers < Str < List < Map
    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::Str(_) => 3,
            Value::List(_) => 4,
            Value::Map(_) => 5,
        }
    }

    /// Total order over values, used for sorting
    ///
    /// Integers and floats compare numerically, floats use IEEE total
    /// ordering, lists and maps compare element by element and then by
    /// length. Values of unrelated types are ordered by type.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Int(a), Value::Float(b)) => compare_int_float(*a, *b),
            (Value::Float(a), Value::Int(b)) => compare_int_float(*b, *a).reverse(),
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            (Value::List(a), Value::List(b)) => a
                .iter()
                .zip(b)
                .map(|(x, y)| x.compare(y))
                .find(|ord| ord.is_ne())
                .unwrap_or_else(|| a.len().cmp(&b.len())),
            (Value::Map(a), Value::Map(b)) => a
                .iter()
                .zip(b)
                .map(|((ka, va), (kb, vb))| ka.cmp(kb).then_with(|| va.compare(vb)))
                .find(|ord| ord.is_ne())
                .unwrap_or_else(|| a.len().cmp(&b.len())),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Exact ordering of an integer against a float
///
/// NaN sorts where `total_cmp` puts it: above everything when positive,
/// below everything when negative.
#[allow(clippy::cast_possible_truncation)]
fn compare_int_float(int: i64, float: f64) -> Ordering {
    // 2^63, the first float past i64::MAX
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    if float.is_nan() {
        return if float.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if float >= LIMIT {
        return Ordering::Less;
    }
    if float < -LIMIT {
        return Ordering::Greater;
    }

    // floor lies in [-2^63, 2^63) here, so the cast is exact
    let floor = float.floor();
    let whole = floor as i64;
    int.cmp(&whole).then(if float > floor {
        Ordering::Less
    } else {
        Ordering::Equal
    })
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {item}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<usize> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(v: usize) -> Self {
        i64::try_from(v).map_or(Value::Float(v as f64), Value::Int)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Str(v.clone())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(v: IndexMap<String, Value>) -> Self {
        Value::Map(v)
    }
}

impl From<Row> for Value {
    fn from(row: Row) -> Self {
        Value::Map(row.0)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// A single record: field name to value, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(IndexMap<String, Value>);

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Create an empty row with room for `capacity` fields
    pub fn with_capacity(capacity: usize) -> Self {
        Self(IndexMap::with_capacity(capacity))
    }

    /// Number of fields in this row
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if this row has no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get a field value by name
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get a text field by name
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Check if a field is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Set a field, returning the previous value if any
    ///
    /// A new key is appended; an existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Remove a field, keeping the order of the remaining fields
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Field names in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Field values in order
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.0.values()
    }

    /// Iterate over `(name, value)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<IndexMap<String, Value>> for Row {
    fn from(map: IndexMap<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl IntoIterator for Row {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_row_keeps_insertion_order() {
        let mut row = row! { "b" => 1, "a" => 2, "c" => 3 };
        assert_eq!(row.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);

        row.remove("a");
        assert_eq!(row.keys().collect::<Vec<_>>(), vec!["b", "c"]);

        // Overwriting keeps the original slot
        row.insert("b", 10);
        assert_eq!(row.keys().collect::<Vec<_>>(), vec!["b", "c"]);
        assert_eq!(row.get("b"), Some(&Value::Int(10)));
    }

    #[test_case(value!(1), value!(2), Ordering::Less ; "ints")]
    #[test_case(value!(2), value!(1.5), Ordering::Greater ; "int against float")]
    #[test_case(value!(1.0), value!(1), Ordering::Equal ; "float equals int")]
    #[test_case(value!(9_007_199_254_740_993_i64), value!(9_007_199_254_740_992.0), Ordering::Greater ; "int above float past f64 precision")]
    #[test_case(value!(i64::MAX), value!(9.223_372_036_854_775_807e18), Ordering::Less ; "max int below float limit")]
    #[test_case(value!(i64::MIN), value!(-9.223_372_036_854_775_808e18), Ordering::Equal ; "min int equals float limit")]
    #[test_case(value!(-3), value!(-2.5), Ordering::Less ; "negative fraction")]
    #[test_case(value!(0), value!(f64::INFINITY), Ordering::Less ; "below infinity")]
    #[test_case(value!(0), value!(f64::NAN), Ordering::Less ; "below nan")]
    #[test_case(Value::Null, value!(false), Ordering::Less ; "null first")]
    #[test_case(value!("b"), value!("a"), Ordering::Greater ; "strings")]
    #[test_case(value!(100), value!("1"), Ordering::Less ; "numbers before strings")]
    #[test_case(value!(vec![1, 2]), value!(vec![1, 2, 0]), Ordering::Less ; "list prefix")]
    fn test_compare(a: Value, b: Value, expected: Ordering) {
        assert_eq!(a.compare(&b), expected);
        assert_eq!(b.compare(&a), expected.reverse());
    }

    #[test]
    fn test_json_conversion() {
        let json = serde_json::json!({
            "text": ["City 7"],
            "answer_start": [33],
            "score": 0.5,
        });

        let value = Value::from(json);
        let map = value.as_map().unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map["text"], value!(vec!["City 7"]));
        assert_eq!(map["answer_start"], value!(vec![33]));
        assert_eq!(map["score"], Value::Float(0.5));
    }

    #[test]
    fn test_row_serde_is_plain_object() {
        let row = row! { "id" => "1", "n" => 2, "missing" => Value::Null };
        let text = serde_json::to_string(&row).unwrap();
        assert_eq!(text, r#"{"id":"1","n":2,"missing":null}"#);

        let back: Row = serde_json::from_str(&text).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn test_display() {
        let value = value!(vec![value!("a"), value!(1), Value::Null]);
        assert_eq!(value.to_string(), "[a, 1, null]");
    }
}
